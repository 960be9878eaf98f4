//! Children of a group key
//!
//! The list itself is plain storage. Its only mutation paths are
//! [`WidgetTree::append_child`](crate::WidgetTree) and
//! [`WidgetTree::remove_child`](crate::WidgetTree), which run the layout
//! and language-pool hooks for born keys.

use serde::{Deserialize, Serialize};

use crate::types::KeyId;

/// Ordered child ids of a group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildrenList(Vec<KeyId>);

impl ChildrenList {
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[KeyId] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: &KeyId) -> bool {
        self.0.contains(key)
    }

    pub(crate) fn push(&mut self, key: KeyId) {
        self.0.push(key);
    }

    /// Remove `key`, keeping the others in order
    pub(crate) fn remove(&mut self, key: &KeyId) -> bool {
        match self.0.iter().position(|k| k == key) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn replace_order(&mut self, order: Vec<KeyId>) {
        debug_assert_eq!(order.len(), self.0.len());
        self.0 = order;
    }
}

impl<'a> IntoIterator for &'a ChildrenList {
    type Item = &'a KeyId;
    type IntoIter = std::slice::Iter<'a, KeyId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
