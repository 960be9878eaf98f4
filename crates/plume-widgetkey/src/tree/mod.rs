//! The widget-key tree
//!
//! Keys live in an arena indexed by [`KeyId`]; parents and children refer
//! to each other by id. The tree owns its [`Session`], so several trees can
//! be edited side by side.
//!
//! Operations are split across submodules:
//! - `factory`: key creation and validation
//! - `setters`: attribute writes and `update`
//! - `twins`: twin links and masking
//! - `layout`: rows, single-child flags, child hooks, language pool
//! - `ops`: kill, copy, GUI operations, searches

mod factory;
mod layout;
mod ops;
mod setters;
mod twins;

use indexmap::IndexMap;
use plume_rdf::{DatasetId, Iri, PropertyPath, DCAT_DATASET};

use crate::actions::{Action, ActionsBook};
use crate::error::{KeyError, Result};
use crate::key::{FieldConfig, Payload, WidgetKey};
use crate::session::Session;
use crate::types::{KeyId, KeyKind};
use crate::view::KeyView;

/// Arena of widget keys rooted at one dataset
#[derive(Debug, Clone)]
pub struct WidgetTree {
    keys: IndexMap<KeyId, WidgetKey>,
    root: KeyId,
    session: Session,
    /// Key under construction, whose hooks stay silent
    unborn: Option<KeyId>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl WidgetTree {
    /// Tree with a root for a fresh dataset identifier
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self::with_datasetid(session, None)
    }

    /// Tree whose root describes `datasetid`
    #[must_use]
    pub fn with_datasetid(session: Session, datasetid: Option<Iri>) -> Self {
        let datasetid = datasetid.unwrap_or_else(|| DatasetId::new().to_iri());
        let root = WidgetKey::new(KeyKind::Root, None, Payload::Root { datasetid });
        let id = root.id;
        let mut keys = IndexMap::new();
        keys.insert(id, root);
        let mut tree = Self {
            keys,
            root: id,
            session,
            unborn: None,
        };
        tree.record(Action::Create, id);
        tree
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> KeyId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Number of keys, root included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: a tree keeps its root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: KeyId) -> bool {
        self.keys.contains_key(&id)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: KeyId) -> Option<&WidgetKey> {
        self.keys.get(&id)
    }

    /// Read view of a key
    ///
    /// # Errors
    /// `UnknownKey` when `id` is not in the tree.
    pub fn key(&self, id: KeyId) -> Result<KeyView<'_>> {
        self.node(id).map(|key| KeyView::new(self, key))
    }

    /// Every key, parents before their children
    pub fn keys(&self) -> impl Iterator<Item = &WidgetKey> {
        self.keys.values()
    }

    /// Dataset identifier of the root
    #[must_use]
    pub fn datasetid(&self) -> Option<&Iri> {
        self.keys.get(&self.root).and_then(WidgetKey::datasetid)
    }

    /// Replace the dataset identifier of the root
    pub fn set_datasetid(&mut self, datasetid: Iri) {
        if let Some(root) = self.keys.get_mut(&self.root) {
            root.payload = Payload::Root { datasetid };
        }
    }

    /// Parents are assigned once, at creation
    ///
    /// # Errors
    /// Always `ForbiddenOperation` for an existing key.
    pub fn set_parent(&mut self, id: KeyId, _parent: KeyId) -> Result<()> {
        self.node(id)?;
        Err(KeyError::forbidden(
            Some(id),
            "the parent of a key can't be changed",
        ))
    }

    /// Child ids of a group, empty for other keys
    #[must_use]
    pub fn children(&self, id: KeyId) -> &[KeyId] {
        self.keys.get(&id).map_or(&[], WidgetKey::children)
    }

    /// Children that are not ghosts
    #[must_use]
    pub fn real_children(&self, id: KeyId) -> Vec<KeyId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.keys.get(c).is_some_and(WidgetKey::is_real))
            .collect()
    }

    /// Rows and single-child flags go stale until [`Self::resume_computation`]
    pub fn suspend_computation(&mut self) {
        self.session.set_suspended(true);
    }

    /// Recompute rows and single-child flags of every group
    pub fn resume_computation(&mut self) {
        self.session.set_suspended(false);
        let groups: Vec<KeyId> = self
            .keys
            .values()
            .filter(|k| k.kind.is_group())
            .map(|k| k.id)
            .collect();
        for group in groups {
            self.compute_rows(group);
            self.compute_single_children(group);
        }
        tracing::debug!("Computation resumed on {} keys", self.keys.len());
    }

    pub fn clear_actionsbook(&mut self) {
        self.session.clear_actionsbook();
    }

    pub fn unload_actionsbook(&mut self) -> ActionsBook {
        self.session.unload_actionsbook()
    }

    // ------------------------------------------------------------------
    // effective configuration
    // ------------------------------------------------------------------

    /// Field settings governing a key
    ///
    /// Values and property groups inside a group of values use the
    /// group's settings, other values their own.
    #[must_use]
    pub fn effective_config(&self, id: KeyId) -> Option<&FieldConfig> {
        let key = self.keys.get(&id)?;
        match key.kind {
            KeyKind::GroupOfValues | KeyKind::TranslationGroup => key.own_config(),
            KeyKind::Value | KeyKind::GroupOfProperties => match self.value_group_parent(key) {
                Some(group) => group.own_config(),
                None => key.own_config(),
            },
            _ => None,
        }
    }

    /// Predicate of a key, the group's one inside a group of values
    #[must_use]
    pub fn effective_predicate(&self, id: KeyId) -> Option<&Iri> {
        let key = self.keys.get(&id)?;
        if key.kind.is_object() {
            if let Some(group) = self.value_group_parent(key) {
                return group.predicate.as_ref();
            }
        }
        key.predicate.as_ref()
    }

    /// RDF class of a key's value
    #[must_use]
    pub fn effective_rdftype(&self, id: KeyId) -> Option<&Iri> {
        let key = self.keys.get(&id)?;
        match &key.payload {
            Payload::Root { .. } => Some(&*DCAT_DATASET),
            Payload::Properties { rdftype, .. } => match self.value_group_parent(key) {
                Some(group) => group.own_config().and_then(|c| c.rdftype.as_ref()),
                None => rdftype.as_ref(),
            },
            _ => self.effective_config(id).and_then(|c| c.rdftype.as_ref()),
        }
    }

    /// Datatype of a key's value
    #[must_use]
    pub fn effective_xsdtype(&self, id: KeyId) -> Option<&Iri> {
        match self.keys.get(&id)?.kind {
            KeyKind::Value | KeyKind::GroupOfValues | KeyKind::TranslationGroup => {
                self.effective_config(id).and_then(|c| c.xsdtype.as_ref())
            }
            _ => None,
        }
    }

    /// Vocabularies a key's value may come from
    ///
    /// A property group reports the sources of its twin.
    #[must_use]
    pub fn effective_sources(&self, id: KeyId) -> Option<&[Iri]> {
        let key = self.keys.get(&id)?;
        match key.kind {
            KeyKind::GroupOfProperties => key.m_twin().and_then(|t| self.effective_sources(t)),
            KeyKind::Value | KeyKind::GroupOfValues | KeyKind::TranslationGroup => self
                .effective_config(id)
                .and_then(|c| c.sources.as_deref()),
            _ => None,
        }
    }

    /// Property path from the dataset to the key
    #[must_use]
    pub fn path(&self, id: KeyId) -> Option<PropertyPath> {
        let key = self.keys.get(&id)?;
        let parent = key.parent.and_then(|p| self.keys.get(&p));
        match key.kind {
            KeyKind::Root => None,
            KeyKind::Tab | KeyKind::PlusButton | KeyKind::TranslationButton => {
                parent.and_then(|p| self.path(p.id))
            }
            KeyKind::GroupOfValues | KeyKind::TranslationGroup => {
                self.extend_path(parent?, key.predicate.clone()?)
            }
            KeyKind::GroupOfProperties | KeyKind::Value => {
                let parent = parent?;
                if parent.kind.is_value_group() {
                    self.path(parent.id)
                } else {
                    self.extend_path(parent, key.predicate.clone()?)
                }
            }
        }
    }

    fn extend_path(&self, parent: &WidgetKey, predicate: Iri) -> Option<PropertyPath> {
        match self.path(parent.id) {
            Some(path) => Some(path.child(predicate)),
            None => Some(PropertyPath::single(predicate)),
        }
    }

    /// Hidden because the language pool is exhausted
    #[must_use]
    pub fn is_hidden_b(&self, id: KeyId) -> bool {
        let Some(key) = self.keys.get(&id) else {
            return false;
        };
        if key.kind != KeyKind::TranslationButton {
            return false;
        }
        key.parent
            .and_then(|p| self.keys.get(&p))
            .and_then(WidgetKey::value_group)
            .and_then(|g| g.available_languages.as_ref())
            .map_or(true, Vec::is_empty)
    }

    /// Check if the key's widget is not displayed
    #[must_use]
    pub fn is_hidden(&self, id: KeyId) -> bool {
        self.keys
            .get(&id)
            .map_or(true, |k| k.is_ghost || k.is_hidden_m || self.is_hidden_b(id))
    }

    // ------------------------------------------------------------------
    // crate internals
    // ------------------------------------------------------------------

    pub(crate) fn node(&self, id: KeyId) -> Result<&WidgetKey> {
        self.keys.get(&id).ok_or(KeyError::UnknownKey(id))
    }

    pub(crate) fn node_mut(&mut self, id: KeyId) -> Result<&mut WidgetKey> {
        self.keys.get_mut(&id).ok_or(KeyError::UnknownKey(id))
    }

    pub(crate) fn parent_of(&self, id: KeyId) -> Result<KeyId> {
        self.node(id)?
            .parent
            .ok_or_else(|| KeyError::forbidden(Some(id), "the root has no parent"))
    }

    /// Parent of `key` when it is a group of values or a translation group
    pub(crate) fn value_group_parent(&self, key: &WidgetKey) -> Option<&WidgetKey> {
        key.parent
            .and_then(|p| self.keys.get(&p))
            .filter(|p| p.kind.is_value_group())
    }

    pub(crate) fn in_value_group(&self, id: KeyId) -> bool {
        self.keys
            .get(&id)
            .is_some_and(|k| self.value_group_parent(k).is_some())
    }

    pub(crate) fn is_unborn(&self, id: KeyId) -> bool {
        self.unborn == Some(id)
    }

    pub(crate) fn record(&mut self, action: Action, id: KeyId) {
        self.session.record(action, id);
    }

    /// Remove a key and everything below it from the arena
    pub(crate) fn forget_subtree(&mut self, id: KeyId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(key) = self.keys.shift_remove(&current) {
                stack.extend(key.children().iter().copied());
                if let Some(button) = key.button() {
                    stack.push(button);
                }
            }
        }
    }
}
