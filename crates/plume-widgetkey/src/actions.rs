//! Actions book: what the GUI must redraw after a tree mutation
//!
//! Every mutation records the keys it touched under one [`Action`]. The GUI
//! clears the book, runs one operation, then reads back the net effect.
//! Recording an action cancels a pending opposite one (`hide` then `show`
//! leaves nothing), and dropping a key created in the same batch erases
//! its trail.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::types::KeyId;

/// Category of a recorded change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Widgets to create
    Create,
    /// Widgets to delete
    Drop,
    /// Widgets whose row changed
    Move,
    /// Widgets to show
    Show,
    /// Widgets to hide
    Hide,
    /// Language menus to refresh
    Languages,
    /// Source menus to refresh
    Sources,
    /// Thesaurus value lists to refresh
    Thesaurus,
    /// Minus buttons to show
    ShowMinusButton,
    /// Minus buttons to hide
    HideMinusButton,
}

impl Action {
    /// Every category, in reporting order
    pub const ALL: [Self; 10] = [
        Self::Create,
        Self::Drop,
        Self::Move,
        Self::Show,
        Self::Hide,
        Self::Languages,
        Self::Sources,
        Self::Thesaurus,
        Self::ShowMinusButton,
        Self::HideMinusButton,
    ];

    fn opposite(self) -> Option<Self> {
        match self {
            Self::Show => Some(Self::Hide),
            Self::Hide => Some(Self::Show),
            Self::ShowMinusButton => Some(Self::HideMinusButton),
            Self::HideMinusButton => Some(Self::ShowMinusButton),
            _ => None,
        }
    }
}

/// Keys touched by a batch of mutations, per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsBook {
    pub created: IndexSet<KeyId>,
    pub dropped: IndexSet<KeyId>,
    pub moved: IndexSet<KeyId>,
    pub shown: IndexSet<KeyId>,
    pub hidden: IndexSet<KeyId>,
    pub languages: IndexSet<KeyId>,
    pub sources: IndexSet<KeyId>,
    pub thesaurus: IndexSet<KeyId>,
    pub show_minus_button: IndexSet<KeyId>,
    pub hide_minus_button: IndexSet<KeyId>,
}

impl ActionsBook {
    /// Empty book
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys recorded under `action`
    #[must_use]
    pub fn entries(&self, action: Action) -> &IndexSet<KeyId> {
        match action {
            Action::Create => &self.created,
            Action::Drop => &self.dropped,
            Action::Move => &self.moved,
            Action::Show => &self.shown,
            Action::Hide => &self.hidden,
            Action::Languages => &self.languages,
            Action::Sources => &self.sources,
            Action::Thesaurus => &self.thesaurus,
            Action::ShowMinusButton => &self.show_minus_button,
            Action::HideMinusButton => &self.hide_minus_button,
        }
    }

    fn entries_mut(&mut self, action: Action) -> &mut IndexSet<KeyId> {
        match action {
            Action::Create => &mut self.created,
            Action::Drop => &mut self.dropped,
            Action::Move => &mut self.moved,
            Action::Show => &mut self.shown,
            Action::Hide => &mut self.hidden,
            Action::Languages => &mut self.languages,
            Action::Sources => &mut self.sources,
            Action::Thesaurus => &mut self.thesaurus,
            Action::ShowMinusButton => &mut self.show_minus_button,
            Action::HideMinusButton => &mut self.hide_minus_button,
        }
    }

    /// Record `action` on `key`
    pub fn record(&mut self, action: Action, key: KeyId) {
        if action == Action::Drop {
            let was_created = self.created.shift_remove(&key);
            for other in Action::ALL {
                if other != Action::Drop {
                    self.entries_mut(other).shift_remove(&key);
                }
            }
            if !was_created {
                self.dropped.insert(key);
            }
            return;
        }
        if let Some(opposite) = action.opposite() {
            if self.entries_mut(opposite).shift_remove(&key) {
                return;
            }
        }
        self.entries_mut(action).insert(key);
    }

    /// Check if `key` is recorded under `action`
    #[inline]
    #[must_use]
    pub fn contains(&self, action: Action, key: &KeyId) -> bool {
        self.entries(action).contains(key)
    }

    /// Check if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Action::ALL.iter().all(|a| self.entries(*a).is_empty())
    }

    /// Total number of records
    #[must_use]
    pub fn len(&self) -> usize {
        Action::ALL.iter().map(|a| self.entries(*a).len()).sum()
    }

    /// Append the records of a later batch
    pub fn merge(&mut self, other: &Self) {
        for action in Action::ALL {
            for key in other.entries(action) {
                self.record(action, *key);
            }
        }
    }

    /// Forget every record
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_deduplicated() {
        let mut book = ActionsBook::new();
        let key = KeyId::new();
        book.record(Action::Move, key);
        book.record(Action::Move, key);
        assert_eq!(book.moved.len(), 1);
        assert!(book.contains(Action::Move, &key));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn opposite_records_cancel() {
        let mut book = ActionsBook::new();
        let key = KeyId::new();
        book.record(Action::Hide, key);
        book.record(Action::Show, key);
        assert!(book.is_empty());

        book.record(Action::HideMinusButton, key);
        book.record(Action::ShowMinusButton, key);
        book.record(Action::ShowMinusButton, key);
        assert!(book.contains(Action::ShowMinusButton, &key));
        assert!(!book.contains(Action::HideMinusButton, &key));
    }

    #[test]
    fn dropping_a_fresh_key_leaves_no_trace() {
        let mut book = ActionsBook::new();
        let fresh = KeyId::new();
        let old = KeyId::new();
        book.record(Action::Create, fresh);
        book.record(Action::Move, fresh);
        book.record(Action::Move, old);
        book.record(Action::Drop, fresh);
        book.record(Action::Drop, old);
        assert!(book.created.is_empty());
        assert!(book.moved.is_empty());
        assert_eq!(book.dropped.iter().copied().collect::<Vec<_>>(), vec![old]);
    }

    #[test]
    fn merge_and_serialize() {
        let a = KeyId::new();
        let b = KeyId::new();
        let mut first = ActionsBook::new();
        first.record(Action::Create, a);
        let mut second = ActionsBook::new();
        second.record(Action::Languages, b);
        first.merge(&second);
        assert!(first.contains(Action::Languages, &b));

        let json = serde_json::to_value(&first).unwrap();
        assert_eq!(json["created"][0], serde_json::json!(a.to_string()));
        first.clear();
        assert!(first.is_empty());
    }
}
