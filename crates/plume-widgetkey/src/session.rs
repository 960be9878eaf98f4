//! Per-tree editing context
//!
//! Holds what every key of a tree shares: the allowed languages, the
//! actions book, the suspend flag used during bulk construction, and the
//! GUI switches for source and language buttons.

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionsBook};
use crate::error::{KeyError, Result};
use crate::types::KeyId;

/// Shared state of one widget-key tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    langlist: Vec<String>,
    #[serde(skip)]
    actionsbook: ActionsBook,
    #[serde(skip)]
    no_computation: bool,
    with_source_buttons: bool,
    with_language_buttons: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(["fr", "en"])
    }
}

impl Session {
    /// Session allowing `langlist`, the first language being the main one
    pub fn new<I, S>(langlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            langlist: langlist.into_iter().map(Into::into).collect(),
            actionsbook: ActionsBook::default(),
            no_computation: false,
            with_source_buttons: true,
            with_language_buttons: true,
        }
    }

    /// Builder form toggling source buttons
    #[must_use]
    pub fn with_source_buttons(mut self, enabled: bool) -> Self {
        self.with_source_buttons = enabled;
        self
    }

    /// Builder form toggling language buttons
    #[must_use]
    pub fn with_language_buttons(mut self, enabled: bool) -> Self {
        self.with_language_buttons = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn langlist(&self) -> &[String] {
        &self.langlist
    }

    /// Main language, the first of the list
    ///
    /// # Errors
    /// `MissingParameter` when no language is allowed.
    pub fn main_language(&self) -> Result<&str> {
        self.langlist
            .first()
            .map(String::as_str)
            .ok_or_else(|| KeyError::missing("langlist", None))
    }

    /// Make `language` the main language
    ///
    /// An unknown language is added. The others keep alphabetical order
    /// behind it. Nothing happens while the list is empty.
    pub fn set_main_language(&mut self, language: &str) {
        if language.is_empty() || self.langlist.is_empty() {
            return;
        }
        if !self.langlist.iter().any(|l| l == language) {
            self.langlist.push(language.to_string());
        }
        self.langlist
            .sort_by(|a, b| (a != language, a.as_str()).cmp(&(b != language, b.as_str())));
    }

    #[inline]
    #[must_use]
    pub fn source_buttons(&self) -> bool {
        self.with_source_buttons
    }

    #[inline]
    #[must_use]
    pub fn language_buttons(&self) -> bool {
        self.with_language_buttons
    }

    /// Check if rows and single-child flags are left stale
    #[inline]
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.no_computation
    }

    pub(crate) fn set_suspended(&mut self, suspended: bool) {
        self.no_computation = suspended;
    }

    #[inline]
    #[must_use]
    pub fn actionsbook(&self) -> &ActionsBook {
        &self.actionsbook
    }

    pub(crate) fn record(&mut self, action: Action, key: KeyId) {
        self.actionsbook.record(action, key);
    }

    /// Start a new batch
    pub fn clear_actionsbook(&mut self) {
        self.actionsbook.clear();
    }

    /// Hand the recorded batch over, leaving an empty book
    pub fn unload_actionsbook(&mut self) -> ActionsBook {
        std::mem::take(&mut self.actionsbook)
    }
}
