//! The form as the GUI sees it
//!
//! A [`WidgetsDict`] owns the widget-key tree of one record and the hints of
//! each of its real keys. GUI operations go through the dictionary, which
//! forwards them to the tree and refreshes the hints of every key the
//! returned [`ActionsBook`] names.

use std::fmt;

use indexmap::IndexMap;
use plume_rdf::{Iri, NamespaceManager, PropertyPath, Term, Thesaurus};
use plume_widgetkey::{Action, ActionsBook, Branch, KeyId, KeyKind, WidgetTree};
use tracing::debug;

use crate::config::DictConfig;
use crate::error::{DictError, Result};
use crate::hints::{
    internalize, widget_placement, widget_type, InternalDict, Placement, WidgetKind, WidgetType,
    IRI_SOURCE, MANUAL, NOT_REFERENCED,
};
use crate::values::{register_value, str_value};

/// Values overriding the metagraph, by property path
pub type FormData = IndexMap<PropertyPath, Vec<Term>>;

/// Widget-key tree of a record with the hints of its widgets
pub struct WidgetsDict {
    tree: WidgetTree,
    hints: IndexMap<KeyId, InternalDict>,
    config: DictConfig,
    datasetid: Iri,
    data: FormData,
    nsm: NamespaceManager,
    thesaurus: Box<dyn Thesaurus>,
}

impl fmt::Debug for WidgetsDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetsDict")
            .field("datasetid", &self.datasetid)
            .field("mode", &self.config.mode)
            .field("keys", &self.tree.len())
            .field("widgets", &self.hints.len())
            .finish_non_exhaustive()
    }
}

impl WidgetsDict {
    pub(crate) fn from_parts(
        tree: WidgetTree,
        hints: IndexMap<KeyId, InternalDict>,
        config: DictConfig,
        datasetid: Iri,
        data: FormData,
        nsm: NamespaceManager,
        thesaurus: Box<dyn Thesaurus>,
    ) -> Self {
        Self {
            tree,
            hints,
            config,
            datasetid,
            data,
            nsm,
            thesaurus,
        }
    }

    #[inline]
    #[must_use]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> KeyId {
        self.tree.root()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DictConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn datasetid(&self) -> &Iri {
        &self.datasetid
    }

    /// Override data, with the identifier chosen for the record
    #[inline]
    #[must_use]
    pub fn data(&self) -> &FormData {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.nsm
    }

    /// Number of keys with hints
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: KeyId) -> bool {
        self.hints.contains_key(&id)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: KeyId) -> Option<&InternalDict> {
        self.hints.get(&id)
    }

    /// Keys and hints, in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&KeyId, &InternalDict)> {
        self.hints.iter()
    }

    /// Main widget class of a key
    #[must_use]
    pub fn widget_type(&self, id: KeyId) -> Option<WidgetType> {
        self.tree.key(id).ok().and_then(|view| widget_type(&view))
    }

    /// Placement of one of a key's widgets on its parent's grid
    #[must_use]
    pub fn widget_placement(&self, id: KeyId, kind: WidgetKind) -> Option<Placement> {
        if !self.contains(id) {
            return None;
        }
        widget_placement(&self.tree, id, kind)
    }

    /// Text to display in a value widget
    #[must_use]
    pub fn str_value(&self, id: KeyId) -> Option<String> {
        str_value(&self.tree, id, self.thesaurus.as_ref())
    }

    /// Store the text typed in a value widget
    ///
    /// # Errors
    /// `UnknownKey` for a key without hints, `InvalidValue` for text that
    /// can't be stored
    pub fn register_value(&mut self, id: KeyId, text: Option<&str>) -> Result<()> {
        if !self.contains(id) {
            return Err(DictError::UnknownKey(id));
        }
        register_value(&mut self.tree, id, text, self.thesaurus.as_ref())?;
        self.refresh(id)
    }

    fn refresh(&mut self, id: KeyId) -> Result<()> {
        let hints = internalize(&self.tree, id, self.thesaurus.as_ref())?;
        self.hints.insert(id, hints);
        Ok(())
    }

    /// Bring the hints in line with the tree after an operation
    fn sync(&mut self, book: ActionsBook) -> Result<ActionsBook> {
        for id in &book.dropped {
            self.hints.shift_remove(id);
        }
        let tree = &self.tree;
        self.hints.retain(|id, _| tree.contains(*id));
        for action in Action::ALL {
            if action == Action::Drop {
                continue;
            }
            for id in book.entries(action) {
                if self.tree.get(*id).is_some_and(|k| k.is_real()) {
                    self.refresh(*id)?;
                }
            }
        }
        Ok(book)
    }

    /// Add a value through a plus or translation button
    ///
    /// # Errors
    /// `Tree` when `id` is not a button
    pub fn add(&mut self, id: KeyId) -> Result<ActionsBook> {
        let book = self.tree.add(id)?;
        self.sync(book)
    }

    /// Remove a value or a group of properties through its minus button
    ///
    /// # Errors
    /// `Tree` when the key may not be removed
    pub fn drop(&mut self, id: KeyId) -> Result<ActionsBook> {
        let book = self.tree.drop(id)?;
        self.sync(book)
    }

    /// Show the twin of a key instead of the key
    ///
    /// # Errors
    /// `Tree` when the key has no twin
    pub fn switch_twin(&mut self, id: KeyId) -> Result<ActionsBook> {
        let book = self.tree.switch_twin(id)?;
        self.sync(book)
    }

    /// Change the language of a value
    ///
    /// # Errors
    /// `Tree` for an unknown key or a language a translation group can't
    /// take
    pub fn change_language(&mut self, id: KeyId, language: Option<String>) -> Result<ActionsBook> {
        let book = self.tree.change_language(id, language)?;
        self.sync(book)
    }

    /// Change the vocabulary of a value
    ///
    /// # Errors
    /// `Tree` for an unknown key
    pub fn change_source(&mut self, id: KeyId, source: Option<Iri>) -> Result<ActionsBook> {
        let book = self.tree.change_source(id, source)?;
        self.sync(book)
    }

    /// Apply the source picked in a source menu, by its label
    ///
    /// The manual and IRI entries switch between twins, the unreferenced
    /// entry clears the vocabulary, other labels name one of the key's
    /// vocabularies. Unknown labels change nothing.
    ///
    /// # Errors
    /// `UnknownKey` for a key without hints, `Tree` when the switch fails
    pub fn change_source_label(&mut self, id: KeyId, label: &str) -> Result<ActionsBook> {
        let view = self.tree.key(id)?;
        if !self.contains(id) {
            return Err(DictError::UnknownKey(id));
        }
        let is_value = view.kind() == KeyKind::Value;
        match label {
            MANUAL if is_value && view.m_twin().is_some() => self.switch_twin(id),
            IRI_SOURCE if !is_value && view.m_twin().is_some() => self.switch_twin(id),
            MANUAL | IRI_SOURCE => Ok(ActionsBook::new()),
            NOT_REFERENCED => self.change_source(id, None),
            _ => {
                let language = self.tree.session().main_language()?;
                let source = view.sources().and_then(|sources| {
                    sources
                        .iter()
                        .find(|s| self.thesaurus.label(s, language).as_deref() == Some(label))
                        .cloned()
                });
                match source {
                    Some(source) => self.change_source(id, Some(source)),
                    None => {
                        debug!("Ignored source {:?} for key {}", label, id);
                        Ok(ActionsBook::new())
                    }
                }
            }
        }
    }

    /// Paste a branch over the key found at its path
    ///
    /// # Errors
    /// `Tree` when the branch can't be pasted
    pub fn paste_from_path(&mut self, branch: &Branch) -> Result<ActionsBook> {
        let book = self.tree.paste_from_path(branch)?;
        self.sync(book)
    }

    /// Paste a branch over a group of properties of the same class
    ///
    /// # Errors
    /// `Tree` when the branch can't be pasted on `target`
    pub fn paste_from_rdftype(&mut self, target: KeyId, branch: &Branch) -> Result<ActionsBook> {
        let book = self.tree.paste_from_rdftype(target, branch)?;
        self.sync(book)
    }

    /// Remove empty groups
    ///
    /// # Errors
    /// `Tree` if the tree is inconsistent
    pub fn clean(&mut self) -> Result<ActionsBook> {
        let book = self.tree.clean()?;
        self.sync(book)
    }

    /// Hints as JSON, keyed by key id
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.hints)?)
    }
}
