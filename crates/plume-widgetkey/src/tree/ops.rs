//! Removal, copy, searches and the GUI operations
//!
//! GUI operations clear the session's actions book, mutate the tree and
//! hand back what they recorded. An operation that does not apply to its
//! key returns an empty book.

use plume_rdf::{Iri, PropertyPath, RDF_LANG_STRING};

use crate::actions::{Action, ActionsBook};
use crate::branch::Branch;
use crate::error::{KeyError, Result};
use crate::options::Attribute;
use crate::types::{KeyId, KeyKind};

use super::WidgetTree;

impl WidgetTree {
    /// Remove a key and its descendants
    ///
    /// An object key takes its twin along, unless `preserve_twin` is set,
    /// in which case the twin is unlinked and unmasked. The root is never
    /// removed, only reported as dropped.
    ///
    /// # Errors
    /// `UnknownKey` for an id outside the tree.
    pub fn kill(&mut self, id: KeyId, preserve_twin: bool) -> Result<()> {
        let key = self.node(id)?;
        let kind = key.kind;
        let twin = key.m_twin();
        let Some(parent) = key.parent else {
            self.record(Action::Drop, id);
            return Ok(());
        };

        if kind.is_button() {
            if let Some(group) = self.node_mut(parent)?.value_group_mut() {
                group.button = None;
            }
            self.record(Action::Drop, id);
            self.forget_subtree(id);
            return Ok(());
        }

        self.remove_child(parent, id)?;
        self.record(Action::Drop, id);
        if let Some(twin) = twin {
            if preserve_twin {
                self.release_twin(twin);
                self.compute_rows(parent);
                self.compute_single_children(parent);
            } else {
                self.remove_child(parent, twin)?;
                self.record(Action::Drop, twin);
                self.forget_subtree(twin);
            }
        }
        self.forget_subtree(id);
        tracing::trace!("Killed {} {}", kind, id);
        Ok(())
    }

    /// Copy a key and its descendants under `parent`, or next to the key
    ///
    /// See [`Branch::capture`] for what an empty copy keeps.
    ///
    /// # Errors
    /// `ForbiddenOperation` for the root or a ghost key, then whatever the
    /// factories raise.
    pub fn copy(&mut self, id: KeyId, parent: Option<KeyId>, empty: bool) -> Result<Option<KeyId>> {
        let parent = match parent {
            Some(parent) => parent,
            None => self.parent_of(id)?,
        };
        let branch = Branch::capture(self, id, empty)?;
        branch.instantiate(self, parent)
    }

    // ------------------------------------------------------------------
    // GUI operations
    // ------------------------------------------------------------------

    /// Remove a key through its minus button
    ///
    /// # Errors
    /// `UnknownKey` for an id outside the tree.
    pub fn drop(&mut self, id: KeyId) -> Result<ActionsBook> {
        if !self.has_minus_button(id) {
            return Ok(ActionsBook::new());
        }
        self.clear_actionsbook();
        self.kill(id, false)?;
        Ok(self.unload_actionsbook())
    }

    /// Hide a visible twin and show the other one
    ///
    /// # Errors
    /// `ForbiddenOperation` for keys that can't have a twin.
    pub fn switch_twin(&mut self, id: KeyId) -> Result<ActionsBook> {
        let kind = self.node(id)?.kind;
        if !kind.is_object() {
            return Err(KeyError::forbidden(Some(id), format!("a {kind} has no twin")));
        }
        if self.is_hidden(id) {
            return Ok(ActionsBook::new());
        }
        self.clear_actionsbook();
        self.set_is_hidden_m(id, Some(true))?;
        Ok(self.unload_actionsbook())
    }

    /// Change the language of a value from its language menu
    ///
    /// # Errors
    /// `IntegrityBreach` when a translation group has no language left.
    pub fn change_language(&mut self, id: KeyId, language: Option<String>) -> Result<ActionsBook> {
        if self.node(id)?.kind != KeyKind::Value || self.is_hidden(id) {
            return Ok(ActionsBook::new());
        }
        self.clear_actionsbook();
        self.set_value_language(id, language)?;
        Ok(self.unload_actionsbook())
    }

    /// Change the vocabulary of a value from its source menu
    ///
    /// # Errors
    /// `UnknownKey` for an id outside the tree.
    pub fn change_source(&mut self, id: KeyId, source: Option<Iri>) -> Result<ActionsBook> {
        if self.node(id)?.kind != KeyKind::Value || self.is_hidden(id) {
            return Ok(ActionsBook::new());
        }
        self.clear_actionsbook();
        self.set_value_source(id, source)?;
        Ok(self.unload_actionsbook())
    }

    /// Add an empty copy of the first true child of a button's group
    ///
    /// # Errors
    /// `ForbiddenOperation` when `id` is not a button.
    pub fn add(&mut self, id: KeyId) -> Result<ActionsBook> {
        let kind = self.node(id)?.kind;
        if !kind.is_button() {
            return Err(KeyError::forbidden(Some(id), format!("a {kind} can't add keys")));
        }
        if self.is_hidden(id) {
            return Ok(ActionsBook::new());
        }
        let group = self.parent_of(id)?;
        self.clear_actionsbook();
        let first = self
            .real_children(group)
            .into_iter()
            .find(|c| self.keys.get(c).is_some_and(|k| !k.is_secondary_twin()));
        if let Some(first) = first {
            self.copy(first, Some(group), true)?;
        }
        Ok(self.unload_actionsbook())
    }

    /// Remove empty groups, deepest first
    ///
    /// Property groups keep their twin, which is unlinked and unmasked.
    ///
    /// # Errors
    /// `UnknownKey` if the tree is inconsistent.
    pub fn clean(&mut self) -> Result<ActionsBook> {
        self.clear_actionsbook();
        for child in self.children(self.root).to_vec() {
            self.clean_group(child)?;
        }
        Ok(self.unload_actionsbook())
    }

    fn clean_group(&mut self, id: KeyId) -> Result<()> {
        let Some(key) = self.keys.get(&id) else {
            return Ok(());
        };
        if !key.kind.is_group() {
            return Ok(());
        }
        // Children first, so a group the pass empties goes in the same pass.
        for child in key.children().to_vec() {
            self.clean_group(child)?;
        }
        let key = self.node(id)?;
        if key.children().is_empty() {
            let preserve_twin = key.kind == KeyKind::GroupOfProperties;
            self.kill(id, preserve_twin)?;
        }
        Ok(())
    }

    /// Paste a branch over the key found at its path
    ///
    /// A key of the same kind is replaced; a property group is added to a
    /// group of values whose button is visible. Nothing happens when no
    /// visible key has the branch's path.
    ///
    /// # Errors
    /// `ForbiddenOperation` for a hidden branch or a branch that is not a
    /// group of properties, values or translations.
    pub fn paste_from_path(&mut self, branch: &Branch) -> Result<ActionsBook> {
        if branch.is_hidden() {
            return Err(KeyError::forbidden(None, "hidden branches can't be pasted"));
        }
        let kind = branch.kind();
        if !matches!(
            kind,
            KeyKind::GroupOfProperties | KeyKind::GroupOfValues | KeyKind::TranslationGroup
        ) {
            return Err(KeyError::forbidden(
                None,
                format!("a {kind} can't be pasted, only groups of properties or values"),
            ));
        }
        self.clear_actionsbook();
        let Some(refkey) = branch.path().and_then(|p| self.search_from_path(p)) else {
            return Ok(self.unload_actionsbook());
        };
        if self.is_hidden(refkey) {
            return Ok(self.unload_actionsbook());
        }
        let ref_key = self.node(refkey)?;
        let ref_kind = ref_key.kind;
        if ref_kind == kind {
            let parent = self.parent_of(refkey)?;
            self.kill(refkey, false)?;
            branch.instantiate(self, parent)?;
        } else if kind == KeyKind::GroupOfProperties && ref_kind.is_value_group() {
            let button_visible = ref_key.button().is_some_and(|b| !self.is_hidden(b));
            if button_visible {
                branch.instantiate(self, refkey)?;
            }
        }
        tracing::debug!("Pasted {} at {}", kind, refkey);
        Ok(self.unload_actionsbook())
    }

    /// Replace a property group with a copy of another of the same class
    ///
    /// The copy keeps the target's predicate, label, description and order.
    ///
    /// # Errors
    /// `ForbiddenOperation` when `target` is not a group of properties,
    /// or for a hidden branch, a branch that is not a group of properties
    /// or one with another class.
    pub fn paste_from_rdftype(&mut self, target: KeyId, branch: &Branch) -> Result<ActionsBook> {
        let key = self.node(target)?;
        if key.kind != KeyKind::GroupOfProperties {
            return Err(KeyError::forbidden(
                Some(target),
                "only groups of properties can be pasted over by class",
            ));
        }
        if self.is_hidden(target) {
            return Ok(ActionsBook::new());
        }
        if branch.is_hidden() {
            return Err(KeyError::forbidden(Some(target), "hidden branches can't be pasted"));
        }
        if branch.kind() != KeyKind::GroupOfProperties {
            return Err(KeyError::forbidden(
                Some(target),
                "only a group of properties can be pasted by class",
            ));
        }
        if branch.rdftype() != self.effective_rdftype(target) {
            return Err(KeyError::forbidden(
                Some(target),
                "both groups should have the same rdftype",
            ));
        }
        let parent = self.parent_of(target)?;
        let attributes = [
            Attribute::Predicate(self.effective_predicate(target).cloned()),
            Attribute::Label(key.label.clone()),
            Attribute::Description(key.description.clone()),
            Attribute::OrderIdx(key.order_idx.clone()),
        ];
        self.clear_actionsbook();
        self.kill(target, false)?;
        if let Some(copy) = branch.instantiate(self, parent)? {
            self.update(copy, attributes, false)?;
        }
        Ok(self.unload_actionsbook())
    }

    // ------------------------------------------------------------------
    // searches
    // ------------------------------------------------------------------

    /// First visible tab of a group, with the given label if any
    #[must_use]
    pub fn search_tab(&self, group: KeyId, label: Option<&str>) -> Option<KeyId> {
        self.real_children(group).into_iter().find(|c| {
            self.keys.get(c).is_some_and(|k| {
                k.kind == KeyKind::Tab
                    && label.map_or(true, |l| l == k.label.as_deref().unwrap_or("???"))
            })
        })
    }

    /// Main key found at `path`, descending from the root
    #[must_use]
    pub fn search_from_path(&self, path: &PropertyPath) -> Option<KeyId> {
        self.search_path_in(self.root, path)
    }

    fn search_path_in(&self, group: KeyId, path: &PropertyPath) -> Option<KeyId> {
        for child in self.real_children(group) {
            let Some(key) = self.keys.get(&child) else {
                continue;
            };
            let child_path = self.path(child);
            if child_path.as_ref() == Some(path) {
                if key.is_secondary_twin() {
                    continue;
                }
                return Some(child);
            }
            let prefix = child_path.as_ref().map_or(true, |p| p.is_prefix_of(path));
            if prefix && key.kind.is_group() {
                if let Some(found) = self.search_path_in(child, path) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Every visible property group of class `rdftype`, in tree order
    #[must_use]
    pub fn search_from_rdftype(&self, rdftype: &Iri) -> Vec<KeyId> {
        let mut found = Vec::new();
        self.search_rdftype_in(self.root, rdftype, &mut found);
        found
    }

    fn search_rdftype_in(&self, group: KeyId, rdftype: &Iri, found: &mut Vec<KeyId>) {
        for child in self.real_children(group) {
            let Some(key) = self.keys.get(&child) else {
                continue;
            };
            if key.kind == KeyKind::GroupOfProperties
                && self.effective_rdftype(child) == Some(rdftype)
            {
                found.push(child);
            }
            if key.kind.is_group() {
                self.search_rdftype_in(child, rdftype, found);
            }
        }
    }

    // ------------------------------------------------------------------
    // widget flags
    // ------------------------------------------------------------------

    /// Check if the key's widget comes with a minus button
    #[must_use]
    pub fn has_minus_button(&self, id: KeyId) -> bool {
        self.keys.get(&id).is_some_and(|k| {
            k.kind.is_object()
                && k.is_real()
                && self
                    .value_group_parent(k)
                    .is_some_and(crate::key::WidgetKey::with_minus_buttons)
        })
    }

    /// Check if the key's widget comes with a source menu
    ///
    /// Needs source buttons in the session, and either a choice between
    /// several vocabularies or a twin to switch to.
    #[must_use]
    pub fn has_source_button(&self, id: KeyId) -> bool {
        let Some(key) = self.keys.get(&id) else {
            return false;
        };
        if !self.session.source_buttons() || !key.is_real() {
            return false;
        }
        match key.kind {
            KeyKind::Value => {
                key.m_twin().is_some() || self.effective_sources(id).is_some_and(|s| s.len() > 1)
            }
            KeyKind::GroupOfProperties => key.m_twin().is_some(),
            _ => false,
        }
    }

    /// Check if the key's widget comes with a language menu
    #[must_use]
    pub fn has_language_button(&self, id: KeyId) -> bool {
        self.keys.get(&id).is_some_and(|k| {
            k.kind == KeyKind::Value
                && k.is_real()
                && self.session.language_buttons()
                && self.effective_xsdtype(id) == Some(&*RDF_LANG_STRING)
        })
    }

    /// Grid row of the key's label
    #[must_use]
    pub fn label_row(&self, id: KeyId) -> Option<usize> {
        let key = self.keys.get(&id)?;
        let row = key.row()?;
        if key.independant_label() {
            row.checked_sub(1)
        } else {
            Some(row)
        }
    }
}
