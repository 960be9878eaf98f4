//! Twin pairs and masking
//!
//! A value and a group of properties sharing a parent may stand for the
//! same triple: one shows the object as an IRI, the other as a blank
//! node. Outside masked branches exactly one of them is visible, and that
//! one is the main twin whose shared attributes win.

use crate::actions::Action;
use crate::error::{KeyError, Result};
use crate::types::{KeyId, KeyKind};

use super::WidgetTree;

impl WidgetTree {
    /// Mask or unmask a key and its descendants
    ///
    /// Recursive calls stop at secondary twins, which keep their own mask.
    pub(crate) fn hide_m(&mut self, id: KeyId, value: bool, recursive: bool) {
        let Some(key) = self.keys.get(&id) else {
            return;
        };
        if key.is_ghost || (recursive && key.is_secondary_twin()) {
            return;
        }
        let was_hidden = self.is_hidden(id);
        if let Some(key) = self.keys.get_mut(&id) {
            key.is_hidden_m = value;
        }
        let hidden = self.is_hidden(id);
        if hidden != was_hidden {
            self.record(if hidden { Action::Hide } else { Action::Show }, id);
        }

        let Some(key) = self.keys.get(&id) else {
            return;
        };
        if key.kind.is_group() {
            let button = key.button();
            for child in self.real_children(id) {
                self.hide_m(child, value, true);
            }
            if value && !self.is_unborn(id) {
                self.compute_rows(id);
            }
            if let Some(button) = button {
                self.hide_m(button, value, recursive);
            }
        }
    }

    /// Main-twin rule: the visible twin is main; when both are masked the
    /// requested side wins, the value by default
    pub(crate) fn resolve_main_twin(&mut self, id: KeyId, requested: Option<bool>) {
        let Some(key) = self.keys.get(&id) else {
            return;
        };
        let Some(twin) = key.m_twin() else {
            if let Some(link) = self.keys.get_mut(&id).and_then(|k| k.twin_mut()) {
                link.is_main_twin = false;
            }
            return;
        };
        let self_hidden = key.is_hidden_m;
        let is_value = key.kind == KeyKind::Value;
        let twin_hidden = self.keys.get(&twin).is_some_and(|t| t.is_hidden_m);
        let main = if !self_hidden {
            true
        } else if !twin_hidden {
            false
        } else {
            requested.unwrap_or(is_value)
        };
        if let Some(link) = self.keys.get_mut(&id).and_then(|k| k.twin_mut()) {
            link.is_main_twin = main;
        }
        if let Some(link) = self.keys.get_mut(&twin).and_then(|k| k.twin_mut()) {
            link.is_main_twin = !main;
        }
    }

    /// Set the mask of one twin, the other getting the opposite
    ///
    /// Ignored for ghosts, keys without twin, and inside masked branches.
    pub fn set_is_hidden_m(&mut self, id: KeyId, value: Option<bool>) -> Result<()> {
        let key = self.node(id)?;
        let Some(twin) = key.m_twin() else {
            return Ok(());
        };
        let parent = self.parent_of(id)?;
        if key.is_ghost || self.node(parent)?.is_hidden_m {
            return Ok(());
        }
        let value = value.unwrap_or(false);
        self.hide_m(id, value, false);
        self.hide_m(twin, !value, false);
        if !self.is_unborn(id) {
            let visible = !self.node(id)?.is_hidden_m;
            self.resolve_main_twin(id, Some(visible));
            self.compute_rows(parent);
        }
        Ok(())
    }

    /// Link `id` to `twin`, or unlink it
    ///
    /// Shared attributes are then re-synchronised from the main twin.
    ///
    /// # Errors
    /// `ForbiddenOperation` for a ghost key, a twin of the wrong kind or
    /// with another parent, or a twin already linked elsewhere.
    pub fn set_m_twin(&mut self, id: KeyId, twin: Option<KeyId>) -> Result<()> {
        let key = self.node(id)?;
        let (kind, is_ghost) = (key.kind, key.is_ghost);
        if !kind.is_object() {
            return Err(KeyError::forbidden(Some(id), format!("a {kind} has no twin")));
        }
        let parent = self.parent_of(id)?;
        let previous = key.m_twin();
        let twin = match twin {
            Some(candidate) => {
                let checked = self.check_twin(kind, is_ghost, parent, candidate)?;
                if let Some(other) = checked.and_then(|t| self.keys.get(&t)).and_then(|t| t.m_twin()) {
                    if other != id {
                        return Err(KeyError::forbidden(Some(candidate), "the key already has a twin"));
                    }
                }
                match checked {
                    Some(checked) => Some(checked),
                    None => return Ok(()),
                }
            }
            None => None,
        };

        if let Some(previous) = previous.filter(|p| Some(*p) != twin) {
            if let Some(link) = self.keys.get_mut(&previous).and_then(|k| k.twin_mut()) {
                link.m_twin = None;
                link.is_main_twin = false;
            }
        }
        if let Some(link) = self.keys.get_mut(&id).and_then(|k| k.twin_mut()) {
            link.m_twin = twin;
            link.is_main_twin = false;
        }
        if let Some(twin) = twin {
            if let Some(link) = self.keys.get_mut(&twin).and_then(|k| k.twin_mut()) {
                link.m_twin = Some(id);
            }
        }
        if self.is_unborn(id) {
            return Ok(());
        }

        let hidden = self.node(id)?.is_hidden_m;
        self.set_is_hidden_m(id, Some(hidden))?;
        if twin.is_none() {
            self.resolve_main_twin(id, None);
        }
        self.sync_shared_attributes(id)?;
        self.compute_single_children(parent);
        Ok(())
    }

    /// Copy predicate, label, description and order from the main twin
    fn sync_shared_attributes(&mut self, id: KeyId) -> Result<()> {
        let key = self.node(id)?;
        let Some(twin) = key.m_twin() else {
            return Ok(());
        };
        let (from, to) = if key.is_main_twin() { (id, twin) } else { (twin, id) };
        let source = self.node(from)?;
        let (predicate, label, description, order_idx) = (
            source.predicate.clone(),
            source.label.clone(),
            source.description.clone(),
            source.order_idx.clone(),
        );
        let target = self.node_mut(to)?;
        target.predicate = predicate;
        target.label = label;
        target.description = description;
        target.order_idx = order_idx;
        let parent = self.parent_of(id)?;
        self.compute_rows(parent);
        Ok(())
    }

    /// Break a twin link kept by [`Self::kill`] with `preserve_twin`
    ///
    /// The survivor is unmasked unless an ancestor masks it.
    pub(crate) fn release_twin(&mut self, survivor: KeyId) {
        let Some(key) = self.keys.get(&survivor) else {
            return;
        };
        let parent_masked = key
            .parent
            .and_then(|p| self.keys.get(&p))
            .is_some_and(|p| p.is_hidden_m);
        if let Some(link) = self.keys.get_mut(&survivor).and_then(|k| k.twin_mut()) {
            link.m_twin = None;
            link.is_main_twin = false;
        }
        if !parent_masked {
            self.hide_m(survivor, false, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_rdf::{Literal, DCT, FOAF};

    use crate::actions::Action;
    use crate::options::KeyOptions;
    use crate::types::KeyId;
    use crate::WidgetTree;

    /// Tab holding a value and its property-group twin, the value visible
    fn twins() -> (WidgetTree, KeyId, KeyId, KeyId) {
        let mut tree = WidgetTree::default();
        let root = tree.root();
        let tab = tree.create_tab(KeyOptions::child_of(root)).unwrap();
        let value = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("publisher"))
                    .with_value(DCT.term("org")),
            )
            .unwrap()
            .unwrap();
        let group = tree
            .create_group_of_properties(
                KeyOptions::child_of(tab)
                    .with_rdftype(FOAF.term("Organization"))
                    .with_twin(value)
                    .with_hidden_m(true),
            )
            .unwrap();
        (tree, tab, value, group)
    }

    #[test]
    fn switching_swaps_visibility() {
        let (mut tree, _tab, value, group) = twins();
        tree.clear_actionsbook();
        tree.set_is_hidden_m(value, Some(true)).unwrap();
        let book = tree.unload_actionsbook();
        assert!(book.contains(Action::Hide, &value));
        assert!(book.contains(Action::Show, &group));
        assert!(tree.get(group).unwrap().is_main_twin());
        assert!(!tree.get(value).unwrap().is_main_twin());
    }

    #[test]
    fn masking_cascades_into_children() {
        let (mut tree, _tab, value, group) = twins();
        let name = tree
            .create_value(
                KeyOptions::child_of(group)
                    .with_predicate(FOAF.term("name"))
                    .with_value(Literal::new("Plume")),
            )
            .unwrap()
            .unwrap();
        assert!(tree.get(name).unwrap().is_hidden_m());

        tree.set_is_hidden_m(value, Some(true)).unwrap();
        assert!(!tree.get(name).unwrap().is_hidden_m());
        tree.set_is_hidden_m(group, Some(true)).unwrap();
        assert!(tree.get(name).unwrap().is_hidden_m());
        assert!(!tree.get(value).unwrap().is_hidden_m());
    }

    #[test]
    fn late_linking_resynchronises() {
        let mut tree = WidgetTree::default();
        let root = tree.root();
        let tab = tree.create_tab(KeyOptions::child_of(root)).unwrap();
        let value = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("publisher"))
                    .with_label("Éditeur")
                    .with_order_idx(2)
                    .with_value(DCT.term("org"))
                    .with_hidden_m(false),
            )
            .unwrap()
            .unwrap();
        let group = tree
            .create_group_of_properties(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("creator"))
                    .with_rdftype(FOAF.term("Organization")),
            )
            .unwrap();
        tree.set_m_twin(group, Some(value)).unwrap();

        let g = tree.get(group).unwrap();
        assert!(!g.is_hidden_m());
        assert!(g.is_main_twin());
        assert!(tree.get(value).unwrap().is_hidden_m());
        assert_eq!(tree.get(value).unwrap().predicate, Some(DCT.term("creator")));
        assert_eq!(tree.get(value).unwrap().label, None);

        tree.set_m_twin(group, None).unwrap();
        assert_eq!(tree.get(value).unwrap().m_twin(), None);
        assert!(!tree.get(group).unwrap().is_main_twin());
    }
}
