//! Grid layout, single-child flags, child-list hooks and the language pool

use crate::actions::Action;
use crate::error::Result;
use crate::key::WidgetKey;
use crate::types::{KeyId, KeyKind};

use super::WidgetTree;

impl WidgetTree {
    /// Assign grid rows to the children of a group
    ///
    /// Children of tabs and property groups are first sorted by order
    /// index (stably); groups of values keep insertion order and place
    /// their button last. Secondary twins share the row of their main
    /// twin and are skipped. Returns the first free row, or `None` when
    /// nothing was computed.
    pub fn compute_rows(&mut self, id: KeyId) -> Option<usize> {
        let key = self.keys.get(&id)?;
        if !key.kind.is_group() || key.is_ghost || self.session.is_suspended() {
            return None;
        }
        let in_values = key.kind.is_value_group();
        let button = key.button();
        let mut order: Vec<KeyId> = key.children().to_vec();

        if !in_values {
            order.sort_by(|a, b| {
                let a = self.keys.get(a).and_then(|k| k.order_idx.as_ref());
                let b = self.keys.get(b).and_then(|k| k.order_idx.as_ref());
                a.cmp(&b)
            });
            if let Some(children) = self.keys.get_mut(&id).and_then(|k| k.children.as_mut()) {
                children.replace_order(order.clone());
            }
        }

        let mut n = 0;
        for child in order.into_iter().chain(button) {
            let Some(key) = self.keys.get_mut(&child) else {
                continue;
            };
            if key.is_ghost || key.is_secondary_twin() {
                continue;
            }
            if key.independant_label() {
                n += 1;
            }
            if key.row != Some(n) {
                key.row = Some(n);
                self.session.record(Action::Move, child);
            }
            n += key.rowspan();
        }
        Some(n)
    }

    /// Flag the children of a group of values that may not be removed
    ///
    /// A group needs two true children (a twin pair counts once) for its
    /// minus buttons to show.
    pub fn compute_single_children(&mut self, id: KeyId) {
        let Some(key) = self.keys.get(&id) else {
            return;
        };
        if !key.kind.is_value_group() || key.is_ghost || self.session.is_suspended() {
            return;
        }
        let children = self.real_children(id);
        let count = children
            .iter()
            .filter_map(|c| self.keys.get(c))
            .filter(|k| !k.is_secondary_twin())
            .count();
        let single = count < 2;
        for child in children {
            let Some(key) = self.keys.get_mut(&child) else {
                continue;
            };
            if key.is_single_child != single {
                key.is_single_child = single;
                let action = if single {
                    Action::HideMinusButton
                } else {
                    Action::ShowMinusButton
                };
                self.session.record(action, child);
            }
        }
    }

    /// Register a new child of `parent`
    ///
    /// Once the child is born, rows and single-child flags of the parent
    /// are refreshed, and a value entering a translation group takes its
    /// language out of the pool.
    pub(crate) fn append_child(&mut self, parent: KeyId, child: KeyId) -> Result<()> {
        self.node_mut(parent)?
            .children
            .get_or_insert_with(Default::default)
            .push(child);
        if !self.is_unborn(child) {
            self.after_children_change(parent, child, true)?;
        }
        Ok(())
    }

    /// Unregister a child of `parent`, giving its language back
    pub(crate) fn remove_child(&mut self, parent: KeyId, child: KeyId) -> Result<()> {
        if let Some(children) = self.node_mut(parent)?.children.as_mut() {
            children.remove(&child);
        }
        self.after_children_change(parent, child, false)
    }

    fn after_children_change(&mut self, parent: KeyId, child: KeyId, added: bool) -> Result<()> {
        let key = self.node(child)?;
        let is_real = key.is_real();
        let is_value = key.kind == KeyKind::Value;
        let language = key.value_data().and_then(|d| d.value_language.clone());
        if is_real {
            self.compute_rows(parent);
            self.compute_single_children(parent);
        }
        if is_value && self.node(parent)?.kind == KeyKind::TranslationGroup {
            if added {
                self.language_out(parent, language.as_deref());
            } else {
                self.language_in(parent, language.as_deref(), Some(child));
            }
        }
        Ok(())
    }

    /// Available languages of a translation group
    #[must_use]
    pub fn available_languages(&self, group: KeyId) -> Option<&[String]> {
        self.keys
            .get(&group)?
            .value_group()?
            .available_languages
            .as_deref()
    }

    /// Take `language` out of a translation group's pool
    pub(crate) fn language_out(&mut self, group: KeyId, language: Option<&str>) {
        let Some(language) = language else {
            return;
        };
        let Some(pool) = self
            .keys
            .get_mut(&group)
            .and_then(|k| k.value_group_mut())
            .and_then(|g| g.available_languages.as_mut())
        else {
            return;
        };
        let Some(pos) = pool.iter().position(|l| l == language) else {
            return;
        };
        pool.remove(pos);
        let emptied = pool.is_empty();
        self.pool_changed(group, emptied.then_some(Action::Hide));
    }

    /// Give `language` back to a translation group's pool
    ///
    /// Only languages of the session list that no other value of the group
    /// still holds go back. `leaving` is the value releasing the language.
    pub(crate) fn language_in(
        &mut self,
        group: KeyId,
        language: Option<&str>,
        leaving: Option<KeyId>,
    ) {
        let Some(language) = language else {
            return;
        };
        if !self.session.langlist().iter().any(|l| l == language) {
            return;
        }
        let held = self.children(group).iter().any(|c| {
            Some(*c) != leaving
                && self
                    .keys
                    .get(c)
                    .and_then(WidgetKey::value_data)
                    .is_some_and(|d| d.value_language.as_deref() == Some(language))
        });
        if held {
            return;
        }
        let Some(pool) = self
            .keys
            .get_mut(&group)
            .and_then(|k| k.value_group_mut())
            .and_then(|g| g.available_languages.as_mut())
        else {
            return;
        };
        if pool.iter().any(|l| l == language) {
            return;
        }
        pool.push(language.to_string());
        let refilled = pool.len() == 1;
        self.pool_changed(group, refilled.then_some(Action::Show));
    }

    fn pool_changed(&mut self, group: KeyId, button_action: Option<Action>) {
        for child in self.real_children(group) {
            self.record(Action::Languages, child);
        }
        let button = self
            .keys
            .get(&group)
            .and_then(|k| k.button())
            .and_then(|b| self.keys.get(&b))
            .filter(|b| b.is_real() && !b.is_hidden_m)
            .map(|b| b.id);
        if let (Some(action), Some(button)) = (button_action, button) {
            self.record(action, button);
        }
    }
}
