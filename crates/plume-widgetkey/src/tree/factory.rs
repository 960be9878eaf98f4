//! Key creation
//!
//! Each factory validates everything before touching the tree, then
//! inserts the key, runs its side effects (twin link, masking, language
//! pool) and registers it with its parent. A failed creation leaves no
//! trace.

use plume_rdf::{Iri, RDF_LANG_STRING, XSD_STRING};

use crate::actions::Action;
use crate::error::{KeyError, Result};
use crate::key::{FieldConfig, Payload, TwinLink, ValueData, ValueGroup, WidgetKey};
use crate::options::KeyOptions;
use crate::types::{KeyId, KeyKind, OrderIdx};

use super::WidgetTree;

/// What a new key inherits from its parent
struct Lineage {
    parent: KeyId,
    parent_kind: KeyKind,
    is_ghost: bool,
    is_hidden_m: bool,
}

impl Lineage {
    fn in_values(&self) -> bool {
        self.parent_kind.is_value_group()
    }
}

/// Shared attributes resolved for an object key
struct ObjectFields {
    twin: Option<KeyId>,
    predicate: Option<Iri>,
    label: Option<String>,
    description: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

pub(crate) fn build_config(opts: &KeyOptions, translation: bool) -> FieldConfig {
    let regex_validator = non_empty(opts.regex_validator.as_ref());
    let regex_validator_flags = regex_validator
        .as_ref()
        .and(non_empty(opts.regex_validator_flags.as_ref()));
    let (rdftype, xsdtype, sources, transform) = if translation {
        (None, Some(RDF_LANG_STRING.clone()), None, None)
    } else {
        let xsdtype = if opts.rdftype.is_some() {
            None
        } else {
            Some(opts.xsdtype.clone().unwrap_or_else(|| XSD_STRING.clone()))
        };
        (
            opts.rdftype.clone(),
            xsdtype,
            opts.sources.clone().filter(|s| !s.is_empty()),
            opts.transform,
        )
    };
    FieldConfig {
        rdftype,
        xsdtype,
        sources,
        transform,
        placeholder: non_empty(opts.placeholder.as_ref()),
        input_mask: non_empty(opts.input_mask.as_ref()),
        is_mandatory: opts.is_mandatory,
        is_read_only: opts.is_read_only,
        regex_validator,
        regex_validator_flags,
    }
}

pub(crate) fn is_text_type(xsdtype: Option<&Iri>) -> bool {
    xsdtype.is_some_and(|x| x == &*XSD_STRING || x == &*RDF_LANG_STRING)
}

impl WidgetTree {
    /// Create a key of any non-root kind
    ///
    /// Dispatches to the kind's factory, which may return another kind or
    /// nothing (see each factory).
    ///
    /// # Errors
    /// Whatever the kind's factory raises.
    pub fn create(&mut self, kind: KeyKind, opts: KeyOptions) -> Result<Option<KeyId>> {
        match kind {
            KeyKind::Root => Err(KeyError::forbidden(None, "a tree has exactly one root")),
            KeyKind::Tab => self.create_tab(opts).map(Some),
            KeyKind::GroupOfProperties => self.create_group_of_properties(opts).map(Some),
            KeyKind::GroupOfValues => self.create_group_of_values(opts).map(Some),
            KeyKind::TranslationGroup => self.create_translation_group(opts).map(Some),
            KeyKind::Value => self.create_value(opts),
            KeyKind::PlusButton => self.create_plus_button(opts),
            KeyKind::TranslationButton => self.create_translation_button(opts),
        }
    }

    /// Create a tab under the root or a group of properties
    ///
    /// # Errors
    /// `MissingParameter` without parent, `ForbiddenOperation` for another
    /// parent kind, `UnknownKey` for an unknown parent.
    pub fn create_tab(&mut self, opts: KeyOptions) -> Result<KeyId> {
        let lineage = self.lineage(KeyKind::Tab, &opts)?;
        let mut key = WidgetKey::new(KeyKind::Tab, Some(lineage.parent), Payload::Tab);
        key.label = non_empty(opts.label.as_ref());
        self.finish(key, &lineage, &opts)
    }

    /// Create a group of properties for a blank node
    ///
    /// The node is `opts.node`, or a fresh blank node.
    ///
    /// # Errors
    /// `MissingParameter` without parent, predicate (outside a group of
    /// values) or rdftype (outside a group of values); `IntegrityBreach`
    /// under a group of values without rdftype; `ForbiddenOperation` for
    /// an invalid parent or twin.
    pub fn create_group_of_properties(&mut self, opts: KeyOptions) -> Result<KeyId> {
        let lineage = self.lineage(KeyKind::GroupOfProperties, &opts)?;
        let fields = self.object_fields(KeyKind::GroupOfProperties, &lineage, &opts)?;
        let rdftype = if lineage.in_values() {
            None
        } else {
            Some(
                opts.rdftype
                    .clone()
                    .ok_or_else(|| KeyError::missing("rdftype", None))?,
            )
        };
        let node = opts.node.clone().unwrap_or_default();
        let key = WidgetKey::new(
            KeyKind::GroupOfProperties,
            Some(lineage.parent),
            Payload::Properties { node, rdftype },
        );
        self.finish_object(key, &lineage, &opts, fields)
    }

    /// Create a group of values
    ///
    /// # Errors
    /// `MissingParameter` without parent or predicate,
    /// `ForbiddenOperation` for a parent other than a tab, the root or a
    /// group of properties.
    pub fn create_group_of_values(&mut self, opts: KeyOptions) -> Result<KeyId> {
        self.create_value_group(KeyKind::GroupOfValues, &opts)
    }

    /// Create a translation group
    ///
    /// A ghost translation group makes no sense: a group of values is
    /// created instead. The pool starts as a copy of the session languages.
    ///
    /// # Errors
    /// As [`Self::create_group_of_values`].
    pub fn create_translation_group(&mut self, opts: KeyOptions) -> Result<KeyId> {
        let ghost = opts.is_ghost
            || opts
                .parent
                .and_then(|p| self.keys.get(&p))
                .is_some_and(WidgetKey::is_ghost);
        if ghost || opts.parent.is_none() {
            return self.create_group_of_values(opts);
        }
        self.create_value_group(KeyKind::TranslationGroup, &opts)
    }

    fn create_value_group(&mut self, kind: KeyKind, opts: &KeyOptions) -> Result<KeyId> {
        let lineage = self.lineage(kind, opts)?;
        let predicate = opts
            .predicate
            .clone()
            .ok_or_else(|| KeyError::missing("predicate", None))?;
        let translation = kind == KeyKind::TranslationGroup;
        let group = ValueGroup {
            config: build_config(opts, translation),
            with_minus_buttons: opts.with_minus_buttons.unwrap_or(true) && !lineage.is_ghost,
            button: None,
            available_languages: translation.then(|| self.session.langlist().to_vec()),
        };
        let mut key = WidgetKey::new(kind, Some(lineage.parent), Payload::Values(group));
        key.predicate = Some(predicate);
        key.label = non_empty(opts.label.as_ref());
        key.description = non_empty(opts.description.as_ref());
        self.finish(key, &lineage, opts)
    }

    /// Create a value key
    ///
    /// Returns nothing for a valueless ghost or a parentless key.
    ///
    /// # Errors
    /// `MissingParameter` for a missing predicate outside a group of
    /// values; `IntegrityBreach` when a translation group has no language
    /// left; `ForbiddenOperation` for an invalid parent or twin.
    pub fn create_value(&mut self, opts: KeyOptions) -> Result<Option<KeyId>> {
        let Some(parent) = opts.parent else {
            return Ok(None);
        };
        let parent_ghost = self.node(parent)?.is_ghost;
        if opts.value.is_none() && (opts.is_ghost || parent_ghost) {
            return Ok(None);
        }
        let lineage = self.lineage(KeyKind::Value, &opts)?;
        let fields = self.object_fields(KeyKind::Value, &lineage, &opts)?;
        let in_values = lineage.in_values();
        let config = if in_values {
            FieldConfig::default()
        } else {
            build_config(&opts, false)
        };
        let parent_config = self.node(parent)?.own_config();
        let effective = if in_values {
            parent_config.cloned().unwrap_or_default()
        } else {
            config.clone()
        };

        let mut value_language = if effective.xsdtype.as_ref() == Some(&*RDF_LANG_STRING) {
            non_empty(opts.value_language.as_ref()).or_else(|| {
                opts.value
                    .as_ref()
                    .and_then(|v| v.language())
                    .map(str::to_string)
            })
        } else {
            None
        };
        if lineage.parent_kind == KeyKind::TranslationGroup && value_language.is_none() {
            value_language = Some(
                self.available_languages(parent)
                    .and_then(<[String]>::first)
                    .cloned()
                    .ok_or_else(|| {
                        KeyError::integrity(Some(parent), "no language left in the translation group")
                    })?,
            );
        }
        let value_source = effective
            .sources
            .as_ref()
            .and_then(|s| opts.value_source.as_ref().filter(|v| s.contains(v)))
            .cloned();

        let data = ValueData {
            config,
            value: opts.value.clone(),
            value_language,
            value_source,
            do_not_save: opts.do_not_save,
            is_long_text: opts.is_long_text && is_text_type(effective.xsdtype.as_ref()),
            rowspan: if lineage.is_ghost {
                0
            } else {
                opts.rowspan.filter(|r| *r > 0).unwrap_or(1)
            },
            independant_label: opts.independant_label && !lineage.is_ghost && !in_values,
        };
        let key = WidgetKey::new(KeyKind::Value, Some(parent), Payload::Value(data));
        self.finish_object(key, &lineage, &opts, fields).map(Some)
    }

    /// Create the plus button of a group of values
    ///
    /// Returns nothing for a ghost, without parent, or when the parent is
    /// not a group of values.
    ///
    /// # Errors
    /// `ForbiddenOperation` under a translation group or when the group
    /// already has a button.
    pub fn create_plus_button(&mut self, opts: KeyOptions) -> Result<Option<KeyId>> {
        self.create_button(KeyKind::PlusButton, &opts)
    }

    /// Create the translation button of a translation group
    ///
    /// Under a plain group of values a plus button is created instead.
    ///
    /// # Errors
    /// As [`Self::create_plus_button`].
    pub fn create_translation_button(&mut self, opts: KeyOptions) -> Result<Option<KeyId>> {
        let Some(parent) = opts.parent else {
            return Ok(None);
        };
        if opts.is_ghost {
            return Ok(None);
        }
        if self.node(parent)?.kind != KeyKind::TranslationGroup {
            return self.create_plus_button(opts);
        }
        self.create_button(KeyKind::TranslationButton, &opts)
    }

    fn create_button(&mut self, kind: KeyKind, opts: &KeyOptions) -> Result<Option<KeyId>> {
        let Some(parent) = opts.parent else {
            return Ok(None);
        };
        let parent_key = self.node(parent)?;
        if opts.is_ghost || parent_key.is_ghost || !parent_key.kind.is_value_group() {
            return Ok(None);
        }
        let lineage = self.lineage(kind, opts)?;
        if parent_key.button().is_some() {
            return Err(KeyError::forbidden(Some(parent), "the group already has a button"));
        }
        let key = WidgetKey::new(kind, Some(lineage.parent), Payload::Button);
        self.finish(key, &lineage, opts).map(Some)
    }

    // ------------------------------------------------------------------
    // validation
    // ------------------------------------------------------------------

    fn lineage(&self, kind: KeyKind, opts: &KeyOptions) -> Result<Lineage> {
        let parent_id = opts.parent.ok_or_else(|| KeyError::missing("parent", None))?;
        let parent = self.node(parent_id)?;
        let valid = match kind {
            KeyKind::Root => false,
            KeyKind::Tab => matches!(parent.kind, KeyKind::GroupOfProperties | KeyKind::Root),
            KeyKind::GroupOfProperties => {
                if parent.kind.is_value_group()
                    && parent.own_config().map_or(true, |c| c.rdftype.is_none())
                {
                    return Err(KeyError::integrity(
                        Some(parent_id),
                        "a group of values holding property groups needs an rdftype",
                    ));
                }
                parent.kind.is_group() && parent.kind != KeyKind::TranslationGroup
            }
            KeyKind::GroupOfValues | KeyKind::TranslationGroup => matches!(
                parent.kind,
                KeyKind::GroupOfProperties | KeyKind::Tab | KeyKind::Root
            ),
            KeyKind::Value => parent.kind.is_group(),
            KeyKind::PlusButton => parent.kind == KeyKind::GroupOfValues,
            KeyKind::TranslationButton => parent.kind == KeyKind::TranslationGroup,
        };
        if !valid {
            return Err(KeyError::forbidden(
                Some(parent_id),
                format!("a {} can't be a child of a {}", kind, parent.kind),
            ));
        }
        Ok(Lineage {
            parent: parent_id,
            parent_kind: parent.kind,
            is_ghost: opts.is_ghost || parent.is_ghost,
            is_hidden_m: parent.is_hidden_m,
        })
    }

    fn object_fields(
        &self,
        kind: KeyKind,
        lineage: &Lineage,
        opts: &KeyOptions,
    ) -> Result<ObjectFields> {
        let twin = match opts.m_twin {
            None => None,
            Some(candidate) => self.check_twin(kind, lineage.is_ghost, lineage.parent, candidate)?,
        };
        if lineage.in_values() {
            return Ok(ObjectFields {
                twin,
                predicate: None,
                label: None,
                description: None,
            });
        }
        if let Some(twin_key) = twin.and_then(|t| self.keys.get(&t)) {
            return Ok(ObjectFields {
                twin,
                predicate: twin_key.predicate.clone(),
                label: twin_key.label.clone(),
                description: twin_key.description.clone(),
            });
        }
        Ok(ObjectFields {
            twin,
            predicate: Some(
                opts.predicate
                    .clone()
                    .ok_or_else(|| KeyError::missing("predicate", None))?,
            ),
            label: non_empty(opts.label.as_ref()),
            description: non_empty(opts.description.as_ref()),
        })
    }

    /// Validate a twin candidate; a ghost candidate is ignored
    pub(crate) fn check_twin(
        &self,
        kind: KeyKind,
        is_ghost: bool,
        parent: KeyId,
        candidate: KeyId,
    ) -> Result<Option<KeyId>> {
        let twin = self.node(candidate)?;
        if twin.is_ghost {
            return Ok(None);
        }
        if is_ghost {
            return Err(KeyError::forbidden(Some(candidate), "a ghost can't have a twin"));
        }
        let expected = match kind {
            KeyKind::Value => KeyKind::GroupOfProperties,
            KeyKind::GroupOfProperties => KeyKind::Value,
            _ => return Err(KeyError::forbidden(Some(candidate), format!("a {kind} has no twin"))),
        };
        if twin.kind != expected {
            return Err(KeyError::forbidden(
                Some(candidate),
                format!("the twin of a {kind} should be a {expected}"),
            ));
        }
        if twin.parent != Some(parent) {
            return Err(KeyError::forbidden(
                Some(candidate),
                "a key and its twin should share their parent",
            ));
        }
        Ok(Some(candidate))
    }

    // ------------------------------------------------------------------
    // insertion
    // ------------------------------------------------------------------

    fn finish_object(
        &mut self,
        mut key: WidgetKey,
        lineage: &Lineage,
        opts: &KeyOptions,
        fields: ObjectFields,
    ) -> Result<KeyId> {
        if let Some(twin) = fields.twin {
            if self.node(twin)?.m_twin().is_some() {
                return Err(KeyError::forbidden(Some(twin), "the key already has a twin"));
            }
        }
        key.predicate = fields.predicate;
        key.label = fields.label;
        key.description = fields.description;
        key.twin = Some(TwinLink {
            m_twin: fields.twin,
            is_main_twin: false,
        });
        self.finish(key, lineage, opts)
    }

    fn finish(&mut self, mut key: WidgetKey, lineage: &Lineage, opts: &KeyOptions) -> Result<KeyId> {
        let id = key.id;
        key.is_ghost = lineage.is_ghost;
        key.is_hidden_m = lineage.is_hidden_m;
        let kind = key.kind;
        let twin = key.m_twin();
        self.keys.insert(id, key);
        self.unborn = Some(id);

        if let Some(twin) = twin {
            if let Some(link) = self.keys.get_mut(&twin).and_then(WidgetKey::twin_mut) {
                link.m_twin = Some(id);
            }
            if !lineage.is_hidden_m {
                let hidden = opts.is_hidden_m.unwrap_or(false);
                self.hide_m(id, hidden, false);
                self.hide_m(twin, !hidden, false);
            }
        }
        if kind.is_object() {
            self.resolve_main_twin(id, opts.is_main_twin);
        }
        self.init_order_idx(id, lineage, opts.order_idx.clone());
        self.unborn = None;

        let registered = if kind.is_button() {
            if let Some(group) = self.node_mut(lineage.parent)?.value_group_mut() {
                group.button = Some(id);
            }
            if !lineage.is_ghost {
                self.compute_rows(lineage.parent);
                self.compute_single_children(lineage.parent);
            }
            Ok(())
        } else {
            self.append_child(lineage.parent, id)
        };
        registered?;
        self.record(Action::Create, id);
        tracing::trace!("Created {} {}", kind, id);
        Ok(id)
    }

    fn init_order_idx(&mut self, id: KeyId, lineage: &Lineage, order_idx: Option<OrderIdx>) {
        if lineage.in_values() {
            return;
        }
        let (twin, is_main) = match self.keys.get(&id) {
            Some(key) => (key.m_twin(), key.is_main_twin()),
            None => return,
        };
        let own = order_idx.unwrap_or_default();
        let value = match twin {
            Some(twin) if !is_main => self
                .keys
                .get(&twin)
                .and_then(|t| t.order_idx.clone())
                .unwrap_or(own),
            Some(twin) => {
                if let Some(twin_key) = self.keys.get_mut(&twin) {
                    twin_key.order_idx = Some(own.clone());
                }
                own
            }
            None => own,
        };
        if let Some(key) = self.keys.get_mut(&id) {
            key.order_idx = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_rdf::{BlankNode, Literal, DCAT, DCT, RDF_LANG_STRING, VCARD, XSD_STRING};
    use pretty_assertions::assert_eq;

    use super::*;

    fn tree_with_tab() -> (WidgetTree, KeyId) {
        let mut tree = WidgetTree::default();
        let root = tree.root();
        let tab = tree
            .create_tab(KeyOptions::child_of(root).with_label("Général"))
            .unwrap();
        (tree, tab)
    }

    #[test]
    fn tab_parent_checks() {
        let (mut tree, tab) = tree_with_tab();
        let err = tree.create_tab(KeyOptions::child_of(tab)).unwrap_err();
        assert!(matches!(err, KeyError::ForbiddenOperation { .. }));
        let err = tree.create_tab(KeyOptions::default()).unwrap_err();
        assert_eq!(err, KeyError::missing("parent", None));
    }

    #[test]
    fn group_of_properties_needs_rdftype() {
        let (mut tree, tab) = tree_with_tab();
        let err = tree
            .create_group_of_properties(
                KeyOptions::child_of(tab).with_predicate(DCAT.term("contactPoint")),
            )
            .unwrap_err();
        assert_eq!(err, KeyError::missing("rdftype", None));
        assert_eq!(tree.children(tab).len(), 0);

        let gov = tree
            .create_group_of_values(KeyOptions::child_of(tab).with_predicate(DCAT.term("contactPoint")))
            .unwrap();
        let err = tree
            .create_group_of_properties(KeyOptions::child_of(gov))
            .unwrap_err();
        assert!(matches!(err, KeyError::IntegrityBreach { .. }));
    }

    #[test]
    fn group_of_properties_keeps_given_node() {
        let (mut tree, tab) = tree_with_tab();
        let node = BlankNode::from_id("c0");
        let gop = tree
            .create_group_of_properties(
                KeyOptions::child_of(tab)
                    .with_predicate(DCAT.term("contactPoint"))
                    .with_rdftype(VCARD.term("Kind"))
                    .with_node(node.clone()),
            )
            .unwrap();
        assert_eq!(tree.get(gop).unwrap().node(), Some(&node));
        assert_eq!(tree.effective_rdftype(gop), Some(&VCARD.term("Kind")));
    }

    #[test]
    fn value_defaults() {
        let (mut tree, tab) = tree_with_tab();
        let value = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("title"))
                    .with_value(Literal::new("Titre"))
                    .with_rowspan(0)
                    .with_long_text(true),
            )
            .unwrap()
            .unwrap();
        let key = tree.get(value).unwrap();
        assert_eq!(key.rowspan(), 1);
        assert!(key.is_long_text());
        assert_eq!(key.order_idx(), Some(&OrderIdx::last()));
        assert_eq!(tree.effective_xsdtype(value), Some(&*XSD_STRING));
    }

    #[test]
    fn valueless_ghost_is_not_created() {
        let (mut tree, tab) = tree_with_tab();
        let created = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("title"))
                    .with_ghost(true),
            )
            .unwrap();
        assert_eq!(created, None);
        assert_eq!(tree.create_value(KeyOptions::default()).unwrap(), None);
    }

    #[test]
    fn ghost_translation_group_degrades() {
        let (mut tree, tab) = tree_with_tab();
        let group = tree
            .create_translation_group(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("title"))
                    .with_ghost(true),
            )
            .unwrap();
        let key = tree.get(group).unwrap();
        assert_eq!(key.kind(), KeyKind::GroupOfValues);
        assert!(!key.with_minus_buttons());
    }

    #[test]
    fn translation_group_forces_lang_string() {
        let (mut tree, tab) = tree_with_tab();
        let tg = tree
            .create_translation_group(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("title"))
                    .with_xsdtype(XSD_STRING.clone())
                    .with_sources(vec![DCT.term("x")]),
            )
            .unwrap();
        assert_eq!(tree.effective_xsdtype(tg), Some(&*RDF_LANG_STRING));
        assert_eq!(tree.effective_sources(tg), None);
        assert_eq!(tree.available_languages(tg).unwrap(), ["fr", "en"]);
    }

    #[test]
    fn translation_group_draws_languages() {
        let (mut tree, tab) = tree_with_tab();
        let tg = tree
            .create_translation_group(KeyOptions::child_of(tab).with_predicate(DCT.term("title")))
            .unwrap();
        let first = tree
            .create_value(KeyOptions::child_of(tg).with_value(Literal::new("a")))
            .unwrap()
            .unwrap();
        assert_eq!(
            tree.get(first).unwrap().value_data().unwrap().value_language.as_deref(),
            Some("fr")
        );
        tree.create_value(KeyOptions::child_of(tg).with_value(Literal::new("b")))
            .unwrap();
        let err = tree
            .create_value(KeyOptions::child_of(tg).with_value(Literal::new("c")))
            .unwrap_err();
        assert!(matches!(err, KeyError::IntegrityBreach { .. }));
        assert_eq!(tree.children(tg).len(), 2);
    }

    #[test]
    fn buttons() {
        let (mut tree, tab) = tree_with_tab();
        let gov = tree
            .create_group_of_values(KeyOptions::child_of(tab).with_predicate(DCT.term("subject")))
            .unwrap();
        let tg = tree
            .create_translation_group(KeyOptions::child_of(tab).with_predicate(DCT.term("title")))
            .unwrap();

        assert_eq!(tree.create_plus_button(KeyOptions::child_of(tab)).unwrap(), None);
        let err = tree.create_plus_button(KeyOptions::child_of(tg)).unwrap_err();
        assert!(matches!(err, KeyError::ForbiddenOperation { .. }));

        let plus = tree
            .create_translation_button(KeyOptions::child_of(gov))
            .unwrap()
            .unwrap();
        assert_eq!(tree.get(plus).unwrap().kind(), KeyKind::PlusButton);
        assert_eq!(tree.get(gov).unwrap().button(), Some(plus));
        assert!(tree.create_plus_button(KeyOptions::child_of(gov)).is_err());

        let translation = tree
            .create_translation_button(KeyOptions::child_of(tg))
            .unwrap()
            .unwrap();
        assert_eq!(tree.get(translation).unwrap().kind(), KeyKind::TranslationButton);
        assert_eq!(
            tree.create_translation_button(KeyOptions::child_of(tg).with_ghost(true))
                .unwrap(),
            None
        );
    }

    #[test]
    fn twin_creation() {
        let (mut tree, tab) = tree_with_tab();
        let value = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("publisher"))
                    .with_label("Éditeur")
                    .with_order_idx(4)
                    .with_value(DCT.term("a")),
            )
            .unwrap()
            .unwrap();
        let group = tree
            .create_group_of_properties(
                KeyOptions::child_of(tab)
                    .with_rdftype(DCT.term("Agent"))
                    .with_twin(value)
                    .with_hidden_m(true),
            )
            .unwrap();
        let v = tree.get(value).unwrap();
        let g = tree.get(group).unwrap();
        assert_eq!(v.m_twin(), Some(group));
        assert_eq!(g.m_twin(), Some(value));
        assert!(g.is_hidden_m());
        assert!(!v.is_hidden_m());
        assert!(v.is_main_twin());
        assert!(!g.is_main_twin());
        assert_eq!(g.predicate, v.predicate);
        assert_eq!(g.label.as_deref(), Some("Éditeur"));
        assert_eq!(g.order_idx(), Some(&OrderIdx::from(4)));

        let err = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("publisher"))
                    .with_twin(value),
            )
            .unwrap_err();
        assert!(matches!(err, KeyError::ForbiddenOperation { .. }));
    }
}
