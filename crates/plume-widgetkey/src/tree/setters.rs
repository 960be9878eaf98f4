//! Attribute writes
//!
//! Setters silently ignore attributes a key does not own: a value inside a
//! group of values reads most of its settings from the group, a
//! translation group has fixed datatype and no sources. Shared twin
//! attributes follow the main twin.

use plume_rdf::{BlankNode, Iri, Term, RDF_LANG_STRING, XSD_STRING};

use crate::actions::Action;
use crate::error::{KeyError, Result};
use crate::key::{FieldConfig, Payload};
use crate::options::Attribute;
use crate::types::{KeyId, KeyKind, OrderIdx, Transform};

use super::factory::is_text_type;
use super::WidgetTree;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Shared attribute of a twin pair
#[derive(Clone, Copy)]
enum Shared {
    Predicate,
    Label,
    Description,
}

impl WidgetTree {
    /// Apply attribute writes accepted by the key's kind
    ///
    /// Attributes outside the kind's list are skipped, as are `None`
    /// payloads when `exclude_none` is set.
    ///
    /// # Errors
    /// Whatever the individual setters raise.
    pub fn update<I>(&mut self, id: KeyId, attributes: I, exclude_none: bool) -> Result<()>
    where
        I: IntoIterator<Item = Attribute>,
    {
        let kind = self.node(id)?.kind;
        let accepted = kind.updatable();
        for attribute in attributes {
            if !accepted.contains(&attribute.name()) || (exclude_none && attribute.is_none()) {
                tracing::trace!("Skipped {} on {} {}", attribute.name(), kind, id);
                continue;
            }
            self.apply(id, attribute)?;
        }
        Ok(())
    }

    fn apply(&mut self, id: KeyId, attribute: Attribute) -> Result<()> {
        match attribute {
            Attribute::OrderIdx(v) => self.set_order_idx(id, v),
            Attribute::Predicate(v) => self.set_predicate(id, v),
            Attribute::Label(v) => self.set_label(id, v),
            Attribute::Description(v) => self.set_description(id, v),
            Attribute::IsHiddenM(v) => self.set_is_hidden_m(id, v),
            Attribute::Node(v) => self.set_node(id, v),
            Attribute::RdfType(v) => self.set_rdftype(id, v),
            Attribute::XsdType(v) => self.set_xsdtype(id, v),
            Attribute::Sources(v) => self.set_sources(id, v),
            Attribute::Transform(v) => self.set_transform(id, v),
            Attribute::Placeholder(v) => self.write_config(id, |c| c.placeholder = non_empty(v)),
            Attribute::InputMask(v) => self.write_config(id, |c| c.input_mask = non_empty(v)),
            Attribute::IsMandatory(v) => {
                self.write_config(id, |c| c.is_mandatory = v.unwrap_or(false))
            }
            Attribute::IsReadOnly(v) => {
                self.write_config(id, |c| c.is_read_only = v.unwrap_or(false))
            }
            Attribute::RegexValidator(v) => self.set_regex_validator(id, v),
            Attribute::RegexValidatorFlags(v) => self.set_regex_validator_flags(id, v),
            Attribute::WithMinusButtons(v) => self.set_with_minus_buttons(id, v),
            Attribute::Rowspan(v) => self.set_rowspan(id, v),
            Attribute::Value(v) => self.set_value(id, v),
            Attribute::ValueLanguage(v) => self.set_value_language(id, v),
            Attribute::ValueSource(v) => self.set_value_source(id, v),
            Attribute::DoNotSave(v) => self.write_value(id, |d| d.do_not_save = v.unwrap_or(false)),
            Attribute::IsLongText(v) => self.set_is_long_text(id, v),
            Attribute::IndependantLabel(v) => self.set_independant_label(id, v),
        }
    }

    /// Set the position among siblings
    ///
    /// Forced to none inside a group of values; a secondary twin takes its
    /// main twin's index, a main twin passes its own on.
    pub fn set_order_idx(&mut self, id: KeyId, value: Option<OrderIdx>) -> Result<()> {
        let key = self.node(id)?;
        let parent = key.parent;
        let twin = key.m_twin();
        let is_main = key.is_main_twin();
        let value = if self.in_value_group(id) {
            None
        } else {
            match twin {
                Some(twin) if !is_main => self.node(twin)?.order_idx.clone(),
                _ => Some(value.unwrap_or_default()),
            }
        };
        if let (Some(twin), true) = (twin, is_main) {
            self.node_mut(twin)?.order_idx = value.clone();
        }
        self.node_mut(id)?.order_idx = value;
        if let Some(parent) = parent.filter(|_| !self.is_unborn(id)) {
            self.compute_rows(parent);
        }
        Ok(())
    }

    /// Set the predicate
    ///
    /// # Errors
    /// `MissingParameter` when the key needs a predicate and none is left
    /// after twin synchronisation.
    pub fn set_predicate(&mut self, id: KeyId, value: Option<Iri>) -> Result<()> {
        match self.node(id)?.kind {
            KeyKind::GroupOfValues | KeyKind::TranslationGroup => {
                let value = value.ok_or_else(|| KeyError::missing("predicate", Some(id)))?;
                self.node_mut(id)?.predicate = Some(value);
                Ok(())
            }
            KeyKind::GroupOfProperties | KeyKind::Value => {
                self.write_shared(id, Shared::Predicate, value.map(|v| v.as_str().to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Set the label
    pub fn set_label(&mut self, id: KeyId, value: Option<String>) -> Result<()> {
        let value = non_empty(value);
        match self.node(id)?.kind {
            KeyKind::Tab | KeyKind::GroupOfValues | KeyKind::TranslationGroup => {
                self.node_mut(id)?.label = value;
                Ok(())
            }
            KeyKind::GroupOfProperties | KeyKind::Value => {
                self.write_shared(id, Shared::Label, value)
            }
            _ => Ok(()),
        }
    }

    /// Set the help text
    pub fn set_description(&mut self, id: KeyId, value: Option<String>) -> Result<()> {
        let value = non_empty(value);
        match self.node(id)?.kind {
            KeyKind::GroupOfValues | KeyKind::TranslationGroup => {
                self.node_mut(id)?.description = value;
                Ok(())
            }
            KeyKind::GroupOfProperties | KeyKind::Value => {
                self.write_shared(id, Shared::Description, value)
            }
            _ => Ok(()),
        }
    }

    fn write_shared(&mut self, id: KeyId, field: Shared, value: Option<String>) -> Result<()> {
        if self.in_value_group(id) {
            return Ok(());
        }
        let key = self.node(id)?;
        let twin = key.m_twin();
        let is_main = key.is_main_twin();
        let from_twin = match (field, twin) {
            (Shared::Predicate, Some(_)) => !is_main || value.is_none(),
            (_, Some(_)) => !is_main,
            (_, None) => false,
        };
        let value = match (from_twin, twin) {
            (true, Some(twin)) => {
                let twin = self.node(twin)?;
                match field {
                    Shared::Predicate => twin.predicate.as_ref().map(|p| p.as_str().to_string()),
                    Shared::Label => twin.label.clone(),
                    Shared::Description => twin.description.clone(),
                }
            }
            _ => value,
        };
        let mirror = twin.filter(|_| is_main);
        match field {
            Shared::Predicate => {
                let predicate = value
                    .map(Iri::new_unchecked)
                    .ok_or_else(|| KeyError::missing("predicate", Some(id)))?;
                if let Some(twin) = mirror {
                    self.node_mut(twin)?.predicate = Some(predicate.clone());
                }
                self.node_mut(id)?.predicate = Some(predicate);
            }
            Shared::Label => {
                if let Some(twin) = mirror {
                    self.node_mut(twin)?.label.clone_from(&value);
                }
                self.node_mut(id)?.label = value;
            }
            Shared::Description => {
                if let Some(twin) = mirror {
                    self.node_mut(twin)?.description.clone_from(&value);
                }
                self.node_mut(id)?.description = value;
            }
        }
        Ok(())
    }

    /// Set the blank node of a group of properties, a fresh one for `None`
    pub fn set_node(&mut self, id: KeyId, value: Option<BlankNode>) -> Result<()> {
        if let Payload::Properties { node, .. } = &mut self.node_mut(id)?.payload {
            *node = value.unwrap_or_default();
        }
        Ok(())
    }

    /// Set the RDF class of the key's value
    ///
    /// # Errors
    /// `MissingParameter` when removing the class of a property group, or
    /// of a group of values holding property groups.
    pub fn set_rdftype(&mut self, id: KeyId, value: Option<Iri>) -> Result<()> {
        let kind = self.node(id)?.kind;
        match kind {
            KeyKind::GroupOfValues => {
                let has_groups = self
                    .children(id)
                    .iter()
                    .filter_map(|c| self.keys.get(c))
                    .any(|c| c.kind == KeyKind::GroupOfProperties);
                if value.is_none() && has_groups {
                    return Err(KeyError::missing("rdftype", Some(id)));
                }
                self.write_config(id, |c| c.rdftype = value)?;
                self.reset_xsdtype(id)
            }
            KeyKind::GroupOfProperties => {
                if self.in_value_group(id) {
                    return Ok(());
                }
                let value = value.ok_or_else(|| KeyError::missing("rdftype", Some(id)))?;
                if let Payload::Properties { rdftype, .. } = &mut self.node_mut(id)?.payload {
                    *rdftype = Some(value);
                }
                Ok(())
            }
            KeyKind::Value => {
                if self.in_value_group(id) {
                    return Ok(());
                }
                self.write_config(id, |c| c.rdftype = value)?;
                self.reset_xsdtype(id)
            }
            _ => Ok(()),
        }
    }

    fn reset_xsdtype(&mut self, id: KeyId) -> Result<()> {
        let current = self.node(id)?.own_config().and_then(|c| c.xsdtype.clone());
        self.set_xsdtype(id, current)
    }

    /// Set the datatype of the key's value
    ///
    /// None when the key has an RDF class, `xsd:string` by default.
    /// Dependent value languages and long-text flags are re-evaluated.
    pub fn set_xsdtype(&mut self, id: KeyId, value: Option<Iri>) -> Result<()> {
        let key = self.node(id)?;
        let targets: Vec<KeyId> = match key.kind {
            KeyKind::GroupOfValues => key
                .children()
                .iter()
                .copied()
                .filter(|c| self.keys.get(c).is_some_and(|k| k.kind == KeyKind::Value))
                .collect(),
            KeyKind::Value if !self.in_value_group(id) => vec![id],
            _ => return Ok(()),
        };
        let has_rdftype = key.own_config().is_some_and(|c| c.rdftype.is_some());
        let value = if has_rdftype {
            None
        } else {
            Some(value.unwrap_or_else(|| XSD_STRING.clone()))
        };
        self.write_config(id, |c| c.xsdtype = value)?;
        if self.is_unborn(id) {
            return Ok(());
        }
        for target in targets {
            let language = self.value_language(target);
            self.set_value_language(target, language)?;
            let long_text = self.node(target)?.is_long_text();
            self.set_is_long_text(target, Some(long_text))?;
        }
        Ok(())
    }

    /// Set the vocabularies a value may come from
    ///
    /// Dependent value sources are re-validated and the source menus of
    /// the concerned keys refreshed.
    pub fn set_sources(&mut self, id: KeyId, value: Option<Vec<Iri>>) -> Result<()> {
        let value = value.filter(|s| !s.is_empty());
        let key = self.node(id)?;
        match key.kind {
            KeyKind::GroupOfValues => {
                if key.own_config().and_then(|c| c.sources.as_ref()) == value.as_ref() {
                    return Ok(());
                }
                let children = key.children().to_vec();
                self.write_config(id, |c| c.sources = value)?;
                if self.is_unborn(id) {
                    return Ok(());
                }
                for child in children {
                    let child_key = self.node(child)?;
                    let is_value = child_key.kind == KeyKind::Value;
                    let twin = child_key.m_twin();
                    let source = child_key.value_source().cloned();
                    if is_value && source.is_some() {
                        self.set_value_source(child, source)?;
                    }
                    if is_value || twin.is_some() {
                        self.record(Action::Sources, child);
                        if let Some(twin) = twin {
                            self.record(Action::Sources, twin);
                        }
                    }
                }
                Ok(())
            }
            KeyKind::Value if !self.in_value_group(id) => {
                if key.own_config().and_then(|c| c.sources.as_ref()) == value.as_ref() {
                    return Ok(());
                }
                let source = key.value_source().cloned();
                self.write_config(id, |c| c.sources = value)?;
                self.record(Action::Sources, id);
                if !self.is_unborn(id) && source.is_some() {
                    self.set_value_source(id, source)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Set the display transform
    pub fn set_transform(&mut self, id: KeyId, value: Option<Transform>) -> Result<()> {
        if self.node(id)?.kind == KeyKind::TranslationGroup {
            return Ok(());
        }
        self.write_config(id, |c| c.transform = value)
    }

    /// Set the validation pattern, dropping flags when removed
    pub fn set_regex_validator(&mut self, id: KeyId, value: Option<String>) -> Result<()> {
        let value = non_empty(value);
        self.write_config(id, |c| {
            if value.is_none() {
                c.regex_validator_flags = None;
            }
            c.regex_validator = value;
        })
    }

    /// Set the validation flags, ignored without a pattern
    pub fn set_regex_validator_flags(&mut self, id: KeyId, value: Option<String>) -> Result<()> {
        let value = non_empty(value);
        self.write_config(id, |c| {
            c.regex_validator_flags = c.regex_validator.as_ref().and(value);
        })
    }

    /// Allow or forbid minus buttons in a group of values
    pub fn set_with_minus_buttons(&mut self, id: KeyId, value: Option<bool>) -> Result<()> {
        let key = self.node_mut(id)?;
        let is_ghost = key.is_ghost;
        if let Some(group) = key.value_group_mut() {
            group.with_minus_buttons = value.unwrap_or(false) && !is_ghost;
        }
        Ok(())
    }

    /// Set the number of grid rows of a value
    pub fn set_rowspan(&mut self, id: KeyId, value: Option<usize>) -> Result<()> {
        let key = self.node_mut(id)?;
        let is_ghost = key.is_ghost;
        let parent = key.parent;
        if let Some(data) = key.value_data_mut() {
            data.rowspan = if is_ghost {
                0
            } else {
                value.filter(|r| *r > 0).unwrap_or(1)
            };
        }
        if let Some(parent) = parent.filter(|_| !self.is_unborn(id)) {
            self.compute_rows(parent);
        }
        Ok(())
    }

    /// Set the value of a value key
    pub fn set_value(&mut self, id: KeyId, value: Option<Term>) -> Result<()> {
        self.write_value(id, |d| d.value = value)
    }

    /// Language of a value, the main language for untagged text
    #[must_use]
    pub fn value_language(&self, id: KeyId) -> Option<String> {
        let key = self.keys.get(&id)?;
        if let Some(language) = key.value_data().and_then(|d| d.value_language.clone()) {
            return Some(language);
        }
        if key.kind == KeyKind::Value && self.effective_xsdtype(id) == Some(&*RDF_LANG_STRING) {
            return self.session.main_language().ok().map(str::to_string);
        }
        None
    }

    /// Set the language of a value
    ///
    /// Inside a translation group the old language goes back to the pool
    /// and the new one, or the first one available, leaves it.
    ///
    /// # Errors
    /// `IntegrityBreach` when a translation group has no language left.
    pub fn set_value_language(&mut self, id: KeyId, value: Option<String>) -> Result<()> {
        let key = self.node(id)?;
        if key.kind != KeyKind::Value {
            return Ok(());
        }
        let parent = self.parent_of(id)?;
        let old = key.value_data().and_then(|d| d.value_language.clone());
        let literal_language = key.value().and_then(Term::language).map(str::to_string);
        let mut value = if self.effective_xsdtype(id) == Some(&*RDF_LANG_STRING) {
            non_empty(value).or(literal_language)
        } else {
            None
        };
        if self.node(parent)?.kind == KeyKind::TranslationGroup {
            if value.is_none() {
                value = Some(
                    self.available_languages(parent)
                        .and_then(<[String]>::first)
                        .cloned()
                        .ok_or_else(|| {
                            KeyError::integrity(Some(id), "no language left in the translation group")
                        })?,
                );
            }
            self.language_in(parent, old.as_deref(), Some(id));
            self.language_out(parent, value.as_deref());
        } else if self.value_language(id) != value {
            self.record(Action::Languages, id);
        }
        self.write_value(id, |d| d.value_language = value)
    }

    /// Set the vocabulary of a value, none when not among its sources
    pub fn set_value_source(&mut self, id: KeyId, value: Option<Iri>) -> Result<()> {
        let Some(sources) = self.effective_sources(id) else {
            return Ok(());
        };
        let value = value.filter(|v| sources.contains(v));
        let key = self.node(id)?;
        if key.kind != KeyKind::Value || key.value_source() == value.as_ref() {
            return Ok(());
        }
        self.write_value(id, |d| d.value_source = value)?;
        self.record(Action::Sources, id);
        self.record(Action::Thesaurus, id);
        Ok(())
    }

    /// Display as multi-line text, only for string datatypes
    pub fn set_is_long_text(&mut self, id: KeyId, value: Option<bool>) -> Result<()> {
        let text = is_text_type(self.effective_xsdtype(id));
        self.write_value(id, |d| d.is_long_text = value.unwrap_or(false) && text)
    }

    /// Put the label on its own row, for labelled real values only
    pub fn set_independant_label(&mut self, id: KeyId, value: Option<bool>) -> Result<()> {
        let key = self.node(id)?;
        let allowed = key.is_real() && !self.in_value_group(id);
        let parent = key.parent;
        self.write_value(id, |d| d.independant_label = value.unwrap_or(false) && allowed)?;
        if let Some(parent) = parent.filter(|_| !self.is_unborn(id)) {
            self.compute_rows(parent);
        }
        Ok(())
    }

    /// Write the field settings the key owns
    fn write_config(&mut self, id: KeyId, write: impl FnOnce(&mut FieldConfig)) -> Result<()> {
        let in_values = self.in_value_group(id);
        let key = self.node_mut(id)?;
        let owned = match key.kind {
            KeyKind::GroupOfValues => true,
            KeyKind::Value => !in_values,
            _ => false,
        };
        if owned {
            if let Some(config) = key.own_config_mut() {
                write(config);
            }
        } else if key.kind == KeyKind::TranslationGroup {
            if let Some(config) = key.own_config_mut() {
                let mut scratch = config.clone();
                write(&mut scratch);
                scratch.rdftype = None;
                scratch.xsdtype = Some(RDF_LANG_STRING.clone());
                scratch.sources = None;
                scratch.transform = None;
                *config = scratch;
            }
        }
        Ok(())
    }

    fn write_value(
        &mut self,
        id: KeyId,
        write: impl FnOnce(&mut crate::key::ValueData),
    ) -> Result<()> {
        if let Some(data) = self.node_mut(id)?.value_data_mut() {
            write(data);
        }
        Ok(())
    }
}
