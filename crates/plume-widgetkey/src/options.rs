//! Construction options and update attributes
//!
//! [`KeyOptions`] gathers every named setting a factory may read; each kind
//! picks the ones it recognises. [`Attribute`] carries one setting for
//! [`WidgetTree::update`](crate::WidgetTree::update).

use plume_rdf::{BlankNode, Iri, Term};
use serde::{Deserialize, Serialize};

use crate::types::{KeyId, OrderIdx, Transform};

/// Named settings read by the key factories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyOptions {
    pub parent: Option<KeyId>,
    pub is_ghost: bool,
    pub order_idx: Option<OrderIdx>,
    pub predicate: Option<Iri>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub m_twin: Option<KeyId>,
    pub is_hidden_m: Option<bool>,
    pub is_main_twin: Option<bool>,
    pub node: Option<BlankNode>,
    pub rdftype: Option<Iri>,
    pub xsdtype: Option<Iri>,
    pub sources: Option<Vec<Iri>>,
    pub transform: Option<Transform>,
    pub placeholder: Option<String>,
    pub input_mask: Option<String>,
    pub is_mandatory: bool,
    pub is_read_only: bool,
    pub regex_validator: Option<String>,
    pub regex_validator_flags: Option<String>,
    pub with_minus_buttons: Option<bool>,
    pub value: Option<Term>,
    pub value_language: Option<String>,
    pub value_source: Option<Iri>,
    pub do_not_save: bool,
    pub is_long_text: bool,
    pub rowspan: Option<usize>,
    pub independant_label: bool,
}

impl KeyOptions {
    /// Options with only a parent set
    #[must_use]
    pub fn child_of(parent: KeyId) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: KeyId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_ghost(mut self, is_ghost: bool) -> Self {
        self.is_ghost = is_ghost;
        self
    }

    #[must_use]
    pub fn with_order_idx(mut self, order_idx: impl Into<OrderIdx>) -> Self {
        self.order_idx = Some(order_idx.into());
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: Iri) -> Self {
        self.predicate = Some(predicate);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_twin(mut self, twin: KeyId) -> Self {
        self.m_twin = Some(twin);
        self
    }

    #[must_use]
    pub fn with_hidden_m(mut self, is_hidden_m: bool) -> Self {
        self.is_hidden_m = Some(is_hidden_m);
        self
    }

    #[must_use]
    pub fn with_main_twin(mut self, is_main_twin: bool) -> Self {
        self.is_main_twin = Some(is_main_twin);
        self
    }

    #[must_use]
    pub fn with_node(mut self, node: BlankNode) -> Self {
        self.node = Some(node);
        self
    }

    #[must_use]
    pub fn with_rdftype(mut self, rdftype: Iri) -> Self {
        self.rdftype = Some(rdftype);
        self
    }

    #[must_use]
    pub fn with_xsdtype(mut self, xsdtype: Iri) -> Self {
        self.xsdtype = Some(xsdtype);
        self
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<Iri>) -> Self {
        self.sources = Some(sources);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_input_mask(mut self, input_mask: impl Into<String>) -> Self {
        self.input_mask = Some(input_mask.into());
        self
    }

    #[must_use]
    pub fn with_mandatory(mut self, is_mandatory: bool) -> Self {
        self.is_mandatory = is_mandatory;
        self
    }

    #[must_use]
    pub fn with_read_only(mut self, is_read_only: bool) -> Self {
        self.is_read_only = is_read_only;
        self
    }

    #[must_use]
    pub fn with_regex_validator(
        mut self,
        pattern: impl Into<String>,
        flags: Option<String>,
    ) -> Self {
        self.regex_validator = Some(pattern.into());
        self.regex_validator_flags = flags;
        self
    }

    #[must_use]
    pub fn with_minus_buttons(mut self, with_minus_buttons: bool) -> Self {
        self.with_minus_buttons = Some(with_minus_buttons);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<Term>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_value_language(mut self, language: impl Into<String>) -> Self {
        self.value_language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_value_source(mut self, source: Iri) -> Self {
        self.value_source = Some(source);
        self
    }

    #[must_use]
    pub fn with_do_not_save(mut self, do_not_save: bool) -> Self {
        self.do_not_save = do_not_save;
        self
    }

    #[must_use]
    pub fn with_long_text(mut self, is_long_text: bool) -> Self {
        self.is_long_text = is_long_text;
        self
    }

    #[must_use]
    pub fn with_rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = Some(rowspan);
        self
    }

    #[must_use]
    pub fn with_independant_label(mut self, independant_label: bool) -> Self {
        self.independant_label = independant_label;
        self
    }
}

/// One attribute assignment for `update`
///
/// `None` payloads reset the attribute, unless the update excludes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    OrderIdx(Option<OrderIdx>),
    Predicate(Option<Iri>),
    Label(Option<String>),
    Description(Option<String>),
    IsHiddenM(Option<bool>),
    Node(Option<BlankNode>),
    RdfType(Option<Iri>),
    XsdType(Option<Iri>),
    Sources(Option<Vec<Iri>>),
    Transform(Option<Transform>),
    Placeholder(Option<String>),
    InputMask(Option<String>),
    IsMandatory(Option<bool>),
    IsReadOnly(Option<bool>),
    RegexValidator(Option<String>),
    RegexValidatorFlags(Option<String>),
    WithMinusButtons(Option<bool>),
    Rowspan(Option<usize>),
    Value(Option<Term>),
    ValueLanguage(Option<String>),
    ValueSource(Option<Iri>),
    DoNotSave(Option<bool>),
    IsLongText(Option<bool>),
    IndependantLabel(Option<bool>),
}

impl Attribute {
    /// Attribute name, as listed by [`KeyKind::updatable`](crate::KeyKind::updatable)
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderIdx(_) => "order_idx",
            Self::Predicate(_) => "predicate",
            Self::Label(_) => "label",
            Self::Description(_) => "description",
            Self::IsHiddenM(_) => "is_hidden_m",
            Self::Node(_) => "node",
            Self::RdfType(_) => "rdftype",
            Self::XsdType(_) => "xsdtype",
            Self::Sources(_) => "sources",
            Self::Transform(_) => "transform",
            Self::Placeholder(_) => "placeholder",
            Self::InputMask(_) => "input_mask",
            Self::IsMandatory(_) => "is_mandatory",
            Self::IsReadOnly(_) => "is_read_only",
            Self::RegexValidator(_) => "regex_validator",
            Self::RegexValidatorFlags(_) => "regex_validator_flags",
            Self::WithMinusButtons(_) => "with_minus_buttons",
            Self::Rowspan(_) => "rowspan",
            Self::Value(_) => "value",
            Self::ValueLanguage(_) => "value_language",
            Self::ValueSource(_) => "value_source",
            Self::DoNotSave(_) => "do_not_save",
            Self::IsLongText(_) => "is_long_text",
            Self::IndependantLabel(_) => "independant_label",
        }
    }

    /// Check if the payload is absent
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::OrderIdx(v) => v.is_none(),
            Self::Predicate(v) | Self::RdfType(v) | Self::XsdType(v) | Self::ValueSource(v) => {
                v.is_none()
            }
            Self::Label(v)
            | Self::Description(v)
            | Self::Placeholder(v)
            | Self::InputMask(v)
            | Self::RegexValidator(v)
            | Self::RegexValidatorFlags(v)
            | Self::ValueLanguage(v) => v.is_none(),
            Self::IsHiddenM(v)
            | Self::IsMandatory(v)
            | Self::IsReadOnly(v)
            | Self::WithMinusButtons(v)
            | Self::DoNotSave(v)
            | Self::IsLongText(v)
            | Self::IndependantLabel(v) => v.is_none(),
            Self::Node(v) => v.is_none(),
            Self::Sources(v) => v.is_none(),
            Self::Transform(v) => v.is_none(),
            Self::Rowspan(v) => v.is_none(),
            Self::Value(v) => v.is_none(),
        }
    }
}
