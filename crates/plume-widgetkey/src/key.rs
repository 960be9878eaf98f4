//! Widget key storage
//!
//! A single node type carries what every key has (identity, parent, ghost
//! and mask flags, order, row) plus facets selected by the kind: children
//! for groups, twin link for object keys, and a kind-specific payload.

use plume_rdf::{BlankNode, Iri, Term};
use serde::{Deserialize, Serialize};

use crate::children::ChildrenList;
use crate::types::{KeyId, KeyKind, OrderIdx, Transform};

/// Field settings shared by a group of values with its values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
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
}

/// Twin link of a group of properties or a value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TwinLink {
    pub(crate) m_twin: Option<KeyId>,
    pub(crate) is_main_twin: bool,
}

/// Payload of a group of values or a translation group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ValueGroup {
    pub(crate) config: FieldConfig,
    pub(crate) with_minus_buttons: bool,
    pub(crate) button: Option<KeyId>,
    /// Language pool, translation groups only
    pub(crate) available_languages: Option<Vec<String>>,
}

/// Payload of a value key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ValueData {
    /// Local settings, unused inside a group of values
    pub(crate) config: FieldConfig,
    pub(crate) value: Option<Term>,
    pub(crate) value_language: Option<String>,
    pub(crate) value_source: Option<Iri>,
    pub(crate) do_not_save: bool,
    pub(crate) is_long_text: bool,
    pub(crate) rowspan: usize,
    pub(crate) independant_label: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Payload {
    Root { datasetid: Iri },
    Tab,
    Properties { node: BlankNode, rdftype: Option<Iri> },
    Values(ValueGroup),
    Value(ValueData),
    Button,
}

/// Node of the widget-key tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetKey {
    pub(crate) id: KeyId,
    pub(crate) kind: KeyKind,
    pub(crate) parent: Option<KeyId>,
    pub(crate) is_ghost: bool,
    pub(crate) is_hidden_m: bool,
    pub(crate) order_idx: Option<OrderIdx>,
    pub(crate) row: Option<usize>,
    pub(crate) is_single_child: bool,
    pub(crate) predicate: Option<Iri>,
    pub(crate) label: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) children: Option<ChildrenList>,
    pub(crate) twin: Option<TwinLink>,
    pub(crate) payload: Payload,
}

impl WidgetKey {
    pub(crate) fn new(kind: KeyKind, parent: Option<KeyId>, payload: Payload) -> Self {
        Self {
            id: KeyId::new(),
            kind,
            parent,
            is_ghost: false,
            is_hidden_m: false,
            order_idx: None,
            row: None,
            is_single_child: false,
            predicate: None,
            label: None,
            description: None,
            children: kind.is_group().then(ChildrenList::default),
            twin: kind.is_object().then(TwinLink::default),
            payload,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> KeyId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<KeyId> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn is_ghost(&self) -> bool {
        self.is_ghost
    }

    /// Truthiness of a key: a ghost is never displayed nor counted
    #[inline]
    #[must_use]
    pub fn is_real(&self) -> bool {
        !self.is_ghost
    }

    #[inline]
    #[must_use]
    pub fn is_hidden_m(&self) -> bool {
        self.is_hidden_m
    }

    #[inline]
    #[must_use]
    pub fn order_idx(&self) -> Option<&OrderIdx> {
        self.order_idx.as_ref()
    }

    /// Grid row, none for a ghost
    #[inline]
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        if self.is_ghost {
            None
        } else {
            self.row
        }
    }

    #[inline]
    #[must_use]
    pub fn is_single_child(&self) -> bool {
        self.is_real() && self.is_single_child
    }

    /// Rows taken by the key's widget
    #[must_use]
    pub fn rowspan(&self) -> usize {
        if self.is_ghost {
            return 0;
        }
        match &self.payload {
            Payload::Value(data) => data.rowspan,
            _ => 1,
        }
    }

    /// Children, in display order for groups of properties and tabs
    #[must_use]
    pub fn children(&self) -> &[KeyId] {
        self.children.as_ref().map_or(&[], ChildrenList::as_slice)
    }

    #[inline]
    #[must_use]
    pub fn m_twin(&self) -> Option<KeyId> {
        self.twin.and_then(|t| t.m_twin)
    }

    #[inline]
    #[must_use]
    pub fn is_main_twin(&self) -> bool {
        self.twin.is_some_and(|t| t.is_main_twin)
    }

    /// Check if the key is the hidden half of a twin pair
    #[inline]
    #[must_use]
    pub fn is_secondary_twin(&self) -> bool {
        self.m_twin().is_some() && !self.is_main_twin()
    }

    /// Button of a group of values
    #[must_use]
    pub fn button(&self) -> Option<KeyId> {
        self.value_group().and_then(|g| g.button)
    }

    /// Value of a value key
    #[must_use]
    pub fn value(&self) -> Option<&Term> {
        self.value_data().and_then(|d| d.value.as_ref())
    }

    /// Blank node of a group of properties
    #[must_use]
    pub fn node(&self) -> Option<&BlankNode> {
        match &self.payload {
            Payload::Properties { node, .. } => Some(node),
            _ => None,
        }
    }

    /// Dataset identifier held by the root
    #[must_use]
    pub fn datasetid(&self) -> Option<&Iri> {
        match &self.payload {
            Payload::Root { datasetid } => Some(datasetid),
            _ => None,
        }
    }

    #[must_use]
    pub fn do_not_save(&self) -> bool {
        self.value_data().is_some_and(|d| d.do_not_save)
    }

    #[must_use]
    pub fn is_long_text(&self) -> bool {
        self.value_data().is_some_and(|d| d.is_long_text)
    }

    #[must_use]
    pub fn independant_label(&self) -> bool {
        self.value_data().is_some_and(|d| d.independant_label)
    }

    #[must_use]
    pub fn value_source(&self) -> Option<&Iri> {
        self.value_data().and_then(|d| d.value_source.as_ref())
    }

    #[must_use]
    pub fn with_minus_buttons(&self) -> bool {
        self.value_group().is_some_and(|g| g.with_minus_buttons)
    }

    pub(crate) fn value_group(&self) -> Option<&ValueGroup> {
        match &self.payload {
            Payload::Values(group) => Some(group),
            _ => None,
        }
    }

    pub(crate) fn value_group_mut(&mut self) -> Option<&mut ValueGroup> {
        match &mut self.payload {
            Payload::Values(group) => Some(group),
            _ => None,
        }
    }

    pub(crate) fn value_data(&self) -> Option<&ValueData> {
        match &self.payload {
            Payload::Value(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn value_data_mut(&mut self) -> Option<&mut ValueData> {
        match &mut self.payload {
            Payload::Value(data) => Some(data),
            _ => None,
        }
    }

    /// Locally stored field settings
    pub(crate) fn own_config(&self) -> Option<&FieldConfig> {
        match &self.payload {
            Payload::Values(group) => Some(&group.config),
            Payload::Value(data) => Some(&data.config),
            _ => None,
        }
    }

    pub(crate) fn own_config_mut(&mut self) -> Option<&mut FieldConfig> {
        match &mut self.payload {
            Payload::Values(group) => Some(&mut group.config),
            Payload::Value(data) => Some(&mut data.config),
            _ => None,
        }
    }

    pub(crate) fn twin_mut(&mut self) -> Option<&mut TwinLink> {
        self.twin.as_mut()
    }
}
