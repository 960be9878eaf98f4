//! Core identifiers and enumerations of the widget-key tree

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::error::KeyError;

/// Unique identifier of a widget key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(pub Uuid);

impl KeyId {
    /// Create a fresh random id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    #[inline]
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for KeyId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a key among its siblings
///
/// Compared lexicographically, like a tuple of integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderIdx(SmallVec<[u32; 4]>);

impl OrderIdx {
    /// Index sorting after any explicitly placed sibling
    pub const LAST: u32 = 9999;

    /// Build from components
    pub fn new(parts: impl IntoIterator<Item = u32>) -> Self {
        Self(parts.into_iter().collect())
    }

    /// Default index `(9999,)`
    #[must_use]
    pub fn last() -> Self {
        Self::new([Self::LAST])
    }

    /// Components
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for OrderIdx {
    fn default() -> Self {
        Self::last()
    }
}

impl PartialOrd for OrderIdx {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderIdx {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.as_slice().cmp(other.0.as_slice())
    }
}

impl From<u32> for OrderIdx {
    fn from(value: u32) -> Self {
        Self::new([value])
    }
}

impl From<&[u32]> for OrderIdx {
    fn from(value: &[u32]) -> Self {
        Self::new(value.iter().copied())
    }
}

impl From<Vec<u32>> for OrderIdx {
    fn from(value: Vec<u32>) -> Self {
        Self::new(value)
    }
}

impl Display for OrderIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "({},)", parts.join(", "))
    }
}

/// Kind of a widget key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// Tree root, one per tree
    Root,
    /// Form tab
    Tab,
    /// Blank node with its own properties
    GroupOfProperties,
    /// Values sharing one predicate
    GroupOfValues,
    /// Values of one predicate in several languages
    TranslationGroup,
    /// Literal or IRI value
    Value,
    /// Adds a value to a group of values
    PlusButton,
    /// Adds a translation to a translation group
    TranslationButton,
}

impl KeyKind {
    /// Check if keys of this kind hold children
    #[inline]
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(
            self,
            Self::Root
                | Self::Tab
                | Self::GroupOfProperties
                | Self::GroupOfValues
                | Self::TranslationGroup
        )
    }

    /// Check if keys of this kind represent an RDF object
    #[inline]
    #[must_use]
    pub fn is_object(self) -> bool {
        matches!(self, Self::GroupOfProperties | Self::Value)
    }

    /// Check if keys of this kind gather values of one predicate
    #[inline]
    #[must_use]
    pub fn is_value_group(self) -> bool {
        matches!(self, Self::GroupOfValues | Self::TranslationGroup)
    }

    /// Check if keys of this kind live in a button slot
    #[inline]
    #[must_use]
    pub fn is_button(self) -> bool {
        matches!(self, Self::PlusButton | Self::TranslationButton)
    }

    /// Name the GUI uses for keys of this kind
    #[must_use]
    pub fn key_object(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Tab => "tab",
            Self::GroupOfProperties => "group of properties",
            Self::GroupOfValues => "group of values",
            Self::TranslationGroup => "translation group",
            Self::Value => "edit",
            Self::PlusButton => "plus button",
            Self::TranslationButton => "translation button",
        }
    }

    /// Attributes `update` accepts for this kind
    #[must_use]
    pub fn updatable(self) -> &'static [&'static str] {
        match self {
            Self::Root => &[],
            Self::Tab => &["order_idx", "label"],
            Self::GroupOfProperties => &[
                "order_idx",
                "predicate",
                "label",
                "description",
                "is_hidden_m",
                "node",
                "rdftype",
            ],
            Self::GroupOfValues | Self::TranslationGroup => &[
                "order_idx",
                "predicate",
                "label",
                "description",
                "rdftype",
                "sources",
                "xsdtype",
                "transform",
                "placeholder",
                "input_mask",
                "is_mandatory",
                "is_read_only",
                "regex_validator",
                "regex_validator_flags",
                "with_minus_buttons",
            ],
            Self::Value => &[
                "order_idx",
                "predicate",
                "label",
                "description",
                "is_hidden_m",
                "rowspan",
                "value",
                "rdftype",
                "xsdtype",
                "placeholder",
                "input_mask",
                "is_mandatory",
                "is_read_only",
                "regex_validator",
                "regex_validator_flags",
                "value_language",
                "value_source",
                "do_not_save",
                "is_long_text",
                "transform",
                "sources",
                "independant_label",
            ],
            Self::PlusButton | Self::TranslationButton => &["order_idx"],
        }
    }
}

impl Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_object())
    }
}

/// Preprocessing applied to a value before storage and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// `mailto:` IRIs shown as bare addresses
    Email,
    /// `tel:` IRIs shown as phone numbers
    Phone,
}

impl Transform {
    /// Parse a transform name, ignoring unknown ones
    #[must_use]
    pub fn parse_lenient(name: &str) -> Option<Self> {
        match name.parse() {
            Ok(t) => Some(t),
            Err(err) => {
                tracing::debug!("Ignored transform: {}", err);
                None
            }
        }
    }
}

impl FromStr for Transform {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(KeyError::UnknownParameterValue {
                parameter: "transform",
                value: other.to_string(),
            }),
        }
    }
}
