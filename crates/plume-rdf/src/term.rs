//! RDF terms
//!
//! Provides the three node kinds of an RDF graph:
//! - [`Iri`] for named resources
//! - [`BlankNode`] for anonymous resources
//! - [`Literal`] for plain, language-tagged and typed values
//!
//! [`Term`] unites them for the object position of a triple.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RdfError;
use crate::namespace::RDF_LANG_STRING;
use crate::text::forbidden_char;

/// Absolute IRI
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    /// Create an IRI
    ///
    /// # Errors
    /// Returns error if the string is empty or holds a forbidden character
    pub fn new(value: impl Into<String>) -> Result<Self, RdfError> {
        let value = value.into();
        if value.is_empty() {
            return Err(RdfError::InvalidIri(value));
        }
        if let Some(character) = forbidden_char(&value) {
            return Err(RdfError::ForbiddenChar {
                iri: value,
                character,
            });
        }
        Ok(Self(value))
    }

    /// Create an IRI from a trusted string (namespace constants, minted ids)
    #[inline]
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// IRI text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// N3 form, `<iri>`
    #[inline]
    #[must_use]
    pub fn n3(&self) -> String {
        format!("<{}>", self.0)
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Iri {
    type Error = RdfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}

/// Blank node identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlankNode(String);

impl BlankNode {
    /// Fresh blank node
    #[must_use]
    pub fn new() -> Self {
        Self(format!("N{}", Uuid::new_v4().simple()))
    }

    /// Blank node with a known identifier
    #[inline]
    #[must_use]
    pub fn from_id(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier, without the `_:` prefix
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BlankNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Literal value
///
/// A literal carries either a language tag or a datatype, never both.
/// Language-tagged literals report `rdf:langString` as their datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datatype: Option<Iri>,
}

impl Literal {
    /// Plain literal
    #[inline]
    #[must_use]
    pub fn new(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: None,
            datatype: None,
        }
    }

    /// Language-tagged literal
    #[inline]
    #[must_use]
    pub fn with_language(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// Typed literal
    ///
    /// A datatype of `rdf:langString` without a tag degrades to a plain literal.
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        let datatype = (datatype != *RDF_LANG_STRING).then_some(datatype);
        Self {
            lexical: lexical.into(),
            language: None,
            datatype,
        }
    }

    /// Lexical form
    #[inline]
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Language tag
    #[inline]
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Datatype, `rdf:langString` for tagged literals
    #[must_use]
    pub fn datatype(&self) -> Option<&Iri> {
        if self.language.is_some() {
            Some(&*RDF_LANG_STRING)
        } else {
            self.datatype.as_ref()
        }
    }

    /// N3 form
    #[must_use]
    pub fn n3(&self) -> String {
        let quoted = format!(
            "\"{}\"",
            self.lexical
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
        );
        match (&self.language, &self.datatype) {
            (Some(lang), _) => format!("{quoted}@{lang}"),
            (None, Some(dt)) => format!("{quoted}^^{}", dt.n3()),
            (None, None) => quoted,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical)
    }
}

/// Any RDF node usable as a triple object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Term {
    /// Named resource
    Iri(Iri),
    /// Anonymous resource
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl Term {
    /// IRI, if the term is one
    #[inline]
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Blank node, if the term is one
    #[inline]
    #[must_use]
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Self::BlankNode(node) => Some(node),
            _ => None,
        }
    }

    /// Literal, if the term is one
    #[inline]
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Check if the term is a blank node
    #[inline]
    #[must_use]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    /// Check if the term is an IRI or a literal
    #[inline]
    #[must_use]
    pub fn is_iri_or_literal(&self) -> bool {
        !self.is_blank_node()
    }

    /// Language tag of a literal term
    #[inline]
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.as_literal().and_then(Literal::language)
    }

    /// N3 form
    #[must_use]
    pub fn n3(&self) -> String {
        match self {
            Self::Iri(iri) => iri.n3(),
            Self::BlankNode(node) => node.to_string(),
            Self::Literal(lit) => lit.n3(),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => Display::fmt(iri, f),
            Self::BlankNode(node) => f.write_str(node.id()),
            Self::Literal(lit) => Display::fmt(lit, f),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::XSD_INTEGER;

    #[test]
    fn iri_validation() {
        assert!(Iri::new("http://example.org/a").is_ok());
        assert!(matches!(Iri::new(""), Err(RdfError::InvalidIri(_))));
        assert!(matches!(
            Iri::new("http://example.org/a b"),
            Err(RdfError::ForbiddenChar { character: ' ', .. })
        ));
    }

    #[test]
    fn literal_datatypes() {
        let tagged = Literal::with_language("titre", "fr");
        assert_eq!(tagged.datatype(), Some(&*RDF_LANG_STRING));
        assert_eq!(tagged.language(), Some("fr"));

        let typed = Literal::typed("12", XSD_INTEGER.clone());
        assert_eq!(typed.datatype(), Some(&*XSD_INTEGER));
        assert_eq!(typed.language(), None);

        assert_eq!(Literal::typed("x", RDF_LANG_STRING.clone()).datatype(), None);
        assert_eq!(Literal::new("x").datatype(), None);
    }

    #[test]
    fn n3_forms() {
        assert_eq!(Literal::with_language("a \"b\"", "en").n3(), "\"a \\\"b\\\"\"@en");
        assert_eq!(
            Literal::typed("1", XSD_INTEGER.clone()).n3(),
            "\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        let node = BlankNode::from_id("b0");
        assert_eq!(Term::from(node).n3(), "_:b0");
    }

    #[test]
    fn blank_nodes_are_unique() {
        assert_ne!(BlankNode::new(), BlankNode::new());
    }

    #[test]
    fn display_is_lexical() {
        let term = Term::from(Literal::with_language("Mon titre", "fr"));
        assert_eq!(term.to_string(), "Mon titre");
        assert_eq!(term.language(), Some("fr"));
        assert!(term.is_iri_or_literal());
    }

    #[test]
    fn term_serde() {
        let term = Term::from(Literal::with_language("titre", "fr"));
        let json = serde_json::to_string(&term).unwrap();
        let back: Term = serde_json::from_str(&json).unwrap();
        assert_eq!(back, term);

        let bad = r#"{"type":"iri","value":"http://a b"}"#;
        assert!(serde_json::from_str::<Term>(bad).is_err());
    }
}
