//! Property paths
//!
//! Provides [`PropertyPath`], the chain of predicates leading from the
//! dataset node to a metadata field.

use std::fmt::{self, Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RdfError;
use crate::namespace::NamespaceManager;
use crate::term::Iri;

static PATH_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*/\s*").expect("static pattern"));

/// Sequence of predicates from the dataset node
///
/// N3 form joins prefixed names with ` / `.
///
/// # Examples
/// - `dct:title`
/// - `dcat:contactPoint / vcard:hasEmail`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyPath(Vec<Iri>);

impl PropertyPath {
    /// Create path from predicates
    #[inline]
    #[must_use]
    pub fn new(predicates: Vec<Iri>) -> Self {
        Self(predicates)
    }

    /// Path made of one predicate
    #[inline]
    #[must_use]
    pub fn single(predicate: Iri) -> Self {
        Self(vec![predicate])
    }

    /// Predicates, from the dataset node down
    #[inline]
    #[must_use]
    pub fn predicates(&self) -> &[Iri] {
        &self.0
    }

    /// Number of predicates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the path has no predicate
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last predicate
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Iri> {
        self.0.last()
    }

    /// Path without its last predicate
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    /// Append a predicate, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, predicate: Iri) -> Self {
        let mut new = self.clone();
        new.0.push(predicate);
        new
    }

    /// Check if this path is a prefix of another (or equal to it)
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }

    /// Check if this path is a strict prefix of another
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// N3 serialisation with the manager's prefixes
    #[must_use]
    pub fn to_n3(&self, nsm: &NamespaceManager) -> String {
        self.0
            .iter()
            .map(|iri| nsm.compact(iri))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Read an N3 path
    ///
    /// # Errors
    /// Returns error if the text is blank or any element is not an IRI
    pub fn from_n3(text: &str, nsm: &NamespaceManager) -> Result<Self, RdfError> {
        if text.trim().is_empty() {
            return Err(RdfError::InvalidPath(text.to_string()));
        }
        PATH_SEPARATOR
            .split(text.trim())
            .map(|element| {
                nsm.expand(element)
                    .map_err(|_| RdfError::InvalidPath(text.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Iri::n3).collect();
        f.write_str(&parts.join(" / "))
    }
}

impl From<Iri> for PropertyPath {
    fn from(predicate: Iri) -> Self {
        Self::single(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{DCAT, DCT, VCARD};

    fn nsm() -> NamespaceManager {
        NamespaceManager::default()
    }

    #[test]
    fn path_single_and_child() {
        let path = PropertyPath::single(DCAT.term("contactPoint"));
        let child = path.child(VCARD.term("hasEmail"));
        assert_eq!(child.len(), 2);
        assert_eq!(child.last(), Some(&VCARD.term("hasEmail")));
        assert_eq!(child.parent(), Some(path));
    }

    #[test]
    fn path_single_has_no_parent() {
        assert!(PropertyPath::single(DCT.term("title")).parent().is_none());
    }

    #[test]
    fn path_is_prefix_of() {
        let a = PropertyPath::single(DCAT.term("contactPoint"));
        let b = a.child(VCARD.term("fn"));
        assert!(a.is_prefix_of(&b));
        assert!(a.is_prefix_of(&a));
        assert!(!b.is_prefix_of(&a));
        assert!(a.is_ancestor_of(&b));
        assert!(!a.is_ancestor_of(&a));
    }

    #[test]
    fn prefix_is_segment_wise() {
        let short = PropertyPath::single(DCT.term("title"));
        let longer_name = PropertyPath::single(DCT.term("titleAlt"));
        assert!(!short.is_prefix_of(&longer_name));
    }

    #[test]
    fn path_to_n3() {
        let path = PropertyPath::single(DCAT.term("contactPoint")).child(VCARD.term("hasEmail"));
        assert_eq!(path.to_n3(&nsm()), "dcat:contactPoint / vcard:hasEmail");
    }

    #[test]
    fn path_from_n3() {
        let path = PropertyPath::from_n3("dct:title/ dct:description", &nsm()).unwrap();
        assert_eq!(
            path,
            PropertyPath::single(DCT.term("title")).child(DCT.term("description"))
        );

        let urn = "urn:uuid:479fd670-32c5-4ade-a26d-0268b0ce5046";
        let path = PropertyPath::from_n3(&format!("<{urn}>"), &nsm()).unwrap();
        assert_eq!(path.predicates()[0].as_str(), urn);
    }

    #[test]
    fn path_from_n3_rejects_garbage() {
        assert!(matches!(
            PropertyPath::from_n3("dct:title / unknown:x", &nsm()),
            Err(RdfError::InvalidPath(_))
        ));
        assert!(PropertyPath::from_n3("  ", &nsm()).is_err());
    }

    #[test]
    fn path_display() {
        let path = PropertyPath::single(DCT.term("title"));
        assert_eq!(path.to_string(), "<http://purl.org/dc/terms/title>");
    }
}
