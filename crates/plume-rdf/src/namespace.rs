//! Namespaces and prefix management
//!
//! Well-known vocabularies used by metadata records, and a
//! [`NamespaceManager`] translating between prefixed names and IRIs.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::RdfError;
use crate::term::Iri;

/// Vocabulary namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace {
    prefix: &'static str,
    base: &'static str,
}

impl Namespace {
    /// Create a namespace
    #[inline]
    #[must_use]
    pub const fn new(prefix: &'static str, base: &'static str) -> Self {
        Self { prefix, base }
    }

    /// Preferred prefix
    #[inline]
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Namespace IRI
    #[inline]
    #[must_use]
    pub const fn base(&self) -> &'static str {
        self.base
    }

    /// IRI of a term of the vocabulary
    #[inline]
    #[must_use]
    pub fn term(&self, local: &str) -> Iri {
        Iri::new_unchecked(format!("{}{}", self.base, local))
    }
}

pub const RDF: Namespace = Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const RDFS: Namespace = Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
pub const XSD: Namespace = Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#");
pub const OWL: Namespace = Namespace::new("owl", "http://www.w3.org/2002/07/owl#");
pub const SKOS: Namespace = Namespace::new("skos", "http://www.w3.org/2004/02/skos/core#");
pub const DCAT: Namespace = Namespace::new("dcat", "http://www.w3.org/ns/dcat#");
pub const DCT: Namespace = Namespace::new("dct", "http://purl.org/dc/terms/");
pub const FOAF: Namespace = Namespace::new("foaf", "http://xmlns.com/foaf/0.1/");
pub const VCARD: Namespace = Namespace::new("vcard", "http://www.w3.org/2006/vcard/ns#");
pub const SH: Namespace = Namespace::new("sh", "http://www.w3.org/ns/shacl#");
pub const GSP: Namespace = Namespace::new("gsp", "http://www.opengis.net/ont/geosparql#");
pub const SNUM: Namespace =
    Namespace::new("snum", "http://snum.scenari-community.org/Metadata/Vocabulaire/#");

pub static RDF_TYPE: Lazy<Iri> = Lazy::new(|| RDF.term("type"));
pub static RDF_LANG_STRING: Lazy<Iri> = Lazy::new(|| RDF.term("langString"));
pub static XSD_STRING: Lazy<Iri> = Lazy::new(|| XSD.term("string"));
pub static XSD_BOOLEAN: Lazy<Iri> = Lazy::new(|| XSD.term("boolean"));
pub static XSD_DATE: Lazy<Iri> = Lazy::new(|| XSD.term("date"));
pub static XSD_DATE_TIME: Lazy<Iri> = Lazy::new(|| XSD.term("dateTime"));
pub static XSD_TIME: Lazy<Iri> = Lazy::new(|| XSD.term("time"));
pub static XSD_INTEGER: Lazy<Iri> = Lazy::new(|| XSD.term("integer"));
pub static XSD_DECIMAL: Lazy<Iri> = Lazy::new(|| XSD.term("decimal"));
pub static XSD_FLOAT: Lazy<Iri> = Lazy::new(|| XSD.term("float"));
pub static XSD_DOUBLE: Lazy<Iri> = Lazy::new(|| XSD.term("double"));
pub static GSP_WKT_LITERAL: Lazy<Iri> = Lazy::new(|| GSP.term("wktLiteral"));
pub static DCAT_DATASET: Lazy<Iri> = Lazy::new(|| DCAT.term("Dataset"));
pub static DCT_IDENTIFIER: Lazy<Iri> = Lazy::new(|| DCT.term("identifier"));
pub static SNUM_COLUMN: Lazy<Iri> = Lazy::new(|| SNUM.term("column"));

/// Prefix bindings used to read and write N3 names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceManager {
    bindings: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Manager with no binding
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Bind a prefix, replacing any previous binding
    pub fn bind(&mut self, prefix: impl Into<String>, base: impl Into<String>) {
        self.bindings.insert(prefix.into(), base.into());
    }

    /// Builder form of [`Self::bind`]
    #[must_use]
    pub fn with_binding(mut self, prefix: impl Into<String>, base: impl Into<String>) -> Self {
        self.bind(prefix, base);
        self
    }

    /// Namespace IRI bound to `prefix`
    #[inline]
    #[must_use]
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Iterate over `(prefix, namespace)` bindings
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, b)| (p.as_str(), b.as_str()))
    }

    /// Read an N3 IRI: `<iri>` or `prefix:local`
    ///
    /// # Errors
    /// Returns error for an unbound prefix or an unreadable name
    pub fn expand(&self, name: &str) -> Result<Iri, RdfError> {
        let name = name.trim();
        if let Some(inner) = name.strip_prefix('<').and_then(|n| n.strip_suffix('>')) {
            return Iri::new(inner);
        }
        let (prefix, local) = name
            .split_once(':')
            .ok_or_else(|| RdfError::InvalidIri(name.to_string()))?;
        let base = self
            .namespace(prefix)
            .ok_or_else(|| RdfError::UnknownPrefix(prefix.to_string()))?;
        Iri::new(format!("{base}{local}"))
    }

    /// Write an IRI in N3, as a prefixed name when a binding matches
    #[must_use]
    pub fn compact(&self, iri: &Iri) -> String {
        let best = self
            .bindings
            .iter()
            .filter(|(_, base)| iri.as_str().starts_with(base.as_str()))
            .max_by_key(|(_, base)| base.len());
        match best {
            Some((prefix, base)) => {
                let local = &iri.as_str()[base.len()..];
                if is_local_name(local) {
                    format!("{prefix}:{local}")
                } else {
                    iri.n3()
                }
            }
            None => iri.n3(),
        }
    }
}

impl Default for NamespaceManager {
    /// Manager bound to the well-known vocabularies
    fn default() -> Self {
        let mut nsm = Self::empty();
        for ns in [RDF, RDFS, XSD, OWL, SKOS, DCAT, DCT, FOAF, VCARD, SH, GSP, SNUM] {
            nsm.bind(ns.prefix(), ns.base());
        }
        nsm
    }
}

fn is_local_name(local: &str) -> bool {
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !local.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_prefixed_names() {
        let nsm = NamespaceManager::default();
        assert_eq!(nsm.expand("dct:title").unwrap(), DCT.term("title"));
        assert_eq!(
            nsm.expand("<urn:uuid:479fd670-32c5-4ade-a26d-0268b0ce5046>")
                .unwrap()
                .as_str(),
            "urn:uuid:479fd670-32c5-4ade-a26d-0268b0ce5046"
        );
        assert!(matches!(
            nsm.expand("nope:title"),
            Err(RdfError::UnknownPrefix(p)) if p == "nope"
        ));
        assert!(nsm.expand("title").is_err());
    }

    #[test]
    fn compact_prefers_longest_namespace() {
        let nsm = NamespaceManager::empty()
            .with_binding("ex", "http://example.org/")
            .with_binding("exv", "http://example.org/vocab/");
        let iri = Iri::new("http://example.org/vocab/term").unwrap();
        assert_eq!(nsm.compact(&iri), "exv:term");
    }

    #[test]
    fn compact_falls_back_to_n3() {
        let nsm = NamespaceManager::default();
        let iri = Iri::new("https://elsewhere.org/x").unwrap();
        assert_eq!(nsm.compact(&iri), "<https://elsewhere.org/x>");
        let odd = DCT.term("a/b");
        assert_eq!(nsm.compact(&odd), "<http://purl.org/dc/terms/a/b>");
    }
}
