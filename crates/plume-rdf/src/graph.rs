//! In-memory metagraph
//!
//! A small insertion-ordered triple store holding the existing metadata of
//! one dataset. Only the lookups needed to walk a record are provided.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::RdfError;
use crate::namespace::{DCAT_DATASET, RDF_TYPE};
use crate::term::{Iri, Term};

/// RDF statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    /// Create a triple
    #[inline]
    #[must_use]
    pub fn new(subject: impl Into<Term>, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }
}

/// Metadata graph of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metagraph {
    triples: IndexSet<Triple>,
}

impl Metagraph {
    /// Empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a graph from its JSON document form
    ///
    /// # Errors
    /// Returns error if the document is not a valid graph
    pub fn from_json(json: &str) -> Result<Self, RdfError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the graph as a JSON document
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, RdfError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a triple; returns `false` if it was already present
    pub fn add(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Builder form of [`Self::add`]
    #[must_use]
    pub fn with(mut self, subject: impl Into<Term>, predicate: Iri, object: impl Into<Term>) -> Self {
        self.add(Triple::new(subject, predicate, object));
        self
    }

    /// Remove a triple; returns `false` if it was absent
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.shift_remove(triple)
    }

    /// Number of triples
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph has no triple
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Objects of `(subject, predicate, ?)`
    pub fn objects<'a>(
        &'a self,
        subject: &'a Term,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Predicate/object pairs of `(subject, ?, ?)`
    pub fn predicate_objects<'a>(
        &'a self,
        subject: &'a Term,
    ) -> impl Iterator<Item = (&'a Iri, &'a Term)> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.subject == subject)
            .map(|t| (&t.predicate, &t.object))
    }

    /// Subjects of `(?, predicate, object)`
    pub fn subjects<'a>(
        &'a self,
        predicate: &'a Iri,
        object: &'a Term,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.predicate == predicate && &t.object == object)
            .map(|t| &t.subject)
    }

    /// Subject typed `dcat:Dataset`, if any
    #[must_use]
    pub fn datasetid(&self) -> Option<&Term> {
        let dataset = Term::Iri(DCAT_DATASET.clone());
        self.triples
            .iter()
            .find(|t| t.predicate == *RDF_TYPE && t.object == dataset)
            .map(|t| &t.subject)
    }
}

impl FromIterator<Triple> for Metagraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}
