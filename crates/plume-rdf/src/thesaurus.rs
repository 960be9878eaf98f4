//! Controlled vocabularies
//!
//! The [`Thesaurus`] trait is the seam to the vocabulary service: concept
//! schemes ("sources") hold concepts with labels in several languages.
//! [`InMemoryThesaurus`] serves host-provided or test vocabularies.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::term::{Iri, Term};

/// Vocabulary lookups used when building and rendering keys
pub trait Thesaurus {
    /// Source (concept scheme) a concept belongs to
    fn concept_source(&self, concept: &Term) -> Option<Iri>;

    /// Label of a source
    fn label(&self, source: &Iri, language: &str) -> Option<String>;

    /// Concept labels of a source, in vocabulary order
    fn values(&self, source: &Iri, language: &str) -> Vec<String>;

    /// Concept of `source` carrying `label`
    fn concept_iri(&self, source: &Iri, language: &str, label: &str) -> Option<Iri>;

    /// Label of a concept
    fn concept_str(&self, source: &Iri, language: &str, concept: &Iri) -> Option<String>;

    /// Page describing a concept
    fn concept_link(&self, _source: &Iri, _language: &str, _concept: &Iri) -> Option<Iri> {
        None
    }

    /// Check if `concept` belongs to `source`
    fn contains(&self, source: &Iri, concept: &Iri) -> bool {
        self.concept_source(&Term::Iri(concept.clone()))
            .is_some_and(|s| &s == source)
    }
}

/// Thesaurus knowing no vocabulary
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThesaurus;

impl Thesaurus for NoThesaurus {
    fn concept_source(&self, _concept: &Term) -> Option<Iri> {
        None
    }

    fn label(&self, _source: &Iri, _language: &str) -> Option<String> {
        None
    }

    fn values(&self, _source: &Iri, _language: &str) -> Vec<String> {
        Vec::new()
    }

    fn concept_iri(&self, _source: &Iri, _language: &str, _label: &str) -> Option<Iri> {
        None
    }

    fn concept_str(&self, _source: &Iri, _language: &str, _concept: &Iri) -> Option<String> {
        None
    }
}

/// Labels keyed by language tag
pub type Labels = IndexMap<String, String>;

fn pick_label(labels: &Labels, language: &str) -> Option<String> {
    labels
        .get(language)
        .or_else(|| labels.values().next())
        .cloned()
}

/// Concept of a scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    #[serde(default)]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Iri>,
}

/// Concept scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptScheme {
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub concepts: IndexMap<Iri, Concept>,
}

/// Thesaurus backed by in-memory concept schemes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryThesaurus {
    schemes: IndexMap<Iri, ConceptScheme>,
}

impl InMemoryThesaurus {
    /// Empty thesaurus
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scheme, replacing any scheme with the same IRI
    pub fn insert_scheme(&mut self, source: Iri, scheme: ConceptScheme) {
        self.schemes.insert(source, scheme);
    }

    /// Builder form adding a scheme with a label in one language
    #[must_use]
    pub fn with_scheme(mut self, source: Iri, language: &str, label: &str) -> Self {
        let mut scheme = ConceptScheme::default();
        scheme.labels.insert(language.to_string(), label.to_string());
        self.insert_scheme(source, scheme);
        self
    }

    /// Builder form adding a concept to an existing scheme
    ///
    /// The concept is ignored when the scheme is unknown.
    #[must_use]
    pub fn with_concept(mut self, source: &Iri, concept: Iri, language: &str, label: &str) -> Self {
        if let Some(scheme) = self.schemes.get_mut(source) {
            scheme
                .concepts
                .entry(concept)
                .or_default()
                .labels
                .insert(language.to_string(), label.to_string());
        } else {
            tracing::warn!("Concept {} added to unknown scheme {}", concept, source);
        }
        self
    }

    fn concept(&self, source: &Iri, concept: &Iri) -> Option<&Concept> {
        self.schemes.get(source)?.concepts.get(concept)
    }
}

impl Thesaurus for InMemoryThesaurus {
    fn concept_source(&self, concept: &Term) -> Option<Iri> {
        let iri = concept.as_iri()?;
        self.schemes
            .iter()
            .find(|(_, scheme)| scheme.concepts.contains_key(iri))
            .map(|(source, _)| source.clone())
    }

    fn label(&self, source: &Iri, language: &str) -> Option<String> {
        pick_label(&self.schemes.get(source)?.labels, language)
    }

    fn values(&self, source: &Iri, language: &str) -> Vec<String> {
        self.schemes
            .get(source)
            .map(|scheme| {
                scheme
                    .concepts
                    .values()
                    .filter_map(|c| pick_label(&c.labels, language))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn concept_iri(&self, source: &Iri, language: &str, label: &str) -> Option<Iri> {
        self.schemes
            .get(source)?
            .concepts
            .iter()
            .find(|(_, c)| pick_label(&c.labels, language).as_deref() == Some(label))
            .map(|(iri, _)| iri.clone())
    }

    fn concept_str(&self, source: &Iri, language: &str, concept: &Iri) -> Option<String> {
        pick_label(&self.concept(source, concept)?.labels, language)
    }

    fn concept_link(&self, source: &Iri, _language: &str, concept: &Iri) -> Option<Iri> {
        self.concept(source, concept)?.link.clone()
    }
}
