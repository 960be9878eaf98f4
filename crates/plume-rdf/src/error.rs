//! Error types for the RDF layer
//!
//! Covers:
//! - Malformed IRIs and blank node identifiers
//! - Unknown namespace prefixes
//! - Unparsable property paths
//! - Metagraph loading failures

/// Errors raised while building or reading RDF terms
#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    /// Empty or otherwise unusable IRI
    #[error("invalid IRI: {0:?}")]
    InvalidIri(String),

    /// IRI containing a character that is not allowed in IRIs
    #[error("character {character:?} is not allowed in IRI {iri:?}")]
    ForbiddenChar {
        /// The rejected IRI
        iri: String,
        /// First offending character
        character: char,
    },

    /// Prefixed name using an unbound prefix
    #[error("unknown namespace prefix: {0}")]
    UnknownPrefix(String),

    /// Path that cannot be read as a sequence of IRIs
    #[error("invalid property path: {0:?}")]
    InvalidPath(String),

    /// Metagraph document could not be read
    #[error("invalid metagraph document: {0}")]
    InvalidGraph(#[from] serde_json::Error),
}

impl RdfError {
    /// Check if the error comes from user-typed text rather than a document
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIri(_) | Self::ForbiddenChar { .. } | Self::InvalidPath(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RdfError::ForbiddenChar {
            iri: "http://a b".into(),
            character: ' ',
        };
        assert_eq!(
            err.to_string(),
            "character ' ' is not allowed in IRI \"http://a b\""
        );
        assert!(err.is_input_error());
        assert!(!RdfError::UnknownPrefix("foo".into()).is_input_error());
    }
}
