//! Error types for the form builder
//!
//! Wraps the tree and RDF errors, and adds loading failures for
//! configuration, schema and template documents.

use plume_rdf::RdfError;
use plume_widgetkey::{KeyError, KeyId};

/// Result alias for builder operations
pub type Result<T> = std::result::Result<T, DictError>;

/// Main builder error type
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// Tree operation failed
    #[error("widget tree: {0}")]
    Tree(#[from] KeyError),

    /// RDF term or path could not be read
    #[error("rdf: {0}")]
    Rdf(#[from] RdfError),

    /// Text typed in a field cannot become an RDF value
    #[error("character {character:?} is not allowed in {value:?}")]
    InvalidValue {
        /// Text as typed
        value: String,
        /// First offending character
        character: char,
    },

    /// Dictionary has no entry for the key
    #[error("key {0} is not referenced by the dictionary")]
    UnknownKey(KeyId),

    /// Invalid JSON document
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid YAML document
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Invalid TOML document
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Document could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Document format not recognised from its extension
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl DictError {
    /// Check if the error comes from a document rather than from the tree
    #[inline]
    #[must_use]
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidJson(_)
                | Self::InvalidYaml(_)
                | Self::InvalidToml(_)
                | Self::Io(_)
                | Self::UnsupportedFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_errors_convert() {
        let err: DictError = KeyError::missing("rdftype", None).into();
        assert!(matches!(err, DictError::Tree(_)));
        assert!(!err.is_document_error());
        assert_eq!(err.to_string(), "widget tree: missing parameter `rdftype`");
    }

    #[test]
    fn document_errors() {
        let err: DictError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(err.is_document_error());
        let err = DictError::InvalidValue {
            value: "a b".into(),
            character: ' ',
        };
        assert_eq!(err.to_string(), "character ' ' is not allowed in \"a b\"");
    }
}
