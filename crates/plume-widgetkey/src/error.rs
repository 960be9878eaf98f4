//! Error types for the widget-key engine
//!
//! Four families, matching how the GUI layer reacts to them:
//! - Missing parameters (a required value is absent)
//! - Forbidden operations (structurally invalid requests)
//! - Integrity breaches (the request would break a tree invariant)
//! - Unknown parameter values (outside a closed set)

use crate::types::KeyId;

/// Result alias used across the engine
pub type Result<T> = std::result::Result<T, KeyError>;

fn on_key(key: Option<&KeyId>) -> String {
    key.map(|k| format!(" (key {k})")).unwrap_or_default()
}

/// Main widget-key error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// A required construction or update value is absent
    #[error("missing parameter `{parameter}`{}", on_key(.key.as_ref()))]
    MissingParameter {
        /// Name of the parameter
        parameter: &'static str,
        /// Key being built or updated
        key: Option<KeyId>,
    },

    /// Structurally invalid operation
    #[error("forbidden operation: {reason}{}", on_key(.key.as_ref()))]
    ForbiddenOperation {
        /// Key the operation targeted
        key: Option<KeyId>,
        /// What was refused
        reason: String,
    },

    /// Operation would violate a tree invariant
    #[error("integrity breach: {reason}{}", on_key(.key.as_ref()))]
    IntegrityBreach {
        /// Key the operation targeted
        key: Option<KeyId>,
        /// Which invariant was at stake
        reason: String,
    },

    /// Value outside a closed enumeration
    #[error("unknown value {value:?} for parameter `{parameter}`")]
    UnknownParameterValue {
        /// Name of the parameter
        parameter: &'static str,
        /// Rejected value
        value: String,
    },

    /// Identifier not present in the tree
    #[error("unknown key {0}")]
    UnknownKey(KeyId),
}

impl KeyError {
    /// Create a missing-parameter error
    #[inline]
    #[must_use]
    pub fn missing(parameter: &'static str, key: Option<KeyId>) -> Self {
        Self::MissingParameter { parameter, key }
    }

    /// Create a forbidden-operation error
    #[inline]
    pub fn forbidden(key: Option<KeyId>, reason: impl Into<String>) -> Self {
        Self::ForbiddenOperation {
            key,
            reason: reason.into(),
        }
    }

    /// Create an integrity-breach error
    #[inline]
    pub fn integrity(key: Option<KeyId>, reason: impl Into<String>) -> Self {
        Self::IntegrityBreach {
            key,
            reason: reason.into(),
        }
    }

    /// Key concerned by the error, if known
    #[must_use]
    pub fn key(&self) -> Option<KeyId> {
        match self {
            Self::MissingParameter { key, .. }
            | Self::ForbiddenOperation { key, .. }
            | Self::IntegrityBreach { key, .. } => *key,
            Self::UnknownKey(key) => Some(*key),
            Self::UnknownParameterValue { .. } => None,
        }
    }

    /// Check if the error signals a misuse of the API rather than bad data
    ///
    /// GUI-triggered operations never raise these for no-op requests; a
    /// raised one means the caller broke a contract.
    #[inline]
    #[must_use]
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, Self::ForbiddenOperation { .. } | Self::UnknownKey(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_mention_the_key() {
        let key = KeyId::new();
        let err = KeyError::missing("predicate", Some(key));
        assert_eq!(
            err.to_string(),
            format!("missing parameter `predicate` (key {key})")
        );
        assert_eq!(err.key(), Some(key));

        let err = KeyError::missing("parent", None);
        assert_eq!(err.to_string(), "missing parameter `parent`");
    }

    #[test]
    fn programmer_errors() {
        assert!(KeyError::forbidden(None, "copying a ghost").is_programmer_error());
        assert!(KeyError::UnknownKey(KeyId::new()).is_programmer_error());
        assert!(!KeyError::integrity(None, "no language left").is_programmer_error());
        let err = KeyError::UnknownParameterValue {
            parameter: "transform",
            value: "fax".into(),
        };
        assert!(!err.is_programmer_error());
        assert_eq!(err.key(), None);
    }
}
