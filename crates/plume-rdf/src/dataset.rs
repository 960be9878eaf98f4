//! Dataset identifiers
//!
//! A dataset node is named `urn:uuid:<uuid>`. These helpers mint such names
//! and recover the UUID from them.

use std::fmt::{self, Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::term::Iri;

static TRAILING_UUID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([a-z0-9-]{36})$").expect("static pattern"));

/// Dataset identifier, always a `urn:uuid:` IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId {
    uuid: Uuid,
}

impl DatasetId {
    /// Fresh random identifier
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
        }
    }

    /// Identifier from the first candidate that reads as a UUID
    ///
    /// Falls back to a fresh identifier when no candidate is usable.
    #[must_use]
    pub fn from_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .find_map(|c| uuid_from_datasetid(c.as_ref()))
            .map_or_else(Self::new, |uuid| Self { uuid })
    }

    /// Underlying UUID
    #[inline]
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Identifier as an IRI
    #[inline]
    #[must_use]
    pub fn to_iri(&self) -> Iri {
        Iri::new_unchecked(self.uuid.urn().to_string())
    }
}

impl Default for DatasetId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DatasetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid.urn())
    }
}

impl From<Uuid> for DatasetId {
    fn from(uuid: Uuid) -> Self {
        Self { uuid }
    }
}

/// UUID carried by a dataset identifier
///
/// Accepts a bare UUID, a `urn:uuid:` IRI or any IRI ending with
/// `:<uuid>`.
#[must_use]
pub fn uuid_from_datasetid(datasetid: &str) -> Option<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(datasetid) {
        return Some(uuid);
    }
    TRAILING_UUID
        .captures(datasetid)
        .and_then(|caps| Uuid::parse_str(&caps[1]).ok())
}

/// `urn:uuid:` IRI for a UUID given as text
#[must_use]
pub fn datasetid_from_uuid(uuid: &str) -> Option<Iri> {
    Uuid::parse_str(uuid.trim())
        .ok()
        .map(|u| Iri::new_unchecked(u.urn().to_string()))
}
