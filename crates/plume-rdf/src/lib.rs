//! Plume RDF - the metadata graph seen by the widget-key engine
//!
//! Provides the small slice of RDF the engine consumes:
//! - Terms: IRIs, blank nodes, literals
//! - Namespaces and N3 prefixed names
//! - Property paths (`dcat:contactPoint / vcard:hasEmail`)
//! - An in-memory metagraph with the lookups used to walk a record
//! - Dataset identifiers and language helpers
//! - The thesaurus seam for controlled vocabularies
//!
//! # Example
//!
//! ```rust,ignore
//! use plume_rdf::{Literal, Metagraph, NamespaceManager, PropertyPath, DCT};
//!
//! let nsm = NamespaceManager::default();
//! let path = PropertyPath::from_n3("dct:title", &nsm)?;
//! let graph = Metagraph::new().with(dataset, DCT.term("title"), Literal::new("Titre"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod dataset;
pub mod error;
pub mod graph;
pub mod language;
pub mod namespace;
pub mod path;
pub mod term;
pub mod text;
pub mod thesaurus;

pub use dataset::{datasetid_from_uuid, uuid_from_datasetid, DatasetId};
pub use error::RdfError;
pub use graph::{Metagraph, Triple};
pub use language::{pick_translation, sort_by_language, LanguageTagged};
pub use namespace::{
    Namespace, NamespaceManager, DCAT, DCAT_DATASET, DCT, DCT_IDENTIFIER, FOAF, GSP,
    GSP_WKT_LITERAL, OWL, RDF, RDFS, RDF_LANG_STRING, RDF_TYPE, SH, SKOS, SNUM, SNUM_COLUMN, VCARD,
    XSD, XSD_BOOLEAN, XSD_DATE, XSD_DATE_TIME, XSD_DECIMAL, XSD_DOUBLE, XSD_FLOAT, XSD_INTEGER,
    XSD_STRING, XSD_TIME,
};
pub use path::PropertyPath;
pub use term::{BlankNode, Iri, Literal, Term};
pub use text::{forbidden_char, text_with_link};
pub use thesaurus::{Concept, ConceptScheme, InMemoryThesaurus, NoThesaurus, Thesaurus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with RDF terms
    pub use crate::{
        BlankNode, Iri, Literal, Metagraph, NamespaceManager, PropertyPath, Term, Thesaurus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
