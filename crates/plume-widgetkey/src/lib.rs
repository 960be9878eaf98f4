//! Plume widget keys
//!
//! The tree of widget keys mirroring the RDF description of one dataset,
//! and driving layout and visibility of the editor's form widgets.
//!
//! # Core Concepts
//!
//! - [`WidgetTree`]: arena of keys rooted at the dataset, owning its [`Session`]
//! - [`WidgetKey`]: one node; its [`KeyKind`] selects groups, values or buttons
//! - Twins: a value and a group of properties standing for the same
//!   triple, exactly one of them visible
//! - Translation groups: values of one property in distinct languages,
//!   drawn from a pool of available languages
//! - [`ActionsBook`]: what the GUI must redraw after an operation
//! - [`Branch`]: owned snapshot used to copy and paste
//!
//! # Example
//!
//! ```rust,ignore
//! use plume_widgetkey::prelude::*;
//!
//! let mut tree = WidgetTree::default();
//! let tab = tree.create_tab(KeyOptions::child_of(tree.root()).with_label("Général"))?;
//! let group = tree.create_translation_group(
//!     KeyOptions::child_of(tab).with_predicate(DCT.term("title")),
//! )?;
//! tree.create_value(KeyOptions::child_of(group).with_value(Literal::with_language("Titre", "fr")))?;
//! let button = tree.create_translation_button(KeyOptions::child_of(group))?;
//!
//! // the GUI clicks the button
//! let book = tree.add(button.unwrap())?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod actions;
mod branch;
mod children;
mod error;
mod key;
mod options;
mod session;
mod tree;
mod types;
mod view;

pub use actions::{Action, ActionsBook};
pub use branch::Branch;
pub use children::ChildrenList;
pub use error::{KeyError, Result};
pub use key::{FieldConfig, WidgetKey};
pub use options::{Attribute, KeyOptions};
pub use session::Session;
pub use tree::WidgetTree;
pub use types::{KeyId, KeyKind, OrderIdx, Transform};
pub use view::{KeyView, DEFAULT_LABEL};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and editing a tree
    pub use crate::{
        ActionsBook, Attribute, Branch, KeyError, KeyId, KeyKind, KeyOptions, Session,
        WidgetTree,
    };
    pub use plume_rdf::prelude::*;
    pub use plume_rdf::{DCAT, DCT};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
