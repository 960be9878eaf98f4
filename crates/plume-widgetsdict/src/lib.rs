//! Plume widgets dictionary
//!
//! Builds the metadata form of one dataset: the widget-key tree laid out
//! from a property schema, the record's metagraph and an optional
//! template, and the hints the GUI draws each widget from.
//!
//! # Core Concepts
//!
//! - [`PropertySchema`]: properties of each class, in display order
//! - [`Template`]: the fields to keep, their overrides and the tabs
//! - [`DictConfig`]: edit or read mode, translation, languages
//! - [`WidgetsDictBuilder`]: walks the schema into a [`WidgetsDict`]
//! - [`InternalDict`]: hints of one key (widget type, texts, menus, flags)
//!
//! # Example
//!
//! ```rust,ignore
//! use plume_widgetsdict::prelude::*;
//!
//! let schema = StaticSchema::from_yaml(&std::fs::read_to_string("shape.yaml")?)?;
//! let dict = WidgetsDictBuilder::new(&schema)
//!     .with_metagraph(&graph)
//!     .with_config(DictConfig::default().with_translation(true))
//!     .build()?;
//!
//! for (id, hints) in dict.iter() {
//!     println!("{id}: {:?}", hints.main_widget_type);
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod builder;
mod config;
mod dict;
mod error;
mod hints;
mod schema;
mod template;
mod values;

pub use builder::{WidgetsDictBuilder, COLUMNS_TAB, DEFAULT_TAB, OTHERS_TAB};
pub use config::{DictConfig, Mode};
pub use dict::{FormData, WidgetsDict};
pub use error::{DictError, Result};
pub use hints::{
    internalize, type_validator, widget_placement, widget_type, InternalDict, Placement,
    TypeValidator, WidgetKind, WidgetType, IRI_SOURCE, MANUAL, NOT_REFERENCED,
};
pub use schema::{
    FieldDocument, FieldOverride, NodeKind, Origin, PropertyDescriptor, PropertySchema,
    StaticSchema,
};
pub use template::{Template, TemplateTab};
pub use values::{
    email_from_owlthing, owlthing_from_email, owlthing_from_tel, register_value, str_value,
    tel_from_owlthing,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and driving a form
    pub use crate::{
        DictConfig, DictError, InternalDict, Mode, PropertySchema, StaticSchema, Template,
        WidgetKind, WidgetType, WidgetsDict, WidgetsDictBuilder,
    };
    pub use plume_widgetkey::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use plume_rdf::{Iri, Literal, Metagraph, PropertyPath, DCAT_DATASET, DCT, RDF_LANG_STRING, RDF_TYPE};
    use plume_widgetkey::KeyKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_form() {
        let mut title = PropertyDescriptor::new(DCT.term("title"), Origin::Shape);
        title.label = Some("Libellé".into());
        title.datatype = Some(RDF_LANG_STRING.clone());
        let schema = StaticSchema::new().with_property(DCAT_DATASET.clone(), title);
        let dataset = Iri::new_unchecked("urn:uuid:479fd670-32c5-4ade-a26d-0268b0ce5046");
        let graph = Metagraph::new()
            .with(dataset.clone(), RDF_TYPE.clone(), DCAT_DATASET.clone())
            .with(dataset.clone(), DCT.term("title"), Literal::with_language("Cadastre", "fr"));

        let dict = WidgetsDictBuilder::new(&schema)
            .with_metagraph(&graph)
            .build()
            .unwrap();
        assert_eq!(dict.datasetid(), &dataset);

        let tree = dict.tree();
        let value = tree
            .search_from_path(&PropertyPath::single(DCT.term("title")))
            .unwrap();
        assert_eq!(tree.get(value).unwrap().kind(), KeyKind::Value);
        let hints = dict.get(value).unwrap();
        assert_eq!(hints.value.as_deref(), Some("Cadastre"));
        assert_eq!(hints.label.as_deref(), Some("Libellé"));
        assert_eq!(hints.main_widget_type, Some(WidgetType::LineEdit));
        assert!(dict.get(dict.root()).is_some());
    }
}
