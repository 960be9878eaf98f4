//! Property schemas
//!
//! The builder asks a [`PropertySchema`] which properties describe a
//! class. [`StaticSchema`] answers from a JSON or YAML document:
//!
//! ```yaml
//! prefixes:
//!   adms: http://www.w3.org/ns/adms#
//! classes:
//!   dcat:Dataset:
//!     - predicate: dct:title
//!       label: Libellé
//!       datatype: rdf:langString
//!       unilang: true
//!       is_mandatory: true
//!       order_idx: 0
//!     - predicate: dcat:contactPoint
//!       kind: sh:BlankNode
//!       rdfclass: vcard:Kind
//!       is_multiple: true
//! ```

use indexmap::IndexMap;
use plume_rdf::{Iri, NamespaceManager};
use plume_widgetkey::Transform;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What the objects of a property may be
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    #[default]
    Literal,
    Iri,
    BlankNode,
    /// Either an IRI typed by hand or a described blank node
    BlankNodeOrIri,
}

impl NodeKind {
    /// Read `sh:Literal`, `IRI`, `BlankNodeOrIRI`...; unknown names are
    /// ignored
    #[must_use]
    pub fn parse_lenient(name: &str) -> Option<Self> {
        let local = name.strip_prefix("sh:").unwrap_or(name);
        match local.to_ascii_lowercase().as_str() {
            "literal" => Some(Self::Literal),
            "iri" => Some(Self::Iri),
            "blanknode" => Some(Self::BlankNode),
            "blanknodeoriri" => Some(Self::BlankNodeOrIri),
            _ => {
                tracing::debug!("Ignored node kind {:?}", name);
                None
            }
        }
    }

    /// Objects may be described blank nodes
    #[inline]
    #[must_use]
    pub fn allows_blank_node(self) -> bool {
        matches!(self, Self::BlankNode | Self::BlankNodeOrIri)
    }

    /// Objects may be IRIs or literals
    #[inline]
    #[must_use]
    pub fn allows_value(self) -> bool {
        !matches!(self, Self::BlankNode)
    }
}

/// Where a property comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Origin {
    /// Described by the schema
    #[default]
    Shape,
    /// Only named by the template
    Local,
    /// Only found in the metagraph
    Unknown,
}

/// One property of a class, as the schema describes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub predicate: Iri,
    pub origin: Origin,
    pub kind: NodeKind,
    pub datatype: Option<Iri>,
    /// Class of the blank nodes
    pub rdfclass: Option<Iri>,
    pub label: Option<String>,
    pub description: Option<String>,
    /// Position among the class properties
    pub order: Option<u32>,
    pub is_mandatory: bool,
    pub is_multiple: bool,
    /// One value per language
    pub unilang: bool,
    pub sources: Option<Vec<Iri>>,
    pub placeholder: Option<String>,
    pub input_mask: Option<String>,
    pub is_long_text: bool,
    pub rowspan: Option<usize>,
    pub regex_validator: Option<String>,
    pub regex_validator_flags: Option<String>,
    pub is_read_only: bool,
    pub transform: Option<Transform>,
}

impl PropertyDescriptor {
    /// Bare descriptor for `predicate`
    #[must_use]
    pub fn new(predicate: Iri, origin: Origin) -> Self {
        Self {
            predicate,
            origin,
            kind: NodeKind::default(),
            datatype: None,
            rdfclass: None,
            label: None,
            description: None,
            order: None,
            is_mandatory: false,
            is_multiple: false,
            unilang: false,
            sources: None,
            placeholder: None,
            input_mask: None,
            is_long_text: false,
            rowspan: None,
            regex_validator: None,
            regex_validator_flags: None,
            is_read_only: false,
            transform: None,
        }
    }

    /// Overwrite the attributes `field` sets
    pub fn merge(&mut self, field: &FieldOverride) {
        fn set<T: Clone>(target: &mut Option<T>, value: Option<&T>) {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }
        fn flag(target: &mut bool, value: Option<bool>) {
            if let Some(value) = value {
                *target = value;
            }
        }
        set(&mut self.label, field.label.as_ref());
        set(&mut self.description, field.description.as_ref());
        set(&mut self.datatype, field.datatype.as_ref());
        set(&mut self.rdfclass, field.rdfclass.as_ref());
        set(&mut self.sources, field.sources.as_ref());
        set(&mut self.placeholder, field.placeholder.as_ref());
        set(&mut self.input_mask, field.input_mask.as_ref());
        set(&mut self.rowspan, field.rowspan.as_ref());
        set(&mut self.regex_validator, field.regex_validator.as_ref());
        set(&mut self.regex_validator_flags, field.regex_validator_flags.as_ref());
        set(&mut self.transform, field.transform.as_ref());
        if let Some(kind) = field.kind {
            self.kind = kind;
        }
        flag(&mut self.is_mandatory, field.is_mandatory);
        flag(&mut self.is_multiple, field.is_multiple);
        flag(&mut self.unilang, field.unilang);
        flag(&mut self.is_long_text, field.is_long_text);
        flag(&mut self.is_read_only, field.is_read_only);
    }
}

/// Field attributes as written in schema and template documents
///
/// IRIs are N3 names, resolved by [`Self::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_idx: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mandatory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multiple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unilang: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdfclass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_long_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_validator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_validator_flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl FieldDocument {
    /// Resolve names against `nsm`
    ///
    /// Unknown node kinds and transforms are dropped.
    ///
    /// # Errors
    /// Returns error for an unbound prefix or a malformed IRI
    pub fn resolve(&self, nsm: &NamespaceManager) -> Result<FieldOverride> {
        let iri = |name: &Option<String>| -> Result<Option<Iri>> {
            Ok(name.as_deref().map(|n| nsm.expand(n)).transpose()?)
        };
        let sources = match &self.sources {
            Some(names) => Some(
                names
                    .iter()
                    .map(|n| nsm.expand(n))
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        Ok(FieldOverride {
            label: self.label.clone(),
            description: self.description.clone(),
            order_idx: self.order_idx,
            tab: self.tab.clone(),
            is_mandatory: self.is_mandatory,
            is_multiple: self.is_multiple,
            unilang: self.unilang,
            kind: self.kind.as_deref().and_then(NodeKind::parse_lenient),
            datatype: iri(&self.datatype)?,
            rdfclass: iri(&self.rdfclass)?,
            sources,
            placeholder: self.placeholder.clone(),
            input_mask: self.input_mask.clone(),
            is_long_text: self.is_long_text,
            rowspan: self.rowspan,
            regex_validator: self.regex_validator.clone(),
            regex_validator_flags: self.regex_validator_flags.clone(),
            is_read_only: self.is_read_only,
            transform: self.transform.as_deref().and_then(Transform::parse_lenient),
        })
    }
}

/// Resolved field attributes; `None` leaves the described value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverride {
    pub label: Option<String>,
    pub description: Option<String>,
    pub order_idx: Option<u32>,
    /// Label of the tab holding a top-level field
    pub tab: Option<String>,
    pub is_mandatory: Option<bool>,
    pub is_multiple: Option<bool>,
    pub unilang: Option<bool>,
    pub kind: Option<NodeKind>,
    pub datatype: Option<Iri>,
    pub rdfclass: Option<Iri>,
    pub sources: Option<Vec<Iri>>,
    pub placeholder: Option<String>,
    pub input_mask: Option<String>,
    pub is_long_text: Option<bool>,
    pub rowspan: Option<usize>,
    pub regex_validator: Option<String>,
    pub regex_validator_flags: Option<String>,
    pub is_read_only: Option<bool>,
    pub transform: Option<Transform>,
}

/// Source of the property descriptors of each class
pub trait PropertySchema {
    /// Properties of `rdfclass`, in schema order
    fn class_properties(&self, rdfclass: &Iri) -> Vec<PropertyDescriptor>;
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    prefixes: IndexMap<String, String>,
    #[serde(default)]
    classes: IndexMap<String, Vec<PropertyDocument>>,
}

#[derive(Debug, Deserialize)]
struct PropertyDocument {
    predicate: String,
    #[serde(flatten)]
    field: FieldDocument,
}

/// Schema held in memory, loaded from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSchema {
    classes: IndexMap<Iri, Vec<PropertyDescriptor>>,
}

impl StaticSchema {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property to `rdfclass`
    #[must_use]
    pub fn with_property(mut self, rdfclass: Iri, descriptor: PropertyDescriptor) -> Self {
        self.classes.entry(rdfclass).or_default().push(descriptor);
        self
    }

    /// Parse from a JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or holds unreadable names
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Parse from a YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or holds unreadable names
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_document(serde_yaml::from_str(yaml)?)
    }

    fn from_document(document: SchemaDocument) -> Result<Self> {
        let mut nsm = NamespaceManager::default();
        for (prefix, base) in document.prefixes {
            nsm.bind(prefix, base);
        }
        let mut classes = IndexMap::new();
        for (class, properties) in document.classes {
            let class = nsm.expand(&class)?;
            let mut descriptors = Vec::with_capacity(properties.len());
            for property in properties {
                let field = property.field.resolve(&nsm)?;
                let mut descriptor =
                    PropertyDescriptor::new(nsm.expand(&property.predicate)?, Origin::Shape);
                descriptor.order = field.order_idx;
                descriptor.merge(&field);
                descriptors.push(descriptor);
            }
            classes.insert(class, descriptors);
        }
        tracing::debug!("Loaded schema with {} classes", classes.len());
        Ok(Self { classes })
    }

    /// Number of described classes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl PropertySchema for StaticSchema {
    fn class_properties(&self, rdfclass: &Iri) -> Vec<PropertyDescriptor> {
        self.classes.get(rdfclass).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_rdf::{DCAT, DCAT_DATASET, DCT, RDF_LANG_STRING, VCARD};
    use pretty_assertions::assert_eq;

    const SCHEMA: &str = r#"
classes:
  dcat:Dataset:
    - predicate: dct:title
      label: Libellé
      datatype: rdf:langString
      unilang: true
      is_mandatory: true
      order_idx: 0
    - predicate: dcat:contactPoint
      kind: sh:BlankNode
      rdfclass: vcard:Kind
      is_multiple: true
      transform: fax
"#;

    #[test]
    fn yaml_schema() {
        let schema = StaticSchema::from_yaml(SCHEMA).unwrap();
        assert_eq!(schema.len(), 1);
        let properties = schema.class_properties(&DCAT_DATASET);
        assert_eq!(properties.len(), 2);
        let title = &properties[0];
        assert_eq!(title.predicate, DCT.term("title"));
        assert_eq!(title.datatype.as_ref(), Some(&*RDF_LANG_STRING));
        assert_eq!(title.order, Some(0));
        assert!(title.unilang && title.is_mandatory);
        let contact = &properties[1];
        assert_eq!(contact.predicate, DCAT.term("contactPoint"));
        assert_eq!(contact.kind, NodeKind::BlankNode);
        assert_eq!(contact.rdfclass, Some(VCARD.term("Kind")));
        assert_eq!(contact.transform, None);
        assert!(schema.class_properties(&VCARD.term("Kind")).is_empty());
    }

    #[test]
    fn unbound_prefixes_fail() {
        let err = StaticSchema::from_json(r#"{"classes": {"adms:Asset": []}}"#).unwrap_err();
        assert!(matches!(err, crate::DictError::Rdf(_)));
        let schema = StaticSchema::from_json(
            r#"{"prefixes": {"adms": "http://www.w3.org/ns/adms#"}, "classes": {"adms:Asset": []}}"#,
        )
        .unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn node_kinds() {
        assert_eq!(NodeKind::parse_lenient("sh:IRI"), Some(NodeKind::Iri));
        assert_eq!(
            NodeKind::parse_lenient("BlankNodeOrIRI"),
            Some(NodeKind::BlankNodeOrIri)
        );
        assert_eq!(NodeKind::parse_lenient("sh:Anything"), None);
        assert!(NodeKind::BlankNodeOrIri.allows_blank_node());
        assert!(NodeKind::BlankNodeOrIri.allows_value());
        assert!(!NodeKind::BlankNode.allows_value());
    }

    #[test]
    fn overrides_win() {
        let mut descriptor = PropertyDescriptor::new(DCT.term("title"), Origin::Shape);
        descriptor.is_mandatory = true;
        descriptor.label = Some("Titre".into());
        descriptor.merge(&FieldOverride {
            label: Some("Libellé".into()),
            is_mandatory: Some(false),
            ..FieldOverride::default()
        });
        assert_eq!(descriptor.label.as_deref(), Some("Libellé"));
        assert!(!descriptor.is_mandatory);
        assert_eq!(descriptor.order, None);
    }
}
