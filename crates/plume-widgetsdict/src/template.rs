//! Form templates
//!
//! A template picks the fields of a form, keyed by property path, tunes
//! their attributes and spreads them over tabs:
//!
//! ```yaml
//! tabs:
//!   - Général
//!   - label: Contacts
//!     order_idx: 5
//! fields:
//!   dct:title:
//!     label: Libellé
//!     order_idx: 0
//!   dcat:contactPoint / vcard:fn:
//!     tab: Contacts
//! ```

use indexmap::IndexMap;
use plume_rdf::{NamespaceManager, PropertyPath};
use serde::Deserialize;

use crate::error::Result;
use crate::schema::{FieldDocument, FieldOverride};

/// Tab declared by a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTab {
    pub label: String,
    pub order_idx: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TabDocument {
    Label(String),
    Entry { label: String, order_idx: Option<u32> },
}

#[derive(Debug, Deserialize)]
struct TemplateDocument {
    #[serde(default)]
    prefixes: IndexMap<String, String>,
    #[serde(default)]
    tabs: Vec<TabDocument>,
    #[serde(default)]
    fields: IndexMap<String, FieldDocument>,
}

/// Field selection and overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    tabs: Vec<TemplateTab>,
    fields: IndexMap<PropertyPath, FieldOverride>,
}

impl Template {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or holds unreadable paths
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Parse from a YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or holds unreadable paths
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_document(serde_yaml::from_str(yaml)?)
    }

    fn from_document(document: TemplateDocument) -> Result<Self> {
        let mut nsm = NamespaceManager::default();
        for (prefix, base) in document.prefixes {
            nsm.bind(prefix, base);
        }
        let tabs = document
            .tabs
            .into_iter()
            .zip(0u32..)
            .map(|(tab, position)| match tab {
                TabDocument::Label(label) => TemplateTab {
                    label,
                    order_idx: position,
                },
                TabDocument::Entry { label, order_idx } => TemplateTab {
                    label,
                    order_idx: order_idx.unwrap_or(position),
                },
            })
            .collect();
        let mut fields = IndexMap::new();
        for (path, field) in document.fields {
            fields.insert(PropertyPath::from_n3(&path, &nsm)?, field.resolve(&nsm)?);
        }
        Ok(Self { tabs, fields })
    }

    /// Builder form declaring a tab
    #[must_use]
    pub fn with_tab(mut self, label: impl Into<String>, order_idx: u32) -> Self {
        self.tabs.push(TemplateTab {
            label: label.into(),
            order_idx,
        });
        self
    }

    /// Builder form listing a field
    #[must_use]
    pub fn with_field(mut self, path: PropertyPath, field: FieldOverride) -> Self {
        self.fields.insert(path, field);
        self
    }

    #[inline]
    #[must_use]
    pub fn tabs(&self) -> &[TemplateTab] {
        &self.tabs
    }

    #[inline]
    #[must_use]
    pub fn get(&self, path: &PropertyPath) -> Option<&FieldOverride> {
        self.fields.get(path)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, path: &PropertyPath) -> bool {
        self.fields.contains_key(path)
    }

    /// Listed paths, in template order
    pub fn paths(&self) -> impl Iterator<Item = &PropertyPath> {
        self.fields.keys()
    }

    /// Listed paths one predicate below `base`, the dataset when `None`
    pub fn children_of<'a>(
        &'a self,
        base: Option<&'a PropertyPath>,
    ) -> impl Iterator<Item = &'a PropertyPath> + 'a {
        self.fields.keys().filter(move |path| match base {
            Some(base) => path.parent().as_ref() == Some(base),
            None => path.len() == 1,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_rdf::{DCAT, DCT, VCARD};
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = r#"
tabs:
  - Général
  - label: Contacts
    order_idx: 5
fields:
  dct:title:
    label: Libellé
    order_idx: 0
  dcat:contactPoint:
    tab: Contacts
  dcat:contactPoint / vcard:fn: {}
"#;

    #[test]
    fn yaml_template() {
        let template = Template::from_yaml(TEMPLATE).unwrap();
        assert_eq!(
            template.tabs(),
            &[
                TemplateTab {
                    label: "Général".into(),
                    order_idx: 0
                },
                TemplateTab {
                    label: "Contacts".into(),
                    order_idx: 5
                },
            ]
        );
        assert_eq!(template.len(), 3);
        let title = template.get(&PropertyPath::single(DCT.term("title"))).unwrap();
        assert_eq!(title.label.as_deref(), Some("Libellé"));
        assert_eq!(title.order_idx, Some(0));
        assert!(template.contains(&PropertyPath::new(vec![
            DCAT.term("contactPoint"),
            VCARD.term("fn")
        ])));
    }

    #[test]
    fn children_by_level() {
        let template = Template::from_yaml(TEMPLATE).unwrap();
        assert_eq!(template.children_of(None).count(), 2);
        let contact = PropertyPath::single(DCAT.term("contactPoint"));
        let below: Vec<_> = template.children_of(Some(&contact)).collect();
        assert_eq!(
            below,
            [&PropertyPath::new(vec![DCAT.term("contactPoint"), VCARD.term("fn")])]
        );
    }

    #[test]
    fn unreadable_paths_fail() {
        let err = Template::from_json(r#"{"fields": {"nope:title": {}}}"#).unwrap_err();
        assert!(matches!(err, crate::DictError::Rdf(_)));
    }
}
