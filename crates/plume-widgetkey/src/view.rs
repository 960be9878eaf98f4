//! Read views
//!
//! A [`KeyView`] pairs a key with its tree so that attributes inherited
//! from the parent group, or derived from the twin and the session, read
//! like plain getters.

use std::ops::Deref;

use plume_rdf::{Iri, NamespaceManager, PropertyPath};

use crate::key::WidgetKey;
use crate::tree::WidgetTree;
use crate::types::{KeyKind, Transform};

/// Label displayed for keys without one
pub const DEFAULT_LABEL: &str = "???";

/// A key borrowed together with its tree
#[derive(Debug, Clone, Copy)]
pub struct KeyView<'a> {
    tree: &'a WidgetTree,
    key: &'a WidgetKey,
}

impl<'a> Deref for KeyView<'a> {
    type Target = WidgetKey;

    fn deref(&self) -> &Self::Target {
        self.key
    }
}

impl<'a> KeyView<'a> {
    pub(crate) fn new(tree: &'a WidgetTree, key: &'a WidgetKey) -> Self {
        Self { tree, key }
    }

    #[inline]
    #[must_use]
    pub fn tree(&self) -> &'a WidgetTree {
        self.tree
    }

    /// Parent view, none for the root
    #[must_use]
    pub fn parent_view(&self) -> Option<KeyView<'a>> {
        self.key.parent.and_then(|p| self.tree.key(p).ok())
    }

    /// GUI name of the key's kind
    #[inline]
    #[must_use]
    pub fn key_object(&self) -> &'static str {
        self.key.kind.key_object()
    }

    #[must_use]
    pub fn predicate(&self) -> Option<&'a Iri> {
        self.tree.effective_predicate(self.key.id)
    }

    /// Display label
    ///
    /// Keys inside a group of values have none, other labelled kinds fall
    /// back to [`DEFAULT_LABEL`].
    #[must_use]
    pub fn label(&self) -> Option<&'a str> {
        match self.key.kind {
            KeyKind::Tab | KeyKind::GroupOfValues | KeyKind::TranslationGroup => {
                Some(self.key.label.as_deref().unwrap_or(DEFAULT_LABEL))
            }
            KeyKind::GroupOfProperties | KeyKind::Value => {
                if self.tree.in_value_group(self.key.id) {
                    None
                } else {
                    Some(self.key.label.as_deref().unwrap_or(DEFAULT_LABEL))
                }
            }
            _ => None,
        }
    }

    /// Help text, the key's path when it has neither label nor description
    #[must_use]
    pub fn description(&self) -> Option<String> {
        let has_own = match self.key.kind {
            KeyKind::GroupOfValues | KeyKind::TranslationGroup => true,
            KeyKind::GroupOfProperties | KeyKind::Value => !self.tree.in_value_group(self.key.id),
            _ => false,
        };
        if !has_own {
            return None;
        }
        if self.key.label.is_none() && self.key.description.is_none() {
            return self.path().map(|p| p.to_n3(&NamespaceManager::default()));
        }
        self.key.description.clone()
    }

    #[must_use]
    pub fn path(&self) -> Option<PropertyPath> {
        self.tree.path(self.key.id)
    }

    #[must_use]
    pub fn rdftype(&self) -> Option<&'a Iri> {
        self.tree.effective_rdftype(self.key.id)
    }

    #[must_use]
    pub fn xsdtype(&self) -> Option<&'a Iri> {
        self.tree.effective_xsdtype(self.key.id)
    }

    #[must_use]
    pub fn sources(&self) -> Option<&'a [Iri]> {
        self.tree.effective_sources(self.key.id)
    }

    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        self.tree.effective_config(self.key.id).and_then(|c| c.transform)
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&'a str> {
        self.tree
            .effective_config(self.key.id)
            .and_then(|c| c.placeholder.as_deref())
    }

    #[must_use]
    pub fn input_mask(&self) -> Option<&'a str> {
        self.tree
            .effective_config(self.key.id)
            .and_then(|c| c.input_mask.as_deref())
    }

    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.tree
            .effective_config(self.key.id)
            .is_some_and(|c| c.is_mandatory)
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.tree
            .effective_config(self.key.id)
            .is_some_and(|c| c.is_read_only)
    }

    #[must_use]
    pub fn regex_validator(&self) -> Option<&'a str> {
        self.tree
            .effective_config(self.key.id)
            .and_then(|c| c.regex_validator.as_deref())
    }

    #[must_use]
    pub fn regex_validator_flags(&self) -> Option<&'a str> {
        self.tree
            .effective_config(self.key.id)
            .and_then(|c| c.regex_validator_flags.as_deref())
    }

    #[must_use]
    pub fn value_language(&self) -> Option<String> {
        self.tree.value_language(self.key.id)
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.tree.is_hidden(self.key.id)
    }

    #[must_use]
    pub fn is_hidden_b(&self) -> bool {
        self.tree.is_hidden_b(self.key.id)
    }

    #[must_use]
    pub fn has_minus_button(&self) -> bool {
        self.tree.has_minus_button(self.key.id)
    }

    #[must_use]
    pub fn has_source_button(&self) -> bool {
        self.tree.has_source_button(self.key.id)
    }

    #[must_use]
    pub fn has_language_button(&self) -> bool {
        self.tree.has_language_button(self.key.id)
    }

    #[must_use]
    pub fn label_row(&self) -> Option<usize> {
        self.tree.label_row(self.key.id)
    }

    /// Languages a value may take
    ///
    /// Inside a translation group, the group's pool; for other text
    /// values, the session languages.
    #[must_use]
    pub fn available_languages(&self) -> Option<Vec<String>> {
        match self.key.kind {
            KeyKind::Value => {
                let parent = self.key.parent?;
                if self.tree.get(parent)?.kind == KeyKind::TranslationGroup {
                    return self.tree.available_languages(parent).map(<[String]>::to_vec);
                }
                (self.xsdtype() == Some(&*plume_rdf::RDF_LANG_STRING))
                    .then(|| self.tree.session().langlist().to_vec())
            }
            KeyKind::TranslationGroup => {
                self.tree.available_languages(self.key.id).map(<[String]>::to_vec)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_rdf::{Literal, DCAT, DCT, RDF_LANG_STRING};
    use pretty_assertions::assert_eq;

    use crate::options::KeyOptions;
    use crate::WidgetTree;

    #[test]
    fn labels_and_descriptions() {
        let mut tree = WidgetTree::default();
        let root = tree.root();
        let tab = tree.create_tab(KeyOptions::child_of(root)).unwrap();
        let gov = tree
            .create_group_of_values(
                KeyOptions::child_of(tab)
                    .with_predicate(DCAT.term("keyword"))
                    .with_label("Mots-clés"),
            )
            .unwrap();
        let keyword = tree
            .create_value(KeyOptions::child_of(gov).with_value(Literal::new("eau")))
            .unwrap()
            .unwrap();
        let title = tree
            .create_value(KeyOptions::child_of(tab).with_predicate(DCT.term("title")))
            .unwrap()
            .unwrap();

        assert_eq!(tree.key(tab).unwrap().label(), Some("???"));
        assert_eq!(tree.key(gov).unwrap().label(), Some("Mots-clés"));
        assert_eq!(tree.key(gov).unwrap().description(), None);
        assert_eq!(tree.key(keyword).unwrap().label(), None);
        assert_eq!(tree.key(keyword).unwrap().predicate(), Some(&DCAT.term("keyword")));
        assert_eq!(
            tree.key(title).unwrap().description().as_deref(),
            Some("dct:title")
        );
        assert_eq!(tree.key(title).unwrap().key_object(), "edit");
    }

    #[test]
    fn languages_offered() {
        let mut tree = WidgetTree::default();
        let root = tree.root();
        let text = tree
            .create_value(
                KeyOptions::child_of(root)
                    .with_predicate(DCT.term("description"))
                    .with_xsdtype(RDF_LANG_STRING.clone()),
            )
            .unwrap()
            .unwrap();
        let date = tree
            .create_value(KeyOptions::child_of(root).with_predicate(DCT.term("modified")))
            .unwrap()
            .unwrap();
        let view = tree.key(text).unwrap();
        assert_eq!(view.available_languages(), Some(vec!["fr".into(), "en".into()]));
        assert_eq!(view.value_language().as_deref(), Some("fr"));
        assert_eq!(tree.key(date).unwrap().available_languages(), None);
        assert_eq!(tree.key(date).unwrap().value_language(), None);
    }
}
