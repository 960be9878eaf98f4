//! What the GUI needs to draw one key
//!
//! [`InternalDict`] gathers, for each key of the tree, the widget type, the
//! texts and flags of its widgets and the menus' contents. Placements on
//! the parent grid are computed on demand by [`widget_placement`].

use plume_rdf::{
    Iri, Thesaurus, GSP_WKT_LITERAL, XSD_BOOLEAN, XSD_DATE, XSD_DATE_TIME, XSD_DECIMAL, XSD_DOUBLE,
    XSD_FLOAT, XSD_INTEGER, XSD_TIME,
};
use plume_widgetkey::{KeyId, KeyKind, KeyView, WidgetTree};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::values::str_value;

/// Source menu entry for a value outside every vocabulary
pub const NOT_REFERENCED: &str = "< non référencé >";
/// Source menu entry switching to the manual twin
pub const MANUAL: &str = "< manuel >";
/// Source menu entry switching to the IRI twin
pub const IRI_SOURCE: &str = "< URI >";

/// Main widget class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetType {
    #[serde(rename = "QGroupBox")]
    GroupBox,
    #[serde(rename = "QToolButton")]
    ToolButton,
    #[serde(rename = "QCheckBox")]
    CheckBox,
    #[serde(rename = "QLabel")]
    Label,
    #[serde(rename = "QComboBox")]
    ComboBox,
    #[serde(rename = "QTextEdit")]
    TextEdit,
    #[serde(rename = "QDateEdit")]
    DateEdit,
    #[serde(rename = "QDateTimeEdit")]
    DateTimeEdit,
    #[serde(rename = "QTimeEdit")]
    TimeEdit,
    #[serde(rename = "QLineEdit")]
    LineEdit,
}

impl WidgetType {
    /// Qt class name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GroupBox => "QGroupBox",
            Self::ToolButton => "QToolButton",
            Self::CheckBox => "QCheckBox",
            Self::Label => "QLabel",
            Self::ComboBox => "QComboBox",
            Self::TextEdit => "QTextEdit",
            Self::DateEdit => "QDateEdit",
            Self::DateTimeEdit => "QDateTimeEdit",
            Self::TimeEdit => "QTimeEdit",
            Self::LineEdit => "QLineEdit",
        }
    }
}

/// Validator attached to a line edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeValidator {
    #[serde(rename = "QIntValidator")]
    Int,
    #[serde(rename = "QDoubleValidator")]
    Double,
}

/// Hints for the widgets of one key
///
/// Fields not meaningful for the key's kind keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalDict {
    pub main_widget_type: Option<WidgetType>,
    pub label: Option<String>,
    pub help_text: Option<String>,
    pub hidden: bool,
    pub hidden_m: bool,
    pub multiple_sources: bool,
    pub placeholder_text: Option<String>,
    pub input_mask: Option<String>,
    pub is_mandatory: bool,
    pub regex_validator_pattern: Option<String>,
    pub regex_validator_flags: Option<String>,
    pub type_validator: Option<TypeValidator>,
    pub read_only: bool,
    pub value: Option<String>,
    pub sources: Option<Vec<String>>,
    pub current_source: Option<String>,
    pub thesaurus_values: Option<Vec<String>>,
    pub language_value: Option<String>,
    pub authorized_languages: Option<Vec<String>>,
    pub has_minus_button: bool,
    pub hide_minus_button: bool,
}

/// Main widget class of a key
#[must_use]
pub fn widget_type(view: &KeyView<'_>) -> Option<WidgetType> {
    let kind = view.kind();
    if kind.is_group() {
        return Some(WidgetType::GroupBox);
    }
    if kind.is_button() {
        return Some(WidgetType::ToolButton);
    }
    let datatype = view.xsdtype();
    if datatype == Some(&*XSD_BOOLEAN) {
        return Some(WidgetType::CheckBox);
    }
    if view.is_read_only() {
        return Some(WidgetType::Label);
    }
    if view.sources().is_some_and(|s| !s.is_empty()) {
        return Some(WidgetType::ComboBox);
    }
    if view.is_long_text() {
        return Some(WidgetType::TextEdit);
    }
    Some(match datatype {
        Some(d) if d == &*XSD_DATE => WidgetType::DateEdit,
        Some(d) if d == &*XSD_DATE_TIME => WidgetType::DateTimeEdit,
        Some(d) if d == &*XSD_TIME => WidgetType::TimeEdit,
        Some(d) if d == &*GSP_WKT_LITERAL => WidgetType::TextEdit,
        _ => WidgetType::LineEdit,
    })
}

/// Validator for numeric datatypes
#[must_use]
pub fn type_validator(view: &KeyView<'_>) -> Option<TypeValidator> {
    let datatype = view.xsdtype()?;
    if datatype == &*XSD_INTEGER {
        Some(TypeValidator::Int)
    } else if [&*XSD_DECIMAL, &*XSD_FLOAT, &*XSD_DOUBLE].contains(&datatype) {
        Some(TypeValidator::Double)
    } else {
        None
    }
}

fn source_label(thesaurus: &dyn Thesaurus, source: &Iri, language: &str) -> String {
    thesaurus
        .label(source, language)
        .unwrap_or_else(|| source.to_string())
}

/// Compute the hints of a key from its current state
///
/// # Errors
/// `Tree` when the key is not in the tree
pub fn internalize(tree: &WidgetTree, id: KeyId, thesaurus: &dyn Thesaurus) -> Result<InternalDict> {
    let view = tree.key(id)?;
    let kind = view.kind();
    let mut hints = InternalDict {
        main_widget_type: widget_type(&view),
        ..InternalDict::default()
    };
    if kind == KeyKind::Root {
        return Ok(hints);
    }
    if kind.is_group() || kind.is_object() {
        hints.label = view.label().map(str::to_string);
    }
    if kind == KeyKind::Tab {
        return Ok(hints);
    }
    let language = tree.session().main_language().unwrap_or("fr");
    hints.help_text = view.description();
    hints.hidden = view.is_hidden_b();
    hints.hidden_m = view.is_hidden_m();
    hints.multiple_sources = view.has_source_button();

    if kind == KeyKind::Value {
        hints.placeholder_text = view.placeholder().map(str::to_string);
        hints.input_mask = view.input_mask().map(str::to_string);
        hints.is_mandatory = view.is_mandatory();
        hints.regex_validator_pattern = view.regex_validator().map(str::to_string);
        hints.regex_validator_flags = view.regex_validator_flags().map(str::to_string);
        hints.type_validator = type_validator(&view);
        hints.read_only = view.is_read_only();
        hints.value = str_value(tree, id, thesaurus);
        if let Some(sources) = view.sources().filter(|_| hints.multiple_sources) {
            let mut labels: Vec<String> = sources
                .iter()
                .map(|s| source_label(thesaurus, s, language))
                .collect();
            if let Some(current) = view.value_source() {
                hints.current_source = Some(source_label(thesaurus, current, language));
                hints.thesaurus_values = Some(thesaurus.values(current, language));
            } else {
                hints.current_source = Some(NOT_REFERENCED.to_string());
                labels.insert(0, NOT_REFERENCED.to_string());
            }
            hints.sources = Some(labels);
        }
        hints.language_value = view.value_language();
        if view.has_language_button() {
            let mut languages = view.available_languages().unwrap_or_default();
            if let Some(current) = &hints.language_value {
                if !languages.contains(current) {
                    languages.insert(0, current.clone());
                }
            }
            hints.authorized_languages = Some(languages);
        }
    }

    if kind.is_object() {
        hints.has_minus_button = view.has_minus_button();
        hints.hide_minus_button = hints.has_minus_button && view.is_single_child();
        if hints.multiple_sources && view.m_twin().is_some() {
            let mut sources = hints
                .sources
                .take()
                .unwrap_or_else(|| vec![IRI_SOURCE.to_string()]);
            sources.insert(0, MANUAL.to_string());
            hints.sources = Some(sources);
            if kind == KeyKind::Value {
                if hints.current_source.is_none() {
                    hints.current_source = Some(IRI_SOURCE.to_string());
                }
            } else {
                hints.current_source = Some(MANUAL.to_string());
            }
        }
    }
    Ok(hints)
}

/// Widget of a key whose placement is asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Main,
    Label,
    Language,
    Source,
    Minus,
}

/// Cell range of a widget in its parent's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub rowspan: usize,
    pub columnspan: usize,
}

impl Placement {
    const fn new(row: usize, column: usize, rowspan: usize, columnspan: usize) -> Self {
        Self {
            row,
            column,
            rowspan,
            columnspan,
        }
    }
}

/// Placement of one of a key's widgets
///
/// Labels sit in the first column, beside the main widget or on the row
/// above for independent labels. Menus and the minus button follow the
/// main widget, one column each. Nothing is returned for a ghost or a
/// widget the key doesn't have.
#[must_use]
pub fn widget_placement(tree: &WidgetTree, id: KeyId, kind: WidgetKind) -> Option<Placement> {
    let view = tree.key(id).ok()?;
    let row = view.row()?;
    let side_label = view.kind() == KeyKind::Value
        && view.label().is_some()
        && !view.independant_label();
    let rowspan = view.rowspan().max(1);
    match kind {
        WidgetKind::Main => Some(if side_label {
            Placement::new(row, 1, rowspan, 1)
        } else if view.kind().is_button() {
            Placement::new(row, 0, 1, 1)
        } else {
            Placement::new(row, 0, rowspan, 2)
        }),
        WidgetKind::Label => {
            if view.kind() != KeyKind::Value || view.label().is_none() {
                return None;
            }
            let span = if view.independant_label() { 2 } else { 1 };
            Some(Placement::new(view.label_row()?, 0, 1, span))
        }
        WidgetKind::Language | WidgetKind::Source | WidgetKind::Minus => {
            let buttons = [
                (WidgetKind::Language, view.has_language_button()),
                (WidgetKind::Source, view.has_source_button()),
                (WidgetKind::Minus, view.has_minus_button()),
            ];
            let mut column = 2;
            for (widget, present) in buttons {
                if !present {
                    continue;
                }
                if widget == kind {
                    return Some(Placement::new(row, column, 1, 1));
                }
                column += 1;
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_rdf::{InMemoryThesaurus, Literal, NoThesaurus, DCAT, DCT, RDF_LANG_STRING};
    use plume_widgetkey::{KeyOptions, Session};
    use pretty_assertions::assert_eq;

    fn edit_session() -> Session {
        Session::new(["fr", "en"])
            .with_source_buttons(true)
            .with_language_buttons(true)
    }

    #[test]
    fn widget_types() {
        let mut tree = WidgetTree::new(edit_session());
        let root = tree.root();
        let tab = tree.create_tab(KeyOptions::child_of(root)).unwrap();
        let date = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("modified"))
                    .with_xsdtype(XSD_DATE.clone()),
            )
            .unwrap()
            .unwrap();
        let flag = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("x"))
                    .with_xsdtype(XSD_BOOLEAN.clone())
                    .with_read_only(true),
            )
            .unwrap()
            .unwrap();
        let size = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCAT.term("byteSize"))
                    .with_xsdtype(XSD_DECIMAL.clone()),
            )
            .unwrap()
            .unwrap();
        let gov = tree
            .create_group_of_values(KeyOptions::child_of(tab).with_predicate(DCAT.term("keyword")))
            .unwrap();
        let plus = tree.create_plus_button(KeyOptions::child_of(gov)).unwrap().unwrap();

        let kind = |id| widget_type(&tree.key(id).unwrap());
        assert_eq!(kind(root), Some(WidgetType::GroupBox));
        assert_eq!(kind(tab), Some(WidgetType::GroupBox));
        assert_eq!(kind(date), Some(WidgetType::DateEdit));
        assert_eq!(kind(flag), Some(WidgetType::CheckBox));
        assert_eq!(kind(size), Some(WidgetType::LineEdit));
        assert_eq!(kind(plus), Some(WidgetType::ToolButton));
        assert_eq!(type_validator(&tree.key(size).unwrap()), Some(TypeValidator::Double));
        assert_eq!(type_validator(&tree.key(date).unwrap()), None);
        assert_eq!(
            serde_json::to_string(&WidgetType::DateEdit).unwrap(),
            "\"QDateEdit\""
        );
    }

    #[test]
    fn value_hints() {
        let mut tree = WidgetTree::new(edit_session());
        let root = tree.root();
        let tg = tree
            .create_translation_group(
                KeyOptions::child_of(root)
                    .with_predicate(DCT.term("title"))
                    .with_label("Libellé")
                    .with_xsdtype(RDF_LANG_STRING.clone())
                    .with_mandatory(true),
            )
            .unwrap();
        let title = tree
            .create_value(KeyOptions::child_of(tg).with_value(Literal::with_language("Titre", "fr")))
            .unwrap()
            .unwrap();

        let group = internalize(&tree, tg, &NoThesaurus).unwrap();
        assert_eq!(group.main_widget_type, Some(WidgetType::GroupBox));
        assert_eq!(group.label.as_deref(), Some("Libellé"));

        let hints = internalize(&tree, title, &NoThesaurus).unwrap();
        assert_eq!(hints.value.as_deref(), Some("Titre"));
        assert_eq!(hints.label, None);
        assert!(hints.is_mandatory);
        assert_eq!(hints.language_value.as_deref(), Some("fr"));
        assert_eq!(hints.authorized_languages, Some(vec!["fr".into(), "en".into()]));
        assert!(hints.has_minus_button);
        assert!(hints.hide_minus_button);
    }

    #[test]
    fn source_menus() {
        let themes = Iri::new_unchecked("http://example.org/themes");
        let places = Iri::new_unchecked("http://example.org/places");
        let thesaurus = InMemoryThesaurus::new()
            .with_scheme(themes.clone(), "fr", "Thèmes")
            .with_scheme(places.clone(), "fr", "Lieux");
        let mut tree = WidgetTree::new(edit_session());
        let root = tree.root();
        let theme = tree
            .create_value(
                KeyOptions::child_of(root)
                    .with_predicate(DCAT.term("theme"))
                    .with_sources(vec![themes.clone(), places.clone()]),
            )
            .unwrap()
            .unwrap();
        let hints = internalize(&tree, theme, &thesaurus).unwrap();
        assert!(hints.multiple_sources);
        assert_eq!(hints.current_source.as_deref(), Some(NOT_REFERENCED));
        assert_eq!(
            hints.sources,
            Some(vec![NOT_REFERENCED.into(), "Thèmes".into(), "Lieux".into()])
        );

        tree.change_source(theme, Some(places)).unwrap();
        let hints = internalize(&tree, theme, &thesaurus).unwrap();
        assert_eq!(hints.current_source.as_deref(), Some("Lieux"));
        assert_eq!(hints.thesaurus_values, Some(vec![]));
    }

    #[test]
    fn placements() {
        let mut tree = WidgetTree::new(edit_session());
        let root = tree.root();
        let tab = tree.create_tab(KeyOptions::child_of(root)).unwrap();
        let description = tree
            .create_value(
                KeyOptions::child_of(tab)
                    .with_predicate(DCT.term("description"))
                    .with_xsdtype(RDF_LANG_STRING.clone())
                    .with_long_text(true)
                    .with_rowspan(4)
                    .with_independant_label(true),
            )
            .unwrap()
            .unwrap();
        let modified = tree
            .create_value(KeyOptions::child_of(tab).with_predicate(DCT.term("modified")))
            .unwrap()
            .unwrap();

        assert_eq!(
            widget_placement(&tree, description, WidgetKind::Label),
            Some(Placement::new(0, 0, 1, 2))
        );
        assert_eq!(
            widget_placement(&tree, description, WidgetKind::Main),
            Some(Placement::new(1, 0, 4, 2))
        );
        assert_eq!(
            widget_placement(&tree, description, WidgetKind::Language),
            Some(Placement::new(1, 2, 1, 1))
        );
        assert_eq!(widget_placement(&tree, description, WidgetKind::Minus), None);
        assert_eq!(
            widget_placement(&tree, modified, WidgetKind::Main),
            Some(Placement::new(5, 1, 1, 1))
        );
        assert_eq!(
            widget_placement(&tree, modified, WidgetKind::Label),
            Some(Placement::new(5, 0, 1, 1))
        );
    }
}
