//! Forms built from the sample schema, metagraph and template

use plume_rdf::{Iri, Metagraph, Term, DCAT, DCAT_DATASET, DCT, RDF_LANG_STRING, VCARD};
use plume_test_utils::{sample_metagraph, SAMPLE_SCHEMA, SAMPLE_TEMPLATE};
use plume_widgetkey::{KeyError, KeyId, KeyKind, Transform};
use plume_widgetsdict::{
    DictConfig, DictError, NodeKind, Origin, PropertyDescriptor, StaticSchema, Template, WidgetKind,
    WidgetType, WidgetsDict, WidgetsDictBuilder, COLUMNS_TAB, DEFAULT_TAB, IRI_SOURCE, MANUAL,
    OTHERS_TAB,
};
use pretty_assertions::assert_eq;

const UUID: &str = "479fd670-32c5-4ade-a26d-0268b0ce5046";

fn schema() -> StaticSchema {
    StaticSchema::from_yaml(SAMPLE_SCHEMA).unwrap()
}

fn build(config: DictConfig, graph: Option<&Metagraph>, template: Option<&Template>) -> WidgetsDict {
    let schema = schema();
    let mut builder = WidgetsDictBuilder::new(&schema).with_config(config);
    if let Some(graph) = graph {
        builder = builder.with_metagraph(graph);
    }
    if let Some(template) = template {
        builder = builder.with_template(template);
    }
    builder.build().unwrap()
}

/// Real keys of `kind` whose own predicate is `predicate`
fn find(dict: &WidgetsDict, kind: KeyKind, predicate: &Iri) -> Vec<KeyId> {
    let tree = dict.tree();
    tree.keys()
        .filter(|k| k.is_real() && k.kind() == kind)
        .filter(|k| tree.key(k.id()).unwrap().predicate() == Some(predicate))
        .map(|k| k.id())
        .collect()
}

fn tab(dict: &WidgetsDict, label: &str) -> Option<KeyId> {
    dict.tree().search_tab(dict.root(), Some(label))
}

#[test]
fn test_mandatory_translatable_title_without_data() {
    let mut title = PropertyDescriptor::new(DCT.term("title"), Origin::Shape);
    title.datatype = Some(RDF_LANG_STRING.clone());
    title.unilang = true;
    title.is_mandatory = true;
    let schema = StaticSchema::new().with_property(DCAT_DATASET.clone(), title);
    let dict = WidgetsDictBuilder::new(&schema)
        .with_config(
            DictConfig::default()
                .with_translation(true)
                .with_languages(["fr", "en"]),
        )
        .build()
        .unwrap();

    let tree = dict.tree();
    let groups = find(&dict, KeyKind::TranslationGroup, &DCT.term("title"));
    assert_eq!(groups.len(), 1);
    let group = groups[0];
    let values = tree.real_children(group);
    assert_eq!(values.len(), 1);
    let value = tree.key(values[0]).unwrap();
    assert_eq!(value.value(), None);
    assert_eq!(value.value_language().as_deref(), Some("fr"));
    assert_eq!(tree.available_languages(group), Some(&["en".to_string()][..]));

    let button = tree.get(group).unwrap().button().unwrap();
    assert!(!tree.is_hidden(button));
    assert!(!dict.get(button).unwrap().hidden);
    assert_eq!(dict.get(button).unwrap().main_widget_type, Some(WidgetType::ToolButton));
}

#[test]
fn test_edit_form_of_the_sample_record() {
    let (graph, dataset) = sample_metagraph();
    let dict = build(DictConfig::default(), Some(&graph), None);
    assert_eq!(dict.datasetid(), &dataset);

    assert!(tab(&dict, DEFAULT_TAB).is_some());
    assert_eq!(tab(&dict, OTHERS_TAB), None);

    let tree = dict.tree();
    let titles = find(&dict, KeyKind::GroupOfValues, &DCT.term("title"));
    assert_eq!(titles.len(), 1);
    assert_eq!(tree.real_children(titles[0]).len(), 2);

    let keywords = find(&dict, KeyKind::GroupOfValues, &DCAT.term("keyword"));
    assert_eq!(keywords.len(), 1);
    assert_eq!(tree.real_children(keywords[0]).len(), 2);
    let plus = tree.get(keywords[0]).unwrap().button().unwrap();
    assert_eq!(tree.get(plus).unwrap().kind(), KeyKind::PlusButton);

    let emails = find(&dict, KeyKind::Value, &VCARD.term("hasEmail"));
    assert_eq!(emails.len(), 1);
    let email = dict.get(emails[0]).unwrap();
    assert_eq!(email.value.as_deref(), Some("cadastre@example.org"));
    assert!(!email.read_only);
    assert_eq!(tree.key(emails[0]).unwrap().transform(), Some(Transform::Email));

    let identifier = find(&dict, KeyKind::Value, &DCT.term("identifier"));
    assert_eq!(dict.get(identifier[0]).unwrap().value.as_deref(), Some(UUID));
    assert_eq!(dict.get(identifier[0]).unwrap().main_widget_type, Some(WidgetType::Label));

    let modified = find(&dict, KeyKind::Value, &DCT.term("modified"));
    assert_eq!(dict.get(modified[0]).unwrap().value, None);
    assert_eq!(dict.get(modified[0]).unwrap().main_widget_type, Some(WidgetType::DateEdit));
}

#[test]
fn test_publisher_twins() {
    let (graph, _) = sample_metagraph();
    let dict = build(DictConfig::default(), Some(&graph), None);
    let tree = dict.tree();

    let value = find(&dict, KeyKind::Value, &DCT.term("publisher"))[0];
    let group = find(&dict, KeyKind::GroupOfProperties, &DCT.term("publisher"))[0];
    assert_eq!(tree.get(value).unwrap().m_twin(), Some(group));
    assert!(!tree.is_hidden(value));
    assert!(tree.is_hidden(group));

    let hints = dict.get(value).unwrap();
    assert!(hints.multiple_sources);
    assert_eq!(
        hints.sources,
        Some(vec![MANUAL.to_string(), IRI_SOURCE.to_string()])
    );
    assert_eq!(hints.current_source.as_deref(), Some(IRI_SOURCE));
    assert_eq!(dict.get(group).unwrap().current_source.as_deref(), Some(MANUAL));
    assert_eq!(
        tree.get(value).unwrap().value(),
        Some(&Term::from(Iri::new_unchecked("https://example.org/org/cadastre")))
    );
}

#[test]
fn test_read_form_of_the_sample_record() {
    let (graph, _) = sample_metagraph();
    let dict = build(DictConfig::read(), Some(&graph), None);
    let tree = dict.tree();

    let titles = find(&dict, KeyKind::Value, &DCT.term("title"));
    assert_eq!(titles.len(), 1);
    assert_eq!(dict.get(titles[0]).unwrap().value.as_deref(), Some("Cadastre"));

    assert!(find(&dict, KeyKind::Value, &DCT.term("description")).is_empty());
    assert!(find(&dict, KeyKind::Value, &DCT.term("modified")).is_empty());
    assert!(find(&dict, KeyKind::PlusButton, &DCAT.term("keyword")).is_empty());
    assert!(find(&dict, KeyKind::GroupOfProperties, &DCT.term("publisher")).is_empty());

    let email = find(&dict, KeyKind::Value, &VCARD.term("hasEmail"))[0];
    let hints = dict.get(email).unwrap();
    assert!(hints.read_only);
    assert_eq!(hints.main_widget_type, Some(WidgetType::Label));
    assert_eq!(
        hints.value.as_deref(),
        Some("<a href=\"mailto:cadastre@example.org\">cadastre@example.org</a>")
    );
    assert!(!hints.multiple_sources);
    for (id, _) in dict.iter() {
        assert!(tree.get(*id).unwrap().is_real());
    }
}

#[test]
fn test_template_tabs_and_fields() {
    let (graph, _) = sample_metagraph();
    let template = Template::from_yaml(SAMPLE_TEMPLATE).unwrap();
    let dict = build(DictConfig::default(), Some(&graph), Some(&template));
    let tree = dict.tree();

    let general = tab(&dict, DEFAULT_TAB).unwrap();
    let contacts = tab(&dict, "Contacts").unwrap();
    let others = tab(&dict, OTHERS_TAB).unwrap();

    let contact_group = find(&dict, KeyKind::GroupOfValues, &DCAT.term("contactPoint"))[0];
    assert_eq!(tree.get(contact_group).unwrap().parent(), Some(contacts));

    let access = find(&dict, KeyKind::Value, &DCT.term("accessRights"));
    assert_eq!(access.len(), 1);
    assert_eq!(tree.get(access[0]).unwrap().parent(), Some(general));
    assert_eq!(dict.get(access[0]).unwrap().label.as_deref(), Some("Conditions d'accès"));

    let publisher = find(&dict, KeyKind::Value, &DCT.term("publisher"))[0];
    assert_eq!(tree.get(publisher).unwrap().parent(), Some(others));
    assert!(find(&dict, KeyKind::Value, &DCT.term("description")).is_empty());

    let phones = find(&dict, KeyKind::Value, &VCARD.term("hasTelephone"));
    assert_eq!(phones.len(), 1);
    assert_eq!(tree.key(phones[0]).unwrap().transform(), Some(Transform::Phone));
    assert_eq!(dict.get(phones[0]).unwrap().label.as_deref(), Some("Téléphone"));

    let title = find(&dict, KeyKind::GroupOfValues, &DCT.term("title"))[0];
    let keywords = find(&dict, KeyKind::GroupOfValues, &DCAT.term("keyword"))[0];
    let rows = |id| tree.get(id).unwrap().row().unwrap();
    assert!(rows(title) < rows(keywords));
}

#[test]
fn test_hidden_unlisted_fields_become_ghosts() {
    let (graph, _) = sample_metagraph();
    let template = Template::from_yaml(SAMPLE_TEMPLATE).unwrap();
    let mut config = DictConfig::default();
    config.edit_hide_unlisted = true;
    let dict = build(config, Some(&graph), Some(&template));

    assert!(find(&dict, KeyKind::Value, &DCT.term("publisher")).is_empty());
    let tree = dict.tree();
    let ghost = tree
        .keys()
        .filter(|k| k.kind() == KeyKind::Value)
        .find(|k| tree.key(k.id()).unwrap().predicate() == Some(&DCT.term("publisher")))
        .map(|k| k.is_ghost());
    assert_eq!(ghost, Some(true));
}

#[test]
fn test_columns_tab() {
    let schema = schema();
    let dict = WidgetsDictBuilder::new(&schema)
        .with_columns(vec![("code_insee".into(), "Code INSEE de la commune".into())])
        .build()
        .unwrap();
    let tree = dict.tree();
    let columns = tab(&dict, COLUMNS_TAB).unwrap();
    let fields = tree.real_children(columns);
    assert_eq!(fields.len(), 1);
    let field = tree.get(fields[0]).unwrap();
    assert!(field.do_not_save());
    assert!(field.is_long_text());
    let hints = dict.get(fields[0]).unwrap();
    assert_eq!(hints.label.as_deref(), Some("code_insee"));
    assert_eq!(hints.value.as_deref(), Some("Code INSEE de la commune"));
    assert_eq!(hints.help_text.as_deref(), Some("Description du champ"));
    assert_eq!(hints.main_widget_type, Some(WidgetType::TextEdit));
    let label = dict.widget_placement(fields[0], WidgetKind::Label).unwrap();
    assert_eq!((label.row, label.columnspan), (0, 2));
}

#[test]
fn test_gui_operations_keep_hints_in_sync() {
    let (graph, _) = sample_metagraph();
    let mut dict = build(DictConfig::default(), Some(&graph), None);

    let keywords = find(&dict, KeyKind::GroupOfValues, &DCAT.term("keyword"))[0];
    let plus = dict.tree().get(keywords).unwrap().button().unwrap();
    let book = dict.add(plus).unwrap();
    assert_eq!(book.created.len(), 1);
    let added = book.created[0];
    assert!(dict.contains(added));
    assert_eq!(dict.get(added).unwrap().value, None);

    let book = dict.drop(added).unwrap();
    assert!(book.dropped.contains(&added));
    assert!(!dict.contains(added));

    let value = find(&dict, KeyKind::Value, &DCT.term("publisher"))[0];
    let group = find(&dict, KeyKind::GroupOfProperties, &DCT.term("publisher"))[0];
    let book = dict.switch_twin(value).unwrap();
    assert!(book.hidden.contains(&value));
    assert!(book.shown.contains(&group));
    assert!(!dict.get(group).unwrap().hidden_m);
    assert!(dict.get(value).unwrap().hidden_m);
}

#[test]
fn test_register_values_from_the_form() {
    let (graph, _) = sample_metagraph();
    let mut dict = build(DictConfig::default(), Some(&graph), None);
    let value = find(&dict, KeyKind::Value, &DCT.term("publisher"))[0];

    let err = dict.register_value(value, Some("https://example.org/a b")).unwrap_err();
    assert!(matches!(err, DictError::InvalidValue { character: ' ', .. }));

    dict.register_value(value, Some("https://example.org/org/ign")).unwrap();
    assert_eq!(
        dict.get(value).unwrap().value.as_deref(),
        Some("https://example.org/org/ign")
    );

    let email = find(&dict, KeyKind::Value, &VCARD.term("hasEmail"))[0];
    dict.register_value(email, Some("mailto:ign@example.org")).unwrap();
    assert_eq!(
        dict.tree().get(email).unwrap().value(),
        Some(&Term::from(Iri::new_unchecked("mailto:ign@example.org")))
    );
    assert_eq!(dict.str_value(email).as_deref(), Some("ign@example.org"));
}

fn classless_contact(is_multiple: bool) -> StaticSchema {
    let mut contact = PropertyDescriptor::new(DCAT.term("contactPoint"), Origin::Shape);
    contact.kind = NodeKind::BlankNode;
    contact.is_multiple = is_multiple;
    StaticSchema::new().with_property(DCAT_DATASET.clone(), contact)
}

#[test]
fn test_blank_node_property_without_class_fails() {
    let schema = classless_contact(false);
    let err = WidgetsDictBuilder::new(&schema).build().unwrap_err();
    assert!(matches!(
        err,
        DictError::Tree(KeyError::MissingParameter { parameter: "rdftype", .. })
    ));
}

#[test]
fn test_multiple_blank_node_property_without_class_fails() {
    let schema = classless_contact(true);
    let err = WidgetsDictBuilder::new(&schema).build().unwrap_err();
    assert!(matches!(err, DictError::Tree(KeyError::IntegrityBreach { .. })));
}
