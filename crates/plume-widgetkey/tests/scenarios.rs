use plume_rdf::{Iri, Literal, DCAT, DCT, FOAF, VCARD};
use plume_test_utils::{sample_tree, sample_tree_with};
use plume_widgetkey::{
    Action, Attribute, Branch, KeyError, KeyKind, KeyOptions, Session, WidgetTree,
};
use pretty_assertions::assert_eq;

#[test]
fn test_empty_translation_group_defaults_to_first_language() {
    let mut tree = WidgetTree::new(Session::new(["fr", "en"]));
    let root = tree.root();
    let tab = tree
        .create_tab(KeyOptions::child_of(root).with_label("Général"))
        .unwrap();
    let group = tree
        .create_translation_group(
            KeyOptions::child_of(tab)
                .with_predicate(DCT.term("title"))
                .with_mandatory(true),
        )
        .unwrap();
    let value = tree
        .create_value(KeyOptions::child_of(group))
        .unwrap()
        .unwrap();
    let button = tree
        .create_translation_button(KeyOptions::child_of(group))
        .unwrap()
        .unwrap();

    assert_eq!(tree.get(group).unwrap().kind(), KeyKind::TranslationGroup);
    assert_eq!(tree.children(group), &[value]);
    assert_eq!(tree.get(value).unwrap().value(), None);
    assert_eq!(tree.value_language(value).as_deref(), Some("fr"));
    assert_eq!(tree.available_languages(group).unwrap(), ["en"]);
    assert!(!tree.is_hidden(button));
    assert!(tree.key(value).unwrap().is_mandatory());
}

#[test]
fn test_masking_twins_in_a_group_of_values() {
    let mut tree = WidgetTree::default();
    let root = tree.root();
    let group = tree
        .create_group_of_values(
            KeyOptions::child_of(root)
                .with_predicate(DCT.term("publisher"))
                .with_rdftype(FOAF.term("Organization")),
        )
        .unwrap();
    let value = tree
        .create_value(
            KeyOptions::child_of(group).with_value(Iri::new_unchecked("https://example.org/org/1")),
        )
        .unwrap()
        .unwrap();
    let organisation = tree
        .create_group_of_properties(
            KeyOptions::child_of(group)
                .with_twin(value)
                .with_hidden_m(true),
        )
        .unwrap();
    let other = tree
        .create_value(
            KeyOptions::child_of(group).with_value(Iri::new_unchecked("https://example.org/org/2")),
        )
        .unwrap()
        .unwrap();
    assert!(tree.has_minus_button(value));
    assert!(tree.has_minus_button(organisation));
    assert!(!tree.get(other).unwrap().is_single_child());

    tree.clear_actionsbook();
    tree.update(value, [Attribute::IsHiddenM(Some(true))], false)
        .unwrap();
    let book = tree.unload_actionsbook();
    assert!(book.show_minus_button.is_empty());
    assert!(book.hide_minus_button.is_empty());
    assert!(book.contains(Action::Hide, &value));
    assert!(book.contains(Action::Show, &organisation));
    assert_eq!(tree.get(organisation).unwrap().row(), Some(0));
    assert_eq!(tree.get(other).unwrap().row(), Some(1));
}

#[test]
fn test_reselecting_a_language_keeps_the_pool() {
    let mut sample = sample_tree();
    let group = sample.title_group;
    let book = sample
        .tree
        .change_language(sample.title_fr, Some("en".into()))
        .unwrap();
    assert!(book.contains(Action::Languages, &sample.title_fr));
    assert_eq!(sample.tree.available_languages(group).unwrap(), ["fr"]);
    assert_eq!(sample.tree.value_language(sample.title_fr).as_deref(), Some("en"));

    sample
        .tree
        .change_language(sample.title_fr, Some("en".into()))
        .unwrap();
    assert_eq!(sample.tree.available_languages(group).unwrap(), ["fr"]);
    assert!(!sample.tree.is_hidden(sample.title_button));
}

#[test]
fn test_sample_layout() {
    let sample = sample_tree();
    let tree = &sample.tree;
    assert_eq!(tree.children(sample.tab).len(), 4);
    assert_eq!(tree.get(sample.title_group).unwrap().row(), Some(0));
    assert_eq!(tree.get(sample.title_fr).unwrap().row(), Some(0));
    assert_eq!(tree.get(sample.title_button).unwrap().row(), Some(1));
    assert_eq!(tree.get(sample.keywords).unwrap().row(), Some(1));
    assert_eq!(tree.get(sample.keyword_button).unwrap().row(), Some(1));
    assert_eq!(tree.get(sample.publisher).unwrap().row(), Some(2));
    assert!(tree.is_hidden(sample.organisation_name));
    assert_eq!(tree.label_row(sample.publisher), Some(2));
    assert_eq!(tree.key(sample.title_fr).unwrap().label(), None);
    assert_eq!(tree.key(sample.keywords).unwrap().label(), Some("Mots-clés"));
}

#[test]
fn test_failed_creation_leaves_no_trace() {
    let mut sample = sample_tree();
    let count = sample.tree.len();
    let err = sample
        .tree
        .create_group_of_properties(
            KeyOptions::child_of(sample.tab).with_predicate(DCAT.term("contactPoint")),
        )
        .unwrap_err();
    assert_eq!(err, KeyError::missing("rdftype", None));

    let err = sample
        .tree
        .create_value(
            KeyOptions::child_of(sample.tab)
                .with_predicate(DCT.term("creator"))
                .with_twin(sample.organisation),
        )
        .unwrap_err();
    assert!(err.is_programmer_error());
    assert_eq!(sample.tree.len(), count);
    assert!(sample.tree.unload_actionsbook().is_empty());
}

#[test]
fn test_suspended_build_resumes_once() {
    let mut tree = WidgetTree::default();
    let root = tree.root();
    tree.suspend_computation();
    let group = tree
        .create_group_of_values(KeyOptions::child_of(root).with_predicate(DCAT.term("keyword")))
        .unwrap();
    let first = tree
        .create_value(KeyOptions::child_of(group).with_value(Literal::new("a")))
        .unwrap()
        .unwrap();
    let second = tree
        .create_value(KeyOptions::child_of(group).with_value(Literal::new("b")))
        .unwrap()
        .unwrap();
    assert_eq!(tree.get(second).unwrap().row(), None);
    assert!(!tree.get(first).unwrap().is_single_child());

    tree.resume_computation();
    assert_eq!(tree.get(first).unwrap().row(), Some(0));
    assert_eq!(tree.get(second).unwrap().row(), Some(1));
    assert!(!tree.get(first).unwrap().is_single_child());
}

#[test]
fn test_paste_a_contact_from_another_record() {
    let contacts = |tree: &mut WidgetTree, name: Option<&str>| {
        let root = tree.root();
        let group = tree
            .create_group_of_values(
                KeyOptions::child_of(root)
                    .with_predicate(DCAT.term("contactPoint"))
                    .with_rdftype(VCARD.term("Kind")),
            )
            .unwrap();
        let contact = tree
            .create_group_of_properties(KeyOptions::child_of(group))
            .unwrap();
        let mut opts = KeyOptions::child_of(contact).with_predicate(VCARD.term("fn"));
        if let Some(name) = name {
            opts = opts.with_value(Literal::new(name));
        }
        tree.create_value(opts).unwrap();
        tree.create_plus_button(KeyOptions::child_of(group)).unwrap();
        (group, contact)
    };
    let mut source = WidgetTree::default();
    let (_, source_contact) = contacts(&mut source, Some("Service du cadastre"));
    let mut target = WidgetTree::default();
    let (group, target_contact) = contacts(&mut target, None);

    let branch = Branch::capture(&source, source_contact, false).unwrap();
    let book = target.paste_from_rdftype(target_contact, &branch).unwrap();
    assert!(book.contains(Action::Drop, &target_contact));
    let pasted = target.children(group)[0];
    let name = target.children(pasted)[0];
    assert_eq!(
        target.get(name).unwrap().value(),
        Some(&Literal::new("Service du cadastre").into())
    );

    let mut wrong = WidgetTree::default();
    let root = wrong.root();
    let organisation = wrong
        .create_group_of_properties(
            KeyOptions::child_of(root)
                .with_predicate(DCT.term("publisher"))
                .with_rdftype(FOAF.term("Organization")),
        )
        .unwrap();
    let err = wrong.paste_from_rdftype(organisation, &branch).unwrap_err();
    assert!(matches!(err, KeyError::ForbiddenOperation { .. }));
}

#[test]
fn test_sessions_are_independent() {
    let mut first = sample_tree_with(Session::new(["fr", "en", "de"]));
    let second = sample_tree();
    assert_eq!(first.tree.available_languages(first.title_group).unwrap(), ["en", "de"]);
    assert_eq!(second.tree.available_languages(second.title_group).unwrap(), ["en"]);
    first.tree.add(first.title_button).unwrap();
    assert!(second.tree.session().actionsbook().is_empty());
}
