//! Testing utilities for the Plume workspace
//!
//! Sample trees, graphs and schema documents shared by the integration
//! suites.

#![allow(missing_docs)]

use plume_rdf::{
    BlankNode, Iri, Literal, Metagraph, DCAT, DCAT_DATASET, DCT, FOAF, RDF_LANG_STRING, RDF_TYPE,
    VCARD,
};
use plume_widgetkey::{KeyId, KeyOptions, Session, WidgetTree};

/// Dataset identifier used by the sample graph
pub const DATASET_ID: &str = "urn:uuid:479fd670-32c5-4ade-a26d-0268b0ce5046";

/// Keys of [`sample_tree`]
#[derive(Debug, Clone)]
pub struct SampleTree {
    pub tree: WidgetTree,
    pub tab: KeyId,
    pub title_group: KeyId,
    pub title_fr: KeyId,
    pub title_button: KeyId,
    pub keywords: KeyId,
    pub keyword: KeyId,
    pub keyword_button: KeyId,
    pub publisher: KeyId,
    pub organisation: KeyId,
    pub organisation_name: KeyId,
}

/// General tab with a translated title, keywords and a publisher twin pair
pub fn sample_tree() -> SampleTree {
    sample_tree_with(Session::default())
}

pub fn sample_tree_with(session: Session) -> SampleTree {
    let mut tree = WidgetTree::with_datasetid(session, Some(Iri::new_unchecked(DATASET_ID)));
    let root = tree.root();
    let tab = tree
        .create_tab(KeyOptions::child_of(root).with_label("Général").with_order_idx(0))
        .unwrap();
    let title_group = tree
        .create_translation_group(
            KeyOptions::child_of(tab)
                .with_predicate(DCT.term("title"))
                .with_label("Libellé")
                .with_order_idx(1),
        )
        .unwrap();
    let title_fr = tree
        .create_value(
            KeyOptions::child_of(title_group).with_value(Literal::with_language("Cadastre", "fr")),
        )
        .unwrap()
        .unwrap();
    let title_button = tree
        .create_translation_button(KeyOptions::child_of(title_group))
        .unwrap()
        .unwrap();
    let keywords = tree
        .create_group_of_values(
            KeyOptions::child_of(tab)
                .with_predicate(DCAT.term("keyword"))
                .with_label("Mots-clés")
                .with_order_idx(2),
        )
        .unwrap();
    let keyword = tree
        .create_value(KeyOptions::child_of(keywords).with_value(Literal::new("foncier")))
        .unwrap()
        .unwrap();
    let keyword_button = tree
        .create_plus_button(KeyOptions::child_of(keywords))
        .unwrap()
        .unwrap();
    let (publisher, organisation, organisation_name) = twin_pair(&mut tree, tab, 3);
    tree.clear_actionsbook();
    SampleTree {
        tree,
        tab,
        title_group,
        title_fr,
        title_button,
        keywords,
        keyword,
        keyword_button,
        publisher,
        organisation,
        organisation_name,
    }
}

/// Publisher value, visible, with its hidden organisation group
///
/// Returns the value, the group and the group's name value.
pub fn twin_pair(tree: &mut WidgetTree, parent: KeyId, order: u32) -> (KeyId, KeyId, KeyId) {
    let value = tree
        .create_value(
            KeyOptions::child_of(parent)
                .with_predicate(DCT.term("publisher"))
                .with_label("Éditeur")
                .with_order_idx(order)
                .with_value(Iri::new_unchecked("https://example.org/org/cadastre")),
        )
        .unwrap()
        .unwrap();
    let group = tree
        .create_group_of_properties(
            KeyOptions::child_of(parent)
                .with_rdftype(FOAF.term("Organization"))
                .with_twin(value)
                .with_hidden_m(true),
        )
        .unwrap();
    let name = tree
        .create_value(
            KeyOptions::child_of(group)
                .with_predicate(FOAF.term("name"))
                .with_value(Literal::new("Service du cadastre")),
        )
        .unwrap()
        .unwrap();
    (value, group, name)
}

/// Translation group of `dct:title` under the root, with its button
///
/// No value is created, the pool holds every session language.
pub fn translation_tree(languages: &[&str]) -> (WidgetTree, KeyId, KeyId) {
    let mut tree = WidgetTree::new(Session::new(languages.iter().copied()));
    let root = tree.root();
    let group = tree
        .create_translation_group(
            KeyOptions::child_of(root)
                .with_predicate(DCT.term("title"))
                .with_xsdtype(RDF_LANG_STRING.clone()),
        )
        .unwrap();
    let button = tree
        .create_translation_button(KeyOptions::child_of(group))
        .unwrap()
        .unwrap();
    (tree, group, button)
}

/// Group of keywords under the root, holding `count` values and a button
pub fn keyword_tree(count: usize) -> (WidgetTree, KeyId, KeyId) {
    let mut tree = WidgetTree::default();
    let root = tree.root();
    let group = tree
        .create_group_of_values(KeyOptions::child_of(root).with_predicate(DCAT.term("keyword")))
        .unwrap();
    for i in 0..count {
        tree.create_value(
            KeyOptions::child_of(group).with_value(Literal::new(format!("mot-clé {i}"))),
        )
        .unwrap();
    }
    let button = tree
        .create_plus_button(KeyOptions::child_of(group))
        .unwrap()
        .unwrap();
    (tree, group, button)
}

/// Metadata graph of the sample dataset
///
/// Title in French and English, two keywords, a contact point with a
/// name and an email, and a publisher IRI.
pub fn sample_metagraph() -> (Metagraph, Iri) {
    let dataset = Iri::new_unchecked(DATASET_ID);
    let contact = BlankNode::from_id("contact");
    let graph = Metagraph::new()
        .with(dataset.clone(), RDF_TYPE.clone(), DCAT_DATASET.clone())
        .with(
            dataset.clone(),
            DCT.term("title"),
            Literal::with_language("Cadastre", "fr"),
        )
        .with(
            dataset.clone(),
            DCT.term("title"),
            Literal::with_language("Land registry", "en"),
        )
        .with(dataset.clone(), DCAT.term("keyword"), Literal::new("foncier"))
        .with(dataset.clone(), DCAT.term("keyword"), Literal::new("parcelle"))
        .with(dataset.clone(), DCAT.term("contactPoint"), contact.clone())
        .with(contact.clone(), RDF_TYPE.clone(), VCARD.term("Kind"))
        .with(contact.clone(), VCARD.term("fn"), Literal::new("Service du cadastre"))
        .with(
            contact,
            VCARD.term("hasEmail"),
            Iri::new_unchecked("mailto:cadastre@example.org"),
        )
        .with(
            dataset.clone(),
            DCT.term("publisher"),
            Iri::new_unchecked("https://example.org/org/cadastre"),
        );
    (graph, dataset)
}

/// Schema document describing datasets, contacts and organisations
pub const SAMPLE_SCHEMA: &str = r#"
classes:
  dcat:Dataset:
    - predicate: dct:title
      label: Libellé
      datatype: rdf:langString
      unilang: true
      is_mandatory: true
      order_idx: 0
    - predicate: dct:description
      label: Description
      datatype: rdf:langString
      unilang: true
      is_long_text: true
      order_idx: 1
    - predicate: dcat:keyword
      label: Mots-clés
      datatype: rdf:langString
      is_multiple: true
      order_idx: 2
    - predicate: dcat:contactPoint
      label: Point de contact
      kind: sh:BlankNode
      rdfclass: vcard:Kind
      is_multiple: true
      order_idx: 3
    - predicate: dct:publisher
      label: Éditeur
      kind: sh:BlankNodeOrIRI
      rdfclass: foaf:Organization
      order_idx: 4
    - predicate: dct:identifier
      label: Identifiant
      datatype: xsd:string
      is_read_only: true
      order_idx: 5
    - predicate: dct:modified
      label: Dernière modification
      datatype: xsd:date
      order_idx: 6
  vcard:Kind:
    - predicate: vcard:fn
      label: Nom
      datatype: xsd:string
      order_idx: 0
    - predicate: vcard:hasEmail
      label: Courriel
      kind: sh:IRI
      transform: email
      order_idx: 1
  foaf:Organization:
    - predicate: foaf:name
      label: Nom
      datatype: xsd:string
      order_idx: 0
"#;

/// Template keeping the title, keywords and contacts of [`SAMPLE_SCHEMA`]
pub const SAMPLE_TEMPLATE: &str = r#"
tabs:
  - Général
  - label: Contacts
    order_idx: 1
fields:
  dct:title:
    order_idx: 0
  dcat:keyword:
    order_idx: 1
  dcat:contactPoint:
    tab: Contacts
  dcat:contactPoint / vcard:fn: {}
  dcat:contactPoint / vcard:hasEmail: {}
  dcat:contactPoint / vcard:hasTelephone:
    label: Téléphone
    kind: sh:IRI
    transform: phone
  dct:accessRights:
    label: Conditions d'accès
    datatype: xsd:string
"#;
