//! Field values: from typed text to RDF terms and back
//!
//! Email addresses and phone numbers are stored as `mailto:` and `tel:`
//! IRIs. Vocabulary values are stored as concept IRIs and displayed by
//! their labels.

use once_cell::sync::Lazy;
use plume_rdf::{forbidden_char, text_with_link, Iri, Literal, Term, Thesaurus, RDF_LANG_STRING};
use plume_widgetkey::{KeyId, KeyKind, Transform, WidgetTree};
use regex::Regex;

use crate::error::{DictError, Result};

static MAILTO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^mailto:").expect("static pattern"));
static TEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tel:").expect("static pattern"));
static TEL_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.\s-]").expect("static pattern"));
static FR_NATIONAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0(\d{9})$").expect("static pattern"));
static FR_INTERNATIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+33\d{9}$").expect("static pattern"));
static SPACED_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\s(\d)").expect("static pattern"));

fn checked(value: &str, original: &str) -> Result<()> {
    match forbidden_char(value) {
        Some(character) => Err(DictError::InvalidValue {
            value: original.to_string(),
            character,
        }),
        None => Ok(()),
    }
}

/// `mailto:` IRI for an email address, none for an empty one
///
/// # Errors
/// `InvalidValue` when the address holds a character IRIs forbid
pub fn owlthing_from_email(email: &str) -> Result<Option<Iri>> {
    let address = MAILTO.replace(email, "");
    checked(&address, email)?;
    if address.is_empty() {
        return Ok(None);
    }
    Ok(Some(Iri::new_unchecked(format!("mailto:{address}"))))
}

/// Address of a `mailto:` IRI
#[must_use]
pub fn email_from_owlthing(thing: &Term) -> String {
    MAILTO.replace(&thing.to_string(), "").into_owned()
}

/// `tel:` IRI for a phone number, none for an empty one
///
/// French numbers, national or international, are normalised to
/// `+33-x-xx-xx-xx-xx`; others keep their digits, inner spaces becoming
/// dashes.
///
/// # Errors
/// `InvalidValue` when an unrecognised number holds a character IRIs forbid
pub fn owlthing_from_tel(tel: &str, add_fr_prefix: bool) -> Result<Option<Iri>> {
    let number = TEL.replace(tel, "");
    let mut compact = TEL_SEPARATORS.replace_all(&number, "").into_owned();
    if add_fr_prefix {
        if let Some(digits) = FR_NATIONAL.captures(&compact).map(|c| c[1].to_string()) {
            compact = format!("+33{digits}");
        }
    }
    let formatted = if FR_INTERNATIONAL.is_match(&compact) {
        let mut out = String::with_capacity(compact.len() + 5);
        for (i, c) in compact.chars().enumerate() {
            if i == 3 || (i > 2 && i % 2 == 0) {
                out.push('-');
            }
            out.push(c);
        }
        out
    } else {
        let dashed = SPACED_DIGITS.replace_all(&number, "$1-$2");
        let dashed = dashed.trim_matches(' ').to_string();
        checked(&dashed, tel)?;
        dashed
    };
    if formatted.is_empty() {
        return Ok(None);
    }
    Ok(Some(Iri::new_unchecked(format!("tel:{formatted}"))))
}

/// Number of a `tel:` IRI
#[must_use]
pub fn tel_from_owlthing(thing: &Term) -> String {
    TEL.replace(&thing.to_string(), "").into_owned()
}

/// Store text typed in a value widget
///
/// Empty text clears the value. Read-only keys and keys that are not
/// values are left alone. Language-tagged then typed literals are tried
/// first, then a vocabulary concept, then an IRI.
///
/// # Errors
/// `InvalidValue` for text that can't be an IRI, `Tree` for an unknown key
pub fn register_value(
    tree: &mut WidgetTree,
    id: KeyId,
    text: Option<&str>,
    thesaurus: &dyn Thesaurus,
) -> Result<()> {
    let view = tree.key(id)?;
    if view.kind() != KeyKind::Value || view.is_read_only() {
        return Ok(());
    }
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        tree.set_value(id, None)?;
        return Ok(());
    };
    let value: Option<Term> = match view.transform() {
        Some(Transform::Email) => owlthing_from_email(text)?.map(Term::from),
        Some(Transform::Phone) => owlthing_from_tel(text, true)?.map(Term::from),
        None => Some(typed_value(tree, id, text, thesaurus)?),
    };
    tree.set_value(id, value)?;
    Ok(())
}

fn typed_value(tree: &WidgetTree, id: KeyId, text: &str, thesaurus: &dyn Thesaurus) -> Result<Term> {
    let view = tree.key(id)?;
    let xsdtype = view.xsdtype();
    if xsdtype == Some(&*RDF_LANG_STRING) {
        if let Some(language) = view.value_language() {
            return Ok(Literal::with_language(text, language).into());
        }
    }
    if let Some(datatype) = xsdtype {
        return Ok(Literal::typed(text, datatype.clone()).into());
    }
    if let Some(source) = view.value_source() {
        let language = tree.session().main_language()?;
        if let Some(concept) = thesaurus.concept_iri(source, language, text) {
            return Ok(concept.into());
        }
    }
    checked(text, text)?;
    Ok(Iri::new(text)?.into())
}

/// Text displayed by a value widget
///
/// Read-only widgets show IRIs, and concepts, as links.
#[must_use]
pub fn str_value(tree: &WidgetTree, id: KeyId, thesaurus: &dyn Thesaurus) -> Option<String> {
    let view = tree.key(id).ok()?;
    let value = view.value()?;
    let language = tree.session().main_language().unwrap_or("fr");
    let source = view.value_source();
    let text = match view.transform() {
        Some(Transform::Email) => email_from_owlthing(value),
        Some(Transform::Phone) => tel_from_owlthing(value),
        None => match (source, value.as_iri()) {
            (Some(source), Some(concept)) => thesaurus
                .concept_str(source, language, concept)
                .unwrap_or_else(|| value.to_string()),
            _ => value.to_string(),
        },
    };
    if !view.is_read_only() {
        return Some(text);
    }
    let Some(iri) = value.as_iri() else {
        return Some(text);
    };
    let target = source
        .and_then(|s| thesaurus.concept_link(s, language, iri))
        .unwrap_or_else(|| iri.clone());
    Some(text_with_link(&text, target.as_str()))
}
