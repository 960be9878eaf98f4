//! Text helpers shared by IRI validation and read-only rendering

use once_cell::sync::Lazy;
use regex::Regex;

static FORBIDDEN_IRI_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>"\s{}|\\^`]"#).expect("static pattern"));

/// First character of `text` that is not allowed in an IRI, if any
///
/// # Examples
/// ```
/// # use plume_rdf::forbidden_char;
/// assert_eq!(forbidden_char("https://a b"), Some(' '));
/// assert_eq!(forbidden_char("https://ab"), None);
/// ```
#[must_use]
pub fn forbidden_char(text: &str) -> Option<char> {
    FORBIDDEN_IRI_CHAR
        .find(text)
        .and_then(|m| m.as_str().chars().next())
}

/// HTML anchor around `text` pointing to `target`, both escaped
#[must_use]
pub fn text_with_link(text: &str, target: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_html(target), escape_html(text))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
