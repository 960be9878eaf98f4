//! Language preference helpers for translated values

use crate::term::{Literal, Term};

/// Anything that may carry a language tag
pub trait LanguageTagged {
    /// Language tag, if any
    fn language_tag(&self) -> Option<&str>;
}

impl LanguageTagged for Literal {
    fn language_tag(&self) -> Option<&str> {
        self.language()
    }
}

impl LanguageTagged for Term {
    fn language_tag(&self) -> Option<&str> {
        self.language()
    }
}

impl<T: LanguageTagged> LanguageTagged for Option<T> {
    fn language_tag(&self) -> Option<&str> {
        self.as_ref().and_then(LanguageTagged::language_tag)
    }
}

fn rank<S: AsRef<str>>(tag: Option<&str>, langlist: &[S]) -> usize {
    tag.and_then(|t| langlist.iter().position(|l| l.as_ref() == t))
        .unwrap_or(usize::MAX)
}

/// Sort values by the position of their language in `langlist`
///
/// Values in another language, or without one, go last. The sort is
/// stable.
pub fn sort_by_language<T: LanguageTagged, S: AsRef<str>>(values: &mut [T], langlist: &[S]) {
    values.sort_by_key(|v| rank(v.language_tag(), langlist));
}

/// Best translation among `values`
///
/// Tries each language of `langlist` in turn and returns the first value in
/// that language; falls back to the first value.
#[must_use]
pub fn pick_translation<'a, T: LanguageTagged, S: AsRef<str>>(
    values: &'a [T],
    langlist: &[S],
) -> Option<&'a T> {
    langlist
        .iter()
        .find_map(|lang| {
            values
                .iter()
                .find(|v| v.language_tag() == Some(lang.as_ref()))
        })
        .or_else(|| values.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles() -> Vec<Term> {
        vec![
            Literal::with_language("My Title", "en").into(),
            Literal::with_language("Mon titre", "fr").into(),
            Literal::new("Mon autre titre").into(),
            Literal::with_language("Mein Titel", "de").into(),
        ]
    }

    #[test]
    fn sort_puts_preferred_languages_first() {
        let mut values = titles();
        sort_by_language(&mut values, &["fr", "de"]);
        let expected: Vec<Term> = vec![
            Literal::with_language("Mon titre", "fr").into(),
            Literal::with_language("Mein Titel", "de").into(),
            Literal::with_language("My Title", "en").into(),
            Literal::new("Mon autre titre").into(),
        ];
        assert_eq!(values, expected);
    }

    #[test]
    fn sort_handles_placeholders() {
        let mut values: Vec<Option<Term>> = vec![None, Some(Literal::with_language("x", "en").into())];
        sort_by_language(&mut values, &["en"]);
        assert!(values[0].is_some());
        assert!(values[1].is_none());
    }

    #[test]
    fn pick_translation_by_preference() {
        let values = titles();
        assert_eq!(
            pick_translation(&values, &["fr", "de"]),
            Some(&Term::from(Literal::with_language("Mon titre", "fr")))
        );
        assert_eq!(
            pick_translation(&values, &["de"]),
            Some(&Term::from(Literal::with_language("Mein Titel", "de")))
        );
        assert_eq!(
            pick_translation(&values, &["it"]),
            Some(&Term::from(Literal::with_language("My Title", "en")))
        );
        assert_eq!(pick_translation::<Term, &str>(&[], &["fr"]), None);
    }
}
