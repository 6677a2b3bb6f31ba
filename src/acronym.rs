//! Acronym protection for exported titles.
//!
//! BibTeX styles lowercase titles unless the words that must keep their case
//! are wrapped in braces. A candidate acronym is a run of at least two
//! uppercase letters or digits, optionally followed by a plural `s`.
//!
//! Three substitutions run in sequence, each on the output of the previous
//! one: mid-text candidates (bounded on both sides by separators), then a
//! start-anchored pass, then an end-anchored pass. The boundary classes
//! exclude braces so a pass never matches inside a group a previous pass
//! already wrapped; a title that is a single acronym word is wrapped exactly
//! once, by the start-anchored pass.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static MID_ACRONYM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^A-Za-z0-9{}])([A-Z0-9][A-Z0-9]+s?)([^A-Za-z0-9{}])").unwrap()
});

static START_ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9][A-Z0-9]+s?)([^A-Za-z0-9{}]|$)").unwrap());

static END_ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^A-Za-z0-9{}])([A-Z0-9][A-Z0-9]+s?)$").unwrap());

/// Wrap the acronyms of `text` in braces. Empty input is no value.
pub fn protect(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let pass1 = MID_ACRONYM.replace_all(text, |caps: &Captures<'_>| {
        format!("{}{{{}}}{}", &caps[1], &caps[2], &caps[3])
    });
    let pass2 = START_ACRONYM.replace(&pass1, |caps: &Captures<'_>| {
        format!("{{{}}}{}", &caps[1], &caps[2])
    });
    let pass3 = END_ACRONYM.replace(&pass2, |caps: &Captures<'_>| {
        format!("{}{{{}}}", &caps[1], &caps[2])
    });
    Some(pass3.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_empty_is_absent() {
        assert_eq!(protect(""), None);
    }

    #[rstest]
    #[case("this is a title without acronym", "this is a title without acronym")]
    #[case("The ABC system", "The {ABC} system")]
    #[case("ABC system", "{ABC} system")]
    #[case("system ABC", "system {ABC}")]
    #[case("a 5G deployment", "a {5G} deployment")]
    #[case("using HMMs for tagging", "using {HMMs} for tagging")]
    #[case("Title Case Words Stay", "Title Case Words Stay")]
    fn test_protect(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(protect(input).as_deref(), Some(expected));
    }

    #[test]
    fn test_single_acronym_word_wrapped_once() {
        // Start-anchored pass wraps the bare word; the end-anchored pass
        // cannot match the brace-delimited token again.
        assert_eq!(protect("ABC").as_deref(), Some("{ABC}"));
    }

    #[test]
    fn test_start_and_end_acronyms() {
        assert_eq!(
            protect("ABC meets XYZ").as_deref(),
            Some("{ABC} meets {XYZ}")
        );
    }

    #[test]
    fn test_acronym_inside_punctuation() {
        assert_eq!(
            protect("the (ABC) approach").as_deref(),
            Some("the ({ABC}) approach")
        );
    }

    #[test]
    fn test_already_braced_is_untouched() {
        assert_eq!(
            protect("the {ABC} approach").as_deref(),
            Some("the {ABC} approach")
        );
    }

    #[test]
    fn test_uppercase_prefix_of_word_is_not_an_acronym() {
        assert_eq!(protect("ABCdef rest").as_deref(), Some("ABCdef rest"));
    }
}
