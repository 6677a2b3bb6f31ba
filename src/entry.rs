//! BibTeX wire form: entries, field values, and the aggregate database.
//!
//! An [`Entry`] is the flat textual record handed over by (or to) an external
//! BibTeX-syntax parser/formatter: an entry-type tag, a citation key, and a
//! field-name → value mapping. Field access applies the empty-to-absent
//! normalization invariant at every boundary: absent fields, empty strings,
//! whitespace-only strings, and values made only of decorative characters
//! (`***`, `---`, ...) are all "no value".

use compact_str::CompactString;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches values that carry no information, only filler characters.
static EMPTY_FIELD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*+_:;,.=\-\\]+$").unwrap());

/// Matches the characters that are not allowed in a citation key.
static KEY_CLEAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]+").unwrap());

static DASH_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Well-known BibTeX field names, including the extension fields of the
/// publication registry (`halid`, `dblp`, ...) and the synthetic fields only
/// ever written on export (`_publication_type`, ...).
pub mod names {
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const EDITOR: &str = "editor";
    pub const YEAR: &str = "year";
    pub const MONTH: &str = "month";
    pub const JOURNAL: &str = "journal";
    pub const BOOKTITLE: &str = "booktitle";
    pub const VOLUME: &str = "volume";
    pub const NUMBER: &str = "number";
    pub const PAGES: &str = "pages";
    pub const SERIES: &str = "series";
    pub const EDITION: &str = "edition";
    pub const CHAPTER: &str = "chapter";
    pub const PUBLISHER: &str = "publisher";
    pub const ADDRESS: &str = "address";
    pub const SCHOOL: &str = "school";
    pub const INSTITUTION: &str = "institution";
    pub const ORGANIZATION: &str = "organization";
    pub const TYPE: &str = "type";
    pub const NOTE: &str = "note";
    pub const HOWPUBLISHED: &str = "howpublished";
    pub const DOI: &str = "doi";
    pub const ISBN: &str = "isbn";
    pub const ISSN: &str = "issn";
    pub const URL: &str = "url";
    pub const ABSTRACT: &str = "abstract";
    pub const KEYWORDS: &str = "keywords";
    pub const HALID: &str = "halid";
    pub const DBLP: &str = "dblp";
    pub const VIDEO: &str = "video";
    pub const LANGUAGE: &str = "language";
    pub const CROSSREF: &str = "crossref";
    pub const EPRINT: &str = "eprint";
    pub const KEY: &str = "key";

    pub const INTERNAL_DB_ID: &str = "_internal_db_id";
    pub const PUBLICATION_TYPE: &str = "_publication_type";
    pub const PUBLICATION_TYPE_NAME: &str = "_publication_type_name";
    pub const PUBLICATION_CATEGORY: &str = "_publication_category";
    pub const PUBLICATION_CATEGORY_NAME: &str = "_publication_category_name";
    pub const SCIMAGO_QINDEX: &str = "_scimago_qindex";
    pub const WOS_QINDEX: &str = "_wos_qindex";
    pub const IMPACT_FACTOR: &str = "_impact_factor";
    pub const CORE_RANKING: &str = "_core_ranking";
}

/// How a field value is rendered in BibTeX source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueStyle {
    /// `field = {value}` — ordinary text.
    Braced,
    /// `field = value` — bare digit strings and month macros.
    Bare,
}

/// A single field value with its rendering style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub text: String,
    pub style: ValueStyle,
}

/// A single BibTeX entry: type tag, citation key, and fields.
///
/// Fields keep their insertion order (the order matters for rendering) but
/// behave like a map: setting a name that is already present overwrites the
/// existing value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub entry_type: String,
    pub key: String,
    fields: Vec<(CompactString, Value)>,
}

impl Entry {
    /// Create an empty entry with the given type tag and key.
    pub fn new(entry_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            key: key.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field from raw parser output, keeping whatever text is present.
    /// Normalization happens on read, so a raw entry round-trips losslessly.
    pub fn push_raw(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.insert(name.as_ref(), value.into(), ValueStyle::Braced);
    }

    /// Get a field value, normalized: `None` for absent, empty,
    /// whitespace-only, or decorative-only values; trimmed otherwise.
    pub fn get(&self, name: &str) -> Option<&str> {
        let (_, value) = self
            .fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))?;
        normalize(&value.text)
    }

    /// First non-empty value among the candidate field names.
    pub fn get_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.get(name))
    }

    /// The `pages` field with runs of `-` collapsed to a single `-`
    /// (people write the `--` LaTeX range operator in their sources).
    pub fn pages(&self) -> Option<String> {
        self.get(names::PAGES)
            .map(|p| DASH_RUN_REGEX.replace_all(p, "-").into_owned())
    }

    /// Set a braced text field. Empty or decorative values are not written:
    /// an empty field never appears on the wire.
    pub fn set(&mut self, name: &str, value: impl AsRef<str>) {
        if let Some(v) = normalize(value.as_ref()) {
            let v = v.to_string();
            self.insert(name, v, ValueStyle::Braced);
        }
    }

    /// Set a braced text field from an optional value.
    pub fn set_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.set(name, v);
        }
    }

    /// Set a bare (unbraced) field, used for digit strings and month macros.
    pub fn set_bare(&mut self, name: &str, value: impl AsRef<str>) {
        if let Some(v) = normalize(value.as_ref()) {
            let v = v.to_string();
            self.insert(name, v, ValueStyle::Bare);
        }
    }

    /// Set the `pages` field, expanding `-` to the `--` range operator.
    pub fn set_pages(&mut self, value: Option<&str>) {
        if let Some(v) = value.and_then(normalize) {
            let v = DASH_RUN_REGEX.replace_all(v, "--").into_owned();
            self.insert(names::PAGES, v, ValueStyle::Braced);
        }
    }

    /// Iterate over the fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    fn insert(&mut self, name: &str, text: String, style: ValueStyle) {
        let value = Value { text, style };
        match self
            .fields
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((CompactString::from(name), value)),
        }
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "@{}{{{},", self.entry_type, self.key)?;
        for (name, value) in &self.fields {
            match value.style {
                ValueStyle::Braced => writeln!(f, "\t{} = {{{}}},", name, value.text)?,
                ValueStyle::Bare => writeln!(f, "\t{} = {},", name, value.text)?,
            }
        }
        write!(f, "}}")
    }
}

/// An ordered collection of entries, rendered as one BibTeX source text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub entries: Vec<Entry>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Normalize a raw field value: trimmed text, or `None` when the value
/// carries no information.
pub(crate) fn normalize(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || EMPTY_FIELD_REGEX.is_match(trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

/// Clean a citation key so it is a stable identifier: any run of characters
/// outside `[a-zA-Z0-9_-]` becomes a single `_`.
pub(crate) fn clean_key(key: &str) -> String {
    KEY_CLEAN_REGEX.replace_all(key, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn entry_with(fields: &[(&str, &str)]) -> Entry {
        let mut entry = Entry::new("article", "key1");
        for (name, value) in fields {
            entry.push_raw(*name, *value);
        }
        entry
    }

    #[rstest]
    #[case("A Title", Some("A Title"))]
    #[case("  padded  ", Some("padded"))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("***", None)]
    #[case("-----", None)]
    #[case(".,;:", None)]
    #[case("a-b", Some("a-b"))]
    fn test_get_normalization(#[case] raw: &str, #[case] expected: Option<&str>) {
        let entry = entry_with(&[("title", raw)]);
        assert_eq!(entry.get("title"), expected);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let entry = entry_with(&[("Title", "T")]);
        assert_eq!(entry.get("title"), Some("T"));
    }

    #[test]
    fn test_get_any_first_non_empty() {
        let entry = entry_with(&[("number", ""), ("edition", "B")]);
        assert_eq!(entry.get_any(&["number", "edition"]), Some("B"));
    }

    #[test]
    fn test_get_any_all_empty() {
        let entry = entry_with(&[("number", ""), ("edition", "")]);
        assert_eq!(entry.get_any(&["number", "edition"]), None);
    }

    #[test]
    fn test_set_skips_empty_values() {
        let mut entry = Entry::new("article", "k");
        entry.set("note", "");
        entry.set("note", "  ");
        assert_eq!(entry.fields().count(), 0);
    }

    #[test]
    fn test_set_overwrites_existing_field_in_place() {
        let mut entry = Entry::new("article", "k");
        entry.set("isbn", "111");
        entry.set("volume", "3");
        entry.set("isbn", "222");
        let fields: Vec<_> = entry.fields().map(|(n, v)| (n, v.text.as_str())).collect();
        assert_eq!(fields, vec![("isbn", "222"), ("volume", "3")]);
    }

    #[test]
    fn test_pages_collapses_dashes_on_read() {
        let entry = entry_with(&[("pages", "10--20")]);
        assert_eq!(entry.pages(), Some("10-20".to_string()));
    }

    #[test]
    fn test_set_pages_expands_dashes() {
        let mut entry = Entry::new("article", "k");
        entry.set_pages(Some("10-20"));
        assert_eq!(entry.get("pages"), Some("10--20"));
    }

    #[test]
    fn test_clean_key() {
        assert_eq!(clean_key("smith:2022/a"), "smith_2022_a");
        assert_eq!(clean_key("ok_key-1"), "ok_key-1");
    }

    #[test]
    fn test_display_braced_and_bare() {
        let mut entry = Entry::new("article", "smith2022");
        entry.set("title", "A Title");
        entry.set_bare("year", "2022");
        let text = entry.to_string();
        assert_eq!(
            text,
            "@article{smith2022,\n\ttitle = {A Title},\n\tyear = 2022,\n}"
        );
    }

    #[test]
    fn test_database_display_orders_entries() {
        let mut db = Database::new();
        db.push(Entry::new("article", "a"));
        db.push(Entry::new("book", "b"));
        let text = db.to_string();
        let first = text.find("@article{a").unwrap();
        let second = text.find("@book{b").unwrap();
        assert!(first < second);
    }
}
