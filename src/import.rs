//! Import path: one BibTeX entry in, one typed [`Publication`] out.

use crate::classify::classify;
use crate::entry::{self, Entry, names};
use crate::error::{ImportError, ReferenceKind};
use crate::{
    ConferenceDirectory, Date, JournalDirectory, NameResolver, Publication, PublicationDetails,
    PublicationFamily, PublicationLanguage, ReportKind, ThesisKind, month, tex,
};

/// Fields whose values are identifiers or URLs, never TeX-escaped prose.
const TEX_EXEMPT_FIELDS: [&str; 8] = [
    names::CROSSREF,
    names::DOI,
    names::EPRINT,
    names::KEY,
    names::URL,
    names::HALID,
    names::DBLP,
    names::VIDEO,
];

/// Leading articles stripped from event names before directory lookup.
const EVENT_NAME_ARTICLES: [&str; 16] = [
    "the", "a", "an", "le", "la", "l'", "les", "un", "une", "der", "das", "die", "ein", "el",
    "las", "los",
];

/// Ordinal postfixes recognized after an event occurrence number.
const OCCURRENCE_POSTFIXES: [&str; 9] = [
    "st", "nd", "rd", "th", "\u{e8}re", "ere", "er", "\u{e8}me", "eme",
];

/// Turns BibTeX entries into typed publications. Venue resolution and
/// author-name parsing are delegated to the caller's collaborators.
pub struct Importer<'a> {
    journals: &'a dyn JournalDirectory,
    conferences: &'a dyn ConferenceDirectory,
    names: &'a dyn NameResolver,
}

impl<'a> Importer<'a> {
    pub fn new(
        journals: &'a dyn JournalDirectory,
        conferences: &'a dyn ConferenceDirectory,
        names: &'a dyn NameResolver,
    ) -> Self {
        Self {
            journals,
            conferences,
            names,
        }
    }

    /// Import a batch. One result per entry, in order; a bad entry never
    /// aborts the rest of the batch.
    pub fn import_all(&self, entries: &[Entry]) -> Vec<Result<Publication, ImportError>> {
        entries.iter().map(|entry| self.import_one(entry)).collect()
    }

    /// Import a single entry.
    pub fn import_one(&self, entry: &Entry) -> Result<Publication, ImportError> {
        let family = classify(&entry.entry_type)?;

        let title = self
            .plain(entry, names::TITLE)?
            .ok_or_else(|| ImportError::MissingField {
                key: entry.key.clone(),
                field: names::TITLE,
            })?;
        let year = parse_year(entry)?;
        let date = entry
            .get(names::MONTH)
            .and_then(month::decode)
            .map(|m| Date::first_of(year, m));
        let language = PublicationLanguage::from_field(entry.get(names::LANGUAGE));

        let details = self.family_details(entry, family)?;
        let authors = self.resolve_authors(entry)?;

        Ok(Publication {
            preferred_id: entry::clean_key(&entry.key),
            title,
            abstract_text: self.plain(entry, names::ABSTRACT)?,
            keywords: self.plain(entry, names::KEYWORDS)?,
            isbn: self.plain(entry, names::ISBN)?,
            issn: self.plain(entry, names::ISSN)?,
            doi: self.plain(entry, names::DOI)?,
            hal_id: self.plain(entry, names::HALID)?,
            extra_url: self.plain(entry, names::URL)?,
            video_url: self.plain(entry, names::VIDEO)?,
            dblp_url: self.plain(entry, names::DBLP)?,
            language,
            year,
            date,
            authors,
            details,
        })
    }

    fn family_details(
        &self,
        entry: &Entry,
        family: PublicationFamily,
    ) -> Result<PublicationDetails, ImportError> {
        match family {
            PublicationFamily::JournalPaper => {
                let journal = self.lookup_journal(entry)?;
                Ok(PublicationDetails::JournalPaper {
                    journal,
                    volume: self.plain(entry, names::VOLUME)?,
                    number: self.plain(entry, names::NUMBER)?,
                    pages: entry.pages(),
                    series: self.plain(entry, names::SERIES)?,
                })
            }
            PublicationFamily::ConferencePaper => {
                let raw_name =
                    self.plain(entry, names::BOOKTITLE)?
                        .ok_or_else(|| ImportError::MissingField {
                            key: entry.key.clone(),
                            field: names::BOOKTITLE,
                        })?;
                let (occurrence, event_name) = parse_event_name(&raw_name);
                let conference = self
                    .conferences
                    .find_by_name(&event_name)
                    .ok_or_else(|| ImportError::UnresolvedReference {
                        key: entry.key.clone(),
                        kind: ReferenceKind::Conference,
                        name: event_name,
                    })?;
                Ok(PublicationDetails::ConferencePaper {
                    conference,
                    occurrence,
                    volume: self.plain(entry, names::VOLUME)?,
                    number: self.plain(entry, names::NUMBER)?,
                    pages: entry.pages(),
                    editors: self.plain(entry, names::EDITOR)?,
                    series: self.plain(entry, names::SERIES)?,
                    organization: self.plain(entry, names::ORGANIZATION)?,
                    address: self.plain(entry, names::ADDRESS)?,
                })
            }
            PublicationFamily::Book => Ok(PublicationDetails::Book {
                edition: self.plain(entry, names::EDITION)?,
                series: self.plain(entry, names::SERIES)?,
                volume: self.plain(entry, names::VOLUME)?,
                number: self.plain(entry, names::NUMBER)?,
                pages: entry.pages(),
                editors: self.plain(entry, names::EDITOR)?,
                publisher: self.plain(entry, names::PUBLISHER)?,
                address: self.plain(entry, names::ADDRESS)?,
            }),
            PublicationFamily::BookChapter => {
                let book_title = self
                    .plain(entry, names::BOOKTITLE)?
                    .ok_or_else(|| ImportError::MissingField {
                        key: entry.key.clone(),
                        field: names::BOOKTITLE,
                    })?;
                Ok(PublicationDetails::BookChapter {
                    book_title,
                    chapter_number: self.plain(entry, names::CHAPTER)?,
                    edition: self.plain(entry, names::EDITION)?,
                    series: self.plain(entry, names::SERIES)?,
                    volume: self.plain(entry, names::VOLUME)?,
                    number: self.plain(entry, names::NUMBER)?,
                    pages: entry.pages(),
                    editors: self.plain(entry, names::EDITOR)?,
                    publisher: self.plain(entry, names::PUBLISHER)?,
                    address: self.plain(entry, names::ADDRESS)?,
                })
            }
            PublicationFamily::PhdThesis | PublicationFamily::MasterThesis => {
                let institution = self
                    .plain_any(entry, &[names::SCHOOL, names::INSTITUTION])?
                    .ok_or_else(|| ImportError::MissingField {
                        key: entry.key.clone(),
                        field: names::SCHOOL,
                    })?;
                let kind = if family == PublicationFamily::PhdThesis {
                    ThesisKind::Phd
                } else {
                    ThesisKind::Master
                };
                Ok(PublicationDetails::Thesis {
                    kind,
                    institution,
                    address: self.plain(entry, names::ADDRESS)?,
                })
            }
            PublicationFamily::TechnicalReport => {
                let institution = self
                    .plain_any(entry, &[names::INSTITUTION, names::ORGANIZATION])?
                    .ok_or_else(|| ImportError::MissingField {
                        key: entry.key.clone(),
                        field: names::INSTITUTION,
                    })?;
                Ok(PublicationDetails::Report {
                    kind: ReportKind::Technical,
                    number: self.plain_any(entry, &[names::NUMBER, names::EDITION])?,
                    note_kind: self.plain(entry, names::TYPE)?,
                    institution,
                    address: self.plain(entry, names::ADDRESS)?,
                })
            }
            PublicationFamily::TutorialDocumentation => {
                let institution = self
                    .plain_any(entry, &[names::ORGANIZATION, names::PUBLISHER])?
                    .ok_or_else(|| ImportError::MissingField {
                        key: entry.key.clone(),
                        field: names::ORGANIZATION,
                    })?;
                Ok(PublicationDetails::Report {
                    kind: ReportKind::Tutorial,
                    number: self.plain_any(entry, &[names::NUMBER, names::EDITION])?,
                    note_kind: self.plain(entry, names::TYPE)?,
                    institution,
                    address: self.plain(entry, names::ADDRESS)?,
                })
            }
            PublicationFamily::Other => Ok(PublicationDetails::Misc {
                how_published: self.plain(entry, names::HOWPUBLISHED)?.unwrap_or_default(),
                kind: self.plain(entry, names::TYPE)?,
                number: self.plain(entry, names::NUMBER)?,
                organization: self.plain(entry, names::ORGANIZATION)?,
                publisher: self.plain(entry, names::PUBLISHER)?,
                address: self.plain(entry, names::ADDRESS)?,
            }),
            // Export-only families: classify never yields them, so an entry
            // cannot reach these arms through the public path.
            PublicationFamily::JournalEdition
            | PublicationFamily::Keynote
            | PublicationFamily::Patent => Err(ImportError::UnsupportedEntryType {
                entry_type: entry.entry_type.clone(),
            }),
        }
    }

    fn lookup_journal(&self, entry: &Entry) -> Result<crate::JournalRef, ImportError> {
        let name = self
            .plain_any(entry, &[names::JOURNAL, names::BOOKTITLE])?
            .ok_or_else(|| ImportError::MissingField {
                key: entry.key.clone(),
                field: names::JOURNAL,
            })?;
        self.journals
            .find_by_name(&name)
            .ok_or_else(|| ImportError::UnresolvedReference {
                key: entry.key.clone(),
                kind: ReferenceKind::Journal,
                name,
            })
    }

    fn resolve_authors(&self, entry: &Entry) -> Result<Vec<crate::Person>, ImportError> {
        let raw = entry
            .get_any(&[names::AUTHOR, names::EDITOR])
            .unwrap_or_default();
        let plain = tex::to_plain_text(raw).map_err(|source| ImportError::Tex {
            key: entry.key.clone(),
            source,
        })?;
        let persons = self.names.resolve_persons(&plain);
        if persons.is_empty() {
            return Err(ImportError::NoAuthors {
                key: entry.key.clone(),
            });
        }
        Ok(persons)
    }

    /// First non-empty value among the candidates, as plain text.
    fn plain_any(
        &self,
        entry: &Entry,
        candidates: &[&str],
    ) -> Result<Option<String>, ImportError> {
        for name in candidates {
            if let Some(value) = self.plain(entry, name)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Read a field as plain text, resolving TeX macros except for
    /// identifier fields that are never escaped.
    fn plain(&self, entry: &Entry, name: &str) -> Result<Option<String>, ImportError> {
        match entry.get(name) {
            None => Ok(None),
            Some(raw) if TEX_EXEMPT_FIELDS.contains(&name) => Ok(Some(raw.to_string())),
            Some(raw) => tex::to_plain_text(raw)
                .map(Some)
                .map_err(|source| ImportError::Tex {
                    key: entry.key.clone(),
                    source,
                }),
        }
    }
}

fn parse_year(entry: &Entry) -> Result<i32, ImportError> {
    let raw = entry.get(names::YEAR).ok_or_else(|| ImportError::MissingYear {
        key: entry.key.clone(),
    })?;
    match raw.parse::<i32>() {
        Ok(year) if year > 0 => Ok(year),
        _ => Err(ImportError::InvalidYear {
            key: entry.key.clone(),
            value: raw.to_string(),
        }),
    }
}

/// Split an event title like `"the 14th International Conference on X"` into
/// the occurrence number (0 when absent) and the bare event name used for
/// directory lookup.
fn parse_event_name(raw: &str) -> (u32, String) {
    let stripped = strip_leading_article(raw.trim());
    let mut words = stripped.splitn(2, char::is_whitespace);
    let first = words.next().unwrap_or_default();
    if let (Some(rest), Some(occurrence)) = (words.next(), parse_occurrence(first)) {
        return (occurrence, strip_leading_article(rest.trim()).to_string());
    }
    (0, stripped.to_string())
}

fn strip_leading_article(text: &str) -> &str {
    let lower = text.to_ascii_lowercase();
    for article in EVENT_NAME_ARTICLES {
        // "l'" glues onto the next word; the others are whole words.
        if article.ends_with('\'') {
            if lower.starts_with(article) {
                return &text[article.len()..];
            }
        } else if let Some(rest) = lower.strip_prefix(article) {
            if rest.starts_with(char::is_whitespace) {
                return text[article.len()..].trim_start();
            }
        }
    }
    text
}

fn parse_occurrence(word: &str) -> Option<u32> {
    let digits = OCCURRENCE_POSTFIXES
        .iter()
        .find_map(|postfix| word.strip_suffix(postfix))
        .unwrap_or(word);
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConferenceRef, CoreRanking, JournalRef, Person, Quartile};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct FakeRegistry;

    impl JournalDirectory for FakeRegistry {
        fn find_by_name(&self, name: &str) -> Option<JournalRef> {
            (name == "Journal of Examples").then(|| JournalRef {
                name: name.to_string(),
                publisher: Some("Example Press".to_string()),
                scimago: Some(Quartile::Q2),
                ..JournalRef::default()
            })
        }
    }

    impl ConferenceDirectory for FakeRegistry {
        fn find_by_name(&self, name: &str) -> Option<ConferenceRef> {
            (name == "International Conference on Examples").then(|| ConferenceRef {
                name: name.to_string(),
                core: Some(CoreRanking::B),
                ..ConferenceRef::default()
            })
        }
    }

    impl NameResolver for FakeRegistry {
        fn resolve_persons(&self, names: &str) -> Vec<Person> {
            names
                .split(" and ")
                .filter_map(Person::from_comma_format)
                .collect()
        }
    }

    fn importer() -> Importer<'static> {
        static REGISTRY: FakeRegistry = FakeRegistry;
        Importer::new(&REGISTRY, &REGISTRY, &REGISTRY)
    }

    fn article() -> Entry {
        let mut entry = Entry::new("article", "smith:2022");
        entry.push_raw("title", "Pr{\\'{e}}diction of Everything");
        entry.push_raw("author", "Smith, John and Dupont, Marie");
        entry.push_raw("journal", "Journal of Examples");
        entry.push_raw("year", "2022");
        entry.push_raw("month", "03");
        entry.push_raw("pages", "10--20");
        entry.push_raw("volume", "3");
        entry.push_raw("language", "FRENCH");
        entry
    }

    #[test]
    fn test_import_journal_paper() {
        let publication = importer().import_one(&article()).unwrap();
        assert_eq!(publication.preferred_id, "smith_2022");
        assert_eq!(publication.title, "Pr\u{e9}diction of Everything");
        assert_eq!(publication.year, 2022);
        assert_eq!(publication.date, Some(Date::first_of(2022, 3)));
        assert_eq!(publication.language, PublicationLanguage::French);
        assert_eq!(
            publication.authors,
            vec![Person::new("John", "Smith"), Person::new("Marie", "Dupont")]
        );
        match publication.details {
            PublicationDetails::JournalPaper {
                journal,
                volume,
                pages,
                ..
            } => {
                assert_eq!(journal.name, "Journal of Examples");
                assert_eq!(journal.scimago, Some(Quartile::Q2));
                assert_eq!(volume.as_deref(), Some("3"));
                assert_eq!(pages.as_deref(), Some("10-20"));
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn test_import_conference_paper_parses_event_name() {
        let mut entry = Entry::new("inproceedings", "doe2021");
        entry.push_raw("title", "A Paper");
        entry.push_raw("author", "Doe, Jane");
        entry.push_raw("booktitle", "the 14th International Conference on Examples");
        entry.push_raw("year", "2021");
        let publication = importer().import_one(&entry).unwrap();
        match publication.details {
            PublicationDetails::ConferencePaper {
                conference,
                occurrence,
                ..
            } => {
                assert_eq!(conference.name, "International Conference on Examples");
                assert_eq!(conference.core, Some(CoreRanking::B));
                assert_eq!(occurrence, 14);
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn test_missing_year_carries_key() {
        let mut entry = Entry::new("techreport", "rep-1");
        entry.push_raw("title", "A Report");
        entry.push_raw("author", "Doe, Jane");
        entry.push_raw("institution", "UTBM");
        let error = importer().import_one(&entry).unwrap_err();
        assert!(matches!(error, ImportError::MissingYear { key } if key == "rep-1"));
    }

    #[rstest]
    #[case("MMXXII")]
    #[case("0")]
    #[case("-5")]
    fn test_invalid_year(#[case] year: &str) {
        let mut entry = article();
        entry.set_bare("year", year);
        let error = importer().import_one(&entry).unwrap_err();
        assert!(matches!(error, ImportError::InvalidYear { .. }));
    }

    #[test]
    fn test_no_authors_when_author_and_editor_empty() {
        let mut entry = article();
        entry.push_raw("author", "");
        entry.push_raw("editor", "");
        let error = importer().import_one(&entry).unwrap_err();
        assert!(matches!(error, ImportError::NoAuthors { key } if key == "smith:2022"));
    }

    #[test]
    fn test_editor_fallback_for_authors() {
        let mut entry = article();
        entry.push_raw("author", "");
        entry.push_raw("editor", "Editor, Eve");
        let publication = importer().import_one(&entry).unwrap();
        assert_eq!(publication.authors, vec![Person::new("Eve", "Editor")]);
    }

    #[test]
    fn test_unresolved_journal() {
        let mut entry = article();
        entry.push_raw("journal", "Unknown Gazette");
        let error = importer().import_one(&entry).unwrap_err();
        match error {
            ImportError::UnresolvedReference { key, kind, name } => {
                assert_eq!(key, "smith:2022");
                assert_eq!(kind, ReferenceKind::Journal);
                assert_eq!(name, "Unknown Gazette");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_report_number_falls_back_to_edition() {
        let mut entry = Entry::new("techreport", "rep-2");
        entry.push_raw("title", "A Report");
        entry.push_raw("author", "Doe, Jane");
        entry.push_raw("institution", "UTBM");
        entry.push_raw("year", "2020");
        entry.push_raw("edition", "RR-42");
        let publication = importer().import_one(&entry).unwrap();
        match publication.details {
            PublicationDetails::Report { kind, number, .. } => {
                assert_eq!(kind, ReportKind::Technical);
                assert_eq!(number.as_deref(), Some("RR-42"));
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn test_tutorial_organization_falls_back_to_publisher() {
        let mut entry = Entry::new("manual", "man-1");
        entry.push_raw("title", "A Manual");
        entry.push_raw("author", "Doe, Jane");
        entry.push_raw("publisher", "Example Press");
        entry.push_raw("year", "2019");
        let publication = importer().import_one(&entry).unwrap();
        match publication.details {
            PublicationDetails::Report {
                kind, institution, ..
            } => {
                assert_eq!(kind, ReportKind::Tutorial);
                assert_eq!(institution, "Example Press");
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_month_keeps_year_only() {
        let mut entry = article();
        entry.push_raw("month", "Springtime");
        let publication = importer().import_one(&entry).unwrap();
        assert_eq!(publication.year, 2022);
        assert_eq!(publication.date, None);
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let mut bad = article();
        bad.push_raw("journal", "Unknown Gazette");
        let results = importer().import_all(&[bad, article()]);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }

    #[rstest]
    #[case("the 14th International Conference on Examples", 14, "International Conference on Examples")]
    #[case("3rd Workshop on Things", 3, "Workshop on Things")]
    #[case("1\u{e8}re Conf\u{e9}rence Nationale", 1, "Conf\u{e9}rence Nationale")]
    #[case("Symposium on Examples", 0, "Symposium on Examples")]
    #[case("l'Atelier des Exemples", 0, "Atelier des Exemples")]
    fn test_parse_event_name(
        #[case] raw: &str,
        #[case] occurrence: u32,
        #[case] name: &str,
    ) {
        assert_eq!(parse_event_name(raw), (occurrence, name.to_string()));
    }
}
