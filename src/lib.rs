//! Bidirectional codec between flat BibTeX entries and a typed academic
//! publication model.
//!
//! `bibrecord` sits between an external BibTeX-syntax parser/formatter and a
//! publication registry. It does not read or write BibTeX source text beyond
//! rendering; its job is the hard middle:
//!
//! - classify an untyped entry into the right publication family using a
//!   fixed decision table,
//! - extract heterogeneous field sets per family with fallback rules,
//! - interpret the year + loosely-formatted month date encoding,
//! - invert the mapping on export, including localized generated prose
//!   summarizing venue rankings,
//! - protect acronyms in exported titles,
//! - bridge TeX-escaped text to plain Unicode and back.
//!
//! # Basic usage
//!
//! ```rust
//! use bibrecord::{Entry, Importer, JournalDirectory, ConferenceDirectory,
//!                 NameResolver, JournalRef, ConferenceRef, Person};
//!
//! struct Registry;
//!
//! impl JournalDirectory for Registry {
//!     fn find_by_name(&self, name: &str) -> Option<JournalRef> {
//!         (name == "Journal of Examples").then(|| JournalRef {
//!             name: name.to_string(),
//!             ..JournalRef::default()
//!         })
//!     }
//! }
//! impl ConferenceDirectory for Registry {
//!     fn find_by_name(&self, _name: &str) -> Option<ConferenceRef> { None }
//! }
//! impl NameResolver for Registry {
//!     fn resolve_persons(&self, names: &str) -> Vec<Person> {
//!         names.split(" and ").filter_map(Person::from_comma_format).collect()
//!     }
//! }
//!
//! let mut entry = Entry::new("article", "smith2022");
//! entry.push_raw("title", "An Example");
//! entry.push_raw("author", "Smith, John");
//! entry.push_raw("journal", "Journal of Examples");
//! entry.push_raw("year", "2022");
//!
//! let registry = Registry;
//! let importer = Importer::new(&registry, &registry, &registry);
//! let publication = importer.import_one(&entry).unwrap();
//! assert_eq!(publication.title, "An Example");
//! assert_eq!(publication.year, 2022);
//! ```
//!
//! # Error handling
//!
//! Import failures are typed per entry ([`ImportError`]); a batch import
//! returns one result per entry and never aborts on a single bad record.
//! Export of a well-formed [`Publication`] cannot fail: the family set is a
//! closed enum and both directions match it exhaustively.
//!
//! # Thread safety
//!
//! The codec holds no state across calls and never touches process-wide
//! locale state: all localized text generation takes the target language as
//! an explicit parameter, so concurrent exports of publications in different
//! languages are safe.

use serde::{Deserialize, Serialize};

pub mod acronym;
mod classify;
mod entry;
pub mod error;
mod export;
mod import;
mod messages;
pub mod month;
pub mod tex;

pub use classify::classify;
pub use entry::{Database, Entry, Value, ValueStyle, names};
pub use error::{ImportError, ReferenceKind, TexError};
pub use export::Exporter;
pub use import::Importer;
pub use messages::{conference_note, journal_note};

/// A publication date: the year is always known, the month only when the
/// BibTeX month field was recognized; the day is then pinned to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// First day of the given month.
    pub fn first_of(year: i32, month: u8) -> Self {
        Self {
            year,
            month,
            day: 1,
        }
    }
}

/// A resolved person from the author or editor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Parse a `"Last, First"` string; `None` when either part is missing.
    pub fn from_comma_format(name: &str) -> Option<Self> {
        let (last, first) = name.split_once(',')?;
        let (last, first) = (last.trim(), first.trim());
        if last.is_empty() || first.is_empty() {
            return None;
        }
        Some(Self::new(first, last))
    }
}

/// Major language of a publication. Drives the language of all generated
/// prose (type labels, ranking notes, patent sentences) for that
/// publication, independently of any ambient locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationLanguage {
    #[default]
    English,
    French,
    German,
    Italian,
    Other,
}

impl PublicationLanguage {
    /// Case-insensitive lookup from a BibTeX language field; absent or
    /// unknown values fall back to the default language.
    pub fn from_field(field: Option<&str>) -> Self {
        match field {
            Some(label) => match label.trim().to_ascii_lowercase().as_str() {
                "english" => Self::English,
                "french" => Self::French,
                "german" => Self::German,
                "italian" => Self::Italian,
                "other" => Self::Other,
                _ => Self::default(),
            },
            None => Self::default(),
        }
    }

    /// The uppercase tag written to the BibTeX language field.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::English => "ENGLISH",
            Self::French => "FRENCH",
            Self::German => "GERMAN",
            Self::Italian => "ITALIAN",
            Self::Other => "OTHER",
        }
    }
}

/// A quartile rank from Scimago or Web of Science. "Not ranked" is the
/// absence of a value, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl std::fmt::Display for Quartile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Quartile::Q1 => "Q1",
            Quartile::Q2 => "Q2",
            Quartile::Q3 => "Q3",
            Quartile::Q4 => "Q4",
        })
    }
}

/// A CORE conference rank. "Not ranked" is the absence of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreRanking {
    AStarStar,
    AStar,
    A,
    B,
    C,
    D,
}

impl std::fmt::Display for CoreRanking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CoreRanking::AStarStar => "A**",
            CoreRanking::AStar => "A*",
            CoreRanking::A => "A",
            CoreRanking::B => "B",
            CoreRanking::C => "C",
            CoreRanking::D => "D",
        })
    }
}

/// A journal known to the registry, with its ranking annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalRef {
    pub name: String,
    pub publisher: Option<String>,
    pub issn: Option<String>,
    pub address: Option<String>,
    pub scimago: Option<Quartile>,
    pub wos: Option<Quartile>,
    /// Values ≤ 0 mean "no impact factor".
    pub impact_factor: f32,
}

/// A conference known to the registry, with its CORE ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConferenceRef {
    pub name: String,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub issn: Option<String>,
    pub core: Option<CoreRanking>,
}

/// The closed set of publication families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationFamily {
    JournalPaper,
    ConferencePaper,
    Book,
    BookChapter,
    PhdThesis,
    MasterThesis,
    JournalEdition,
    Keynote,
    TechnicalReport,
    TutorialDocumentation,
    Patent,
    Other,
}

impl PublicationFamily {
    /// The stable uppercase name written to the synthetic type field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JournalPaper => "INTERNATIONAL_JOURNAL_PAPER",
            Self::ConferencePaper => "INTERNATIONAL_CONFERENCE_PAPER",
            Self::Book => "INTERNATIONAL_BOOK",
            Self::BookChapter => "INTERNATIONAL_BOOK_CHAPTER",
            Self::PhdThesis => "PHD_THESIS",
            Self::MasterThesis => "MASTER_THESIS",
            Self::JournalEdition => "INTERNATIONAL_JOURNAL_EDITION",
            Self::Keynote => "INTERNATIONAL_KEYNOTE",
            Self::TechnicalReport => "TECHNICAL_REPORT",
            Self::TutorialDocumentation => "TUTORIAL_DOCUMENTATION",
            Self::Patent => "INTERNATIONAL_PATENT",
            Self::Other => "OTHER",
        }
    }
}

/// The ranking category a publication counts towards in activity reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationCategory {
    /// Ranked journal articles.
    Acl,
    /// Journal articles in unranked venues.
    Acln,
    /// Papers in international conference proceedings.
    CActi,
    /// Invited conference talks.
    CInv,
    /// Journal or book editions.
    Do,
    /// Scientific books.
    Os,
    /// Chapters in scientific books.
    Cos,
    /// Theses.
    Th,
    /// Patents.
    Bre,
    /// Other scientific productions.
    Ap,
}

impl PublicationCategory {
    /// The stable acronym written to the synthetic category field.
    pub fn acronym(&self) -> &'static str {
        match self {
            Self::Acl => "ACL",
            Self::Acln => "ACLN",
            Self::CActi => "C_ACTI",
            Self::CInv => "C_INV",
            Self::Do => "DO",
            Self::Os => "OS",
            Self::Cos => "COS",
            Self::Th => "TH",
            Self::Bre => "BRE",
            Self::Ap => "AP",
        }
    }
}

/// Which kind of thesis a [`PublicationDetails::Thesis`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThesisKind {
    Phd,
    Master,
}

/// Which kind of report a [`PublicationDetails::Report`] is. Tutorials and
/// teaching documents export as `@manual`, everything else as `@techreport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Technical,
    Tutorial,
}

/// Family-specific fields, exactly one variant per publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PublicationDetails {
    JournalPaper {
        journal: JournalRef,
        volume: Option<String>,
        number: Option<String>,
        pages: Option<String>,
        series: Option<String>,
    },
    ConferencePaper {
        conference: ConferenceRef,
        /// Occurrence number parsed from names like "14th …"; 0 when absent.
        occurrence: u32,
        volume: Option<String>,
        number: Option<String>,
        pages: Option<String>,
        editors: Option<String>,
        series: Option<String>,
        organization: Option<String>,
        address: Option<String>,
    },
    Book {
        edition: Option<String>,
        series: Option<String>,
        volume: Option<String>,
        number: Option<String>,
        pages: Option<String>,
        editors: Option<String>,
        publisher: Option<String>,
        address: Option<String>,
    },
    BookChapter {
        book_title: String,
        chapter_number: Option<String>,
        edition: Option<String>,
        series: Option<String>,
        volume: Option<String>,
        number: Option<String>,
        pages: Option<String>,
        editors: Option<String>,
        publisher: Option<String>,
        address: Option<String>,
    },
    Thesis {
        kind: ThesisKind,
        institution: String,
        address: Option<String>,
    },
    JournalEdition {
        journal: JournalRef,
        volume: Option<String>,
        number: Option<String>,
        pages: Option<String>,
    },
    Keynote {
        conference: ConferenceRef,
        editors: Option<String>,
        organization: Option<String>,
        address: Option<String>,
    },
    Report {
        kind: ReportKind,
        number: Option<String>,
        /// Free-text report kind written to the note field.
        note_kind: Option<String>,
        institution: String,
        address: Option<String>,
    },
    Patent {
        number: Option<String>,
        institution: Option<String>,
        kind: Option<String>,
        address: Option<String>,
    },
    Misc {
        how_published: String,
        kind: Option<String>,
        number: Option<String>,
        organization: Option<String>,
        publisher: Option<String>,
        address: Option<String>,
    },
}

/// A typed publication record: the common fields plus exactly one family's
/// field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Caller-supplied stable identifier, also the citation key on export.
    pub preferred_id: String,
    pub title: String,
    pub abstract_text: Option<String>,
    /// Keyword list as a single delimited string.
    pub keywords: Option<String>,
    pub isbn: Option<String>,
    pub issn: Option<String>,
    pub doi: Option<String>,
    pub hal_id: Option<String>,
    pub extra_url: Option<String>,
    pub video_url: Option<String>,
    pub dblp_url: Option<String>,
    pub language: PublicationLanguage,
    /// Always present and > 0.
    pub year: i32,
    /// Only present when the month field was recognized on import.
    pub date: Option<Date>,
    /// Ordered, non-empty once fully constructed.
    pub authors: Vec<Person>,
    pub details: PublicationDetails,
}

impl Publication {
    /// The family tag of this publication.
    pub fn family(&self) -> PublicationFamily {
        match &self.details {
            PublicationDetails::JournalPaper { .. } => PublicationFamily::JournalPaper,
            PublicationDetails::ConferencePaper { .. } => PublicationFamily::ConferencePaper,
            PublicationDetails::Book { .. } => PublicationFamily::Book,
            PublicationDetails::BookChapter { .. } => PublicationFamily::BookChapter,
            PublicationDetails::Thesis {
                kind: ThesisKind::Phd,
                ..
            } => PublicationFamily::PhdThesis,
            PublicationDetails::Thesis {
                kind: ThesisKind::Master,
                ..
            } => PublicationFamily::MasterThesis,
            PublicationDetails::JournalEdition { .. } => PublicationFamily::JournalEdition,
            PublicationDetails::Keynote { .. } => PublicationFamily::Keynote,
            PublicationDetails::Report {
                kind: ReportKind::Technical,
                ..
            } => PublicationFamily::TechnicalReport,
            PublicationDetails::Report {
                kind: ReportKind::Tutorial,
                ..
            } => PublicationFamily::TutorialDocumentation,
            PublicationDetails::Patent { .. } => PublicationFamily::Patent,
            PublicationDetails::Misc { .. } => PublicationFamily::Other,
        }
    }

    /// The ranking category of this publication. Journal papers split on
    /// whether their venue carries any ranking signal.
    pub fn category(&self) -> PublicationCategory {
        match &self.details {
            PublicationDetails::JournalPaper { journal, .. } => {
                if journal.scimago.is_some()
                    || journal.wos.is_some()
                    || journal.impact_factor > 0.0
                {
                    PublicationCategory::Acl
                } else {
                    PublicationCategory::Acln
                }
            }
            PublicationDetails::ConferencePaper { .. } => PublicationCategory::CActi,
            PublicationDetails::Book { .. } => PublicationCategory::Os,
            PublicationDetails::BookChapter { .. } => PublicationCategory::Cos,
            PublicationDetails::Thesis { .. } => PublicationCategory::Th,
            PublicationDetails::JournalEdition { .. } => PublicationCategory::Do,
            PublicationDetails::Keynote { .. } => PublicationCategory::CInv,
            PublicationDetails::Report { .. } => PublicationCategory::Ap,
            PublicationDetails::Patent { .. } => PublicationCategory::Bre,
            PublicationDetails::Misc { .. } => PublicationCategory::Ap,
        }
    }
}

/// Journal lookup by exact name. A `None` means the registry does not know
/// the journal; the importer reports it as an unresolved reference.
pub trait JournalDirectory {
    fn find_by_name(&self, name: &str) -> Option<JournalRef>;
}

/// Conference lookup by name (occurrence number and leading articles
/// already stripped by the importer).
pub trait ConferenceDirectory {
    fn find_by_name(&self, name: &str) -> Option<ConferenceRef>;
}

/// Resolution of a free-text author/editor string into an ordered person
/// list. Ambiguity handling is the implementer's business; an empty result
/// makes the importer fail the entry with `NoAuthors`.
pub trait NameResolver {
    fn resolve_persons(&self, names: &str) -> Vec<Person>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_person_from_comma_format() {
        assert_eq!(
            Person::from_comma_format("Smith, John"),
            Some(Person::new("John", "Smith"))
        );
        assert_eq!(Person::from_comma_format("Smith"), None);
        assert_eq!(Person::from_comma_format("Smith,"), None);
    }

    #[test]
    fn test_language_lookup_is_case_insensitive_with_default() {
        assert_eq!(
            PublicationLanguage::from_field(Some("FRENCH")),
            PublicationLanguage::French
        );
        assert_eq!(
            PublicationLanguage::from_field(Some("french")),
            PublicationLanguage::French
        );
        assert_eq!(
            PublicationLanguage::from_field(Some("klingon")),
            PublicationLanguage::English
        );
        assert_eq!(
            PublicationLanguage::from_field(None),
            PublicationLanguage::English
        );
    }

    #[test]
    fn test_core_ranking_display() {
        assert_eq!(CoreRanking::AStar.to_string(), "A*");
        assert_eq!(CoreRanking::AStarStar.to_string(), "A**");
        assert_eq!(CoreRanking::B.to_string(), "B");
    }

    #[test]
    fn test_journal_paper_category_depends_on_ranking() {
        let mut publication = Publication {
            preferred_id: "p".to_string(),
            title: "T".to_string(),
            abstract_text: None,
            keywords: None,
            isbn: None,
            issn: None,
            doi: None,
            hal_id: None,
            extra_url: None,
            video_url: None,
            dblp_url: None,
            language: PublicationLanguage::English,
            year: 2022,
            date: None,
            authors: vec![Person::new("John", "Smith")],
            details: PublicationDetails::JournalPaper {
                journal: JournalRef::default(),
                volume: None,
                number: None,
                pages: None,
                series: None,
            },
        };
        assert_eq!(publication.category(), PublicationCategory::Acln);

        if let PublicationDetails::JournalPaper { journal, .. } = &mut publication.details {
            journal.scimago = Some(Quartile::Q2);
        }
        assert_eq!(publication.category(), PublicationCategory::Acl);
        assert_eq!(publication.family(), PublicationFamily::JournalPaper);
    }

    #[test]
    fn test_thesis_kind_splits_family() {
        let thesis = |kind| PublicationDetails::Thesis {
            kind,
            institution: "UTBM".to_string(),
            address: None,
        };
        let mut publication = Publication {
            preferred_id: "t".to_string(),
            title: "T".to_string(),
            abstract_text: None,
            keywords: None,
            isbn: None,
            issn: None,
            doi: None,
            hal_id: None,
            extra_url: None,
            video_url: None,
            dblp_url: None,
            language: PublicationLanguage::French,
            year: 2021,
            date: None,
            authors: vec![Person::new("Jane", "Doe")],
            details: thesis(ThesisKind::Phd),
        };
        assert_eq!(publication.family(), PublicationFamily::PhdThesis);
        publication.details = thesis(ThesisKind::Master);
        assert_eq!(publication.family(), PublicationFamily::MasterThesis);
        assert_eq!(publication.category(), PublicationCategory::Th);
    }
}
