//! Export path: one typed [`Publication`] in, one BibTeX entry out.
//!
//! Export never fails for a well-formed publication: the family set is a
//! closed enum and every variant has a filler. Besides the regular BibTeX
//! fields, entries carry synthetic fields (`_publication_type`,
//! `_publication_category_name`, ...) so downstream consumers keep the
//! typed classification without re-running the import heuristics.

use itertools::Itertools;

use crate::entry::{Database, Entry, names};
use crate::messages::{self, conference_note, journal_note};
use crate::{
    ConferenceRef, JournalRef, Publication, PublicationDetails, PublicationLanguage, ReportKind,
    acronym, month, tex,
};

/// Turns typed publications into BibTeX entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter;

impl Exporter {
    pub fn new() -> Self {
        Self
    }

    /// Export a batch into one ordered database.
    pub fn export_all(&self, publications: &[Publication]) -> Database {
        let mut database = Database::new();
        for publication in publications {
            database.push(self.export_one(publication));
        }
        database
    }

    /// Export a single publication.
    pub fn export_one(&self, publication: &Publication) -> Entry {
        match &publication.details {
            PublicationDetails::JournalPaper {
                journal,
                volume,
                number,
                pages,
                series,
            } => {
                let mut entry = self.start(publication, "article", names::AUTHOR);
                fill_journal(&mut entry, journal);
                set_tex_opt(&mut entry, names::VOLUME, volume.as_deref());
                set_tex_opt(&mut entry, names::NUMBER, number.as_deref());
                entry.set_pages(pages.as_deref());
                set_tex_opt(&mut entry, names::SERIES, series.as_deref());
                fill_journal_ranking(&mut entry, publication.language, journal);
                entry
            }
            PublicationDetails::ConferencePaper {
                conference,
                occurrence,
                volume,
                number,
                pages,
                editors,
                series,
                organization,
                address,
            } => {
                let mut entry = self.start(publication, "inproceedings", names::AUTHOR);
                entry.set(
                    names::BOOKTITLE,
                    tex::to_tex(&event_title(*occurrence, &conference.name)),
                );
                set_tex_opt(&mut entry, names::VOLUME, volume.as_deref());
                set_tex_opt(&mut entry, names::NUMBER, number.as_deref());
                entry.set_pages(pages.as_deref());
                set_tex_opt(&mut entry, names::SERIES, series.as_deref());
                set_tex_opt(&mut entry, names::EDITOR, editors.as_deref());
                set_tex_opt(&mut entry, names::ORGANIZATION, organization.as_deref());
                set_tex_opt(&mut entry, names::ADDRESS, address.as_deref());
                fill_conference(&mut entry, conference);
                if let Some(core) = conference.core {
                    entry.set(names::CORE_RANKING, core.to_string());
                }
                entry.set_opt(
                    names::NOTE,
                    conference_note(publication.language, conference).as_deref(),
                );
                entry
            }
            PublicationDetails::Book {
                edition,
                series,
                volume,
                number,
                pages,
                editors,
                publisher,
                address,
            } => {
                let mut entry = self.start(publication, "book", names::AUTHOR);
                fill_book_fields(
                    &mut entry, edition, series, volume, number, pages, editors, publisher,
                    address,
                );
                entry
            }
            PublicationDetails::BookChapter {
                book_title,
                chapter_number,
                edition,
                series,
                volume,
                number,
                pages,
                editors,
                publisher,
                address,
            } => {
                let mut entry = self.start(publication, "inbook", names::AUTHOR);
                entry.set(names::BOOKTITLE, tex::to_tex(book_title));
                set_tex_opt(&mut entry, names::CHAPTER, chapter_number.as_deref());
                fill_book_fields(
                    &mut entry, edition, series, volume, number, pages, editors, publisher,
                    address,
                );
                entry
            }
            PublicationDetails::Thesis {
                kind,
                institution,
                address,
            } => {
                let tag = match kind {
                    crate::ThesisKind::Phd => "phdthesis",
                    crate::ThesisKind::Master => "mastersthesis",
                };
                let mut entry = self.start(publication, tag, names::AUTHOR);
                entry.set(names::SCHOOL, tex::to_tex(institution));
                set_tex_opt(&mut entry, names::ADDRESS, address.as_deref());
                entry.set(
                    names::TYPE,
                    tex::to_tex(messages::thesis_kind_label(*kind, publication.language)),
                );
                entry
            }
            PublicationDetails::JournalEdition {
                journal,
                volume,
                number,
                pages,
            } => {
                // Edited journal issues carry the editor key, not author.
                let mut entry = self.start(publication, "book", names::EDITOR);
                fill_journal(&mut entry, journal);
                set_tex_opt(&mut entry, names::VOLUME, volume.as_deref());
                set_tex_opt(&mut entry, names::NUMBER, number.as_deref());
                entry.set_pages(pages.as_deref());
                fill_journal_ranking(&mut entry, publication.language, journal);
                entry
            }
            PublicationDetails::Keynote {
                conference,
                editors,
                organization,
                address,
            } => {
                let mut entry = self.start(publication, "inproceedings", names::AUTHOR);
                entry.set(names::BOOKTITLE, tex::to_tex(&conference.name));
                set_tex_opt(&mut entry, names::EDITOR, editors.as_deref());
                set_tex_opt(&mut entry, names::ORGANIZATION, organization.as_deref());
                set_tex_opt(&mut entry, names::ADDRESS, address.as_deref());
                fill_conference(&mut entry, conference);
                if let Some(core) = conference.core {
                    entry.set(names::CORE_RANKING, core.to_string());
                }
                // A ranked venue gets the ranking note; otherwise the note
                // says what kind of talk this entry is.
                let note = conference_note(publication.language, conference).unwrap_or_else(|| {
                    messages::family_label(publication.family(), publication.language).to_string()
                });
                entry.set(names::NOTE, tex::to_tex(&note));
                entry
            }
            PublicationDetails::Report {
                kind,
                number,
                note_kind,
                institution,
                address,
            } => {
                let mut entry = match kind {
                    ReportKind::Tutorial => {
                        let mut entry = self.start(publication, "manual", names::AUTHOR);
                        set_tex_opt(&mut entry, names::EDITION, number.as_deref());
                        entry.set(names::ORGANIZATION, tex::to_tex(institution));
                        entry
                    }
                    ReportKind::Technical => {
                        let mut entry = self.start(publication, "techreport", names::AUTHOR);
                        set_tex_opt(&mut entry, names::NUMBER, number.as_deref());
                        entry.set(names::INSTITUTION, tex::to_tex(institution));
                        entry
                    }
                };
                set_tex_opt(&mut entry, names::ADDRESS, address.as_deref());
                set_tex_opt(&mut entry, names::NOTE, note_kind.as_deref());
                entry
            }
            PublicationDetails::Patent {
                number,
                institution,
                kind,
                address,
            } => {
                let mut entry = self.start(publication, "misc", names::AUTHOR);
                set_tex_opt(&mut entry, names::ADDRESS, address.as_deref());
                set_tex_opt(&mut entry, names::NOTE, kind.as_deref());
                let sentence = messages::patent_sentence(
                    publication.language,
                    number.as_deref(),
                    institution.as_deref(),
                );
                if let Some(sentence) = sentence {
                    entry.set(names::HOWPUBLISHED, tex::to_tex(&sentence));
                }
                entry
            }
            PublicationDetails::Misc {
                how_published,
                kind,
                number,
                organization,
                publisher,
                address,
            } => {
                let mut entry = self.start(publication, "misc", names::AUTHOR);
                entry.set(names::HOWPUBLISHED, tex::to_tex(how_published));
                set_tex_opt(&mut entry, names::TYPE, kind.as_deref());
                set_tex_opt(&mut entry, names::NUMBER, number.as_deref());
                set_tex_opt(&mut entry, names::ORGANIZATION, organization.as_deref());
                set_tex_opt(&mut entry, names::PUBLISHER, publisher.as_deref());
                set_tex_opt(&mut entry, names::ADDRESS, address.as_deref());
                entry
            }
        }
    }

    /// Create the entry and fill the fields shared by every family.
    fn start(&self, publication: &Publication, tag: &str, author_field: &str) -> Entry {
        let mut entry = Entry::new(tag, publication.preferred_id.clone());

        if let Some(title) = acronym::protect(&tex::to_tex(&publication.title)) {
            entry.set(names::TITLE, title);
        }
        let authors = publication
            .authors
            .iter()
            .map(|p| format!("{}, {}", p.last_name, p.first_name))
            .join(" and ");
        entry.set(author_field, tex::to_tex(&authors));
        entry.set_bare(names::YEAR, publication.year.to_string());
        if let Some(encoded) = publication.date.and_then(|date| month::encode(date.month)) {
            entry.set_bare(names::MONTH, encoded);
        }
        entry.set_opt(names::DOI, publication.doi.as_deref());
        entry.set_opt(names::ISBN, publication.isbn.as_deref());
        entry.set_opt(names::ISSN, publication.issn.as_deref());
        entry.set_opt(names::URL, publication.extra_url.as_deref());
        entry.set_opt(names::HALID, publication.hal_id.as_deref());
        entry.set_opt(names::DBLP, publication.dblp_url.as_deref());
        entry.set_opt(names::VIDEO, publication.video_url.as_deref());
        set_tex_opt(&mut entry, names::ABSTRACT, publication.abstract_text.as_deref());
        set_tex_opt(&mut entry, names::KEYWORDS, publication.keywords.as_deref());
        entry.set(names::LANGUAGE, publication.language.tag());

        let family = publication.family();
        let category = publication.category();
        entry.set(names::PUBLICATION_TYPE, family.name());
        entry.set(
            names::PUBLICATION_TYPE_NAME,
            tex::to_tex(messages::family_label(family, publication.language)),
        );
        entry.set(names::PUBLICATION_CATEGORY, category.acronym());
        entry.set(
            names::PUBLICATION_CATEGORY_NAME,
            tex::to_tex(messages::category_label(category, publication.language)),
        );
        entry
    }
}

fn set_tex_opt(entry: &mut Entry, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        entry.set(name, tex::to_tex(value));
    }
}

/// Venue fields shared by journal papers and journal editions. The venue's
/// ISSN wins over the publication's own when both are present.
fn fill_journal(entry: &mut Entry, journal: &JournalRef) {
    entry.set(names::JOURNAL, tex::to_tex(&journal.name));
    set_tex_opt(entry, names::ISSN, journal.issn.as_deref());
    set_tex_opt(entry, names::PUBLISHER, journal.publisher.as_deref());
    set_tex_opt(entry, names::ADDRESS, journal.address.as_deref());
}

fn fill_conference(entry: &mut Entry, conference: &ConferenceRef) {
    set_tex_opt(entry, names::ISBN, conference.isbn.as_deref());
    set_tex_opt(entry, names::ISSN, conference.issn.as_deref());
    set_tex_opt(entry, names::PUBLISHER, conference.publisher.as_deref());
}

/// Ranking annotations and the generated note for journal-linked families.
fn fill_journal_ranking(entry: &mut Entry, language: PublicationLanguage, journal: &JournalRef) {
    if let Some(scimago) = journal.scimago {
        entry.set(names::SCIMAGO_QINDEX, scimago.to_string());
    }
    if let Some(wos) = journal.wos {
        entry.set(names::WOS_QINDEX, wos.to_string());
    }
    if journal.impact_factor > 0.0 {
        entry.set(names::IMPACT_FACTOR, format!("{:.3}", journal.impact_factor));
    }
    entry.set_opt(names::NOTE, journal_note(language, journal).as_deref());
}

#[allow(clippy::too_many_arguments)]
fn fill_book_fields(
    entry: &mut Entry,
    edition: &Option<String>,
    series: &Option<String>,
    volume: &Option<String>,
    number: &Option<String>,
    pages: &Option<String>,
    editors: &Option<String>,
    publisher: &Option<String>,
    address: &Option<String>,
) {
    set_tex_opt(entry, names::EDITION, edition.as_deref());
    set_tex_opt(entry, names::SERIES, series.as_deref());
    set_tex_opt(entry, names::VOLUME, volume.as_deref());
    set_tex_opt(entry, names::NUMBER, number.as_deref());
    entry.set_pages(pages.as_deref());
    set_tex_opt(entry, names::EDITOR, editors.as_deref());
    set_tex_opt(entry, names::PUBLISHER, publisher.as_deref());
    set_tex_opt(entry, names::ADDRESS, address.as_deref());
}

/// Rebuild an event title like `"14th International Conference on X"` from
/// the occurrence number and the bare event name.
fn event_title(occurrence: u32, name: &str) -> String {
    if occurrence == 0 {
        return name.to_string();
    }
    let suffix = match occurrence % 100 {
        11..=13 => "th",
        n => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{occurrence}{suffix} {name}")
}
