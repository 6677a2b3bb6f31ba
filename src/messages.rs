//! Localized text generation for export: publication type and category
//! labels, thesis kind labels, patent sentences, and ranking notes.
//!
//! Every function takes the target language as an explicit parameter so
//! that concurrent exports of publications in different languages never
//! interfere. English and French carry full translations; other languages
//! fall back to English.

use crate::{
    ConferenceRef, JournalRef, PublicationCategory, PublicationFamily, PublicationLanguage,
    ThesisKind,
};

/// Languages with their own message set. Everything else reads English.
fn effective(language: PublicationLanguage) -> PublicationLanguage {
    match language {
        PublicationLanguage::French => PublicationLanguage::French,
        _ => PublicationLanguage::English,
    }
}

/// Human-readable label for a publication family.
pub(crate) fn family_label(
    family: PublicationFamily,
    language: PublicationLanguage,
) -> &'static str {
    use PublicationFamily::*;
    match (family, effective(language)) {
        (JournalPaper, PublicationLanguage::French) => "Article dans une revue internationale",
        (JournalPaper, _) => "Article in an international journal",
        (ConferencePaper, PublicationLanguage::French) => {
            "Communication dans les actes d'une conf\u{e9}rence internationale"
        }
        (ConferencePaper, _) => "Paper in the proceedings of an international conference",
        (Book, PublicationLanguage::French) => "Ouvrage scientifique international",
        (Book, _) => "International scientific book",
        (BookChapter, PublicationLanguage::French) => {
            "Chapitre dans un ouvrage scientifique international"
        }
        (BookChapter, _) => "Chapter in an international scientific book",
        (PhdThesis, PublicationLanguage::French) => "Th\u{e8}se de doctorat",
        (PhdThesis, _) => "PhD thesis",
        (MasterThesis, PublicationLanguage::French) => "M\u{e9}moire de master",
        (MasterThesis, _) => "Master thesis",
        (JournalEdition, PublicationLanguage::French) => {
            "\u{c9}dition d'une revue internationale"
        }
        (JournalEdition, _) => "Edition of an international journal",
        (Keynote, PublicationLanguage::French) => {
            "Conf\u{e9}rence invit\u{e9}e dans une conf\u{e9}rence internationale"
        }
        (Keynote, _) => "Keynote in an international conference",
        (TechnicalReport, PublicationLanguage::French) => "Rapport technique",
        (TechnicalReport, _) => "Technical report",
        (TutorialDocumentation, PublicationLanguage::French) => "Tutoriel ou documentation",
        (TutorialDocumentation, _) => "Tutorial or documentation",
        (Patent, PublicationLanguage::French) => "Brevet international",
        (Patent, _) => "International patent",
        (Other, PublicationLanguage::French) => "Autre production scientifique",
        (Other, _) => "Other scientific production",
    }
}

/// Human-readable label for a ranking category.
pub(crate) fn category_label(
    category: PublicationCategory,
    language: PublicationLanguage,
) -> &'static str {
    use PublicationCategory::*;
    match (category, effective(language)) {
        (Acl, PublicationLanguage::French) => {
            "Articles dans des revues internationales avec comit\u{e9} de lecture"
        }
        (Acl, _) => "Articles in international journals with selection committee",
        (Acln, PublicationLanguage::French) => {
            "Articles dans des revues sans comit\u{e9} de lecture"
        }
        (Acln, _) => "Articles in journals without selection committee",
        (CActi, PublicationLanguage::French) => {
            "Communications avec actes dans un congr\u{e8}s international"
        }
        (CActi, _) => "Papers in the proceedings of an international conference",
        (CInv, PublicationLanguage::French) => {
            "Conf\u{e9}rences invit\u{e9}es dans des congr\u{e8}s nationaux ou internationaux"
        }
        (CInv, _) => "Invited talks in national or international conferences",
        (Do, PublicationLanguage::French) => "Directions d'ouvrages ou de revues",
        (Do, _) => "Editions of books or journals",
        (Os, PublicationLanguage::French) => "Ouvrages scientifiques",
        (Os, _) => "Scientific books",
        (Cos, PublicationLanguage::French) => "Chapitres d'ouvrages scientifiques",
        (Cos, _) => "Chapters in scientific books",
        (Th, PublicationLanguage::French) => "Th\u{e8}ses",
        (Th, _) => "Theses",
        (Bre, PublicationLanguage::French) => "Brevets",
        (Bre, _) => "Patents",
        (Ap, PublicationLanguage::French) => "Autres productions scientifiques",
        (Ap, _) => "Other scientific productions",
    }
}

/// Label written to the thesis `type` field.
pub(crate) fn thesis_kind_label(kind: ThesisKind, language: PublicationLanguage) -> &'static str {
    match (kind, effective(language)) {
        (ThesisKind::Phd, PublicationLanguage::French) => "Th\u{e8}se de doctorat",
        (ThesisKind::Phd, _) => "PhD thesis",
        (ThesisKind::Master, PublicationLanguage::French) => "M\u{e9}moire de master",
        (ThesisKind::Master, _) => "Master thesis",
    }
}

/// Sentence written to a patent's `howpublished` field. Both signals
/// present beats either alone; neither present writes nothing.
pub(crate) fn patent_sentence(
    language: PublicationLanguage,
    number: Option<&str>,
    institution: Option<&str>,
) -> Option<String> {
    let french = effective(language) == PublicationLanguage::French;
    match (number, institution) {
        (Some(number), Some(institution)) => Some(if french {
            format!("Brevet n. {number} d\u{e9}livr\u{e9} par {institution}")
        } else {
            format!("Patent n. {number} delivered by {institution}")
        }),
        (Some(number), None) => Some(if french {
            format!("Brevet n. {number}")
        } else {
            format!("Patent n. {number}")
        }),
        (None, Some(institution)) => Some(if french {
            format!("Brevet d\u{e9}livr\u{e9} par {institution}")
        } else {
            format!("Patent delivered by {institution}")
        }),
        (None, None) => None,
    }
}

/// Compose the ranking note for a journal: quartile clauses and an impact
/// factor clause, joined with `", "`. `None` when the journal carries no
/// ranking signal at all.
///
/// Impact factors always render with 3 decimal digits and a dot separator,
/// regardless of the language.
pub fn journal_note(language: PublicationLanguage, journal: &JournalRef) -> Option<String> {
    let french = effective(language) == PublicationLanguage::French;
    let mut clauses: Vec<String> = Vec::new();
    match (journal.scimago, journal.wos) {
        (Some(scimago), Some(wos)) if scimago == wos => {
            clauses.push(if french {
                format!("Quartile : {scimago}")
            } else {
                format!("Quartile: {scimago}")
            });
        }
        (Some(scimago), Some(wos)) => {
            clauses.push(if french {
                format!("Scimago : {scimago}, WoS : {wos}")
            } else {
                format!("Scimago: {scimago}, WoS: {wos}")
            });
        }
        (Some(scimago), None) => {
            clauses.push(if french {
                format!("Scimago : {scimago}")
            } else {
                format!("Scimago: {scimago}")
            });
        }
        (None, Some(wos)) => {
            clauses.push(if french {
                format!("WoS : {wos}")
            } else {
                format!("WoS: {wos}")
            });
        }
        (None, None) => {}
    }
    if journal.impact_factor > 0.0 {
        clauses.push(if french {
            format!("Facteur d'impact : {:.3}", journal.impact_factor)
        } else {
            format!("Impact factor: {:.3}", journal.impact_factor)
        });
    }
    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(", "))
    }
}

/// Compose the ranking note for a conference: the CORE ranking clause, or
/// nothing when the conference is unranked.
pub fn conference_note(
    language: PublicationLanguage,
    conference: &ConferenceRef,
) -> Option<String> {
    conference.core.map(|core| {
        if effective(language) == PublicationLanguage::French {
            format!("Classement CORE : {core}")
        } else {
            format!("CORE ranking: {core}")
        }
    })
}
