//! Mapping from BibTeX entry types to publication families.

use crate::PublicationFamily;
use crate::error::ImportError;

/// Classify a BibTeX entry type, case-insensitively, into a publication
/// family. The table is fixed; unknown types are an error carrying the
/// offending type verbatim.
///
/// `@incollection` counts as a journal paper and `@inbook` as a book
/// chapter; `@proceedings` and `@unpublished` have no dedicated family and
/// land in the catch-all.
pub fn classify(entry_type: &str) -> Result<PublicationFamily, ImportError> {
    match entry_type.to_ascii_lowercase().as_str() {
        "article" | "incollection" => Ok(PublicationFamily::JournalPaper),
        "inproceedings" | "conference" => Ok(PublicationFamily::ConferencePaper),
        "book" => Ok(PublicationFamily::Book),
        "booklet" | "inbook" => Ok(PublicationFamily::BookChapter),
        "phdthesis" => Ok(PublicationFamily::PhdThesis),
        "mastersthesis" => Ok(PublicationFamily::MasterThesis),
        "techreport" => Ok(PublicationFamily::TechnicalReport),
        "manual" => Ok(PublicationFamily::TutorialDocumentation),
        "misc" | "proceedings" | "unpublished" => Ok(PublicationFamily::Other),
        _ => Err(ImportError::UnsupportedEntryType {
            entry_type: entry_type.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("article", PublicationFamily::JournalPaper)]
    #[case("incollection", PublicationFamily::JournalPaper)]
    #[case("inproceedings", PublicationFamily::ConferencePaper)]
    #[case("conference", PublicationFamily::ConferencePaper)]
    #[case("book", PublicationFamily::Book)]
    #[case("booklet", PublicationFamily::BookChapter)]
    #[case("inbook", PublicationFamily::BookChapter)]
    #[case("phdthesis", PublicationFamily::PhdThesis)]
    #[case("mastersthesis", PublicationFamily::MasterThesis)]
    #[case("techreport", PublicationFamily::TechnicalReport)]
    #[case("manual", PublicationFamily::TutorialDocumentation)]
    #[case("misc", PublicationFamily::Other)]
    #[case("proceedings", PublicationFamily::Other)]
    #[case("unpublished", PublicationFamily::Other)]
    fn test_known_types(#[case] entry_type: &str, #[case] expected: PublicationFamily) {
        assert_eq!(classify(entry_type).unwrap(), expected);
    }

    #[rstest]
    #[case("Article")]
    #[case("INPROCEEDINGS")]
    #[case("PhdThesis")]
    fn test_case_insensitive(#[case] entry_type: &str) {
        assert!(classify(entry_type).is_ok());
    }

    #[test]
    fn test_unknown_type_is_rejected_verbatim() {
        let error = classify("patent").unwrap_err();
        match error {
            ImportError::UnsupportedEntryType { entry_type } => {
                assert_eq!(entry_type, "patent");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
