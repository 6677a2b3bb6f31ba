//! Month field codec.
//!
//! BibTeX sources spell the month three ways: a zero-padded two-digit
//! number, the 3-letter lowercase English abbreviation, or the full English
//! month name. Anything else means "no month" and the caller keeps only the
//! year. Export always writes the 3-letter abbreviation.

/// Decode a month field value to a month number (1-12).
pub fn decode(field: &str) -> Option<u8> {
    match field {
        "01" | "jan" | "January" => Some(1),
        "02" | "feb" | "February" => Some(2),
        "03" | "mar" | "March" => Some(3),
        "04" | "apr" | "April" => Some(4),
        "05" | "may" | "May" => Some(5),
        "06" | "jun" | "June" => Some(6),
        "07" | "jul" | "July" => Some(7),
        "08" | "aug" | "August" => Some(8),
        "09" | "sep" | "September" => Some(9),
        "10" | "oct" | "October" => Some(10),
        "11" | "nov" | "November" => Some(11),
        "12" | "dec" | "December" => Some(12),
        _ => None,
    }
}

/// Encode a month number (1-12) as the canonical 3-letter abbreviation.
pub fn encode(month: u8) -> Option<&'static str> {
    match month {
        1 => Some("jan"),
        2 => Some("feb"),
        3 => Some("mar"),
        4 => Some("apr"),
        5 => Some("may"),
        6 => Some("jun"),
        7 => Some("jul"),
        8 => Some("aug"),
        9 => Some("sep"),
        10 => Some("oct"),
        11 => Some("nov"),
        12 => Some("dec"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "01", "jan", "January")]
    #[case(2, "02", "feb", "February")]
    #[case(3, "03", "mar", "March")]
    #[case(4, "04", "apr", "April")]
    #[case(5, "05", "may", "May")]
    #[case(6, "06", "jun", "June")]
    #[case(7, "07", "jul", "July")]
    #[case(8, "08", "aug", "August")]
    #[case(9, "09", "sep", "September")]
    #[case(10, "10", "oct", "October")]
    #[case(11, "11", "nov", "November")]
    #[case(12, "12", "dec", "December")]
    fn test_all_variants_agree(
        #[case] month: u8,
        #[case] numeric: &str,
        #[case] abbrev: &str,
        #[case] full: &str,
    ) {
        assert_eq!(decode(numeric), Some(month));
        assert_eq!(decode(abbrev), Some(month));
        assert_eq!(decode(full), Some(month));
        assert_eq!(encode(month), Some(abbrev));
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("13")]
    #[case("JAN")]
    #[case("janvier")]
    #[case("Jan")]
    #[case("january")]
    fn test_unrecognized_is_no_month(#[case] field: &str) {
        assert_eq!(decode(field), None);
    }

    #[test]
    fn test_encode_out_of_range() {
        assert_eq!(encode(0), None);
        assert_eq!(encode(13), None);
    }
}
