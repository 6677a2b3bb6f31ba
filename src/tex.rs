//! TeX macro bridge.
//!
//! Bibliographic sources escape non-ASCII text with TeX macros (`\'{e}` for
//! `é`). [`to_plain_text`] resolves macros to Unicode on import and
//! [`to_tex`] re-escapes on export. Only the escaping layer lives here; this
//! is not a LaTeX renderer.
//!
//! Decoding applies a substitution table sorted longest-pattern-first (so
//! `\'{\i}` wins over `\i`), unwraps formatting commands, and drops grouping
//! braces. Any `\macro` left standing afterwards means the input is outside
//! the dialect this bridge understands and the call fails with
//! [`TexError::MalformedMacro`].

use crate::error::TexError;
use regex::Regex;
use std::sync::LazyLock;

/// Macro → Unicode substitutions. Each accent is listed in both the braced
/// and the bare spelling.
static DECODE_TABLE: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    let mut table = vec![
        // Acute
        ("\\'{a}", "á"), ("\\'{e}", "é"), ("\\'{i}", "í"), ("\\'{o}", "ó"),
        ("\\'{u}", "ú"), ("\\'{y}", "ý"), ("\\'{A}", "Á"), ("\\'{E}", "É"),
        ("\\'{I}", "Í"), ("\\'{O}", "Ó"), ("\\'{U}", "Ú"), ("\\'{Y}", "Ý"),
        ("\\'{\\i}", "í"),
        ("\\'a", "á"), ("\\'e", "é"), ("\\'i", "í"), ("\\'o", "ó"),
        ("\\'u", "ú"), ("\\'y", "ý"), ("\\'A", "Á"), ("\\'E", "É"),
        ("\\'I", "Í"), ("\\'O", "Ó"), ("\\'U", "Ú"), ("\\'Y", "Ý"),
        // Grave
        ("\\`{a}", "à"), ("\\`{e}", "è"), ("\\`{i}", "ì"), ("\\`{o}", "ò"),
        ("\\`{u}", "ù"), ("\\`{A}", "À"), ("\\`{E}", "È"), ("\\`{I}", "Ì"),
        ("\\`{O}", "Ò"), ("\\`{U}", "Ù"),
        ("\\`{\\i}", "ì"),
        ("\\`a", "à"), ("\\`e", "è"), ("\\`i", "ì"), ("\\`o", "ò"),
        ("\\`u", "ù"), ("\\`A", "À"), ("\\`E", "È"), ("\\`I", "Ì"),
        ("\\`O", "Ò"), ("\\`U", "Ù"),
        // Circumflex
        ("\\^{a}", "â"), ("\\^{e}", "ê"), ("\\^{i}", "î"), ("\\^{o}", "ô"),
        ("\\^{u}", "û"), ("\\^{A}", "Â"), ("\\^{E}", "Ê"), ("\\^{I}", "Î"),
        ("\\^{O}", "Ô"), ("\\^{U}", "Û"),
        ("\\^{\\i}", "î"),
        ("\\^a", "â"), ("\\^e", "ê"), ("\\^i", "î"), ("\\^o", "ô"),
        ("\\^u", "û"), ("\\^A", "Â"), ("\\^E", "Ê"), ("\\^I", "Î"),
        ("\\^O", "Ô"), ("\\^U", "Û"),
        // Umlaut
        ("\\\"{a}", "ä"), ("\\\"{e}", "ë"), ("\\\"{i}", "ï"), ("\\\"{o}", "ö"),
        ("\\\"{u}", "ü"), ("\\\"{y}", "ÿ"), ("\\\"{A}", "Ä"), ("\\\"{E}", "Ë"),
        ("\\\"{I}", "Ï"), ("\\\"{O}", "Ö"), ("\\\"{U}", "Ü"),
        ("\\\"{\\i}", "ï"),
        ("\\\"a", "ä"), ("\\\"e", "ë"), ("\\\"i", "ï"), ("\\\"o", "ö"),
        ("\\\"u", "ü"), ("\\\"y", "ÿ"), ("\\\"A", "Ä"), ("\\\"E", "Ë"),
        ("\\\"I", "Ï"), ("\\\"O", "Ö"), ("\\\"U", "Ü"),
        // Tilde
        ("\\~{a}", "ã"), ("\\~{n}", "ñ"), ("\\~{o}", "õ"),
        ("\\~{A}", "Ã"), ("\\~{N}", "Ñ"), ("\\~{O}", "Õ"),
        ("\\~a", "ã"), ("\\~n", "ñ"), ("\\~o", "õ"),
        ("\\~A", "Ã"), ("\\~N", "Ñ"), ("\\~O", "Õ"),
        // Cedilla
        ("\\c{c}", "ç"), ("\\c{C}", "Ç"), ("\\c c", "ç"), ("\\c C", "Ç"),
        // Ring
        ("\\r{a}", "å"), ("\\r{A}", "Å"), ("\\r a", "å"), ("\\r A", "Å"),
        ("\\aa", "å"), ("\\AA", "Å"),
        // Caron
        ("\\v{c}", "č"), ("\\v{C}", "Č"), ("\\v{s}", "š"), ("\\v{S}", "Š"),
        ("\\v{z}", "ž"), ("\\v{Z}", "Ž"),
        // Ligatures and letters
        ("\\ae", "æ"), ("\\AE", "Æ"), ("\\oe", "œ"), ("\\OE", "Œ"),
        ("\\ss", "ß"), ("\\o", "ø"), ("\\O", "Ø"), ("\\l", "ł"), ("\\L", "Ł"),
        ("\\i", "ı"),
        // Literal escapes
        ("\\&", "&"), ("\\%", "%"), ("\\$", "$"), ("\\#", "#"), ("\\_", "_"),
        ("\\{", "\u{1}"), ("\\}", "\u{2}"),
        // Dashes and quotes
        ("---", "—"), ("--", "–"), ("``", "\u{201C}"), ("''", "\u{201D}"),
        ("~", " "),
    ];
    // Longest first so multi-character macros win over their prefixes.
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
});

/// Formatting commands whose argument is kept verbatim.
static FORMATTING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:textbf|textit|textrm|texttt|textsc|textsf|emph|underline|mbox|text)\{([^{}]*)\}")
        .unwrap()
});

/// Any macro still standing after substitution.
static LEFTOVER_MACRO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[A-Za-z]+|\\[^A-Za-z\s]").unwrap());

/// Unicode → macro substitutions for export, in the braced spelling.
static ENCODE_TABLE: LazyLock<Vec<(char, &'static str)>> = LazyLock::new(|| {
    vec![
        ('á', "{\\'{a}}"), ('é', "{\\'{e}}"), ('í', "{\\'{i}}"), ('ó', "{\\'{o}}"),
        ('ú', "{\\'{u}}"), ('ý', "{\\'{y}}"), ('Á', "{\\'{A}}"), ('É', "{\\'{E}}"),
        ('Í', "{\\'{I}}"), ('Ó', "{\\'{O}}"), ('Ú', "{\\'{U}}"), ('Ý', "{\\'{Y}}"),
        ('à', "{\\`{a}}"), ('è', "{\\`{e}}"), ('ì', "{\\`{i}}"), ('ò', "{\\`{o}}"),
        ('ù', "{\\`{u}}"), ('À', "{\\`{A}}"), ('È', "{\\`{E}}"), ('Ì', "{\\`{I}}"),
        ('Ò', "{\\`{O}}"), ('Ù', "{\\`{U}}"),
        ('â', "{\\^{a}}"), ('ê', "{\\^{e}}"), ('î', "{\\^{i}}"), ('ô', "{\\^{o}}"),
        ('û', "{\\^{u}}"), ('Â', "{\\^{A}}"), ('Ê', "{\\^{E}}"), ('Î', "{\\^{I}}"),
        ('Ô', "{\\^{O}}"), ('Û', "{\\^{U}}"),
        ('ä', "{\\\"{a}}"), ('ë', "{\\\"{e}}"), ('ï', "{\\\"{i}}"), ('ö', "{\\\"{o}}"),
        ('ü', "{\\\"{u}}"), ('ÿ', "{\\\"{y}}"), ('Ä', "{\\\"{A}}"), ('Ë', "{\\\"{E}}"),
        ('Ï', "{\\\"{I}}"), ('Ö', "{\\\"{O}}"), ('Ü', "{\\\"{U}}"),
        ('ã', "{\\~{a}}"), ('ñ', "{\\~{n}}"), ('õ', "{\\~{o}}"),
        ('Ã', "{\\~{A}}"), ('Ñ', "{\\~{N}}"), ('Õ', "{\\~{O}}"),
        ('ç', "{\\c{c}}"), ('Ç', "{\\c{C}}"),
        ('å', "{\\r{a}}"), ('Å', "{\\r{A}}"),
        ('č', "{\\v{c}}"), ('Č', "{\\v{C}}"), ('š', "{\\v{s}}"), ('Š', "{\\v{S}}"),
        ('ž', "{\\v{z}}"), ('Ž', "{\\v{Z}}"),
        ('æ', "{\\ae}"), ('Æ', "{\\AE}"), ('œ', "{\\oe}"), ('Œ', "{\\OE}"),
        ('ß', "{\\ss}"), ('ø', "{\\o}"), ('Ø', "{\\O}"), ('ł', "{\\l}"), ('Ł', "{\\L}"),
        ('&', "\\&"), ('%', "\\%"), ('$', "\\$"), ('#', "\\#"), ('_', "\\_"),
    ]
});

/// Resolve TeX macros in `tex` to plain Unicode text.
///
/// # Errors
///
/// Fails with [`TexError::MalformedMacro`] when a macro remains that the
/// bridge cannot resolve.
pub fn to_plain_text(tex: &str) -> Result<String, TexError> {
    let mut result = tex.to_string();
    for (pattern, replacement) in DECODE_TABLE.iter() {
        if result.contains(pattern) {
            result = result.replace(pattern, replacement);
        }
    }
    loop {
        let unwrapped = FORMATTING_REGEX.replace_all(&result, "$1");
        if unwrapped == result {
            break;
        }
        result = unwrapped.into_owned();
    }
    if LEFTOVER_MACRO_REGEX.is_match(&result) {
        return Err(TexError::MalformedMacro {
            text: tex.to_string(),
        });
    }
    // Grouping braces carry no meaning in plain text; the sentinels restore
    // literal braces that were escaped in the source.
    let result = result
        .replace(['{', '}'], "")
        .replace('\u{1}', "{")
        .replace('\u{2}', "}");
    Ok(result)
}

/// Escape `text` back into the TeX dialect used on export. Characters
/// without a mapping pass through unchanged.
pub fn to_tex(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match ENCODE_TABLE.iter().find(|(ch, _)| *ch == c) {
            Some((_, macro_text)) => result.push_str(macro_text),
            None => result.push(c),
        }
    }
    result
}
