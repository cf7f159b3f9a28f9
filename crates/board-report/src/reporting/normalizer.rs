use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form for list names and rule tokens: invisible characters
/// stripped, trimmed, uppercased (Unicode aware, so `ã` becomes `Ã`).
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_uppercase()
}

/// Sort key for display names: accents folded, case ignored, so `Ábaco`
/// sorts next to `abacate` instead of after `Zebra`.
pub(crate) fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
