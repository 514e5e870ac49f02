//! Line cleanup applied before classification.

/// Trim, drop zero-width characters and collapse whitespace runs to one space.
pub fn cleanup_line(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text after the first `:` or `：`, trimmed. `None` when there is no
/// separator or nothing follows it.
pub fn value_after_colon(line: &str) -> Option<&str> {
    let (_, value) = line.split_once([':', '：'])?;
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

pub fn has_colon(line: &str) -> bool {
    line.contains([':', '：'])
}

pub fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| line.contains(k))
}

/// Parse digits with thousands separators, e.g. `15,000`.
pub fn parse_grouped_int(s: &str) -> Option<i64> {
    s.replace(',', "").parse().ok()
}
