//! Line-oriented CSV tokenizing
//!
//! This is not an RFC 4180 parser. A field is either a
//! double-quoted run without embedded quotes, or a run of characters that
//! contains neither a comma nor a quote. Empty unquoted fields produce no
//! token, and quoted fields cannot span lines.

use crate::types::Table;
use regex::Regex;
use std::sync::LazyLock;

// Literal pattern: the only panic site outside tests
static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)"|([^",]+)"#).expect("field pattern is a valid regex")
});

/// Split one line into its fields, left to right
pub fn tokenize_row(line: &str) -> Vec<String> {
    FIELD_PATTERN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse a whole CSV document into a table, skipping blank lines
pub fn parse_table(text: &str) -> Table {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(tokenize_row)
        .collect();
    Table::new(rows)
}

/// Decode uploaded CSV bytes and parse them.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn parse_table_bytes(bytes: &[u8]) -> Table {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    parse_table(text)
}
