//! Common utilities shared by the search and explorer renderers

use std::time::SystemTime;

/// Column at which the info box separator of explorer lines is placed
pub const INFO_BOX_COLUMN: usize = 60;

/// Width of the id gutter in explorer lines
const ID_GUTTER: usize = 4;

/// Crop a string to at most `max_chars` characters
pub fn crop(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Display length of a line where a tab counts as four columns
pub fn tab_corrected_len(line: &str) -> usize {
    line.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

/// Right-aligned info suffix for an explorer line, newline-terminated
pub fn format_info_box(line: &str, info: &str) -> String {
    let padding = INFO_BOX_COLUMN.saturating_sub(tab_corrected_len(line));
    format!("{}| {}\n", " ".repeat(padding), info)
}

/// Whitespace that pads an id to the gutter width
pub fn responsive_tab(id: &str) -> String {
    " ".repeat(ID_GUTTER.saturating_sub(id.len()))
}

/// `<id><pad>|` prefix of an explorer line
pub fn id_prefix(id: usize) -> String {
    let id = id.to_string();
    let pad = responsive_tab(&id);
    format!("{}{}|", id, pad)
}

/// Math, currency, modifier and other symbols (Unicode Sm, Sc, Sk, So).
///
/// Covers the Latin-1 symbols and the dedicated symbol blocks; bracket and
/// digit code points inside those blocks are excluded.
pub fn is_symbol(c: char) -> bool {
    match c {
        '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' => true,
        '\u{A2}'..='\u{A6}' | '\u{A8}' | '\u{A9}' | '\u{AC}' | '\u{AE}'..='\u{B1}' => true,
        '\u{B4}' | '\u{B8}' | '\u{D7}' | '\u{F7}' => true,
        '\u{2C2}'..='\u{2C5}' | '\u{2D2}'..='\u{2DF}' | '\u{2E5}'..='\u{2EB}' => true,
        '\u{2ED}' | '\u{2EF}'..='\u{2FF}' | '\u{375}' | '\u{384}' | '\u{385}' | '\u{3F6}' => true,
        '\u{20A0}'..='\u{20C0}' => true,
        '\u{2190}'..='\u{2307}' | '\u{230C}'..='\u{2328}' | '\u{232B}'..='\u{2426}' => true,
        '\u{2440}'..='\u{244A}' => true,
        '\u{249C}'..='\u{24E9}' | '\u{2500}'..='\u{2767}' | '\u{2794}'..='\u{27C4}' => true,
        '\u{27C7}'..='\u{27E5}' | '\u{27F0}'..='\u{2982}' | '\u{2999}'..='\u{29D7}' => true,
        '\u{29DC}'..='\u{29FB}' | '\u{29FE}'..='\u{2B73}' | '\u{2B76}'..='\u{2BFF}' => true,
        '\u{3004}' | '\u{3012}' | '\u{3013}' | '\u{3020}' | '\u{309B}' | '\u{309C}' => true,
        '\u{FF04}' | '\u{FF0B}' | '\u{FF1C}'..='\u{FF1E}' | '\u{FF3E}' | '\u{FF40}' => true,
        '\u{FF5C}' | '\u{FF5E}' | '\u{FFE0}'..='\u{FFE6}' | '\u{FFE8}'..='\u{FFEE}' => true,
        '\u{1F000}'..='\u{1FAFF}' => true,
        _ => false,
    }
}

/// Whether the string has at least one character that is not a symbol
pub fn has_non_symbol(s: &str) -> bool {
    s.chars().any(|c| !is_symbol(c))
}

/// Split on any of the separator characters, dropping empty pieces
pub fn split_any<'a>(s: &'a str, separators: &str) -> Vec<&'a str> {
    s.split(|c: char| separators.contains(c))
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Get file modification time in milliseconds since epoch
pub fn mtime_ms(metadata: &std::fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|m| m.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Unix permission bits of an entry
#[cfg(unix)]
pub fn file_mode(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
pub fn file_mode(metadata: &std::fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Extension of a file name: the text after the last '.'
pub fn extension_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Stem of a file name: the text before the first '.'
pub fn stem_of(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
