//! Sheet-name sanitizing

use crate::constants::SHEET_NAME_MAX_LEN;

/// Name used when sanitizing leaves nothing
pub const FALLBACK_SHEET_NAME: &str = "Unnamed";

/// Make a municipality name usable as a sheet name
///
/// Truncates to the sheet-name length limit (in characters), replaces
/// `/ \ :` with `-` and drops `? * [ ]`. Leading and trailing apostrophes
/// are not allowed either and are removed.
pub fn sanitize_sheet_name(name: &str) -> String {
    let truncated: String = name.chars().take(SHEET_NAME_MAX_LEN).collect();
    let cleaned: String = truncated
        .chars()
        .filter_map(|c| match c {
            '/' | '\\' | ':' => Some('-'),
            '?' | '*' | '[' | ']' => None,
            other => Some(other),
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').trim();

    if cleaned.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else if cleaned.eq_ignore_ascii_case("history") {
        // Reserved by spreadsheet applications
        format!("{}-1", cleaned)
    } else {
        cleaned.to_string()
    }
}
