use crate::utils::constants::{CONSTANTS, EMPTY_FILENAME_REPLACEMENT};

/// Derives the channel file stem from a display name.
/// Every character outside `[A-Za-z0-9_-]` becomes one underscore.
pub fn sanitize_for_filename(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_FILENAME_REPLACEMENT.to_string();
    }
    CONSTANTS.re_filename.replace_all(text, "_").to_string()
}

/// Reverse of the file stem derivation for display purposes.
pub fn display_name_from_file_stem(stem: &str) -> String {
    stem.replace('_', " ").trim().to_string()
}

pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

pub fn join_url(base_url: &str, file_name: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        file_name.to_string()
    } else {
        format!("{base}/{file_name}")
    }
}
