//! User input validation.
//!
//! Raw text is trimmed, bounded, and (by default) markup-escaped before it
//! is allowed into the conversation log. Rejection is soft: empty input
//! yields `None`, a turn that changes nothing. Truncation is silent and
//! happens before escaping, so the character cap applies to what the user
//! typed rather than to entity-expanded text.

/// Validate raw user input, returning the sanitized text or `None` when
/// there is nothing to process.
pub fn validate(raw: &str, max_chars: usize, escape_markup: bool) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let bounded: String = trimmed.chars().take(max_chars).collect();

    if escape_markup {
        Some(escape(&bounded))
    } else {
        Some(bounded)
    }
}

/// HTML-entity escape the five markup-significant characters.
///
/// `&` must go first or the later replacements would be double-escaped.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
