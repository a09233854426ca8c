//! Text normalization for report output.
//!
//! The PDF encoder only gets a conservative character set: word characters,
//! whitespace, basic punctuation and the German extended Latin letters.
//! Everything else is stripped, whitespace runs collapse to a single space.

use crate::labels::{NOT_AVAILABLE, NOT_SPECIFIED};

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ch.is_whitespace()
        || matches!(ch, '-' | '.' | ',' | '!' | '?' | '(' | ')' | '/' | '@' | '€' | '°')
        || matches!(ch, 'ä' | 'ö' | 'ü' | 'Ä' | 'Ö' | 'Ü' | 'ß')
}

/// Sanitize `input`, falling back to `default` when the input is absent or
/// nothing printable remains. Never fails, never returns an empty string.
pub fn sanitize_or(input: Option<&str>, default: &str) -> String {
    let Some(raw) = input else {
        return default.to_string();
    };

    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if !is_allowed(ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    if out.is_empty() {
        default.to_string()
    } else {
        out
    }
}

/// Sanitize with the generic "nicht angegeben" default.
pub fn sanitize(input: &str) -> String {
    sanitize_or(Some(input), NOT_SPECIFIED)
}

/// Sanitize an optional field with the "nicht verfügbar" default.
pub fn sanitize_available(input: Option<&str>) -> String {
    sanitize_or(input, NOT_AVAILABLE)
}
