//! Date and currency formatting on the fixed report locale.
//!
//! All timestamps on an order are stored as RFC 3339 strings. The report
//! renders them in the fixed MEZ offset (UTC+1); a value that fails to parse
//! renders as-is rather than aborting composition.

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::labels::NOT_SPECIFIED;

const ZONE_LABEL: &str = "MEZ";

fn report_offset() -> UtcOffset {
    UtcOffset::from_hms(1, 0, 0).unwrap_or(UtcOffset::UTC)
}

fn parse_local(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339)
        .ok()
        .map(|t| t.to_offset(report_offset()))
}

/// `dd.mm.yyyy` for an already-parsed timestamp.
pub fn date_value(t: OffsetDateTime) -> String {
    let t = t.to_offset(report_offset());
    format!("{:02}.{:02}.{:04}", t.day(), u8::from(t.month()), t.year())
}

/// `dd.mm.yyyy HH:MM:SS MEZ` for an already-parsed timestamp.
pub fn date_time_value(t: OffsetDateTime) -> String {
    let t = t.to_offset(report_offset());
    format!(
        "{:02}.{:02}.{:04} {:02}:{:02}:{:02} {}",
        t.day(),
        u8::from(t.month()),
        t.year(),
        t.hour(),
        t.minute(),
        t.second(),
        ZONE_LABEL
    )
}

/// `dd.mm.yyyy` from an RFC 3339 string; unparseable input renders literally.
pub fn format_date(raw: &str) -> String {
    match parse_local(raw) {
        Some(t) => date_value(t),
        None => passthrough(raw),
    }
}

/// `dd.mm.yyyy HH:MM:SS MEZ` from an RFC 3339 string.
pub fn format_date_time(raw: &str) -> String {
    match parse_local(raw) {
        Some(t) => date_time_value(t),
        None => passthrough(raw),
    }
}

/// Filename-safe date (`dd-mm-yyyy`) for generated attachment names.
pub fn filename_date(t: OffsetDateTime) -> String {
    let t = t.to_offset(report_offset());
    format!("{:02}-{:02}-{:04}", t.day(), u8::from(t.month()), t.year())
}

fn passthrough(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// German money formatting: thousands '.', decimals ',' plus the € sign
/// (e.g. 16200.5 → "16.200,50 €"). Deterministic two decimals.
pub fn format_eur(v: f64) -> String {
    let s = format!("{:.2}", v);
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut out = String::new();
    let chars: Vec<char> = int_part.chars().collect();
    let mut cnt = 0;
    for i in (0..chars.len()).rev() {
        if cnt == 3 && chars[i] != '-' {
            out.push('.');
            cnt = 0;
        }
        out.push(chars[i]);
        cnt += 1;
    }
    let int_with_sep: String = out.chars().rev().collect();
    format!("{},{} €", int_with_sep, dec_part)
}

/// Round to two decimals; used for VAT and gross totals.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
