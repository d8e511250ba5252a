use chrono::{NaiveDate, NaiveDateTime};

/// Formats emitted by the SMAP export, with and without time component.
const DT_FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FMTS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse a SMAP timestamp string into NaiveDateTime.
/// Date-only values get a 00:00:00 time. Returns None for empty or
/// unparseable strings.
pub fn parse_smap_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DT_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Normalize a free-text name for joining: trim + uppercase.
/// Applied identically to ticket creators and directory keys.
pub fn normalize_name(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Trim a cell; empty result becomes None.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
