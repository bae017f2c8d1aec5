//! Legal date formatting.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Rendering style for contract dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateMode {
    /// "December 10, 2025"
    #[default]
    Long,
    /// "12/10/2025"
    Short,
}

/// Parse a stored date value.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps and `MM/DD/YYYY`. Returns `None` for anything else.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(input, "%m/%d/%Y").ok()
}

/// Format a date in the given mode.
pub fn format_date(date: NaiveDate, mode: DateMode) -> String {
    match mode {
        DateMode::Long => date.format("%B %-d, %Y").to_string(),
        DateMode::Short => date.format("%m/%d/%Y").to_string(),
    }
}

/// Format an optional stored date. Missing or unparseable input yields an
/// empty string.
pub fn format_contract_date(input: Option<&str>, mode: DateMode) -> String {
    match input.and_then(parse_date) {
        Some(date) => format_date(date, mode),
        None => {
            if let Some(raw) = input.filter(|s| !s.trim().is_empty()) {
                log::debug!("Unparseable contract date {:?}", raw);
            }
            String::new()
        }
    }
}

/// English ordinal suffix for a day of month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// "1st day of December, 2025"
pub fn signature_phrase(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{}{} day of {}",
        day,
        ordinal_suffix(day),
        date.format("%B, %Y")
    )
}

/// Signature-block form of an optional stored date; empty when missing or
/// unparseable.
pub fn format_signature_date(input: Option<&str>) -> String {
    input
        .and_then(parse_date)
        .map(signature_phrase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    #[test]
    fn test_format_date_modes() {
        assert_eq!(format_date(dec(10), DateMode::Long), "December 10, 2025");
        assert_eq!(format_date(dec(10), DateMode::Short), "12/10/2025");
        assert_eq!(format_date(dec(1), DateMode::Long), "December 1, 2025");
    }

    #[test]
    fn test_format_contract_date_inputs() {
        assert_eq!(
            format_contract_date(Some("2025-12-10"), DateMode::Long),
            "December 10, 2025"
        );
        assert_eq!(
            format_contract_date(Some("2025-12-10T15:30:00Z"), DateMode::Short),
            "12/10/2025"
        );
        assert_eq!(
            format_contract_date(Some("2025-12-10T15:30:00"), DateMode::Long),
            "December 10, 2025"
        );
        assert_eq!(
            format_contract_date(Some("12/10/2025"), DateMode::Long),
            "December 10, 2025"
        );
    }

    #[test]
    fn test_format_contract_date_invalid() {
        assert_eq!(format_contract_date(None, DateMode::Long), "");
        assert_eq!(format_contract_date(Some(""), DateMode::Long), "");
        assert_eq!(format_contract_date(Some("not a date"), DateMode::Short), "");
        assert_eq!(format_contract_date(Some("2025-02-30"), DateMode::Long), "");
    }

    #[test]
    fn test_ordinal_suffix() {
        let expected = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in expected {
            assert_eq!(ordinal_suffix(day), suffix, "day {}", day);
        }
    }

    #[test]
    fn test_signature_phrase() {
        assert_eq!(signature_phrase(dec(1)), "1st day of December, 2025");
        assert_eq!(signature_phrase(dec(2)), "2nd day of December, 2025");
        assert_eq!(signature_phrase(dec(3)), "3rd day of December, 2025");
        assert_eq!(signature_phrase(dec(10)), "10th day of December, 2025");
        assert_eq!(signature_phrase(dec(12)), "12th day of December, 2025");
        assert_eq!(signature_phrase(dec(22)), "22nd day of December, 2025");
    }

    #[test]
    fn test_format_signature_date_missing() {
        assert_eq!(format_signature_date(None), "");
        assert_eq!(format_signature_date(Some("garbage")), "");
        assert_eq!(
            format_signature_date(Some("2025-12-03")),
            "3rd day of December, 2025"
        );
    }
}
