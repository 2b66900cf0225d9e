//! Date normalization for loaded transaction tables
//!
//! Stored dates are meant to be `dd-mm-yyyy` text, but older rows or
//! hand-edited databases may hold ISO dates or looser formats. A whole
//! column is normalized at once so the format that fits most rows wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::DateOrder;
use crate::models::DateCell;

/// Format dates are written in
pub const STORAGE_FORMAT: &str = "%d-%m-%Y";

/// ISO calendar date format
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// `dd-mm-yyyy` shape: ten characters with dashes at positions 2 and 5
pub fn has_day_first_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10 && bytes[2] == b'-' && bytes[5] == b'-'
}

/// `yyyy-mm-dd` shape: ten characters with dashes at positions 4 and 7
pub fn has_iso_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-'
}

/// Which strict format a column is parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strict {
    DayFirst,
    Iso,
}

impl Strict {
    fn parse(self, text: &str) -> Option<NaiveDate> {
        let (shape_ok, format) = match self {
            Self::DayFirst => (has_day_first_shape(text), STORAGE_FORMAT),
            Self::Iso => (has_iso_shape(text), ISO_FORMAT),
        };
        if !shape_ok {
            return None;
        }
        NaiveDate::parse_from_str(text, format).ok()
    }
}

/// Normalize one column of stored dates
///
/// - an empty column stays empty
/// - a column of native dates is returned unchanged
/// - otherwise `dd-mm-yyyy` is tried first; when more than half the cells
///   fail, `yyyy-mm-dd` is tried too and kept only if it fails less often
/// - when every cell still fails, a permissive parse is attempted using
///   `order` for ambiguous numeric dates
///
/// Cells that cannot be read become `None`.
pub fn normalize_dates(cells: &[DateCell], order: DateOrder) -> Vec<Option<NaiveDate>> {
    if cells.is_empty() {
        return Vec::new();
    }

    if cells.iter().all(|c| matches!(c, DateCell::Native(_))) {
        return cells
            .iter()
            .map(|c| match c {
                DateCell::Native(date) => Some(*date),
                _ => None,
            })
            .collect();
    }

    let mut parsed = parse_column(cells, |text| Strict::DayFirst.parse(text));
    let mut failed = failures(&parsed);

    if failed * 2 > cells.len() {
        let iso = parse_column(cells, |text| Strict::Iso.parse(text));
        let iso_failed = failures(&iso);
        if iso_failed < failed {
            parsed = iso;
            failed = iso_failed;
        }
    }

    if failed == cells.len() {
        parsed = parse_column(cells, |text| parse_permissive(text, order));
    }

    parsed
}

fn parse_column<F>(cells: &[DateCell], parse: F) -> Vec<Option<NaiveDate>>
where
    F: Fn(&str) -> Option<NaiveDate>,
{
    cells
        .iter()
        .map(|cell| match cell {
            DateCell::Native(date) => Some(*date),
            DateCell::Text(text) => parse(text),
            DateCell::Missing => None,
        })
        .collect()
}

fn failures(parsed: &[Option<NaiveDate>]) -> usize {
    parsed.iter().filter(|d| d.is_none()).count()
}

const DAY_FIRST_FORMATS: [&str; 6] = [
    "%d-%m-%y", "%d/%m/%y", "%d.%m.%y", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y",
];

const MONTH_FIRST_FORMATS: [&str; 6] = [
    "%m-%d-%y", "%m/%d/%y", "%m.%d.%y", "%m-%d-%Y", "%m/%d/%Y", "%m.%d.%Y",
];

const YEAR_FIRST_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const NAMED_MONTH_FORMATS: [&str; 6] = [
    "%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y", "%b %d %Y", "%d-%b-%Y",
];

/// Best-effort parse of a single date string
///
/// Numeric dates with the year last are read in `order` first and in the
/// other order second. Two-digit years are accepted.
pub fn parse_permissive(text: &str, order: DateOrder) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (first, second) = match order {
        DateOrder::DayFirst => (DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS),
        DateOrder::MonthFirst => (MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS),
    };

    let date_formats = first
        .iter()
        .chain(second.iter())
        .chain(YEAR_FIRST_FORMATS.iter())
        .chain(NAMED_MONTH_FORMATS.iter());

    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .map(|datetime| datetime.date_naive())
        .ok()
}

/// Parse a date typed by the user: `dd-mm-yyyy` or `yyyy-mm-dd`
pub fn parse_input_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    Strict::DayFirst
        .parse(text)
        .or_else(|| Strict::Iso.parse(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn text(values: &[&str]) -> Vec<DateCell> {
        values.iter().map(|v| DateCell::Text(v.to_string())).collect()
    }

    #[test]
    fn test_empty_column() {
        assert!(normalize_dates(&[], DateOrder::DayFirst).is_empty());
    }

    #[test]
    fn test_day_first_column() {
        let parsed = normalize_dates(&text(&["15-03-2024", "01-12-2023"]), DateOrder::DayFirst);
        assert_eq!(parsed, vec![Some(date(2024, 3, 15)), Some(date(2023, 12, 1))]);
    }

    #[test]
    fn test_iso_column() {
        let parsed = normalize_dates(&text(&["2024-03-15"]), DateOrder::DayFirst);
        assert_eq!(parsed, vec![Some(date(2024, 3, 15))]);
    }

    #[test]
    fn test_native_column_unchanged() {
        let cells = vec![
            DateCell::Native(date(2024, 3, 15)),
            DateCell::Native(date(2020, 2, 29)),
        ];
        assert_eq!(
            normalize_dates(&cells, DateOrder::MonthFirst),
            vec![Some(date(2024, 3, 15)), Some(date(2020, 2, 29))]
        );
    }

    #[test]
    fn test_iso_majority_wins() {
        let parsed = normalize_dates(
            &text(&["2024-03-15", "2024-03-16", "15-03-2024"]),
            DateOrder::DayFirst,
        );
        assert_eq!(
            parsed,
            vec![Some(date(2024, 3, 15)), Some(date(2024, 3, 16)), None]
        );
    }

    #[test]
    fn test_minority_failures_keep_day_first() {
        let parsed = normalize_dates(
            &text(&["15-03-2024", "16-03-2024", "2024-03-17"]),
            DateOrder::DayFirst,
        );
        assert_eq!(
            parsed,
            vec![Some(date(2024, 3, 15)), Some(date(2024, 3, 16)), None]
        );
    }

    #[test]
    fn test_tie_keeps_day_first() {
        let parsed = normalize_dates(
            &text(&["15-03-2024", "2024-03-16", "garbage", "junk"]),
            DateOrder::DayFirst,
        );
        assert_eq!(parsed, vec![Some(date(2024, 3, 15)), None, None, None]);
    }

    #[test]
    fn test_missing_cells_are_none() {
        let cells = vec![DateCell::Text("15-03-2024".into()), DateCell::Missing];
        assert_eq!(
            normalize_dates(&cells, DateOrder::DayFirst),
            vec![Some(date(2024, 3, 15)), None]
        );
    }

    #[test]
    fn test_permissive_fallback_respects_order() {
        let cells = text(&["03/04/2024", "not a date"]);
        assert_eq!(
            normalize_dates(&cells, DateOrder::DayFirst),
            vec![Some(date(2024, 4, 3)), None]
        );
        assert_eq!(
            normalize_dates(&cells, DateOrder::MonthFirst),
            vec![Some(date(2024, 3, 4)), None]
        );
    }

    #[test]
    fn test_permissive_formats() {
        let order = DateOrder::DayFirst;
        assert_eq!(parse_permissive("13/04/24", order), Some(date(2024, 4, 13)));
        assert_eq!(
            parse_permissive("04/13/2024", order),
            Some(date(2024, 4, 13))
        );
        assert_eq!(
            parse_permissive("2024/04/13", order),
            Some(date(2024, 4, 13))
        );
        assert_eq!(
            parse_permissive("2024-04-13 08:30:00", order),
            Some(date(2024, 4, 13))
        );
        assert_eq!(
            parse_permissive("2024-04-13T08:30:00+02:00", order),
            Some(date(2024, 4, 13))
        );
        assert_eq!(
            parse_permissive("13 Apr 2024", order),
            Some(date(2024, 4, 13))
        );
        assert_eq!(parse_permissive("   ", order), None);
    }

    #[test]
    fn test_month_first_falls_back_to_day_first() {
        assert_eq!(
            parse_permissive("13/04/2024", DateOrder::MonthFirst),
            Some(date(2024, 4, 13))
        );
    }

    #[test]
    fn test_shapes() {
        assert!(has_day_first_shape("15-03-2024"));
        assert!(!has_day_first_shape("2024-03-15"));
        assert!(has_iso_shape("2024-03-15"));
        assert!(!has_iso_shape("15/03/2024"));
    }

    #[test]
    fn test_parse_input_date() {
        assert_eq!(parse_input_date("15-03-2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_input_date(" 2024-03-15 "), Some(date(2024, 3, 15)));
        assert_eq!(parse_input_date("15/03/2024"), None);
        assert_eq!(parse_input_date("31-02-2024"), None);
    }
}
