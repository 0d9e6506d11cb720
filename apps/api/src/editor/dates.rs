//! Date picker serialization into the free-text `period` / `date` fields.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::DateFormat;

const MONTHS_ES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// End label for ongoing periods.
pub const CURRENT_LABEL: &str = "Actualidad";

/// What the user picked: a start date, an optional end date, and whether the
/// period is still ongoing (which overrides `end`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedPeriod {
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
}

/// Formats a single date. `TEXT` disables the picker and yields `None`.
pub fn format_date(date: NaiveDate, format: DateFormat) -> Option<String> {
    let formatted = match format {
        DateFormat::MonthYear => format!("{:02}/{}", date.month(), date.year()),
        DateFormat::YearMonth => format!("{}-{:02}", date.year(), date.month()),
        DateFormat::MonthNameYear => format!("{} {}", MONTHS_ES[date.month0() as usize], date.year()),
        DateFormat::DayMonthYear => {
            format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
        }
        DateFormat::Text => return None,
    };
    Some(formatted)
}

/// Joins start and end with `separator`. Without an end (and not ongoing)
/// only the start is printed; without a start nothing is produced.
pub fn format_period(period: &PickedPeriod, format: DateFormat, separator: &str) -> Option<String> {
    let start = format_date(period.start?, format)?;
    let end = if period.current {
        Some(CURRENT_LABEL.to_string())
    } else {
        period.end.and_then(|d| format_date(d, format))
    };
    Some(match end {
        Some(end) => format!("{start}{separator}{end}"),
        None => start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_format_date_patterns() {
        let date = d(2024, 3, 7);
        assert_eq!(format_date(date, DateFormat::MonthYear).as_deref(), Some("03/2024"));
        assert_eq!(format_date(date, DateFormat::YearMonth).as_deref(), Some("2024-03"));
        assert_eq!(format_date(date, DateFormat::MonthNameYear).as_deref(), Some("Mar 2024"));
        assert_eq!(format_date(date, DateFormat::DayMonthYear).as_deref(), Some("07/03/2024"));
        assert_eq!(format_date(date, DateFormat::Text), None);
    }

    #[test]
    fn test_spanish_month_names() {
        assert_eq!(format_date(d(2020, 1, 1), DateFormat::MonthNameYear).as_deref(), Some("Ene 2020"));
        assert_eq!(format_date(d(2020, 12, 1), DateFormat::MonthNameYear).as_deref(), Some("Dic 2020"));
    }

    #[test]
    fn test_period_current_overrides_end() {
        let period = PickedPeriod {
            start: Some(d(2021, 1, 15)),
            end: Some(d(2022, 6, 1)),
            current: true,
        };
        assert_eq!(
            format_period(&period, DateFormat::MonthYear, " - ").as_deref(),
            Some("01/2021 - Actualidad")
        );
    }

    #[test]
    fn test_period_with_custom_separator() {
        let period = PickedPeriod {
            start: Some(d(2018, 9, 1)),
            end: Some(d(2022, 6, 30)),
            current: false,
        };
        assert_eq!(
            format_period(&period, DateFormat::YearMonth, " – ").as_deref(),
            Some("2018-09 – 2022-06")
        );
    }

    #[test]
    fn test_period_start_only_and_missing_start() {
        let start_only = PickedPeriod {
            start: Some(d(2019, 5, 1)),
            ..PickedPeriod::default()
        };
        assert_eq!(
            format_period(&start_only, DateFormat::MonthYear, " - ").as_deref(),
            Some("05/2019")
        );
        let no_start = PickedPeriod {
            current: true,
            ..PickedPeriod::default()
        };
        assert_eq!(format_period(&no_start, DateFormat::MonthYear, " - "), None);
        assert_eq!(format_period(&start_only, DateFormat::Text, " - "), None);
    }
}
