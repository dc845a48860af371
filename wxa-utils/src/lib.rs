//! Shared parsing helpers for WXA crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    /// Date-only layouts accepted for `date_str`, tried in order
    pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

    /// Date-time layouts accepted for `date_str`; the time part is dropped
    pub const DATE_TIME_FORMATS: [&str; 3] =
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a calendar date from any of the supported layouts.
    ///
    /// Date-times (including RFC 3339) are truncated to their date.
    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| {
                DATE_TIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    /// Days since 0001-01-01 (day 1), used as a plain numeric date axis.
    pub fn date_to_day_number(date: &NaiveDate) -> i32 {
        use chrono::Datelike;
        date.num_days_from_ce()
    }

    /// Inverse of [`date_to_day_number`]
    pub fn day_number_to_date(days: i32) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(days)
    }

}

/// Number utility functions
pub mod numbers {
    /// Parse an integer cell. Leading `+` and surrounding whitespace are accepted.
    pub fn parse_integer(s: &str) -> Option<i64> {
        s.trim().parse::<i64>().ok()
    }

    /// Parse a numeric cell.
    ///
    /// Accepts anything `f64` parses, including exponents and `inf`.
    /// A parsed NaN is reported as `Some(NaN)`; callers decide whether that
    /// counts as missing.
    pub fn parse_number(s: &str) -> Option<f64> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        s.parse::<f64>().ok()
    }

    /// Parse a boolean cell (`true`/`false`, any case)
    pub fn parse_bool(s: &str) -> Option<bool> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("true") {
            Some(true)
        } else if s.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

}
