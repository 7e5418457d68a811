use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Returned by [`days_until`] for an absent or unparsable date.
pub const NO_DATE_DAYS: i64 = -999;

/// Number of days ahead, inclusive, that still counts as upcoming.
pub const UPCOMING_WINDOW_DAYS: i64 = 14;

pub const NO_DATE_LABEL: &str = "N/A";
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a stored publication date down to its calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    NaiveDate::parse_from_str(value, "%m/%d/%Y").ok()
}

/// Parse a stored publication date to the instant used for ordering.
/// Date-only values sit at midnight; offsets are normalised to UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime);
        }
    }
    NaiveDate::parse_from_str(value, "%m/%d/%Y")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Whole days from `today` to `date`, negative for past dates.
pub fn days_until(date: Option<&str>, today: NaiveDate) -> i64 {
    match date.and_then(parse_date) {
        Some(date) => (date - today).num_days(),
        None => NO_DATE_DAYS,
    }
}

/// Strictly after today and at most two weeks out. Same-day dates are not
/// upcoming.
pub fn is_upcoming(date: Option<&str>, today: NaiveDate) -> bool {
    let days = days_until(date, today);
    days > 0 && days <= UPCOMING_WINDOW_DAYS
}

/// Display form, e.g. `Sat, Jan 17, 2026`.
pub fn format_date(date: Option<&str>) -> String {
    match date {
        None => NO_DATE_LABEL.to_string(),
        Some(raw) if raw.trim().is_empty() => NO_DATE_LABEL.to_string(),
        Some(raw) => match parse_date(raw) {
            Some(date) => date.format("%a, %b %-d, %Y").to_string(),
            None => INVALID_DATE_LABEL.to_string(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityBadge {
    Today,
    Tomorrow,
    Urgent,
    InDays(i64),
}

impl PriorityBadge {
    pub fn from_days(days: i64) -> Self {
        match days {
            0 => PriorityBadge::Today,
            1 => PriorityBadge::Tomorrow,
            d if d <= 3 => PriorityBadge::Urgent,
            d => PriorityBadge::InDays(d),
        }
    }
}

impl fmt::Display for PriorityBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityBadge::Today => f.write_str("TODAY"),
            PriorityBadge::Tomorrow => f.write_str("TOMORROW"),
            PriorityBadge::Urgent => f.write_str("URGENT"),
            PriorityBadge::InDays(days) => write!(f, "in {}d", days),
        }
    }
}

/// No badge is shown for a record without a date.
pub fn priority_badge(date: Option<&str>, today: NaiveDate) -> Option<PriorityBadge> {
    match date {
        Some(raw) if !raw.is_empty() => Some(PriorityBadge::from_days(days_until(date, today))),
        _ => None,
    }
}
