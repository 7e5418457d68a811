//! Upcoming and archive views derived from the full collection.
//!
//! Projections borrow the collection and never modify it. Each entry keeps the
//! record's position in the collection, which is what edit and delete address.

use crate::dates::{days_until, is_upcoming, parse_timestamp};
use crate::types::ContentRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: {} (expected asc or desc)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Exact(String),
}

impl TypeFilter {
    pub fn matches(&self, record: &ContentRecord) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Exact(wanted) => record.content_type() == Some(wanted.as_str()),
        }
    }
}

impl From<&str> for TypeFilter {
    fn from(s: &str) -> Self {
        if s.is_empty() || s == "all" {
            TypeFilter::All
        } else {
            TypeFilter::Exact(s.to_string())
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeFilter::from(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingQuery {
    pub order: SortOrder,
    pub type_filter: TypeFilter,
}

impl Default for UpcomingQuery {
    fn default() -> Self {
        Self {
            order: SortOrder::Asc,
            type_filter: TypeFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveQuery {
    pub search: String,
    pub order: SortOrder,
    pub type_filter: TypeFilter,
}

impl Default for ArchiveQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            order: SortOrder::Desc,
            type_filter: TypeFilter::All,
        }
    }
}

/// A record as it appears in a view, with its position in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projected<'a> {
    #[serde(rename = "originalIdx")]
    pub index: usize,
    #[serde(flatten)]
    pub record: &'a ContentRecord,
}

/// Records due within the upcoming window, soonest first for `Asc`.
pub fn upcoming<'a>(
    records: &'a [ContentRecord],
    today: NaiveDate,
    query: &UpcomingQuery,
) -> Vec<Projected<'a>> {
    let mut view: Vec<Projected<'a>> = indexed(records)
        .filter(|p| p.record.publication_date().is_some())
        .filter(|p| is_upcoming(p.record.publication_date(), today))
        .filter(|p| query.type_filter.matches(p.record))
        .collect();
    sort_by_date(&mut view, query.order);

    debug!("Upcoming view: {} of {} records", view.len(), records.len());
    view
}

/// Records already published or due today, narrowed by search text and type.
pub fn archive<'a>(
    records: &'a [ContentRecord],
    today: NaiveDate,
    query: &ArchiveQuery,
) -> Vec<Projected<'a>> {
    let mut view: Vec<Projected<'a>> = indexed(records)
        .filter(|p| days_until(p.record.publication_date(), today) <= 0)
        .filter(|p| matches_search(p.record, &query.search))
        .filter(|p| query.type_filter.matches(p.record))
        .collect();
    sort_by_date(&mut view, query.order);

    debug!("Archive view: {} of {} records", view.len(), records.len());
    view
}

/// Case-insensitive substring match against title, case and description.
/// A field that is absent never matches, even for an empty search term.
pub fn matches_search(record: &ContentRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    record
        .search_fields()
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Distinct non-empty types in order of first appearance.
pub fn distinct_types(records: &[ContentRecord]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for kind in records.iter().filter_map(|r| r.content_type()) {
        if !kind.is_empty() && !types.iter().any(|t| t == kind) {
            types.push(kind.to_string());
        }
    }
    types
}

fn indexed(records: &[ContentRecord]) -> impl Iterator<Item = Projected<'_>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| Projected { index, record })
}

fn sort_by_date(view: &mut [Projected<'_>], order: SortOrder) {
    view.sort_by(|a, b| compare(a.record, b.record, order));
}

// Ordered by full timestamp, time of day included. Missing or unparsable
// dates order before every real date. On identical timestamps Primary goes
// first whatever the direction.
fn compare(a: &ContentRecord, b: &ContentRecord, order: SortOrder) -> Ordering {
    let date_a = a.publication_date().and_then(parse_timestamp);
    let date_b = b.publication_date().and_then(parse_timestamp);

    let by_date = match order {
        SortOrder::Asc => date_a.cmp(&date_b),
        SortOrder::Desc => date_b.cmp(&date_a),
    };

    by_date.then_with(|| primary_rank(a).cmp(&primary_rank(b)))
}

fn primary_rank(record: &ContentRecord) -> u8 {
    if record.is_primary() {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(title: &str, date: Option<&str>, kind: Option<&str>) -> ContentRecord {
        ContentRecord {
            post_title: Some(title.to_string()),
            publication_date: date.map(str::to_string),
            content_type: kind.map(str::to_string),
            ..Default::default()
        }
    }

    fn titles(view: &[Projected<'_>]) -> Vec<String> {
        view.iter()
            .map(|p| p.record.post_title.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_upcoming_window_and_order() {
        let today = day("2026-01-10");
        let records = vec![
            record("later", Some("2026-01-20"), Some("Primary")),
            record("today", Some("2026-01-10"), Some("Primary")),
            record("soon", Some("2026-01-17"), Some("Short (portrait)")),
            record("too far", Some("2026-02-20"), Some("Primary")),
            record("undated", None, Some("Primary")),
            record("past", Some("2026-01-01"), Some("Primary")),
        ];

        let view = upcoming(&records, today, &UpcomingQuery::default());
        assert_eq!(titles(&view), vec!["soon", "later"]);
        assert_eq!(view[0].index, 2);
        assert_eq!(view[1].index, 0);

        let desc = UpcomingQuery {
            order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(titles(&upcoming(&records, today, &desc)), vec!["later", "soon"]);
    }

    #[test]
    fn test_upcoming_type_filter_is_exact() {
        let today = day("2026-01-10");
        let records = vec![
            record("a", Some("2026-01-12"), Some("Primary")),
            record("b", Some("2026-01-13"), Some("Short (landscape)")),
            record("c", Some("2026-01-14"), Some("primary")),
        ];

        let query = UpcomingQuery {
            type_filter: "Primary".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(titles(&upcoming(&records, today, &query)), vec!["a"]);

        let query = UpcomingQuery {
            type_filter: "Short".parse().unwrap(),
            ..Default::default()
        };
        assert!(upcoming(&records, today, &query).is_empty());
    }

    #[test]
    fn test_primary_first_on_same_date() {
        let today = day("2026-01-10");
        let records = vec![
            record("short", Some("2026-01-15"), Some("Short (landscape)")),
            record("primary", Some("2026-01-15"), Some("Primary")),
        ];

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let query = UpcomingQuery {
                order,
                ..Default::default()
            };
            assert_eq!(titles(&upcoming(&records, today, &query)), vec!["primary", "short"]);
        }
    }

    #[test]
    fn test_time_of_day_orders_before_type() {
        let today = day("2026-01-10");
        let records = vec![
            record("evening primary", Some("2026-01-15T18:00:00"), Some("Primary")),
            record("morning short", Some("2026-01-15T09:00:00"), Some("Short (landscape)")),
        ];

        let view = upcoming(&records, today, &UpcomingQuery::default());
        assert_eq!(titles(&view), vec!["morning short", "evening primary"]);

        let desc = UpcomingQuery {
            order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(titles(&upcoming(&records, today, &desc)), vec!["evening primary", "morning short"]);
    }

    #[test]
    fn test_archive_primary_first_on_same_date() {
        let today = day("2026-01-20");
        let records = vec![
            record("older", Some("2026-01-14"), Some("Short (portrait)")),
            record("short", Some("2026-01-15"), Some("Short (landscape)")),
            record("primary", Some("2026-01-15"), Some("Primary")),
        ];

        let asc = ArchiveQuery {
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(titles(&archive(&records, today, &asc)), vec!["older", "primary", "short"]);

        let desc = ArchiveQuery {
            order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(titles(&archive(&records, today, &desc)), vec!["primary", "short", "older"]);
    }

    #[test]
    fn test_archive_includes_today_and_undated() {
        let today = day("2026-01-10");
        let records = vec![
            record("today", Some("2026-01-10"), Some("Primary")),
            record("tomorrow", Some("2026-01-11"), Some("Primary")),
            record("last week", Some("2026-01-03"), Some("Primary")),
            record("undated", None, Some("Primary")),
        ];

        let view = archive(&records, today, &ArchiveQuery::default());
        assert_eq!(titles(&view), vec!["today", "last week", "undated"]);

        let asc = ArchiveQuery {
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(titles(&archive(&records, today, &asc)), vec!["undated", "last week", "today"]);
    }

    #[test]
    fn test_archive_search_matches_case_field() {
        let today = day("2026-01-10");
        let mut hit = record("Immunity explained", Some("2026-01-02"), Some("Primary"));
        hit.case = Some("Trump v. United States".to_string());
        let miss = record("Tariffs explained", Some("2026-01-03"), Some("Primary"));
        let records = vec![hit, miss];

        let query = ArchiveQuery {
            search: "trump".to_string(),
            ..Default::default()
        };
        let view = archive(&records, today, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].index, 0);
    }

    #[test]
    fn test_archive_search_skips_records_without_text() {
        let today = day("2026-01-10");
        let records = vec![
            ContentRecord {
                publication_date: Some("2026-01-02".to_string()),
                ..Default::default()
            },
            record("", Some("2026-01-02"), None),
        ];

        let view = archive(&records, today, &ArchiveQuery::default());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].index, 1);
    }

    #[test]
    fn test_archive_type_filter() {
        let today = day("2026-01-10");
        let records = vec![
            record("a", Some("2026-01-02"), Some("Short (portrait)")),
            record("b", Some("2026-01-03"), Some("Primary")),
        ];

        let query = ArchiveQuery {
            type_filter: TypeFilter::Exact("Short (portrait)".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&archive(&records, today, &query)), vec!["a"]);
    }

    #[test]
    fn test_distinct_types() {
        let records = vec![
            record("a", None, Some("Primary")),
            record("b", None, Some("Short (portrait)")),
            record("c", None, Some("")),
            record("d", None, None),
            record("e", None, Some("Primary")),
        ];
        assert_eq!(distinct_types(&records), vec!["Primary", "Short (portrait)"]);
    }

    #[test]
    fn test_projected_serializes_original_index() {
        let records = vec![record("a", Some("2026-01-02"), None)];
        let view = archive(&records, day("2026-01-10"), &ArchiveQuery::default());
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value[0]["originalIdx"], 0);
        assert_eq!(value[0]["Post Title"], "a");
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "Primary".parse::<TypeFilter>().unwrap(),
            TypeFilter::Exact("Primary".to_string())
        );
    }
}
