//! Terminal rendering of the upcoming and archive views.

use chrono::NaiveDate;
use crossterm::style::{Color, Stylize};
use docket_core::dates::{format_date, priority_badge, PriorityBadge, UPCOMING_WINDOW_DAYS};
use docket_core::projection::Projected;
use docket_core::ContentRecord;
use std::fmt::Write;

fn badge_color(badge: PriorityBadge) -> Color {
    match badge {
        PriorityBadge::Today => Color::Red,
        PriorityBadge::Tomorrow => Color::DarkYellow,
        PriorityBadge::Urgent => Color::Yellow,
        PriorityBadge::InDays(_) => Color::Green,
    }
}

fn type_label(record: &ContentRecord) -> String {
    match record.content_type() {
        Some(kind) if !kind.is_empty() => format!("[{}]", kind),
        _ => String::new(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn write_details(out: &mut String, record: &ContentRecord) {
    let case_line: Vec<&str> = [non_empty(&record.case), non_empty(&record.docket_no)]
        .into_iter()
        .flatten()
        .collect();
    if !case_line.is_empty() {
        let _ = writeln!(out, "        {}", case_line.join(" · "));
    }
    if let Some(description) = non_empty(&record.description) {
        let _ = writeln!(out, "        {}", description);
    }
    let links = [
        ("YouTube", non_empty(&record.youtube)),
        ("TikTok", non_empty(&record.tiktok)),
        ("X", non_empty(&record.x_com)),
    ];
    for (platform, url) in links {
        if let Some(url) = url {
            let _ = writeln!(out, "        {}: {}", platform, url);
        }
    }
}

pub fn render_upcoming(view: &[Projected<'_>], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", "Upcoming Content".bold(), view.len());

    if view.is_empty() {
        let _ = writeln!(out, "  No upcoming content in the next {} days", UPCOMING_WINDOW_DAYS);
        return out;
    }

    for entry in view {
        let record = entry.record;
        let badge = match priority_badge(record.publication_date(), today) {
            Some(badge) => format!("{:<9}", badge.to_string())
                .with(badge_color(badge))
                .bold()
                .to_string(),
            None => " ".repeat(9),
        };
        let _ = writeln!(
            out,
            "  #{:<4} {} {:<18} {} {}",
            entry.index,
            badge,
            format_date(record.publication_date()),
            type_label(record),
            record.post_title.as_deref().unwrap_or_default(),
        );
        write_details(&mut out, record);
    }
    out
}

pub fn render_archive(view: &[Projected<'_>], types: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", "Archive".bold(), view.len());
    if !types.is_empty() {
        let _ = writeln!(out, "  Types: {}", types.join(", "));
    }

    if view.is_empty() {
        let _ = writeln!(out, "  No publications match your filters");
        return out;
    }

    for entry in view {
        let record = entry.record;
        let _ = writeln!(
            out,
            "  #{:<4} {:<18} {} {}",
            entry.index,
            format_date(record.publication_date()),
            type_label(record),
            record.post_title.as_deref().unwrap_or_default(),
        );
        write_details(&mut out, record);
    }
    out
}
