//! Day-of-week policy and tabular rendering for availability deltas.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::diff::Delta;
use crate::model::DeltaEntry;

/// Heading printed above newly available entries.
const ADDED_HEADING: &str = "Newly available sites:";
/// Heading printed above entries that disappeared.
const REMOVED_HEADING: &str = "No longer available sites:";

/// Which weekdays make a date worth reporting.
pub type DayPolicy = fn(Weekday) -> bool;

/// Default policy: only Friday and Saturday nights are reportable.
#[must_use]
pub fn is_reportable(day: Weekday) -> bool {
    matches!(day, Weekday::Fri | Weekday::Sat)
}

/// Full uppercase name for a weekday, as printed in the report.
#[must_use]
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a single date fares under the day policy.
pub struct DayClass {
    /// Full uppercase weekday name.
    pub label: &'static str,
    /// Whether the date may appear in a report.
    pub included: bool,
}

/// Classify a date under the default policy.
#[must_use]
pub fn classify(date: NaiveDate) -> DayClass {
    classify_with(date, is_reportable)
}

/// Classify a date under a caller-supplied policy.
#[must_use]
pub fn classify_with(date: NaiveDate, policy: DayPolicy) -> DayClass {
    let day = date.weekday();
    DayClass {
        label: day_label(day),
        included: policy(day),
    }
}

/// Render a delta with the default Friday/Saturday policy.
#[must_use]
pub fn render(delta: &Delta) -> String {
    render_with_policy(delta, is_reportable)
}

/// Render a delta as an "added" and a "removed" table.
///
/// Entries whose weekday the policy rejects are dropped. Survivors are
/// sorted by campground, then date, then site, so identical deltas always
/// render byte-identically. A side with no survivors is omitted entirely;
/// if nothing survives the result is the empty string.
#[must_use]
pub fn render_with_policy(delta: &Delta, policy: DayPolicy) -> String {
    let mut lines = Vec::new();

    append_section(&mut lines, ADDED_HEADING, &delta.added, policy);
    if !lines.is_empty() && has_reportable(&delta.removed, policy) {
        lines.push(String::new());
    }
    append_section(&mut lines, REMOVED_HEADING, &delta.removed, policy);

    if lines.is_empty() {
        String::new()
    } else {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn has_reportable<'entries, I>(entries: I, policy: DayPolicy) -> bool
where
    I: IntoIterator<Item = &'entries DeltaEntry>,
{
    entries
        .into_iter()
        .any(|entry| classify_with(entry.date, policy).included)
}

fn append_section<'entries, I>(
    lines: &mut Vec<String>,
    heading: &str,
    entries: I,
    policy: DayPolicy,
) where
    I: IntoIterator<Item = &'entries DeltaEntry>,
{
    let mut rows: Vec<&DeltaEntry> = entries
        .into_iter()
        .filter(|entry| classify_with(entry.date, policy).included)
        .collect();

    if rows.is_empty() {
        return;
    }

    rows.sort_by(|lhs, rhs| {
        (&lhs.campground, lhs.date, &lhs.site).cmp(&(&rhs.campground, rhs.date, &rhs.site))
    });

    lines.push(heading.to_owned());
    lines.push(row_line("Day", "Date", "Site", "Campground"));
    for row in rows {
        lines.push(row_line(
            classify_with(row.date, policy).label,
            &row.date.format("%Y-%m-%d").to_string(),
            &row.site.0,
            &row.campground.0,
        ));
    }
}

fn row_line(day: &str, date: &str, site: &str, campground: &str) -> String {
    format!("{day:<10} {date:<12} {site:<10} {campground}")
}
