//! Line-oriented parser turning raw feed output into a [`Snapshot`].
//!
//! The feed prints campground headers, site bullets, and date lists in a
//! loose hierarchy. The parser is a single forward pass over the lines
//! with a small carried state (current campground, current site); it is
//! total over arbitrary text and never fails.

use chrono::NaiveDate;

use crate::model::{AvailabilityEntry, CampgroundId, SiteId, Snapshot};

/// Marker identifying a campground header line.
const GROUP_MARKER: &str = "site(s) available out of";
/// Bullet prefix identifying a site line.
const SITE_MARKER: &str = "* Site";
/// Legend line printed before each block of date tokens.
const DATES_LEGEND: &str = "available on the following dates";
/// Canonical date token format used by the feed.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// State carried from one line to the next.
#[derive(Debug, Default)]
struct LineState {
    campground: Option<CampgroundId>,
    site: Option<SiteId>,
}

/// Parse captured feed output into a snapshot.
///
/// Unrecognized lines and tokens that are not dates are skipped silently;
/// text with no recognizable structure yields an empty snapshot.
#[must_use]
pub fn parse(raw: &str) -> Snapshot {
    let mut snapshot = Snapshot::new();
    let mut state = LineState::default();

    for line in raw.lines() {
        state = step(state, line, &mut snapshot);
    }

    snapshot
}

/// Process a single line, emitting entries into `snapshot` and returning
/// the state for the next line.
fn step(state: LineState, line: &str, snapshot: &mut Snapshot) -> LineState {
    if line.contains(GROUP_MARKER) {
        // "North Loop: 2 site(s) available out of 10" -> "North Loop".
        // The site carries over; the feed repeats the header per campground
        // without closing the previous site block.
        let name = line
            .split_once(':')
            .map_or(line, |(head, _rest)| head)
            .trim();
        return LineState {
            campground: Some(CampgroundId(name.to_owned())),
            site: state.site,
        };
    }

    if line.contains(SITE_MARKER) {
        // Site bullets before any campground header are meaningless.
        if state.campground.is_none() {
            return state;
        }
        let site = line
            .split_whitespace()
            .skip_while(|token| *token != "Site")
            .nth(1)
            .map(|token| SiteId(token.to_owned()));
        return LineState {
            campground: state.campground,
            site: site.or(state.site),
        };
    }

    if line.contains(DATES_LEGEND) {
        return state;
    }

    if let (Some(site), Some(campground)) = (&state.site, &state.campground) {
        for token in line.split_whitespace() {
            let Ok(date) = NaiveDate::parse_from_str(token, DATE_FORMAT) else {
                continue;
            };
            snapshot.insert(
                date,
                AvailabilityEntry {
                    site: site.clone(),
                    campground: campground.clone(),
                },
            );
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        text.parse().expect("valid test date")
    }

    fn entry(site: &str, campground: &str) -> AvailabilityEntry {
        AvailabilityEntry {
            site: SiteId(site.to_owned()),
            campground: CampgroundId(campground.to_owned()),
        }
    }

    #[test]
    fn parses_campground_site_and_dates() {
        let raw = "North Loop: 2 site(s) available out of 10\n\
                   * Site A12\n\
                   2024-06-07 2024-06-08\n";
        let snapshot = parse(raw);

        assert_eq!(snapshot.len(), 2);
        assert!(
            snapshot
                .on(date("2024-06-07"))
                .is_some_and(|entries| entries.contains(&entry("A12", "North Loop")))
        );
        assert!(
            snapshot
                .on(date("2024-06-08"))
                .is_some_and(|entries| entries.contains(&entry("A12", "North Loop")))
        );
    }

    #[test]
    fn site_before_any_campground_is_ignored() {
        let raw = "* Site B7\n2024-06-07\n";
        let snapshot = parse(raw);

        assert!(snapshot.is_empty());
    }

    #[test]
    fn dates_legend_line_is_skipped() {
        let raw = "North Loop: 1 site(s) available out of 10\n\
                   * Site A12\n\
                   Site A12 is available on the following dates:\n\
                   2024-06-07\n";
        let snapshot = parse(raw);

        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn non_date_tokens_are_skipped_silently() {
        let raw = "North Loop: 1 site(s) available out of 10\n\
                   * Site A12\n\
                   2024-06-07 not-a-date 2024-13-99 2024-06-08\n";
        let snapshot = parse(raw);

        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn campground_carries_forward_across_sites() {
        let raw = "North Loop: 2 site(s) available out of 10\n\
                   * Site A12\n\
                   2024-06-07\n\
                   * Site A14\n\
                   2024-06-07\n";
        let snapshot = parse(raw);

        let entries = snapshot.on(date("2024-06-07")).expect("entries for date");
        assert!(entries.contains(&entry("A12", "North Loop")));
        assert!(entries.contains(&entry("A14", "North Loop")));
    }

    #[test]
    fn new_campground_header_rebinds_following_dates() {
        let raw = "North Loop: 1 site(s) available out of 10\n\
                   * Site A12\n\
                   2024-06-07\n\
                   South Rim: 1 site(s) available out of 4\n\
                   * Site C3\n\
                   2024-06-08\n";
        let snapshot = parse(raw);

        assert!(
            snapshot
                .on(date("2024-06-08"))
                .is_some_and(|entries| entries.contains(&entry("C3", "South Rim")))
        );
    }

    #[test]
    fn duplicate_triples_collapse() {
        let raw = "North Loop: 1 site(s) available out of 10\n\
                   * Site A12\n\
                   2024-06-07 2024-06-07\n\
                   2024-06-07\n";
        let snapshot = parse(raw);

        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn garbage_yields_empty_snapshot() {
        let snapshot = parse("no structure here\njust words\n\n\t\n");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn parse_is_deterministic() {
        let raw = "North Loop: 2 site(s) available out of 10\n\
                   * Site A12\n\
                   2024-06-07 2024-06-08\n";
        assert_eq!(parse(raw), parse(raw));
    }
}
