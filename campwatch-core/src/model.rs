//! Domain data structures for campgrounds, sites, and availability snapshots.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier for a single campsite within a campground.
pub struct SiteId(pub String);

impl fmt::Display for SiteId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, formatter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier for a campground (the named area a site belongs to).
pub struct CampgroundId(pub String);

impl fmt::Display for CampgroundId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, formatter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// One available site, together with the campground it belongs to.
pub struct AvailabilityEntry {
    /// Site identifier as reported by the feed.
    pub site: SiteId,
    /// Campground the site was listed under.
    pub campground: CampgroundId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Flattened (date, site, campground) triple produced by the differencer.
pub struct DeltaEntry {
    /// Date the site is available on.
    pub date: NaiveDate,
    /// Site identifier.
    pub site: SiteId,
    /// Campground the site belongs to.
    pub campground: CampgroundId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Everything the feed reported in one poll cycle, indexed by date.
///
/// A snapshot never holds the same (date, site, campground) combination
/// twice; inserting a duplicate is a no-op.
pub struct Snapshot {
    entries: BTreeMap<NaiveDate, BTreeSet<AvailabilityEntry>>,
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry as available on the given date.
    pub fn insert(&mut self, date: NaiveDate, entry: AvailabilityEntry) {
        self.entries.entry(date).or_default().insert(entry);
    }

    /// Whether the snapshot holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }

    /// Total number of (date, site, campground) triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Entries recorded for a single date, if any.
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> Option<&BTreeSet<AvailabilityEntry>> {
        self.entries.get(&date)
    }

    /// Iterate over all triples in date order.
    pub fn triples(&self) -> impl Iterator<Item = DeltaEntry> + '_ {
        self.entries.iter().flat_map(|(date, entries)| {
            entries.iter().map(|entry| DeltaEntry {
                date: *date,
                site: entry.site.clone(),
                campground: entry.campground.clone(),
            })
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Inclusive start/end range for a feed search.
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

#[derive(thiserror::Error, Debug)]
/// Invalid search configuration, fatal at startup.
pub enum ConfigError {
    /// No campground was requested.
    #[error("at least one campground id is required")]
    NoCampgrounds,
    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    ReversedRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
    /// A stay of zero nights was requested.
    #[error("nights must be at least 1")]
    ZeroNights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Validated parameters for one feed invocation.
pub struct SearchQuery {
    /// Date range to search within.
    pub range: DateRange,
    /// Campgrounds to search, never empty.
    pub campgrounds: Vec<CampgroundId>,
    /// Length of stay in nights, at least 1.
    pub nights: u32,
}

impl SearchQuery {
    /// Build a query, rejecting configurations the feed cannot serve.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the campground list is empty, the
    /// range is reversed, or `nights` is zero.
    pub fn new(
        range: DateRange,
        campgrounds: Vec<CampgroundId>,
        nights: u32,
    ) -> Result<Self, ConfigError> {
        if campgrounds.is_empty() {
            return Err(ConfigError::NoCampgrounds);
        }
        if range.end < range.start {
            return Err(ConfigError::ReversedRange {
                start: range.start,
                end: range.end,
            });
        }
        if nights == 0 {
            return Err(ConfigError::ZeroNights);
        }
        Ok(Self {
            range,
            campgrounds,
            nights,
        })
    }
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
    fn duplicate_insert_is_a_noop() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(date("2024-06-07"), entry("A12", "North Loop"));
        snapshot.insert(date("2024-06-07"), entry("A12", "North Loop"));

        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn triples_flatten_every_date() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(date("2024-06-07"), entry("A12", "North Loop"));
        snapshot.insert(date("2024-06-08"), entry("A12", "North Loop"));
        snapshot.insert(date("2024-06-08"), entry("B7", "North Loop"));

        assert_eq!(snapshot.triples().count(), 3);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn query_rejects_empty_campgrounds() {
        let range = DateRange {
            start: date("2024-06-01"),
            end: date("2024-06-30"),
        };
        let result = SearchQuery::new(range, Vec::new(), 1);
        assert!(matches!(result, Err(ConfigError::NoCampgrounds)));
    }

    #[test]
    fn query_rejects_reversed_range() {
        let range = DateRange {
            start: date("2024-06-30"),
            end: date("2024-06-01"),
        };
        let result = SearchQuery::new(range, vec![CampgroundId("232447".to_owned())], 1);
        assert!(matches!(result, Err(ConfigError::ReversedRange { .. })));
    }

    #[test]
    fn query_rejects_zero_nights() {
        let range = DateRange {
            start: date("2024-06-01"),
            end: date("2024-06-30"),
        };
        let result = SearchQuery::new(range, vec![CampgroundId("232447".to_owned())], 0);
        assert!(matches!(result, Err(ConfigError::ZeroNights)));
    }
}
