use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, StarHistoryError};

/// Wire and CSV format of a starred timestamp.
pub const STARRED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The instant a user starred the repository. Who starred it is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StarEvent {
    starred_at: DateTime<Utc>,
}

impl StarEvent {
    pub fn new(starred_at: DateTime<Utc>) -> Self {
        Self { starred_at }
    }

    /// Parses `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn parse(value: &str) -> Result<Self> {
        let naive = NaiveDateTime::parse_from_str(value, STARRED_AT_FORMAT).map_err(|source| {
            StarHistoryError::InvalidTimestamp {
                value: value.to_string(),
                source,
            }
        })?;
        Ok(Self::new(naive.and_utc()))
    }

    pub fn starred_at(&self) -> DateTime<Utc> {
        self.starred_at
    }

    pub fn date(&self) -> NaiveDate {
        self.starred_at.date_naive()
    }
}

impl fmt::Display for StarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.starred_at.format(STARRED_AT_FORMAT))
    }
}

/// Star events in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarTimeline {
    events: Vec<StarEvent>,
}

impl StarTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: StarEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StarEvent> {
        self.events.iter()
    }
}

impl FromIterator<StarEvent> for StarTimeline {
    fn from_iter<I: IntoIterator<Item = StarEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StarTimeline {
    type Item = &'a StarEvent;
    type IntoIter = std::slice::Iter<'a, StarEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Position of the fetch loop. The retry budget spans the whole run and is
/// not refilled when the page advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u64,
    pub total_pages: u64,
    pub retries_left: u32,
}

impl PageCursor {
    pub fn new(total_stars: u64, page_size: u32, max_retries: u32) -> Self {
        Self {
            page: 1,
            total_pages: total_pages(total_stars, page_size),
            retries_left: max_retries,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page <= self.total_pages
    }

    pub fn advance(&mut self) {
        self.page += 1;
    }

    /// Spends one retry. Returns false once the budget is gone.
    pub fn take_retry(&mut self) -> bool {
        if self.retries_left == 0 {
            return false;
        }
        self.retries_left -= 1;
        true
    }
}

pub fn total_pages(total_stars: u64, page_size: u32) -> u64 {
    total_stars.div_ceil(u64::from(page_size.max(1)))
}

/// Cumulative star count per calendar day, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBucketSeries {
    points: Vec<(NaiveDate, u64)>,
}

impl DateBucketSeries {
    pub fn from_timeline(timeline: &StarTimeline) -> Self {
        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for event in timeline {
            *per_day.entry(event.date()).or_insert(0) += 1;
        }

        let mut running = 0;
        let points = per_day
            .into_iter()
            .map(|(date, count)| {
                running += count;
                (date, running)
            })
            .collect();

        Self { points }
    }

    pub fn points(&self) -> &[(NaiveDate, u64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|(date, _)| *date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(date, _)| *date)
    }

    /// Final cumulative total.
    pub fn total(&self) -> u64 {
        self.points.last().map(|(_, count)| *count).unwrap_or(0)
    }
}
