//! Opening-hours evaluation for OSM `opening_hours` strings.
//!
//! Handles the common subset seen on cafes: `24/7`, `Mo-Fr 08:00-17:00`,
//! `Mo,We,Fr 09:00-18:00`, bare `08:00-17:00`, and `;`-separated lists of
//! those. Anything outside that subset yields [`OpenState::Unknown`] rather
//! than an error.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDateTime, Timelike};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::settings::OpeningFilter;
use crate::venue::Venue;

static DAY_TIME_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z,-]+)\s+(\d{1,2}):(\d{2})-(\d{1,2}):(\d{2})$").expect("valid regex")
});

static TIME_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})-(\d{1,2}):(\d{2})$").expect("valid regex")
});

/// Week-day tokens in OSM order; the index is `num_days_from_monday`.
const WEEK: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Whether a venue is open at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenState {
    Open,
    Closed,
    Unknown,
}

impl OpenState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == OpenState::Open
    }

    /// Short label for list and popup rendering.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OpenState::Open => "Open Now",
            OpenState::Closed => "Closed",
            OpenState::Unknown => "Unknown",
        }
    }
}

impl From<bool> for OpenState {
    fn from(open: bool) -> Self {
        if open {
            OpenState::Open
        } else {
            OpenState::Closed
        }
    }
}

/// A venue paired with its open/closed state at annotation time.
///
/// Only [`annotate`] produces these, so [`filter_open_now`] can never see a
/// venue whose state was not computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedVenue {
    #[serde(flatten)]
    pub venue: Venue,
    pub open_state: OpenState,
}

/// Evaluate `hours` at the wall-clock moment `at`.
///
/// Rules are tried in order. A day-qualified rule whose day-spec excludes
/// today is skipped, so a later rule can still match. The first rule that
/// applies to today decides the result; times are compared as `HHMM`
/// integers and both bounds are inclusive.
#[must_use]
pub fn is_open_at(hours: Option<&str>, at: NaiveDateTime) -> OpenState {
    let Some(hours) = hours.filter(|h| !h.is_empty()) else {
        return OpenState::Unknown;
    };
    if hours == "24/7" {
        return OpenState::Open;
    }

    let today = at.weekday().num_days_from_monday() as usize;
    let now = at.hour() * 100 + at.minute();

    for rule in hours.split(';').map(str::trim) {
        if let Some(caps) = DAY_TIME_RULE.captures(rule) {
            if !days_include(&caps[1], today) {
                continue;
            }
            if let Some((start, end)) = time_window(&caps, 2) {
                return OpenState::from((start..=end).contains(&now));
            }
            continue;
        }

        if let Some(caps) = TIME_RULE.captures(rule) {
            if let Some((start, end)) = time_window(&caps, 1) {
                return OpenState::from((start..=end).contains(&now));
            }
        }
    }

    OpenState::Unknown
}

/// Attach an [`OpenState`] to every venue, preserving order.
#[must_use]
pub fn annotate(venues: Vec<Venue>, at: NaiveDateTime) -> Vec<AnnotatedVenue> {
    venues
        .into_iter()
        .map(|venue| {
            let open_state = is_open_at(venue.opening_hours.as_deref(), at);
            AnnotatedVenue { venue, open_state }
        })
        .collect()
}

/// Keep only venues that are open when `filter` is [`OpeningFilter::OpenNow`].
///
/// Venues whose state is unknown are dropped under `OpenNow`.
#[must_use]
pub fn filter_open_now(venues: Vec<AnnotatedVenue>, filter: OpeningFilter) -> Vec<AnnotatedVenue> {
    match filter {
        OpeningFilter::Anytime => venues,
        OpeningFilter::OpenNow => venues
            .into_iter()
            .filter(|v| v.open_state.is_open())
            .collect(),
    }
}

/// Parse four consecutive capture groups `HH, MM, HH, MM` starting at `first`
/// into `(start, end)` as `HHMM` integers.
fn time_window(caps: &Captures<'_>, first: usize) -> Option<(u32, u32)> {
    let part = |i: usize| caps.get(first + i)?.as_str().parse::<u32>().ok();
    let start = part(0)? * 100 + part(1)?;
    let end = part(2)? * 100 + part(3)?;
    Some((start, end))
}

/// Whether the day index `today` (0 = Monday) is covered by `days`.
///
/// `days` is a comma-separated list of single days (`Mo`) and inclusive
/// ranges (`Mo-Fr`) over the `Mo..Su` sequence. A range whose start falls
/// after its end (`Fr-Mo`) covers no day. Unknown tokens never match.
fn days_include(days: &str, today: usize) -> bool {
    days.split(',').any(|item| match item.split_once('-') {
        Some((from, to)) => match (day_index(from), day_index(to)) {
            (Some(start), Some(end)) => (start..=end).contains(&today),
            _ => false,
        },
        None => day_index(item) == Some(today),
    })
}

fn day_index(token: &str) -> Option<usize> {
    WEEK.iter().position(|d| *d == token)
}

#[cfg(test)]
#[path = "hours_test.rs"]
mod tests;
