//! Staleness filtering for cached venues.

use cafefind_core::Venue;
use chrono::{DateTime, Duration, Utc};

/// Keep venues touched within the last `max_age_days` days.
///
/// A venue's age is measured from `updated_at`, falling back to
/// `created_at`. Venues with neither timestamp are dropped. Order is kept.
#[must_use]
pub fn filter_fresh(venues: Vec<Venue>, max_age_days: u32, now: DateTime<Utc>) -> Vec<Venue> {
    let max_age = Duration::days(i64::from(max_age_days));

    venues
        .into_iter()
        .filter(|venue| {
            venue
                .last_touched()
                .is_some_and(|touched| now - touched <= max_age)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafefind_core::SourceType;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-18T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn venue(id: i64, created: Option<i64>, updated: Option<i64>) -> Venue {
        let days_ago = |d: i64| now() - Duration::days(d);
        Venue {
            source_type: SourceType::Node,
            source_id: id,
            name: format!("Cafe {id}"),
            latitude: 0.0,
            longitude: 0.0,
            address: None,
            opening_hours: None,
            phone: None,
            website: None,
            suburb: None,
            city: None,
            distance_km: None,
            created_at: created.map(days_ago),
            updated_at: updated.map(days_ago),
        }
    }

    fn ids(venues: &[Venue]) -> Vec<i64> {
        venues.iter().map(|v| v.source_id).collect()
    }

    #[test]
    fn keeps_recent_and_drops_old() {
        let venues = vec![venue(1, None, Some(13)), venue(2, None, Some(15))];
        assert_eq!(ids(&filter_fresh(venues, 14, now())), vec![1]);
    }

    #[test]
    fn exactly_at_limit_is_kept() {
        let venues = vec![venue(1, Some(14), None)];
        assert_eq!(ids(&filter_fresh(venues, 14, now())), vec![1]);
    }

    #[test]
    fn updated_at_takes_precedence_over_created_at() {
        let venues = vec![venue(1, Some(40), Some(2)), venue(2, Some(3), Some(30))];
        assert_eq!(ids(&filter_fresh(venues, 14, now())), vec![1]);
    }

    #[test]
    fn falls_back_to_created_at() {
        let venues = vec![venue(1, Some(5), None)];
        assert_eq!(ids(&filter_fresh(venues, 14, now())), vec![1]);
    }

    #[test]
    fn venue_without_timestamps_is_stale() {
        let venues = vec![venue(1, None, None), venue(2, Some(1), None)];
        assert_eq!(ids(&filter_fresh(venues, 14, now())), vec![2]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_fresh(Vec::new(), 14, now()).is_empty());
    }
}
