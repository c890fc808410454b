//! Search flow tests against in-memory store and source fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use cafefind_core::{
    Location, LocationMode, NewVenue, OpenState, OpeningFilter, SearchSettings, Severity,
    SourceType, StatusEvent, Venue,
};
use cafefind_db::UpsertSummary;
use cafefind_search::{
    find_nearby, FixedLocation, LocateError, NoSensor, Searcher, VenueSource, VenueStore,
    WriteError, NO_RESULTS_MESSAGE, SEARCHING_MESSAGE,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeStore {
    rows: Mutex<Vec<Venue>>,
    reads: AtomicUsize,
    writes: Mutex<Vec<Vec<NewVenue>>>,
    searches: Mutex<Vec<(Location, LocationMode, f64)>>,
    fail_writes: bool,
}

impl FakeStore {
    fn with_rows(rows: Vec<Venue>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn writes(&self) -> Vec<Vec<NewVenue>> {
        self.writes.lock().unwrap().clone()
    }
}

impl VenueStore for FakeStore {
    async fn nearby(&self, _location: Location, _radius_km: f64, max_results: u32) -> Vec<Venue> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        rows.iter().take(max_results as usize).cloned().collect()
    }

    async fn upsert(&self, venues: &[NewVenue]) -> Result<UpsertSummary, WriteError> {
        self.writes.lock().unwrap().push(venues.to_vec());
        if self.fail_writes {
            return Err(WriteError::Rejected("disk full".to_string()));
        }

        let mut rows = self.rows.lock().unwrap();
        let mut summary = UpsertSummary::default();
        for new in venues {
            let venue = stored(new, Utc::now());
            match rows
                .iter_mut()
                .find(|r| r.source_type == new.source_type && r.source_id == new.source_id)
            {
                Some(existing) => {
                    *existing = venue;
                    summary.updated += 1;
                }
                None => {
                    rows.push(venue);
                    summary.inserted += 1;
                }
            }
        }
        Ok(summary)
    }

    async fn record_search(&self, location: Location, mode: LocationMode, radius_km: f64) {
        self.searches.lock().unwrap().push((location, mode, radius_km));
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct FakeFetchError(String);

struct FakeSource {
    result: Result<Vec<NewVenue>, String>,
    calls: AtomicUsize,
}

impl FakeSource {
    fn returning(venues: Vec<NewVenue>) -> Self {
        Self {
            result: Ok(venues),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VenueSource for FakeSource {
    type Error = FakeFetchError;

    async fn fetch_nearby(
        &self,
        _location: Location,
        _radius_m: u32,
    ) -> Result<Vec<NewVenue>, FakeFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(FakeFetchError)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn origin() -> Location {
    Location {
        lat: -41.2865,
        lon: 174.7762,
    }
}

/// Wednesday 14 October 2026, 09:00 local time.
fn wednesday_morning() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 10, 14, 9, 0, 0)
        .single()
        .expect("unambiguous local time")
}

fn new_venue(id: i64, hours: Option<&str>) -> NewVenue {
    NewVenue {
        source_type: SourceType::Node,
        source_id: id,
        name: format!("Cafe {id}"),
        latitude: -41.2865,
        longitude: 174.7762,
        address: None,
        opening_hours: hours.map(str::to_string),
        phone: None,
        website: None,
        suburb: None,
        city: None,
    }
}

fn stored(new: &NewVenue, touched: DateTime<Utc>) -> Venue {
    Venue {
        source_type: new.source_type,
        source_id: new.source_id,
        name: new.name.clone(),
        latitude: new.latitude,
        longitude: new.longitude,
        address: new.address.clone(),
        opening_hours: new.opening_hours.clone(),
        phone: new.phone.clone(),
        website: new.website.clone(),
        suburb: new.suburb.clone(),
        city: new.city.clone(),
        distance_km: Some(0.1),
        created_at: Some(touched),
        updated_at: Some(touched),
    }
}

/// A cached venue last touched `age_days` before [`wednesday_morning`].
fn cached(id: i64, age_days: i64, hours: Option<&str>) -> Venue {
    let touched = wednesday_morning().with_timezone(&Utc) - Duration::days(age_days);
    stored(&new_venue(id, hours), touched)
}

fn settings(min_results: u32) -> SearchSettings {
    SearchSettings {
        min_results,
        ..SearchSettings::default()
    }
}

fn messages(sink: &Mutex<Vec<StatusEvent>>) -> Vec<(Severity, String)> {
    sink.lock()
        .unwrap()
        .iter()
        .map(|e| (e.severity, e.message.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Section 1: Cache-first flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn too_few_fresh_results_fetch_and_save_then_reread() {
    let store = FakeStore::with_rows(vec![cached(1, 1, None), cached(2, 3, None)]);
    let fetched = vec![new_venue(10, None), new_venue(11, None), new_venue(12, None)];
    let searcher = Searcher::new(store, FakeSource::returning(fetched.clone()), 14);
    let sink = Mutex::new(Vec::new());

    let outcome = searcher
        .search_at(origin(), &settings(5), wednesday_morning(), &sink)
        .await;

    assert_eq!(searcher.source().calls(), 1);
    assert_eq!(searcher.store().writes(), vec![fetched]);
    assert_eq!(searcher.store().reads(), 2, "final read must follow the write");
    assert!(outcome.refreshed);
    assert_eq!(outcome.venues.len(), 5);
    assert_eq!(
        messages(&sink),
        vec![
            (Severity::Loading, SEARCHING_MESSAGE.to_string()),
            (Severity::Success, "Found 5 coffee shops nearby".to_string()),
        ]
    );
}

#[tokio::test]
async fn enough_fresh_results_skip_the_source() {
    let rows = (1..=10).map(|id| cached(id, 2, None)).collect();
    let searcher = Searcher::new(FakeStore::with_rows(rows), FakeSource::returning(vec![]), 14);
    let sink = Mutex::new(Vec::new());

    let outcome = searcher
        .search_at(origin(), &settings(5), wednesday_morning(), &sink)
        .await;

    assert_eq!(searcher.source().calls(), 0);
    assert!(searcher.store().writes().is_empty());
    assert!(!outcome.refreshed);
    assert_eq!(outcome.venues.len(), 10);
    assert_eq!(
        messages(&sink).last(),
        Some(&(Severity::Success, "Found 10 coffee shops nearby".to_string()))
    );
}

#[tokio::test]
async fn stale_cache_counts_as_missing() {
    let rows = (1..=6).map(|id| cached(id, 15, None)).collect();
    let searcher = Searcher::new(
        FakeStore::with_rows(rows),
        FakeSource::returning(vec![new_venue(20, None)]),
        14,
    );
    let sink = Mutex::new(Vec::new());

    searcher
        .search_at(origin(), &settings(5), wednesday_morning(), &sink)
        .await;

    assert_eq!(searcher.source().calls(), 1);
    assert_eq!(searcher.store().writes().len(), 1);
}

#[tokio::test]
async fn nothing_cached_and_nothing_fetched_reports_no_results() {
    let searcher = Searcher::new(FakeStore::default(), FakeSource::returning(vec![]), 14);
    let sink = Mutex::new(Vec::new());

    let outcome = searcher
        .search_at(origin(), &settings(5), wednesday_morning(), &sink)
        .await;

    assert!(outcome.venues.is_empty());
    assert!(searcher.store().writes().is_empty(), "empty fetch is not saved");
    assert_eq!(searcher.store().reads(), 1, "no final read without candidates");
    assert_eq!(
        messages(&sink),
        vec![
            (Severity::Loading, SEARCHING_MESSAGE.to_string()),
            (Severity::Warning, NO_RESULTS_MESSAGE.to_string()),
        ]
    );
}

// ---------------------------------------------------------------------------
// Section 2: Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_failure_reports_error_and_keeps_cached_results() {
    let store = FakeStore::with_rows(vec![cached(1, 1, None), cached(2, 1, None)]);
    let searcher = Searcher::new(store, FakeSource::failing("overpass is down"), 14);
    let sink = Mutex::new(Vec::new());

    let outcome = searcher
        .search_at(origin(), &settings(5), wednesday_morning(), &sink)
        .await;

    assert!(searcher.store().writes().is_empty());
    assert_eq!(outcome.venues.len(), 2);
    assert_eq!(
        messages(&sink),
        vec![
            (Severity::Loading, SEARCHING_MESSAGE.to_string()),
            (Severity::Error, "Error: overpass is down".to_string()),
            (Severity::Success, "Found 2 coffee shops nearby".to_string()),
        ]
    );
}

#[tokio::test]
async fn fetch_failure_with_empty_cache_ends_with_no_results() {
    let searcher = Searcher::new(FakeStore::default(), FakeSource::failing("timeout"), 14);
    let sink = Mutex::new(Vec::new());

    let outcome = searcher
        .search_at(origin(), &settings(5), wednesday_morning(), &sink)
        .await;

    assert!(outcome.venues.is_empty());
    let severities: Vec<Severity> = messages(&sink).into_iter().map(|(s, _)| s).collect();
    assert_eq!(
        severities,
        vec![Severity::Loading, Severity::Error, Severity::Warning]
    );
}

#[tokio::test]
async fn write_failure_warns_and_still_rereads() {
    let store = FakeStore {
        fail_writes: true,
        ..FakeStore::with_rows(vec![cached(1, 1, None)])
    };
    let searcher = Searcher::new(
        store,
        FakeSource::returning(vec![new_venue(7, None), new_venue(8, None)]),
        14,
    );
    let sink = Mutex::new(Vec::new());

    let outcome = searcher
        .search_at(origin(), &settings(5), wednesday_morning(), &sink)
        .await;

    assert_eq!(searcher.store().writes().len(), 1);
    assert_eq!(searcher.store().reads(), 2);
    assert_eq!(outcome.venues.len(), 1);
    assert_eq!(
        messages(&sink),
        vec![
            (Severity::Loading, SEARCHING_MESSAGE.to_string()),
            (
                Severity::Warning,
                "failed to save coffee shops: disk full".to_string()
            ),
            (Severity::Success, "Found 1 coffee shops nearby".to_string()),
        ]
    );
}

// ---------------------------------------------------------------------------
// Section 3: Opening filter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_now_keeps_only_open_venues() {
    let rows = vec![
        cached(1, 1, Some("24/7")),
        cached(2, 1, Some("Mo-Fr 18:00-19:00")),
        cached(3, 1, None),
    ];
    let searcher = Searcher::new(FakeStore::with_rows(rows), FakeSource::returning(vec![]), 14);
    let sink = Mutex::new(Vec::new());
    let open_now = SearchSettings {
        min_results: 3,
        opening_filter: OpeningFilter::OpenNow,
        ..SearchSettings::default()
    };

    let outcome = searcher
        .search_at(origin(), &open_now, wednesday_morning(), &sink)
        .await;

    assert_eq!(outcome.venues.len(), 1);
    assert_eq!(outcome.venues[0].venue.source_id, 1);
    assert_eq!(outcome.venues[0].open_state, OpenState::Open);
}

#[tokio::test]
async fn anytime_annotates_every_venue_in_store_order() {
    let rows = vec![
        cached(1, 1, Some("Mo-Fr 08:00-17:00")),
        cached(2, 1, Some("08:00-08:30")),
        cached(3, 1, Some("Sa-Su 08:00-17:00")),
    ];
    let searcher = Searcher::new(FakeStore::with_rows(rows), FakeSource::returning(vec![]), 14);
    let sink = Mutex::new(Vec::new());

    let outcome = searcher
        .search_at(origin(), &settings(3), wednesday_morning(), &sink)
        .await;

    let states: Vec<(i64, OpenState)> = outcome
        .venues
        .iter()
        .map(|v| (v.venue.source_id, v.open_state))
        .collect();
    assert_eq!(
        states,
        vec![
            (1, OpenState::Open),
            (2, OpenState::Closed),
            (3, OpenState::Unknown),
        ]
    );
}

#[tokio::test]
async fn open_now_with_nothing_open_reports_no_results() {
    let rows = vec![cached(1, 1, Some("Sa 10:00-12:00"))];
    let searcher = Searcher::new(FakeStore::with_rows(rows), FakeSource::returning(vec![]), 14);
    let sink = Mutex::new(Vec::new());
    let open_now = SearchSettings {
        min_results: 1,
        opening_filter: OpeningFilter::OpenNow,
        ..SearchSettings::default()
    };

    let outcome = searcher
        .search_at(origin(), &open_now, wednesday_morning(), &sink)
        .await;

    assert!(outcome.venues.is_empty());
    assert_eq!(
        messages(&sink).last(),
        Some(&(Severity::Warning, NO_RESULTS_MESSAGE.to_string()))
    );
}

// ---------------------------------------------------------------------------
// Section 4: Locate then search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_nearby_reports_location_and_logs_search() {
    let fresh = stored(&new_venue(1, None), Utc::now());
    let searcher = Searcher::new(
        FakeStore::with_rows(vec![fresh]),
        FakeSource::returning(vec![]),
        14,
    );
    let sink = Mutex::new(Vec::new());
    let provider = FixedLocation::from(origin());

    let outcome = find_nearby(&provider, &searcher, &settings(1), &sink)
        .await
        .expect("fixed location always resolves");

    assert_eq!(outcome.venues.len(), 1);
    let events = messages(&sink);
    assert_eq!(
        events[0],
        (
            Severity::Success,
            "Location found: -41.2865, 174.7762".to_string()
        )
    );
    assert_eq!(events[1].1, SEARCHING_MESSAGE);

    let searches = searcher.store().searches.lock().unwrap().clone();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].1, LocationMode::MapCenter);
    assert!((searches[0].2 - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn find_nearby_aborts_when_location_is_unavailable() {
    let searcher = Searcher::new(FakeStore::default(), FakeSource::returning(vec![]), 14);
    let sink = Mutex::new(Vec::new());

    let err = find_nearby(&NoSensor, &searcher, &settings(5), &sink)
        .await
        .unwrap_err();

    assert_eq!(err, LocateError::Unsupported);
    assert_eq!(searcher.store().reads(), 0);
    assert_eq!(searcher.source().calls(), 0);
    assert_eq!(
        messages(&sink),
        vec![(
            Severity::Error,
            "Error: Geolocation is not supported".to_string()
        )]
    );
}
