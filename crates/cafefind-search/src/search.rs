//! The cache-first search flow.

use cafefind_core::{
    annotate, filter_open_now, AnnotatedVenue, Location, SearchSettings, StatusEvent,
};
use cafefind_db::filter_fresh;
use chrono::{DateTime, Local, Utc};

use crate::sink::StatusSink;
use crate::source::VenueSource;
use crate::store::VenueStore;

pub const SEARCHING_MESSAGE: &str = "Searching for coffee shops...";
pub const NO_RESULTS_MESSAGE: &str = "No coffee shops found nearby";

/// Result of one search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// Nearest first, capped at the requested maximum.
    pub venues: Vec<AnnotatedVenue>,
    /// Whether the external source was queried and returned venues.
    pub refreshed: bool,
}

/// Runs searches against a store, falling back to an external source.
#[derive(Debug, Clone)]
pub struct Searcher<S, F> {
    store: S,
    source: F,
    staleness_days: u32,
}

impl<S: VenueStore, F: VenueSource> Searcher<S, F> {
    pub fn new(store: S, source: F, staleness_days: u32) -> Self {
        Self {
            store,
            source,
            staleness_days,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    /// Search around `location` as of the current local time.
    pub async fn search<K: StatusSink>(
        &self,
        location: Location,
        settings: &SearchSettings,
        sink: &K,
    ) -> SearchOutcome {
        self.search_at(location, settings, Local::now(), sink).await
    }

    /// Search around `location` as of `now`.
    ///
    /// Freshness is judged against `now` in UTC; opening hours against its
    /// local wall-clock time.
    ///
    /// 1. Read nearby venues and drop stale ones.
    /// 2. With fewer than `min_results` left, fetch from the source and save
    ///    whatever it returns.
    /// 3. With no candidates at all, stop with a "no results" warning.
    /// 4. Otherwise re-read the store, annotate, and apply the opening filter.
    ///
    /// Fetch and save failures are reported to `sink` and the search carries on
    /// with what the store holds.
    pub async fn search_at<K: StatusSink>(
        &self,
        location: Location,
        settings: &SearchSettings,
        now: DateTime<Local>,
        sink: &K,
    ) -> SearchOutcome {
        sink.emit(StatusEvent::loading(SEARCHING_MESSAGE));

        let radius_km = settings.radius_km();
        let cached = self
            .store
            .nearby(location, radius_km, settings.max_results)
            .await;
        let cached_count = cached.len();
        let fresh = filter_fresh(cached, self.staleness_days, now.with_timezone(&Utc));
        tracing::debug!(
            cached = cached_count,
            fresh = fresh.len(),
            staleness_days = self.staleness_days,
            "read cached coffee shops"
        );

        let mut candidates = fresh.len();
        let mut refreshed = false;

        if fresh.len() < settings.min_results as usize {
            tracing::info!(
                fresh = fresh.len(),
                min_results = settings.min_results,
                "too few cached coffee shops, fetching from source"
            );
            match self.source.fetch_nearby(location, settings.radius_m).await {
                Ok(fetched) if !fetched.is_empty() => {
                    candidates = fetched.len();
                    refreshed = true;
                    match self.store.upsert(&fetched).await {
                        Ok(summary) => tracing::info!(
                            inserted = summary.inserted,
                            updated = summary.updated,
                            "saved coffee shops to database"
                        ),
                        Err(e) => {
                            tracing::error!(error = %e, "failed to save coffee shops");
                            sink.emit(StatusEvent::warning(e.to_string()));
                        }
                    }
                }
                Ok(_) => tracing::info!("source returned no coffee shops"),
                Err(e) => {
                    tracing::error!(error = %e, "failed to fetch coffee shops from source");
                    sink.emit(StatusEvent::error(format!("Error: {e}")));
                }
            }
        }

        if candidates == 0 {
            sink.emit(StatusEvent::warning(NO_RESULTS_MESSAGE));
            return SearchOutcome {
                venues: Vec::new(),
                refreshed,
            };
        }

        let stored = self
            .store
            .nearby(location, radius_km, settings.max_results)
            .await;
        let venues = filter_open_now(
            annotate(stored, now.naive_local()),
            settings.opening_filter,
        );

        if venues.is_empty() {
            sink.emit(StatusEvent::warning(NO_RESULTS_MESSAGE));
        } else {
            sink.emit(StatusEvent::success(format!(
                "Found {} coffee shops nearby",
                venues.len()
            )));
        }

        SearchOutcome { venues, refreshed }
    }
}
