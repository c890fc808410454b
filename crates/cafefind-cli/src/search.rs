use cafefind_core::{AppConfig, OpeningFilter, SearchSettings, StatusEvent};
use cafefind_overpass::OverpassClient;
use cafefind_search::{
    find_nearby, FixedLocation, NoSensor, PgVenueStore, Searcher, StatusSink, TracingSink,
};

use crate::output;

/// Arguments to `search` after clap parsing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchArgs {
    pub coordinates: Option<(f64, f64)>,
    pub radius: Option<u32>,
    pub min_results: Option<u32>,
    pub max_results: Option<u32>,
    pub open_now: bool,
    pub json: bool,
}

/// Prints status events to stderr so stdout carries only results.
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&self, event: StatusEvent) {
        eprintln!("{}", event.message);
    }
}

/// Layer command-line overrides over the configured defaults and validate.
pub(crate) fn resolve_settings(
    defaults: SearchSettings,
    args: &SearchArgs,
) -> anyhow::Result<SearchSettings> {
    let settings = SearchSettings {
        radius_m: args.radius.unwrap_or(defaults.radius_m),
        min_results: args.min_results.unwrap_or(defaults.min_results),
        max_results: args.max_results.unwrap_or(defaults.max_results),
        opening_filter: if args.open_now {
            OpeningFilter::OpenNow
        } else {
            defaults.opening_filter
        },
    };
    settings.validate()?;
    Ok(settings)
}

/// Run one search and print the results.
///
/// Without `--lat/--lon` there is no way to locate the user from a terminal,
/// so the search fails the same way an unsupported device would.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the coordinates are out of
/// range, the Overpass client cannot be built, or no location is available.
/// Fetch and save failures inside the search are reported as status lines.
pub(crate) async fn run_search(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let settings = resolve_settings(config.default_settings, args)?;
    let searcher = Searcher::new(
        PgVenueStore::new(pool.clone()),
        OverpassClient::from_app_config(config)?,
        config.staleness_days,
    );

    let outcome = if args.json {
        locate_and_search(&searcher, &settings, args.coordinates, &TracingSink).await?
    } else {
        locate_and_search(&searcher, &settings, args.coordinates, &ConsoleSink).await?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.venues)?);
    } else {
        output::print_venues(&outcome.venues);
    }
    Ok(())
}

async fn locate_and_search<K: StatusSink>(
    searcher: &Searcher<PgVenueStore, OverpassClient>,
    settings: &SearchSettings,
    coordinates: Option<(f64, f64)>,
    sink: &K,
) -> anyhow::Result<cafefind_search::SearchOutcome> {
    let outcome = match coordinates {
        Some((lat, lon)) => {
            let provider = FixedLocation::new(lat, lon)?;
            find_nearby(&provider, searcher, settings, sink).await
        }
        None => find_nearby(&NoSensor, searcher, settings, sink).await,
    };
    outcome.map_err(|e| anyhow::anyhow!("search aborted: {e}"))
}
