use cafefind_overpass::OverpassClient;

/// Load every coffee venue in `country` into the store.
///
/// Refuses to run without `force`: the country query is heavy for the public
/// Overpass service.
///
/// # Errors
///
/// Returns an error when `force` is not set, the country code is invalid, the
/// Overpass request fails, or the upsert fails.
pub(crate) async fn run_seed(
    pool: &sqlx::PgPool,
    config: &cafefind_core::AppConfig,
    country: &str,
    force: bool,
) -> anyhow::Result<()> {
    if !force {
        anyhow::bail!(
            "seeding queries every coffee shop in {country} from the public Overpass API; \
             re-run with --force to proceed"
        );
    }

    let client = OverpassClient::from_app_config(config)?;
    let venues = client.fetch_country(country).await?;
    if venues.is_empty() {
        println!("no coffee shops found for {country}");
        return Ok(());
    }

    let summary = cafefind_db::upsert_venues(pool, &venues).await?;
    tracing::info!(
        country,
        inserted = summary.inserted,
        updated = summary.updated,
        "seed complete"
    );
    println!(
        "seeded {} coffee shops for {country} ({} new, {} updated)",
        summary.total(),
        summary.inserted,
        summary.updated
    );
    Ok(())
}
