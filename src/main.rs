//! Affinity batch entrypoint: scores every pair in a profiles file and prints rankings.

use std::path::PathBuf;

use anyhow::Context;
use mimalloc::MiMalloc;

use affinity::config::Config;
use affinity::oracle::build_oracle;
use affinity::pipeline::MatchingService;
use affinity::profile::Profile;
use affinity::store::build_store;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Results printed per viewer.
const DEFAULT_TOP_N: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let profiles_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: affinity <profiles.json>")?;

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        storage = ?config.store.backend,
        provider = ?config.oracle.provider,
        model = %config.oracle.model,
        workers = config.pipeline.worker_count,
        "Affinity starting"
    );

    let store = build_store(&config.store).await?;
    let oracle = build_oracle(&config.oracle)?;
    let service = MatchingService::new(store, oracle, config.pipeline.clone());

    if let Some(path) = &config.seed_path {
        let loaded = service
            .load_seed_file(path)
            .await
            .with_context(|| format!("failed to load seed file {}", path.display()))?;
        tracing::info!(records = loaded, path = %path.display(), "Seed loaded");
    }

    let raw = tokio::fs::read_to_string(&profiles_path)
        .await
        .with_context(|| format!("failed to read {}", profiles_path.display()))?;
    let profiles: Vec<Profile> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid profiles in {}", profiles_path.display()))?;

    tracing::info!(profiles = profiles.len(), "Scheduling pairwise scoring");

    for (i, primary) in profiles.iter().enumerate() {
        service.calculate_matches_async(primary.clone(), profiles[i + 1..].to_vec());
    }

    let store = std::sync::Arc::clone(service.store());
    let stats = service.shutdown().await;

    let mut rankings = serde_json::Map::new();
    for profile in &profiles {
        let top = store.top_matches(&profile.id, DEFAULT_TOP_N).await?;
        rankings.insert(profile.id.clone(), serde_json::to_value(top)?);
    }
    println!("{}", serde_json::to_string_pretty(&rankings)?);

    tracing::info!(
        completed = stats.completed,
        no_signal = stats.no_signal,
        transport_failures = stats.transport_failures,
        shape_failures = stats.shape_failures,
        store_failures = stats.store_failures,
        "Affinity run complete"
    );
    Ok(())
}
