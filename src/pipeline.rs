use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clients::simmer_api::{ApiTransport, SimmerClient};
use crate::config::AppConfig;
use crate::credentials::load_api_key;
use crate::error::TickerResult;
use crate::render;
use crate::snapshot::{normalize, TickerSnapshot};
use crate::store::FileStore;
use crate::time::format_updated_at;

pub async fn run(
    cfg: &AppConfig,
    files: &dyn FileStore,
    api: Arc<dyn ApiTransport>,
) -> TickerResult<TickerSnapshot> {
    run_at(cfg, files, api, Utc::now()).await
}

/// One full refresh. Every fetch and every render step completes before the
/// first byte is written, so an upstream or template failure leaves all
/// outputs as they were.
pub async fn run_at(
    cfg: &AppConfig,
    files: &dyn FileStore,
    api: Arc<dyn ApiTransport>,
    now: DateTime<Utc>,
) -> TickerResult<TickerSnapshot> {
    let tz = cfg.display.tz()?;
    let api_key = load_api_key(files, &cfg.credentials_path)?;

    let client = SimmerClient::new(&cfg.api, api_key, api);
    let raw = client.fetch_all().await?;

    let normalized = normalize(&raw, cfg.display.max_trades);
    let snapshot = TickerSnapshot::build(
        &normalized,
        format_updated_at(now, tz, &cfg.display.timezone_label),
    );

    let current_html = files.read_to_string(&cfg.output.html_path)?;
    let outputs = render::render_outputs(&cfg.output, &snapshot, current_html)?;
    files.commit(&outputs)?;

    tracing::debug!(
        target: "pipeline",
        positions = snapshot.positions_count,
        trades = snapshot.last_trades.len(),
        "snapshot committed"
    );

    Ok(snapshot)
}
