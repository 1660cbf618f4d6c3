mod clients;
mod config;
mod credentials;
mod error;
mod ops;
mod pipeline;
mod render;
mod snapshot;
mod store;
mod time;

use std::sync::Arc;

use crate::clients::simmer_api::HttpTransport;
use crate::error::TickerResult;
use crate::store::FsStore;

#[tokio::main]
async fn main() -> TickerResult<()> {
    let cfg = config::load_config()?;
    ops::logging::init(&cfg.infra.log_level)?;

    tracing::debug!(
        target: "boot",
        base_url = %cfg.api.base_url,
        credentials = %cfg.credentials_path.display(),
        "simmer-ticker starting"
    );

    let transport = Arc::new(HttpTransport::new(cfg.api.request_timeout_ms)?);
    let snapshot = pipeline::run(&cfg, &FsStore, transport).await?;

    tracing::info!(
        target: "render",
        json = %cfg.output.json_path.display(),
        js = %cfg.output.js_path.display(),
        html = %cfg.output.html_path.display(),
        trades = snapshot.last_trades.len(),
        "updated ticker data"
    );

    Ok(())
}
