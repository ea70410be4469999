use anyhow::Result;
use compute::config::DashboardConfig;
use compute::headless_page;
use tracing::{debug, info, trace};

use super::current_environment;

/// Requests `endpoint` from the simulated API and waits out its latency.
pub async fn run_playground(config: DashboardConfig, endpoint: &str) -> Result<String> {
    trace!("Entering run_playground");
    let delay = config.playground_delay();
    let mut page = headless_page(config, current_environment())?;

    info!("Requesting {}", endpoint);
    page.request_endpoint(endpoint);

    debug!("Waiting {:?} for simulated response", delay);
    tokio::time::sleep(delay).await;
    page.advance(delay);

    let view = page.playground();
    debug!(status = ?view.status, "Playground answered");
    Ok(view.output.clone())
}
