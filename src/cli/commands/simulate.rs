use anyhow::{Result, bail};
use common::Region;
use compute::charts::ChartCall;
use compute::config::DashboardConfig;
use compute::headless_page;
use tracing::{debug, info, warn};

use super::current_environment;

/// Runs `ticks` price ticks with the dashboard visible and returns one
/// ticker line per tick.
pub async fn simulate(
    config: DashboardConfig,
    ticks: u32,
    region: Option<&str>,
    realtime: bool,
) -> Result<String> {
    let interval = config.tick_interval();
    let mut page = headless_page(config, current_environment())?;
    page.navigate("dashboard");

    if let Some(region) = region {
        if page.change_region(region).is_none() {
            let known: Vec<_> = Region::ALL.iter().map(|r| r.id()).collect();
            bail!("Unknown region: {} (expected one of {})", region, known.join(", "));
        }
        info!("Switched to region {}", page.region().label());
    }

    let mut lines = Vec::with_capacity(ticks as usize);
    for tick in 1..=ticks {
        if realtime {
            tokio::time::sleep(interval).await;
        }
        page.advance(interval);
        let line = format!("#{:<3} {}", tick, page.ticker_text());
        debug!("{}", line);
        lines.push(line);
    }

    let updates = page
        .charts()
        .backend()
        .count(|call| matches!(call, ChartCall::Update { .. }));
    if updates == 0 && ticks > 0 {
        warn!("No tick crossed the commit threshold");
    }
    info!("Simulated {} ticks, {} forecast updates", ticks, updates);

    Ok(lines.join("\n"))
}
