use anyhow::{Result, bail};
use compute::catalog::ModelCatalog;
use compute::config::DashboardConfig;
use compute::headless_page;

use super::current_environment;

/// Without a tag, lists every model; with one, selects it like the models
/// section select box does and prints its metrics.
pub fn list_models(config: DashboardConfig, tag: Option<&str>) -> Result<String> {
    let mut page = headless_page(config, current_environment())?;

    let Some(tag) = tag else {
        let rows: Vec<String> = page
            .catalog()
            .models()
            .iter()
            .map(|model| {
                format!(
                    "{:<12} {:<16} accuracy {:>6}  rmse {}  mae {}",
                    ModelCatalog::tag_for(model),
                    model.name,
                    model.accuracy_text(),
                    model.rmse_text(),
                    model.mae_text()
                )
            })
            .collect();
        return Ok(rows.join("\n"));
    };

    if !page.select_model(tag) {
        bail!("Unknown model: {}", tag);
    }
    let metrics = page.metrics();
    Ok(format!(
        "{}\naccuracy: {}\nrmse: {}\nmae: {}",
        metrics.model, metrics.accuracy, metrics.rmse, metrics.mae
    ))
}
