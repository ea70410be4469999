//! Chart handles and the dataset views they render.
//!
//! Specs are Plotly-shaped JSON (`data`, `layout`, `config`), the renderer
//! itself is behind [`ChartBackend`].

use chrono::{Duration as DateDuration, NaiveDate};
use common::{FORECAST_HOURS, HISTORY_DAYS, ModelDescriptor};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::theme::ChartPalette;

/// Scale applied to RMSE so it is visible next to accuracy percentages.
pub const RMSE_DISPLAY_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartKind {
    Forecast,
    Historical,
    Comparison,
}

impl ChartKind {
    /// DOM id of the chart container.
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartKind::Forecast => "chart-forecast",
            ChartKind::Historical => "chart-historical",
            ChartKind::Comparison => "chart-comparison",
        }
    }
}

/// Everything the renderer needs to construct a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub data: Value,
    pub layout: Value,
    pub config: Value,
}

/// Rendering engine the charts are drawn with.
pub trait ChartBackend {
    fn create(&mut self, kind: ChartKind, spec: &ChartSpec) -> Result<()>;
    /// Replaces the y values of one trace and redraws without transition.
    fn update_data(&mut self, kind: ChartKind, trace: usize, values: &[f64]) -> Result<()>;
    fn resize(&mut self, kind: ChartKind) -> Result<()>;
    fn apply_palette(&mut self, kind: ChartKind, palette: &ChartPalette) -> Result<()>;
    fn destroy(&mut self, kind: ChartKind) -> Result<()>;
}

/// Bookkeeping of which charts were constructed. Backend failures are logged
/// and never surface to the page.
#[derive(Debug)]
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    created: BTreeSet<ChartKind>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            created: BTreeSet::new(),
        }
    }

    pub fn is_created(&self, kind: ChartKind) -> bool {
        self.created.contains(&kind)
    }

    pub fn created(&self) -> impl Iterator<Item = ChartKind> + '_ {
        self.created.iter().copied()
    }

    /// Constructs the chart on first call; later calls only resize it.
    pub fn ensure(&mut self, kind: ChartKind, spec: impl FnOnce() -> ChartSpec) {
        if self.created.contains(&kind) {
            trace!(?kind, "chart exists, resizing");
            self.log_failure(kind, "resize", |backend| backend.resize(kind));
            return;
        }
        let spec = spec();
        match self.backend.create(kind, &spec) {
            Ok(()) => {
                debug!(?kind, "chart created");
                self.created.insert(kind);
            }
            Err(e) => warn!(?kind, "Failed to create chart: {}", e),
        }
    }

    /// Pushes new values into a trace of an existing chart. No-op when the
    /// chart was never constructed.
    pub fn update(&mut self, kind: ChartKind, trace: usize, values: &[f64]) -> bool {
        if !self.created.contains(&kind) {
            return false;
        }
        self.log_failure(kind, "update", |backend| backend.update_data(kind, trace, values))
    }

    /// Lays an existing chart out again after its container changed size.
    pub fn resize(&mut self, kind: ChartKind) -> bool {
        if !self.created.contains(&kind) {
            return false;
        }
        self.log_failure(kind, "resize", |backend| backend.resize(kind))
    }

    pub fn apply_palette(&mut self, palette: &ChartPalette) {
        let kinds: Vec<_> = self.created.iter().copied().collect();
        for kind in kinds {
            self.log_failure(kind, "restyle", |backend| backend.apply_palette(kind, palette));
        }
    }

    pub fn destroy_all(&mut self) {
        let kinds: Vec<_> = std::mem::take(&mut self.created).into_iter().collect();
        for kind in kinds {
            self.log_failure(kind, "destroy", |backend| backend.destroy(kind));
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn log_failure(
        &mut self,
        kind: ChartKind,
        action: &str,
        call: impl FnOnce(&mut B) -> Result<()>,
    ) -> bool {
        match call(&mut self.backend) {
            Ok(()) => true,
            Err(e) => {
                warn!(?kind, "Failed to {} chart: {}", action, e);
                false
            }
        }
    }
}

/// `HH:00` labels for the forecast window starting at `start_hour`.
pub fn hour_labels(start_hour: u32) -> Vec<String> {
    (0..FORECAST_HOURS as u32)
        .map(|offset| format!("{:02}:00", (start_hour + offset) % 24))
        .collect()
}

/// Labels of the historical window, ending with `today`.
pub fn day_labels(today: NaiveDate) -> Vec<String> {
    (0..HISTORY_DAYS as i64)
        .rev()
        .map(|back| (today - DateDuration::days(back)).format("%a %d").to_string())
        .collect()
}

fn axis(palette: &ChartPalette, title: &str) -> Value {
    json!({
        "title": {"text": title, "font": {"color": palette.axis_title}},
        "tickfont": {"color": palette.tick, "size": 11},
        "gridcolor": palette.grid,
        "zeroline": false,
    })
}

fn base_layout(palette: &ChartPalette, y_title: &str) -> Value {
    json!({
        "margin": {"t": 30, "r": 20, "l": 60, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "showlegend": true,
        "legend": {"orientation": "h", "y": 1.12, "font": {"color": palette.legend}},
        "hovermode": "x unified",
        "xaxis": axis(palette, ""),
        "yaxis": axis(palette, y_title),
    })
}

fn chart_config() -> Value {
    json!({"responsive": true, "displayModeBar": false})
}

/// Hourly forecast line: the live predicted series (trace 0) and the
/// static actuals (trace 1).
pub fn forecast_spec(
    start_hour: u32,
    predicted: &[f64],
    actual: &[f64],
    palette: &ChartPalette,
) -> ChartSpec {
    let labels = hour_labels(start_hour);
    let data = json!([
        {
            "x": labels,
            "y": predicted,
            "type": "scatter",
            "mode": "lines+markers",
            "name": "Predicted Price",
            "fill": "tozeroy",
            "line": {"color": "#10B981", "shape": "spline", "width": 3},
            "hovertemplate": "%{x}<br>Predicted: $%{y:.4f}/kWh<extra></extra>",
        },
        {
            "x": labels,
            "y": actual,
            "type": "scatter",
            "mode": "lines",
            "name": "Actual Price",
            "line": {"color": "#34D399", "shape": "spline", "width": 2, "dash": "dot"},
            "hovertemplate": "%{x}<br>Actual: $%{y:.4f}/kWh<extra></extra>",
        }
    ]);
    ChartSpec {
        data,
        layout: base_layout(palette, "Price ($/kWh)"),
        config: chart_config(),
    }
}

/// Daily averages as bars.
pub fn historical_spec(today: NaiveDate, history: &[f64], palette: &ChartPalette) -> ChartSpec {
    let data = json!([{
        "x": day_labels(today),
        "y": history,
        "type": "bar",
        "name": "Daily Average",
        "marker": {"color": "#3B82F6"},
        "hovertemplate": "%{x}<br>$%{y:.4f}/kWh<extra></extra>",
    }]);
    ChartSpec {
        data,
        layout: base_layout(palette, "Average ($/kWh)"),
        config: chart_config(),
    }
}

/// Accuracy bars against RMSE on a secondary axis.
pub fn comparison_spec(models: &[ModelDescriptor], palette: &ChartPalette) -> ChartSpec {
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    let accuracy: Vec<f64> = models.iter().map(|m| m.accuracy).collect();
    let rmse: Vec<f64> = models.iter().map(|m| m.rmse * RMSE_DISPLAY_SCALE).collect();

    let data = json!([
        {
            "x": names,
            "y": accuracy,
            "type": "bar",
            "name": "Accuracy (%)",
            "marker": {"color": "#10B981"},
            "yaxis": "y",
        },
        {
            "x": names,
            "y": rmse,
            "type": "scatter",
            "mode": "lines+markers",
            "name": "RMSE (×100)",
            "line": {"color": "#F59E0B", "width": 3},
            "yaxis": "y2",
        }
    ]);

    let mut layout = base_layout(palette, "Accuracy (%)");
    let mut y2 = axis(palette, "RMSE (×100)");
    y2["overlaying"] = json!("y");
    y2["side"] = json!("right");
    y2["showgrid"] = json!(false);
    layout["yaxis2"] = y2;

    ChartSpec {
        data,
        layout,
        config: chart_config(),
    }
}

/// Relayout update recoloring legend, ticks, grid and axis titles.
pub fn palette_update(kind: ChartKind, palette: &ChartPalette) -> Value {
    let mut update = json!({
        "legend.font.color": palette.legend,
        "xaxis.tickfont.color": palette.tick,
        "yaxis.tickfont.color": palette.tick,
        "xaxis.gridcolor": palette.grid,
        "yaxis.gridcolor": palette.grid,
        "xaxis.title.font.color": palette.axis_title,
        "yaxis.title.font.color": palette.axis_title,
    });
    if kind == ChartKind::Comparison {
        update["yaxis2.tickfont.color"] = json!(palette.tick);
        update["yaxis2.title.font.color"] = json!(palette.axis_title);
    }
    update
}

/// A call received by [`HeadlessCharts`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChartCall {
    Create(ChartKind),
    Update { kind: ChartKind, trace: usize, values: Vec<f64> },
    Resize(ChartKind),
    Palette(ChartKind, ChartPalette),
    Destroy(ChartKind),
}

/// Backend without a rendering surface. Records every call, used when the
/// page runs outside a browser.
#[derive(Debug, Clone, Default)]
pub struct HeadlessCharts {
    calls: Vec<ChartCall>,
}

impl HeadlessCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[ChartCall] {
        &self.calls
    }

    pub fn count(&self, predicate: impl Fn(&ChartCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl ChartBackend for HeadlessCharts {
    fn create(&mut self, kind: ChartKind, _spec: &ChartSpec) -> Result<()> {
        self.calls.push(ChartCall::Create(kind));
        Ok(())
    }

    fn update_data(&mut self, kind: ChartKind, trace: usize, values: &[f64]) -> Result<()> {
        self.calls.push(ChartCall::Update { kind, trace, values: values.to_vec() });
        Ok(())
    }

    fn resize(&mut self, kind: ChartKind) -> Result<()> {
        self.calls.push(ChartCall::Resize(kind));
        Ok(())
    }

    fn apply_palette(&mut self, kind: ChartKind, palette: &ChartPalette) -> Result<()> {
        self.calls.push(ChartCall::Palette(kind, *palette));
        Ok(())
    }

    fn destroy(&mut self, kind: ChartKind) -> Result<()> {
        self.calls.push(ChartCall::Destroy(kind));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ACTUAL_PRICES, PREDICTED_PRICES, Theme, sample_models};

    fn palette() -> ChartPalette {
        ChartPalette::for_theme(Theme::Dark)
    }

    #[test]
    fn test_hour_labels_wrap_midnight() {
        let labels = hour_labels(22);
        assert_eq!(labels.len(), FORECAST_HOURS);
        assert_eq!(labels[0], "22:00");
        assert_eq!(labels[2], "00:00");
        assert_eq!(labels[23], "21:00");
    }

    #[test]
    fn test_day_labels_end_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let labels = day_labels(today);
        assert_eq!(labels.len(), HISTORY_DAYS);
        assert_eq!(labels[0], "Mon 04");
        assert_eq!(labels[6], "Sun 10");
    }

    #[test]
    fn test_forecast_spec_shape() {
        let spec = forecast_spec(0, &PREDICTED_PRICES, &ACTUAL_PRICES, &palette());
        assert_eq!(spec.data.as_array().unwrap().len(), 2);
        assert_eq!(spec.data[0]["y"].as_array().unwrap().len(), FORECAST_HOURS);
        assert_eq!(spec.data[0]["x"][0], "00:00");
    }

    #[test]
    fn test_comparison_spec_scales_rmse() {
        let models = sample_models();
        let spec = comparison_spec(&models, &palette());
        let rmse = spec.data[1]["y"][2].as_f64().unwrap();
        assert!((rmse - 2.08).abs() < 1e-9);
        assert_eq!(spec.data[0]["y"][2].as_f64(), Some(94.2));
        assert_eq!(spec.layout["yaxis2"]["overlaying"], "y");
    }

    #[test]
    fn test_palette_update_touches_only_chrome() {
        let update = palette_update(ChartKind::Forecast, &palette());
        assert!(update.as_object().unwrap().keys().all(|k| k.contains("color")));
        assert!(update.get("yaxis2.tickfont.color").is_none());
        assert!(palette_update(ChartKind::Comparison, &palette()).get("yaxis2.tickfont.color").is_some());
    }

    #[test]
    fn test_registry_creates_once_then_resizes() {
        let mut registry = ChartRegistry::new(HeadlessCharts::new());
        let spec = || forecast_spec(0, &PREDICTED_PRICES, &ACTUAL_PRICES, &palette());
        registry.ensure(ChartKind::Forecast, spec);
        registry.ensure(ChartKind::Forecast, spec);

        let calls = registry.backend().calls();
        assert_eq!(calls, &[ChartCall::Create(ChartKind::Forecast), ChartCall::Resize(ChartKind::Forecast)]);
    }

    #[test]
    fn test_update_requires_existing_chart() {
        let mut registry = ChartRegistry::new(HeadlessCharts::new());
        assert!(!registry.update(ChartKind::Forecast, 0, &[1.0]));
        assert!(registry.backend().calls().is_empty());
    }

    #[test]
    fn test_destroy_all_forgets_handles() {
        let mut registry = ChartRegistry::new(HeadlessCharts::new());
        registry.ensure(ChartKind::Comparison, || comparison_spec(&sample_models(), &palette()));
        registry.destroy_all();
        assert!(!registry.is_created(ChartKind::Comparison));
        assert_eq!(registry.backend().count(|c| matches!(c, ChartCall::Destroy(_))), 1);
    }
}
