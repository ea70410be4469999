//! Plotly bindings for the page charts.

use compute::charts::{palette_update, ChartBackend, ChartKind, ChartSpec};
use compute::error::{ComputeError, Result};
use compute::theme::ChartPalette;
use gloo_timers::callback::Timeout;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = Plotly)]
    fn restyle(div_id: &str, update: JsValue, traces: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = Plotly)]
    fn relayout(div_id: &str, update: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["Plotly", "Plots"], js_name = resize)]
    fn plots_resize(div_id: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = Plotly)]
    fn purge(div_id: &str) -> std::result::Result<JsValue, JsValue>;
}

/// Plain JS objects, not `Map`s, so Plotly can read the specs.
fn to_js(value: &Value) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ComputeError::Chart(e.to_string()))
}

fn chart_error(kind: ChartKind, e: JsValue) -> ComputeError {
    ComputeError::Chart(format!("{}: {:?}", kind.element_id(), e))
}

/// Chart backend drawing into the page's chart containers.
///
/// Construction and resizing run on the next task so the container is laid
/// out by the time Plotly measures it (the section may just have been made
/// visible by the render that follows the navigation).
#[derive(Debug, Clone, Default)]
pub struct PlotlyCharts;

impl ChartBackend for PlotlyCharts {
    fn create(&mut self, kind: ChartKind, spec: &ChartSpec) -> Result<()> {
        let data = to_js(&spec.data)?;
        let layout = to_js(&spec.layout)?;
        let config = to_js(&spec.config)?;
        Timeout::new(0, move || {
            if let Err(e) = new_plot(kind.element_id(), data, layout, config) {
                log::warn!("Failed to draw chart {}: {:?}", kind.element_id(), e);
            } else {
                log::debug!("Chart {} drawn", kind.element_id());
            }
        })
        .forget();
        Ok(())
    }

    fn update_data(&mut self, kind: ChartKind, trace: usize, values: &[f64]) -> Result<()> {
        let update = to_js(&json!({ "y": [values] }))?;
        let traces = to_js(&json!([trace]))?;
        restyle(kind.element_id(), update, traces)
            .map(|_| ())
            .map_err(|e| chart_error(kind, e))
    }

    fn resize(&mut self, kind: ChartKind) -> Result<()> {
        Timeout::new(0, move || {
            if let Err(e) = plots_resize(kind.element_id()) {
                log::warn!("Failed to resize chart {}: {:?}", kind.element_id(), e);
            }
        })
        .forget();
        Ok(())
    }

    fn apply_palette(&mut self, kind: ChartKind, palette: &ChartPalette) -> Result<()> {
        let update = to_js(&palette_update(kind, palette))?;
        relayout(kind.element_id(), update)
            .map(|_| ())
            .map_err(|e| chart_error(kind, e))
    }

    fn destroy(&mut self, kind: ChartKind) -> Result<()> {
        purge(kind.element_id())
            .map(|_| ())
            .map_err(|e| chart_error(kind, e))
    }
}
