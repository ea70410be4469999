//! Payloads returned by the simulated API playground.
//! They mirror what a real forecasting API would send so the page can render
//! them as formatted JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::series::Trend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// `GET /api/v1/price/current`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPricePayload {
    pub status: ResponseStatus,
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub trend: Trend,
    pub change_percent: f64,
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/v1/forecast/24`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub status: ResponseStatus,
    pub model: String,
    pub horizon_hours: usize,
    pub forecast: Vec<f64>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub name: String,
    pub accuracy: f64,
    pub rmse: f64,
    pub mae: f64,
}

/// `GET /api/v1/models`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelListPayload {
    pub status: ResponseStatus,
    pub models: Vec<ModelSummary>,
}

/// Response for any endpoint the playground does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub status: ResponseStatus,
    pub code: u16,
    pub message: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaygroundPayload {
    CurrentPrice(CurrentPricePayload),
    Forecast(ForecastPayload),
    Models(ModelListPayload),
    Error(ErrorPayload),
}

impl PlaygroundPayload {
    pub fn status(&self) -> ResponseStatus {
        match self {
            PlaygroundPayload::CurrentPrice(p) => p.status,
            PlaygroundPayload::Forecast(p) => p.status,
            PlaygroundPayload::Models(p) => p.status,
            PlaygroundPayload::Error(p) => p.status,
        }
    }

    /// Pretty-printed JSON as displayed in the playground output panel.
    pub fn to_pretty_json(&self) -> String {
        match serde_json::to_string_pretty(self) {
            Ok(text) => text,
            Err(e) => format!("{{\"status\": \"error\", \"message\": \"{}\"}}", e),
        }
    }
}
