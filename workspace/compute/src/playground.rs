//! Simulated API playground.
//!
//! Endpoints map to pure functions building a canned payload from the
//! current page state; nothing leaves the process.

use chrono::{DateTime, Utc};
use common::{
    CurrentPricePayload, ErrorPayload, ForecastPayload, ModelDescriptor, ModelListPayload,
    ModelSummary, PRICE_CURRENCY, PRICE_UNIT, PlaygroundPayload, PriceSeries, ResponseStatus,
};
use std::str::FromStr;

use crate::error::ComputeError;

/// Model credited with the forecast payload.
const FORECAST_MODEL: &str = "Transformer";

/// State a handler may read.
#[derive(Debug, Clone, Copy)]
pub struct PlaygroundContext<'a> {
    pub series: &'a PriceSeries,
    pub models: &'a [ModelDescriptor],
    pub now: DateTime<Utc>,
}

type Handler = fn(&PlaygroundContext<'_>) -> PlaygroundPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CurrentPrice,
    Forecast24,
    Models,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::CurrentPrice, Endpoint::Forecast24, Endpoint::Models];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CurrentPrice => "/api/v1/price/current",
            Endpoint::Forecast24 => "/api/v1/forecast/24",
            Endpoint::Models => "/api/v1/models",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Endpoint::CurrentPrice => "Current spot price and trend",
            Endpoint::Forecast24 => "Hourly forecast for the next 24 hours",
            Endpoint::Models => "Available models and their metrics",
        }
    }

    fn handler(&self) -> Handler {
        match self {
            Endpoint::CurrentPrice => current_price,
            Endpoint::Forecast24 => forecast_24,
            Endpoint::Models => model_list,
        }
    }

    pub fn respond(&self, context: &PlaygroundContext<'_>) -> PlaygroundPayload {
        (self.handler())(context)
    }
}

impl FromStr for Endpoint {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_end_matches('/');
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.path() == path)
            .ok_or_else(|| ComputeError::UnknownEndpoint(s.to_string()))
    }
}

/// Answers a request for `path`; unknown paths get an error payload.
pub fn dispatch(path: &str, context: &PlaygroundContext<'_>) -> PlaygroundPayload {
    match path.parse::<Endpoint>() {
        Ok(endpoint) => endpoint.respond(context),
        Err(e) => PlaygroundPayload::Error(ErrorPayload {
            status: ResponseStatus::Error,
            code: 404,
            message: e.to_string(),
            endpoint: path.to_string(),
        }),
    }
}

fn current_price(context: &PlaygroundContext<'_>) -> PlaygroundPayload {
    let series = context.series;
    PlaygroundPayload::CurrentPrice(CurrentPricePayload {
        status: ResponseStatus::Success,
        price: round4(series.displayed),
        currency: PRICE_CURRENCY.to_string(),
        unit: PRICE_UNIT.to_string(),
        trend: series.trend,
        change_percent: (series.change_percent * 100.0).round() / 100.0,
        timestamp: context.now,
    })
}

fn forecast_24(context: &PlaygroundContext<'_>) -> PlaygroundPayload {
    PlaygroundPayload::Forecast(ForecastPayload {
        status: ResponseStatus::Success,
        model: FORECAST_MODEL.to_string(),
        horizon_hours: context.series.forecast.len(),
        forecast: context.series.forecast.iter().copied().map(round4).collect(),
        generated_at: context.now,
    })
}

fn model_list(context: &PlaygroundContext<'_>) -> PlaygroundPayload {
    PlaygroundPayload::Models(ModelListPayload {
        status: ResponseStatus::Success,
        models: context
            .models
            .iter()
            .map(|model| ModelSummary {
                name: model.name.clone(),
                accuracy: model.accuracy,
                rmse: model.rmse,
                mae: model.mae,
            })
            .collect(),
    })
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::{sample_models, sample_series};

    fn with_context<R>(f: impl FnOnce(&PlaygroundContext<'_>) -> R) -> R {
        let series = sample_series();
        let models = sample_models();
        let context = PlaygroundContext {
            series: &series,
            models: &models,
            now: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        f(&context)
    }

    #[test]
    fn test_forecast_has_24_entries() {
        let payload = with_context(|ctx| dispatch("/api/v1/forecast/24", ctx));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "success");
        let forecast = json["forecast"].as_array().unwrap();
        assert_eq!(forecast.len(), 24);
        assert!(forecast.iter().all(|v| v.is_number()));
    }

    #[test]
    fn test_unknown_endpoint_is_error() {
        let payload = with_context(|ctx| dispatch("/api/v1/unknown", ctx));
        assert_eq!(payload.status(), ResponseStatus::Error);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["endpoint"], "/api/v1/unknown");
    }

    #[test]
    fn test_current_price_reflects_series() {
        let payload = with_context(|ctx| dispatch("/api/v1/price/current", ctx));
        match payload {
            PlaygroundPayload::CurrentPrice(p) => {
                assert_eq!(p.price, common::BASELINE_PRICE);
                assert_eq!(p.currency, "USD");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_models_lists_all() {
        let payload = with_context(|ctx| dispatch("/api/v1/models/", ctx));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["models"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_endpoint_paths_parse_back() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.path().parse::<Endpoint>(), Ok(endpoint));
        }
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let text = with_context(|ctx| dispatch("/api/v1/models", ctx)).to_pretty_json();
        assert!(text.starts_with("{\n"));
        assert!(text.contains("\"Transformer\""));
    }
}
