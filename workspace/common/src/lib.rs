//! Shared types for the energy price forecasting page.
//! These structs are used by the page controller, the headless CLI and the
//! WebAssembly front end so none of them has to duplicate data shapes.

mod models;
mod playground;
mod sample;
mod series;
mod ui;

pub use models::ModelDescriptor;
pub use playground::{
    CurrentPricePayload, ErrorPayload, ForecastPayload, ModelListPayload, ModelSummary,
    PlaygroundPayload, ResponseStatus,
};
pub use sample::{
    BASELINE_PRICE, HERO_STATISTICS, HeroStatistic, HISTORICAL_PRICES, PREDICTED_PRICES,
    ACTUAL_PRICES, PRICE_CURRENCY, PRICE_UNIT, sample_models, sample_series,
};
pub use series::{FORECAST_HOURS, HISTORY_DAYS, PriceSeries, Trend};
pub use ui::{Region, Section, Theme};
