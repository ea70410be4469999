//! Static sample data the page is seeded with.

use crate::models::ModelDescriptor;
use crate::series::{FORECAST_HOURS, HISTORY_DAYS, PriceSeries};

pub const PRICE_CURRENCY: &str = "USD";
pub const PRICE_UNIT: &str = "kWh";

/// Spot price at page load, in USD/kWh.
pub const BASELINE_PRICE: f64 = 0.1245;

pub const PREDICTED_PRICES: [f64; FORECAST_HOURS] = [
    0.1180, 0.1135, 0.1102, 0.1088, 0.1097, 0.1142, 0.1236, 0.1348, 0.1415, 0.1392, 0.1351,
    0.1318, 0.1296, 0.1289, 0.1302, 0.1344, 0.1421, 0.1538, 0.1612, 0.1587, 0.1495, 0.1392,
    0.1298, 0.1224,
];

pub const ACTUAL_PRICES: [f64; FORECAST_HOURS] = [
    0.1172, 0.1141, 0.1110, 0.1079, 0.1103, 0.1137, 0.1245, 0.1339, 0.1422, 0.1385, 0.1360,
    0.1309, 0.1301, 0.1281, 0.1310, 0.1352, 0.1413, 0.1546, 0.1603, 0.1595, 0.1488, 0.1401,
    0.1290, 0.1231,
];

pub const HISTORICAL_PRICES: [f64; HISTORY_DAYS] =
    [0.1198, 0.1262, 0.1231, 0.1304, 0.1287, 0.1219, 0.1245];

/// Counter shown in the hero section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroStatistic {
    pub label: &'static str,
    pub target: f64,
}

pub const HERO_STATISTICS: [HeroStatistic; 4] = [
    HeroStatistic { label: "Prediction accuracy (%)", target: 94.8 },
    HeroStatistic { label: "Forecast horizon (h)", target: 24.0 },
    HeroStatistic { label: "Data points", target: 2_000_000.0 },
    HeroStatistic { label: "Markets covered", target: 15.0 },
];

pub fn sample_series() -> PriceSeries {
    PriceSeries::new(BASELINE_PRICE, PREDICTED_PRICES, HISTORICAL_PRICES)
}

pub fn sample_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new(
            "LSTM",
            "Recurrent network capturing daily and weekly seasonality.",
            92.7,
            0.0241,
            0.0188,
        ),
        ModelDescriptor::new(
            "XGBoost",
            "Gradient-boosted trees over weather, demand and lag features.",
            91.4,
            0.0263,
            0.0201,
        ),
        ModelDescriptor::new(
            "Transformer",
            "Attention-based sequence model over multi-market signals.",
            94.2,
            0.0208,
            0.0165,
        ),
        ModelDescriptor::new(
            "Hybrid Ensemble",
            "Weighted blend of the three base models.",
            95.1,
            0.0194,
            0.0152,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_is_non_negative() {
        assert!(PREDICTED_PRICES.iter().all(|p| *p >= 0.0));
        assert!(ACTUAL_PRICES.iter().all(|p| *p >= 0.0));
        assert!(HISTORICAL_PRICES.iter().all(|p| *p >= 0.0));
    }

    #[test]
    fn test_sample_models_has_four_entries() {
        let models = sample_models();
        assert_eq!(models.len(), 4);
        assert_eq!(models[2].accuracy_text(), "94.2%");
    }
}
