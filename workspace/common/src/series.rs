use serde::{Deserialize, Serialize};

/// Number of hourly points in the forecast window.
pub const FORECAST_HOURS: usize = 24;

/// Number of daily points in the historical window.
pub const HISTORY_DAYS: usize = 7;

/// Direction of the current price relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
        }
    }

    /// Arrow glyph shown next to the ticker.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
        }
    }
}

/// Live price state displayed by the dashboard.
///
/// The forecast and history windows are fixed-size arrays, so no mutation can
/// change their length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Price the trend and percent change are measured against
    pub baseline: f64,
    /// Current spot price
    pub current: f64,
    /// Last price pushed to the display
    pub displayed: f64,
    pub trend: Trend,
    /// Change of `current` against `baseline`, in percent
    pub change_percent: f64,
    /// Hourly forecast starting at the current hour
    pub forecast: [f64; FORECAST_HOURS],
    /// Daily averages for the last week, oldest first
    pub history: [f64; HISTORY_DAYS],
}

impl PriceSeries {
    pub fn new(baseline: f64, forecast: [f64; FORECAST_HOURS], history: [f64; HISTORY_DAYS]) -> Self {
        Self {
            baseline,
            current: baseline,
            displayed: baseline,
            trend: Trend::Up,
            change_percent: 0.0,
            forecast,
            history,
        }
    }

    /// Moves the current price (clamped to zero). The display, trend and
    /// percent change follow only on [`PriceSeries::mark_displayed`].
    pub fn set_current(&mut self, price: f64) {
        self.current = price.max(0.0);
        tracing::trace!(current = self.current, "price drifted");
    }

    /// Commits the current price to the display and recomputes trend and
    /// percent change against the baseline.
    pub fn mark_displayed(&mut self) {
        self.displayed = self.current;
        self.change_percent = if self.baseline > 0.0 {
            (self.displayed - self.baseline) / self.baseline * 100.0
        } else {
            0.0
        };
        self.trend = if self.displayed >= self.baseline { Trend::Up } else { Trend::Down };
        tracing::trace!(displayed = self.displayed, change = self.change_percent, "price committed");
    }

    /// Absolute difference between the current and last displayed price.
    pub fn pending_delta(&self) -> f64 {
        (self.current - self.displayed).abs()
    }

    /// Ticker text of the displayed price, e.g. `$0.1245/kWh ▲ +1.20%`.
    pub fn ticker_text(&self, currency_symbol: &str, unit: &str) -> String {
        format!(
            "{}{:.4}/{} {} {:+.2}%",
            currency_symbol,
            self.displayed,
            unit,
            self.trend.arrow(),
            self.change_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> PriceSeries {
        PriceSeries::new(0.10, [0.1; FORECAST_HOURS], [0.1; HISTORY_DAYS])
    }

    #[test]
    fn test_commit_computes_trend_against_baseline() {
        let mut s = series();
        s.set_current(0.11);
        s.mark_displayed();
        assert_eq!(s.trend, Trend::Up);
        assert!((s.change_percent - 10.0).abs() < 1e-9);

        s.set_current(0.09);
        s.mark_displayed();
        assert_eq!(s.trend, Trend::Down);
        assert!((s.change_percent + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_current_clamps_negative() {
        let mut s = series();
        s.set_current(-0.5);
        assert_eq!(s.current, 0.0);
        s.mark_displayed();
        assert_eq!(s.trend, Trend::Down);
    }

    #[test]
    fn test_pending_delta_resets_on_display() {
        let mut s = series();
        s.set_current(0.105);
        assert!((s.pending_delta() - 0.005).abs() < 1e-9);
        s.mark_displayed();
        assert_eq!(s.pending_delta(), 0.0);
    }

    #[test]
    fn test_ticker_text() {
        let mut s = series();
        s.set_current(0.1012);
        s.mark_displayed();
        assert_eq!(s.ticker_text("$", "kWh"), "$0.1012/kWh ▲ +1.20%");
    }

    #[test]
    fn test_drift_stays_off_screen_until_committed() {
        let mut s = series();
        let ticker = s.ticker_text("$", "kWh");
        s.set_current(0.0995);
        assert_eq!(s.ticker_text("$", "kWh"), ticker);
        assert_eq!(s.trend, Trend::Up);
        assert_eq!(s.change_percent, 0.0);
    }

    #[test]
    fn test_serializes_fixed_windows() {
        let json = serde_json::to_value(series()).unwrap();
        assert_eq!(json["forecast"].as_array().unwrap().len(), FORECAST_HOURS);
        assert_eq!(json["history"].as_array().unwrap().len(), HISTORY_DAYS);
        assert_eq!(json["trend"], "up");
    }
}
