//! Synthetic price fluctuation.

use common::{FORECAST_HOURS, PriceSeries, Region};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::DashboardConfig;

/// Outcome of a committed price mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub previous: f64,
    pub current: f64,
    /// Whether the forecast window was perturbed as part of the update
    pub forecast_changed: bool,
}

/// Perturbs a [`PriceSeries`] with small pseudo-random deltas.
#[derive(Debug, Clone)]
pub struct PriceSimulator {
    rng: StdRng,
    tick_delta: f64,
    commit_threshold: f64,
    forecast_point_delta: f64,
    region_delta: f64,
}

impl PriceSimulator {
    pub fn new(config: &DashboardConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            tick_delta: config.tick_delta,
            commit_threshold: config.commit_threshold,
            forecast_point_delta: config.forecast_point_delta,
            region_delta: config.region_delta,
        }
    }

    /// Periodic fluctuation.
    ///
    /// The current price moves by up to `tick_delta`. The move is committed
    /// only when the price drifted more than `commit_threshold` from the last
    /// displayed value; in that case every forecast point is perturbed too.
    pub fn tick(&mut self, series: &mut PriceSeries) -> Option<PriceUpdate> {
        let previous = series.displayed;
        let delta = self.symmetric(self.tick_delta);
        series.set_current(series.current + delta);

        if series.pending_delta() <= self.commit_threshold {
            trace!(delta, pending = series.pending_delta(), "tick below threshold");
            return None;
        }

        series.mark_displayed();
        self.perturb_forecast(series);
        debug!(previous, current = series.current, "tick committed");
        Some(PriceUpdate {
            previous,
            current: series.current,
            forecast_changed: true,
        })
    }

    /// One-shot larger move applied when the user picks another market.
    pub fn region_change(&mut self, series: &mut PriceSeries, region: Region) -> PriceUpdate {
        let previous = series.displayed;
        let delta = self.symmetric(self.region_delta);
        series.set_current(series.current + delta);
        series.mark_displayed();
        debug!(region = region.id(), previous, current = series.current, "region change");
        PriceUpdate {
            previous,
            current: series.current,
            forecast_changed: false,
        }
    }

    fn perturb_forecast(&mut self, series: &mut PriceSeries) {
        for point in series.forecast.iter_mut().take(FORECAST_HOURS) {
            let delta = self.symmetric(self.forecast_point_delta);
            *point = (*point + delta).max(0.0);
        }
    }

    /// Uniform sample in `[-bound, bound]`.
    fn symmetric(&mut self, bound: f64) -> f64 {
        if bound <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-bound..=bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{HISTORY_DAYS, sample_series};

    fn seeded(seed: u64) -> PriceSimulator {
        PriceSimulator::new(&DashboardConfig { seed: Some(seed), ..Default::default() })
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        let mut sa = sample_series();
        let mut sb = sample_series();
        for _ in 0..50 {
            assert_eq!(a.tick(&mut sa), b.tick(&mut sb));
        }
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_prices_never_negative() {
        let mut sim = PriceSimulator::new(&DashboardConfig {
            seed: Some(3),
            tick_delta: 0.5,
            forecast_point_delta: 0.5,
            region_delta: 1.0,
            ..Default::default()
        });
        let mut series = sample_series();
        for i in 0..500 {
            sim.tick(&mut series);
            if i % 7 == 0 {
                sim.region_change(&mut series, Region::EuCentral);
            }
            assert!(series.current >= 0.0);
            assert!(series.forecast.iter().all(|p| *p >= 0.0));
            assert_eq!(series.forecast.len(), FORECAST_HOURS);
            assert_eq!(series.history.len(), HISTORY_DAYS);
        }
    }

    #[test]
    fn test_tick_below_threshold_is_not_committed() {
        let mut sim = PriceSimulator::new(&DashboardConfig {
            seed: Some(1),
            tick_delta: 0.0001,
            commit_threshold: 0.01,
            ..Default::default()
        });
        let mut series = sample_series();
        let forecast = series.forecast;
        assert!(sim.tick(&mut series).is_none());
        assert_eq!(series.displayed, common::BASELINE_PRICE);
        assert_eq!(series.forecast, forecast);
    }

    #[test]
    fn test_committed_tick_moves_displayed_price() {
        let mut sim = PriceSimulator::new(&DashboardConfig {
            seed: Some(9),
            tick_delta: 0.05,
            commit_threshold: 0.0,
            ..Default::default()
        });
        let mut series = sample_series();
        let update = sim.tick(&mut series).expect("tick above a zero threshold commits");
        assert_eq!(update.previous, common::BASELINE_PRICE);
        assert_eq!(series.displayed, series.current);
        assert!(update.forecast_changed);
    }

    #[test]
    fn test_region_change_always_commits() {
        let mut sim = seeded(5);
        let mut series = sample_series();
        let update = sim.region_change(&mut series, Region::UsWest);
        assert_eq!(update.current, series.current);
        assert_eq!(series.pending_delta(), 0.0);
        assert!(!update.forecast_changed);
    }
}
