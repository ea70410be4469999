use serde::Deserialize;
use std::time::Duration;

use crate::error::{ComputeError, Result};

/// Tunables of the page controller.
///
/// All durations are in milliseconds so the struct can be loaded from flat
/// configuration sources (TOML files, environment variables).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Period of the simulated price tick
    pub tick_interval_ms: u64,
    /// Maximum absolute perturbation of the price on each tick
    pub tick_delta: f64,
    /// Minimum change against the displayed price before a tick is committed
    pub commit_threshold: f64,
    /// Maximum absolute perturbation of each forecast point on commit
    pub forecast_point_delta: f64,
    /// Maximum absolute perturbation applied on a region change
    pub region_delta: f64,
    /// Quiet period before a burst of resize events is handled
    pub resize_debounce_ms: u64,
    /// Artificial latency of the API playground
    pub playground_delay_ms: u64,
    /// Number of steps of the hero counter animation
    pub counter_steps: u32,
    pub counter_interval_ms: u64,
    /// Time before the newsletter form reverts to its idle look
    pub newsletter_reset_ms: u64,
    /// Scroll offset after which the navbar turns opaque
    pub navbar_solid_after_px: f64,
    /// Scroll offset after which scrolling down hides the navbar
    pub navbar_hide_after_px: f64,
    pub particle_count: usize,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5000,
            tick_delta: 0.002,
            commit_threshold: 0.001,
            forecast_point_delta: 0.003,
            region_delta: 0.015,
            resize_debounce_ms: 250,
            playground_delay_ms: 800,
            counter_steps: 100,
            counter_interval_ms: 20,
            newsletter_reset_ms: 3000,
            navbar_solid_after_px: 100.0,
            navbar_hide_after_px: 300.0,
            particle_count: 50,
            seed: None,
        }
    }
}

impl DashboardConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn playground_delay(&self) -> Duration {
        Duration::from_millis(self.playground_delay_ms)
    }

    pub fn counter_interval(&self) -> Duration {
        Duration::from_millis(self.counter_interval_ms)
    }

    pub fn newsletter_reset(&self) -> Duration {
        Duration::from_millis(self.newsletter_reset_ms)
    }

    /// Rejects values that would stall the scheduler or break the simulator.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(ComputeError::Config("tick_interval_ms must be positive".to_string()));
        }
        if self.counter_interval_ms == 0 || self.counter_steps == 0 {
            return Err(ComputeError::Config(
                "counter_interval_ms and counter_steps must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("tick_delta", self.tick_delta),
            ("commit_threshold", self.commit_threshold),
            ("forecast_point_delta", self.forecast_point_delta),
            ("region_delta", self.region_delta),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ComputeError::Config(format!("{} must be a non-negative number", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let config = DashboardConfig { tick_interval_ms: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ComputeError::Config(_))));
    }

    #[test]
    fn test_negative_delta_is_rejected() {
        let config = DashboardConfig { tick_delta: -1.0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"tick_interval_ms": 1000, "seed": 7}"#).unwrap();
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.playground_delay_ms, 800);
    }
}
