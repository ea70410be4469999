//! Shared fixtures for controller tests.

use chrono::{NaiveDate, TimeZone, Utc};
use std::time::Duration;

use crate::charts::{ChartCall, ChartKind, HeadlessCharts};
use crate::config::DashboardConfig;
use crate::controller::{PageController, PageEnvironment};
use crate::theme::MemoryStore;

pub type TestController = PageController<HeadlessCharts, MemoryStore>;

pub fn test_env() -> PageEnvironment {
    PageEnvironment {
        os_prefers_dark: true,
        now: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        local_hour: 9,
        today: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    }
}

/// Seeded config whose every tick commits.
pub fn committing_config() -> DashboardConfig {
    DashboardConfig {
        seed: Some(1234),
        tick_delta: 0.05,
        commit_threshold: 0.0,
        ..Default::default()
    }
}

pub fn test_controller(config: DashboardConfig) -> TestController {
    PageController::new(config, HeadlessCharts::new(), MemoryStore::new(), test_env())
        .expect("test config is valid")
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

pub fn creates(controller: &TestController, kind: ChartKind) -> usize {
    controller
        .charts()
        .backend()
        .count(|call| *call == ChartCall::Create(kind))
}

pub fn forecast_updates(controller: &TestController) -> usize {
    controller
        .charts()
        .backend()
        .count(|call| matches!(call, ChartCall::Update { kind: ChartKind::Forecast, .. }))
}
