pub mod catalog;
pub mod charts;
pub mod clock;
pub mod config;
pub mod controller;
pub mod counter;
pub mod error;
pub mod navbar;
pub mod navigation;
pub mod newsletter;
pub mod particles;
pub mod playground;
pub mod simulator;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

use charts::HeadlessCharts;
use config::DashboardConfig;
use controller::{PageController, PageEnvironment};
use theme::MemoryStore;

/// Returns a page controller without a rendering surface or persistent
/// storage, as used by the command line tools.
///
/// Charts are recorded instead of drawn and the theme preference lives in
/// memory for the lifetime of the controller.
pub fn headless_page(
    config: DashboardConfig,
    env: PageEnvironment,
) -> error::Result<PageController<HeadlessCharts, MemoryStore>> {
    PageController::new(config, HeadlessCharts::new(), MemoryStore::new(), env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::test_env;

    /// The headless page behaves like the browser one: navigation records
    /// chart construction on the headless backend.
    #[test]
    fn test_headless_page_records_charts() {
        let mut page = headless_page(DashboardConfig::default(), test_env()).unwrap();
        page.navigate("dashboard");
        assert_eq!(page.charts().backend().calls().len(), 2);
    }
}
