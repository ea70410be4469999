pub mod models;
pub mod playground;
pub mod simulate;

pub use models::list_models;
pub use playground::run_playground;
pub use simulate::simulate;

use chrono::{Local, Timelike, Utc};
use compute::controller::PageEnvironment;

/// Page environment for the current wall clock.
pub fn current_environment() -> PageEnvironment {
    let local = Local::now();
    PageEnvironment::from_clock(Utc::now(), local.hour(), local.date_naive())
}
