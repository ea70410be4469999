use compute::config::DashboardConfig;
use log::Level;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Page controller tunables
    pub dashboard: DashboardConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: Level::Info,
            debug_mode: false,
            dashboard: DashboardConfig::default(),
        }
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        // Detect if running in development mode
        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            // Try to read from localStorage for custom settings
            if let Ok(Some(storage)) = window.local_storage() {
                // Read log level
                if let Ok(Some(log_level)) = storage.get_item("voltcast_log_level") {
                    settings.log_level = match log_level.to_lowercase().as_str() {
                        "error" => Level::Error,
                        "warn" => Level::Warn,
                        "info" => Level::Info,
                        "debug" => Level::Debug,
                        "trace" => Level::Trace,
                        _ => settings.log_level,
                    };
                }

                // Read simulator seed
                if let Ok(Some(seed)) = storage.get_item("voltcast_seed") {
                    if let Ok(seed_val) = seed.parse::<u64>() {
                        settings.dashboard.seed = Some(seed_val);
                    }
                }

                // Read tick interval
                if let Ok(Some(interval)) = storage.get_item("voltcast_tick_interval_ms") {
                    if let Ok(interval_val) = interval.parse::<u64>() {
                        if interval_val > 0 {
                            settings.dashboard.tick_interval_ms = interval_val;
                        }
                    }
                }

                // Read playground delay
                if let Ok(Some(delay)) = storage.get_item("voltcast_playground_delay_ms") {
                    if let Ok(delay_val) = delay.parse::<u64>() {
                        settings.dashboard.playground_delay_ms = delay_val;
                    }
                }
            }
        }

        settings
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
