use common::Theme;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::Result;

/// Storage key of the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Key-value persistence for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process preference store used by the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `set` calls since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Colors applied to chart chrome. Data colors never change with the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub legend: &'static str,
    pub tick: &'static str,
    pub grid: &'static str,
    pub axis_title: &'static str,
}

impl ChartPalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                legend: "#f5f5f5",
                tick: "#9ca3af",
                grid: "rgba(255, 255, 255, 0.1)",
                axis_title: "#e5e7eb",
            },
            Theme::Light => Self {
                legend: "#1f2937",
                tick: "#4b5563",
                grid: "rgba(0, 0, 0, 0.08)",
                axis_title: "#111827",
            },
        }
    }
}

/// Dark-mode flag with persistence.
#[derive(Debug, Clone)]
pub struct ThemeController<S: PreferenceStore> {
    theme: Theme,
    store: S,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Seeds the theme from the persisted preference, falling back to the OS
    /// preference when nothing (or garbage) was persisted.
    pub fn load(store: S, os_prefers_dark: bool) -> Self {
        let persisted = match store.get(THEME_STORAGE_KEY) {
            Ok(value) => value.as_deref().and_then(Theme::parse),
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                None
            }
        };
        let theme = persisted.unwrap_or(if os_prefers_dark { Theme::Dark } else { Theme::Light });
        debug!(%theme, from_storage = persisted.is_some(), "theme loaded");
        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Flips the theme and persists it. Persistence failures are logged and
    /// otherwise ignored.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_STORAGE_KEY, self.theme.as_str()) {
            warn!("Failed to persist theme preference: {}", e);
        }
        debug!(theme = %self.theme, "theme toggled");
        self.theme
    }

    pub fn palette(&self) -> ChartPalette {
        ChartPalette::for_theme(self.theme)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputeError;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(ComputeError::Storage("unavailable".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(ComputeError::Storage("unavailable".to_string()))
        }
    }

    #[test]
    fn test_persisted_preference_wins_over_os() {
        let controller = ThemeController::load(MemoryStore::with_value(THEME_STORAGE_KEY, "light"), true);
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn test_falls_back_to_os_preference() {
        assert!(ThemeController::load(MemoryStore::new(), true).is_dark());
        assert!(!ThemeController::load(MemoryStore::new(), false).is_dark());
        let garbage = MemoryStore::with_value(THEME_STORAGE_KEY, "neon");
        assert!(ThemeController::load(garbage, true).is_dark());
    }

    #[test]
    fn test_double_toggle_restores_and_persists() {
        let mut controller = ThemeController::load(MemoryStore::new(), false);
        controller.toggle();
        assert_eq!(controller.store().get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));
        controller.toggle();
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.store().get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(controller.store().writes(), 2);
    }

    #[test]
    fn test_storage_failures_do_not_block_toggle() {
        let mut controller = ThemeController::load(BrokenStore, true);
        assert_eq!(controller.toggle(), Theme::Light);
    }

    #[test]
    fn test_palettes_differ_per_theme() {
        assert_ne!(ChartPalette::for_theme(Theme::Dark), ChartPalette::for_theme(Theme::Light));
    }
}
