use compute::error::{ComputeError, Result};
use compute::theme::PreferenceStore;
use web_sys::{window, Storage};

/// Preference store backed by `window.localStorage`.
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage> {
        window()
            .ok_or_else(|| ComputeError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| ComputeError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ComputeError::Storage("localStorage unavailable".to_string()))
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ComputeError::Storage(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ComputeError::Storage(format!("{:?}", e)))
    }
}

/// Whether the OS asks for a dark color scheme.
pub fn os_prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}
