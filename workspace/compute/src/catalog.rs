//! Model metrics lookup for the models section.

use common::ModelDescriptor;
use tracing::debug;

/// Select-box tags whose model name differs from the tag itself.
const TAG_ALIASES: &[(&str, &str)] = &[("ensemble", "hybrid ensemble")];

/// Immutable list of the forecasting models presented on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Resolves a select-box tag to its model: names match case-insensitively
    /// after alias normalization.
    pub fn lookup(&self, tag: &str) -> Option<&ModelDescriptor> {
        let normalized = normalize_tag(tag);
        let found = self
            .models
            .iter()
            .find(|model| model.name.to_lowercase() == normalized);
        if found.is_none() {
            debug!(tag, "no model matches tag");
        }
        found
    }

    /// Tag under which a model is selectable.
    pub fn tag_for(model: &ModelDescriptor) -> String {
        let name = model.name.to_lowercase();
        TAG_ALIASES
            .iter()
            .find(|(_, target)| *target == name)
            .map(|(alias, _)| alias.to_string())
            .unwrap_or(name)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(common::sample_models())
    }
}

fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim().to_lowercase();
    TAG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, target)| target.to_string())
        .unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_transformer() {
        let catalog = ModelCatalog::default();
        let model = catalog.lookup("transformer").unwrap();
        assert_eq!(model.accuracy_text(), "94.2%");
        assert_eq!(model.rmse, 0.0208);
        assert_eq!(model.mae, 0.0165);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = ModelCatalog::default();
        assert_eq!(catalog.lookup("XgBoost").unwrap().name, "XGBoost");
    }

    #[test]
    fn test_alias_resolves_ensemble() {
        let catalog = ModelCatalog::default();
        assert_eq!(catalog.lookup("ensemble").unwrap().name, "Hybrid Ensemble");
    }

    #[test]
    fn test_unknown_tag() {
        assert!(ModelCatalog::default().lookup("arima").is_none());
    }

    #[test]
    fn test_tag_for_round_trips_through_lookup() {
        let catalog = ModelCatalog::default();
        for model in catalog.models() {
            let tag = ModelCatalog::tag_for(model);
            assert_eq!(catalog.lookup(&tag), Some(model));
        }
    }
}
