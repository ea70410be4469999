use serde::{Deserialize, Serialize};

/// Static description of one forecasting model shown on the models section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub description: String,
    /// Accuracy in percent
    pub accuracy: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl ModelDescriptor {
    pub fn new(name: &str, description: &str, accuracy: f64, rmse: f64, mae: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            accuracy,
            rmse,
            mae,
        }
    }

    /// Accuracy as shown in the metrics panel, e.g. `94.2%`.
    pub fn accuracy_text(&self) -> String {
        format!("{:.1}%", self.accuracy)
    }

    pub fn rmse_text(&self) -> String {
        format!("{:.4}", self.rmse)
    }

    pub fn mae_text(&self) -> String {
        format!("{:.4}", self.mae)
    }
}
