use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parses a persisted preference. Anything other than `light`/`dark` is
    /// treated as no preference.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutually exclusive top-level view of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Overview,
    Dashboard,
    Models,
    Playground,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Dashboard,
        Section::Models,
        Section::Playground,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Dashboard => "dashboard",
            Section::Models => "models",
            Section::Playground => "playground",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Dashboard => "Live Dashboard",
            Section::Models => "Models",
            Section::Playground => "API Playground",
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().trim_start_matches('#');
        Section::ALL
            .into_iter()
            .find(|section| section.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| format!("unknown section: {}", s))
    }
}

/// Market region selectable on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    UsEast,
    UsWest,
    EuCentral,
    AsiaPacific,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::UsEast,
        Region::UsWest,
        Region::EuCentral,
        Region::AsiaPacific,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Region::UsEast => "us-east",
            Region::UsWest => "us-west",
            Region::EuCentral => "eu-central",
            Region::AsiaPacific => "asia-pacific",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::UsEast => "US East",
            Region::UsWest => "US West",
            Region::EuCentral => "EU Central",
            Region::AsiaPacific => "Asia Pacific",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown region: {}", s))
    }
}
