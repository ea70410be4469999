use common::Section;
use tracing::debug;

use crate::charts::ChartKind;
use crate::error::{ComputeError, Result};

/// Charts hosted by a section, constructed on its first visit.
pub fn charts_for(section: Section) -> &'static [ChartKind] {
    match section {
        Section::Dashboard => &[ChartKind::Forecast, ChartKind::Historical],
        Section::Models => &[ChartKind::Comparison],
        Section::Overview | Section::Playground => &[],
    }
}

/// Resolves a section identifier, with or without the leading `#`.
pub fn resolve_section(id: &str) -> Result<Section> {
    id.parse::<Section>()
        .map_err(|_| ComputeError::UnknownSection(id.to_string()))
}

/// Tracks which section is active. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSwitcher {
    active: Section,
}

impl SectionSwitcher {
    pub fn new(initial: Section) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == section
    }

    /// Activates the section named by `id`. Unknown ids leave the active
    /// section untouched and return `None`.
    pub fn activate(&mut self, id: &str) -> Option<Section> {
        match resolve_section(id) {
            Ok(section) => {
                debug!(from = self.active.id(), to = section.id(), "section switch");
                self.active = section;
                Some(section)
            }
            Err(e) => {
                debug!("Ignoring navigation: {}", e);
                None
            }
        }
    }
}

impl Default for SectionSwitcher {
    fn default() -> Self {
        Self::new(Section::Overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_switches_exactly_one() {
        let mut switcher = SectionSwitcher::default();
        assert_eq!(switcher.activate("models"), Some(Section::Models));
        let active: Vec<_> = Section::ALL.into_iter().filter(|s| switcher.is_active(*s)).collect();
        assert_eq!(active, vec![Section::Models]);
    }

    #[test]
    fn test_unknown_id_keeps_previous() {
        let mut switcher = SectionSwitcher::new(Section::Dashboard);
        assert_eq!(switcher.activate("pricing"), None);
        assert_eq!(switcher.active(), Section::Dashboard);
    }

    #[test]
    fn test_resolve_section() {
        assert_eq!(resolve_section("#Playground"), Ok(Section::Playground));
        assert_eq!(
            resolve_section("pricing"),
            Err(ComputeError::UnknownSection("pricing".to_string()))
        );
    }

    #[test]
    fn test_chart_hosting_sections() {
        assert_eq!(charts_for(Section::Dashboard).len(), 2);
        assert_eq!(charts_for(Section::Models), &[ChartKind::Comparison]);
        assert!(charts_for(Section::Playground).is_empty());
    }
}
