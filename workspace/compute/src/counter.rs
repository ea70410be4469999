//! Hero statistic counters animated from zero on first sight.

use common::HeroStatistic;
use tracing::debug;

/// Formats a counter value, picking the suffix from the target magnitude.
pub fn format_stat(value: f64, target: f64) -> String {
    if target >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if target >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.1}", value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub label: &'static str,
    pub target: f64,
    pub current: f64,
}

impl Counter {
    pub fn text(&self) -> String {
        format_stat(self.current, self.target)
    }

    pub fn is_done(&self) -> bool {
        self.current >= self.target
    }
}

/// One-shot animation of all hero counters over a fixed number of steps.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    counters: Vec<Counter>,
    steps: u32,
    taken: u32,
    fired: bool,
}

impl CounterAnimation {
    pub fn new(statistics: &[HeroStatistic], steps: u32) -> Self {
        Self {
            counters: statistics
                .iter()
                .map(|stat| Counter {
                    label: stat.label,
                    target: stat.target,
                    current: 0.0,
                })
                .collect(),
            steps: steps.max(1),
            taken: 0,
            fired: false,
        }
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Starts the animation. Returns false when it already ran.
    pub fn trigger(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        debug!(counters = self.counters.len(), "counter animation started");
        true
    }

    /// Advances every counter by one step. Returns true once all counters
    /// reached their target; the last step lands exactly on it.
    pub fn step(&mut self) -> bool {
        if !self.fired {
            return false;
        }
        self.taken = (self.taken + 1).min(self.steps);
        let steps = f64::from(self.steps);
        for counter in &mut self.counters {
            counter.current = if self.taken == self.steps {
                counter.target
            } else {
                (counter.current + counter.target / steps).min(counter.target)
            };
        }
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.counters.iter().all(Counter::is_done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::HERO_STATISTICS;

    #[test]
    fn test_format_stat_suffixes() {
        assert_eq!(format_stat(2_000_000.0, 2_000_000.0), "2.0M");
        assert_eq!(format_stat(1_500.0, 12_000.0), "1.5K");
        assert_eq!(format_stat(94.8, 94.8), "94.8");
        assert_eq!(format_stat(0.0, 2_000_000.0), "0.0M");
    }

    #[test]
    fn test_trigger_fires_once() {
        let mut animation = CounterAnimation::new(&HERO_STATISTICS, 100);
        assert!(animation.trigger());
        assert!(!animation.trigger());
        assert!(!animation.trigger());
    }

    #[test]
    fn test_reaches_targets_in_step_count() {
        let mut animation = CounterAnimation::new(&HERO_STATISTICS, 10);
        animation.trigger();
        for _ in 0..9 {
            assert!(!animation.step());
        }
        assert!(animation.step());
        let texts: Vec<_> = animation.counters().iter().map(Counter::text).collect();
        assert_eq!(texts, vec!["94.8", "24.0", "2.0M", "15.0"]);
    }

    #[test]
    fn test_step_before_trigger_is_noop() {
        let mut animation = CounterAnimation::new(&HERO_STATISTICS, 10);
        assert!(!animation.step());
        assert!(animation.counters().iter().all(|c| c.current == 0.0));
    }
}
