//! Page controller: the single owner of all page-lifetime state.
//!
//! Every user interaction and timer callback of the page is a method here.
//! The front end renders from the accessors and forwards browser events;
//! timers are tasks on a virtual clock advanced through [`PageController::advance`].

use chrono::{DateTime, Duration as DateDuration, NaiveDate, Utc};
use common::{
    ACTUAL_PRICES, HERO_STATISTICS, PlaygroundPayload, PriceSeries, Region, ResponseStatus,
    Section, Theme, sample_series,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, info, instrument, trace};

use crate::catalog::ModelCatalog;
use crate::charts::{self, ChartBackend, ChartKind, ChartRegistry, ChartSpec};
use crate::clock::{Scheduler, TaskId};
use crate::config::DashboardConfig;
use crate::counter::CounterAnimation;
use crate::error::Result;
use crate::navbar::NavbarState;
use crate::navigation::{SectionSwitcher, charts_for};
use crate::newsletter::{FormFeedback, NewsletterForm};
use crate::particles::{Particle, particle_field};
use crate::playground::{PlaygroundContext, dispatch};
use crate::simulator::{PriceSimulator, PriceUpdate};
use crate::theme::{PreferenceStore, ThemeController};

/// Model selected when the page loads.
pub const DEFAULT_MODEL_TAG: &str = "transformer";

/// Timer tasks of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTask {
    PriceTick,
    ResizeSettled,
    NewsletterReset,
    CounterStep,
    PlaygroundResponse { path: String },
}

/// Host facts the page is started with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageEnvironment {
    pub os_prefers_dark: bool,
    /// Wall clock at page load
    pub now: DateTime<Utc>,
    /// Local hour the forecast window starts at
    pub local_hour: u32,
    pub today: NaiveDate,
}

impl PageEnvironment {
    pub fn from_clock(now: DateTime<Utc>, local_hour: u32, today: NaiveDate) -> Self {
        Self {
            os_prefers_dark: false,
            now,
            local_hour: local_hour % 24,
            today,
        }
    }
}

/// Metrics panel of the models section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsView {
    pub model: String,
    pub accuracy: String,
    pub rmse: String,
    pub mae: String,
}

/// Request/response panel of the API playground.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaygroundView {
    pub endpoint: Option<String>,
    pub loading: bool,
    pub output: String,
    pub status: Option<ResponseStatus>,
}

pub struct PageController<B: ChartBackend, S: PreferenceStore> {
    config: DashboardConfig,
    env: PageEnvironment,
    sections: SectionSwitcher,
    theme: ThemeController<S>,
    charts: ChartRegistry<B>,
    series: PriceSeries,
    simulator: PriceSimulator,
    catalog: ModelCatalog,
    active_model: String,
    metrics: MetricsView,
    region: Region,
    counters: CounterAnimation,
    newsletter: NewsletterForm,
    navbar: NavbarState,
    playground: PlaygroundView,
    particles: Vec<Particle>,
    scheduler: Scheduler<PageTask>,
    tick_task: Option<TaskId>,
    resize_task: Option<TaskId>,
    newsletter_task: Option<TaskId>,
    counter_task: Option<TaskId>,
    playground_task: Option<TaskId>,
}

impl<B: ChartBackend, S: PreferenceStore> PageController<B, S> {
    /// Builds the page state and arms the periodic price tick.
    pub fn new(config: DashboardConfig, backend: B, store: S, env: PageEnvironment) -> Result<Self> {
        config.validate()?;

        let theme = ThemeController::load(store, env.os_prefers_dark);
        let catalog = ModelCatalog::default();
        let metrics = catalog
            .lookup(DEFAULT_MODEL_TAG)
            .map(metrics_of)
            .unwrap_or_else(|| MetricsView {
                model: String::new(),
                accuracy: "-".to_string(),
                rmse: "-".to_string(),
                mae: "-".to_string(),
            });

        let mut particle_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let particles = particle_field(config.particle_count, &mut particle_rng);

        let mut scheduler = Scheduler::new();
        let tick_task = Some(scheduler.schedule_repeating(config.tick_interval(), PageTask::PriceTick));

        info!(theme = %theme.theme(), "page controller initialized");

        Ok(Self {
            simulator: PriceSimulator::new(&config),
            counters: CounterAnimation::new(&HERO_STATISTICS, config.counter_steps),
            navbar: NavbarState::new(config.navbar_solid_after_px, config.navbar_hide_after_px),
            config,
            env,
            sections: SectionSwitcher::default(),
            theme,
            charts: ChartRegistry::new(backend),
            series: sample_series(),
            catalog,
            active_model: DEFAULT_MODEL_TAG.to_string(),
            metrics,
            region: Region::UsEast,
            newsletter: NewsletterForm::default(),
            playground: PlaygroundView::default(),
            particles,
            scheduler,
            tick_task,
            resize_task: None,
            newsletter_task: None,
            counter_task: None,
            playground_task: None,
        })
    }

    // ===================== Navigation =====================

    /// Activates a section and makes sure its charts exist, constructing
    /// them on the first visit and resizing them afterwards. Unknown ids are
    /// ignored. The caller scrolls the viewport to the top on `Some`.
    ///
    /// A revisited dashboard gets the forecast committed while it was hidden.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, id: &str) -> Option<Section> {
        let section = self.sections.activate(id)?;
        let revisit = self.charts.is_created(ChartKind::Forecast);
        for kind in charts_for(section) {
            let spec = self.chart_spec(*kind);
            self.charts.ensure(*kind, || spec);
        }
        if section == Section::Dashboard && revisit {
            let forecast = self.series.forecast;
            self.charts.update(ChartKind::Forecast, 0, &forecast);
        }
        Some(section)
    }

    pub fn active_section(&self) -> Section {
        self.sections.active()
    }

    // ===================== Theme =====================

    /// Flips dark mode, persists it and recolors every constructed chart.
    #[instrument(skip(self))]
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggle();
        let palette = self.theme.palette();
        self.charts.apply_palette(&palette);
        theme
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn preferences(&self) -> &S {
        self.theme.store()
    }

    // ===================== Models =====================

    /// Shows the metrics of the model behind `tag`. Unknown tags leave the
    /// panel untouched and return false.
    #[instrument(skip(self))]
    pub fn select_model(&mut self, tag: &str) -> bool {
        match self.catalog.lookup(tag) {
            Some(model) => {
                self.metrics = metrics_of(model);
                self.active_model = ModelCatalog::tag_for(model);
                true
            }
            None => false,
        }
    }

    pub fn active_model(&self) -> &str {
        &self.active_model
    }

    pub fn metrics(&self) -> &MetricsView {
        &self.metrics
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    // ===================== Prices =====================

    /// Applies the one-shot region perturbation immediately.
    #[instrument(skip(self))]
    pub fn change_region(&mut self, id: &str) -> Option<PriceUpdate> {
        let region: Region = match id.parse() {
            Ok(region) => region,
            Err(e) => {
                debug!("Ignoring region change: {}", e);
                return None;
            }
        };
        self.region = region;
        Some(self.simulator.region_change(&mut self.series, region))
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn price_text(&self) -> String {
        format!("${:.4}", self.series.displayed)
    }

    pub fn ticker_text(&self) -> String {
        self.series.ticker_text("$", common::PRICE_UNIT)
    }

    // ===================== Playground =====================

    /// Starts a simulated request; the response arrives after the configured
    /// delay. A new request replaces one still in flight.
    #[instrument(skip(self))]
    pub fn request_endpoint(&mut self, path: &str) {
        if let Some(task) = self.playground_task.take() {
            self.scheduler.cancel(task);
        }
        self.playground = PlaygroundView {
            endpoint: Some(path.to_string()),
            loading: true,
            output: String::new(),
            status: None,
        };
        self.playground_task = Some(self.scheduler.schedule_once(
            self.config.playground_delay(),
            PageTask::PlaygroundResponse { path: path.to_string() },
        ));
    }

    pub fn playground(&self) -> &PlaygroundView {
        &self.playground
    }

    /// Payload the playground would answer with right now.
    pub fn respond(&self, path: &str) -> PlaygroundPayload {
        let context = PlaygroundContext {
            series: &self.series,
            models: self.catalog.models(),
            now: self.now(),
        };
        dispatch(path, &context)
    }

    // ===================== Viewport =====================

    /// Debounces viewport resizes; charts are laid out again once resizing
    /// stopped for the configured quiet period.
    pub fn on_resize(&mut self) {
        if let Some(task) = self.resize_task.take() {
            self.scheduler.cancel(task);
        }
        self.resize_task = Some(
            self.scheduler
                .schedule_once(self.config.resize_debounce(), PageTask::ResizeSettled),
        );
    }

    /// Hero statistics entered the viewport.
    pub fn on_stats_visible(&mut self) -> bool {
        if !self.counters.trigger() {
            return false;
        }
        self.counter_task = Some(
            self.scheduler
                .schedule_repeating(self.config.counter_interval(), PageTask::CounterStep),
        );
        true
    }

    pub fn counters(&self) -> &CounterAnimation {
        &self.counters
    }

    pub fn on_scroll(&mut self, offset: f64) {
        self.navbar.on_scroll(offset);
    }

    pub fn navbar(&self) -> &NavbarState {
        &self.navbar
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // ===================== Newsletter =====================

    pub fn set_newsletter_input(&mut self, text: &str) {
        self.newsletter.input = text.to_string();
    }

    /// Validates the email and shows transient feedback that reverts after
    /// the configured timeout.
    #[instrument(skip(self))]
    pub fn subscribe(&mut self) -> FormFeedback {
        let feedback = self.newsletter.submit();
        if let Some(task) = self.newsletter_task.take() {
            self.scheduler.cancel(task);
        }
        self.newsletter_task = Some(
            self.scheduler
                .schedule_once(self.config.newsletter_reset(), PageTask::NewsletterReset),
        );
        feedback
    }

    pub fn newsletter(&self) -> &NewsletterForm {
        &self.newsletter
    }

    // ===================== Clock =====================

    /// Runs every task due within `delta`. Returns the number of tasks run.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let until = self.scheduler.now() + delta;
        let mut fired = 0;
        while let Some((id, task)) = self.scheduler.pop_due(until) {
            fired += 1;
            self.run_task(id, task);
        }
        self.scheduler.settle(until);
        fired
    }

    /// Wall clock as seen by the page.
    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = DateDuration::from_std(self.scheduler.now()).unwrap_or_else(|_| DateDuration::zero());
        self.env.now + elapsed
    }

    pub fn charts(&self) -> &ChartRegistry<B> {
        &self.charts
    }

    /// Page unload: destroys every chart and drops pending timers.
    pub fn teardown(&mut self) {
        for task in [
            self.tick_task.take(),
            self.resize_task.take(),
            self.newsletter_task.take(),
            self.counter_task.take(),
            self.playground_task.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.cancel(task);
        }
        self.charts.destroy_all();
        info!("page controller torn down");
    }

    fn run_task(&mut self, id: TaskId, task: PageTask) {
        trace!(?id, ?task, "running task");
        match task {
            PageTask::PriceTick => self.price_tick(),
            PageTask::ResizeSettled => {
                self.resize_task = None;
                for kind in charts_for(self.sections.active()) {
                    self.charts.resize(*kind);
                }
            }
            PageTask::NewsletterReset => {
                self.newsletter_task = None;
                self.newsletter.reset();
            }
            PageTask::CounterStep => {
                if self.counters.step() {
                    if let Some(task) = self.counter_task.take() {
                        self.scheduler.cancel(task);
                    }
                    debug!("counter animation finished");
                }
            }
            PageTask::PlaygroundResponse { path } => {
                self.playground_task = None;
                let payload = self.respond(&path);
                self.playground.loading = false;
                self.playground.status = Some(payload.status());
                self.playground.output = payload.to_pretty_json();
            }
        }
    }

    fn price_tick(&mut self) {
        let Some(update) = self.simulator.tick(&mut self.series) else {
            return;
        };
        trace!(current = update.current, "price tick committed");
        if update.forecast_changed && self.sections.is_active(Section::Dashboard) {
            let forecast = self.series.forecast;
            self.charts.update(ChartKind::Forecast, 0, &forecast);
        }
    }

    fn chart_spec(&self, kind: ChartKind) -> ChartSpec {
        let palette = self.theme.palette();
        match kind {
            ChartKind::Forecast => {
                charts::forecast_spec(self.env.local_hour, &self.series.forecast, &ACTUAL_PRICES, &palette)
            }
            ChartKind::Historical => charts::historical_spec(self.env.today, &self.series.history, &palette),
            ChartKind::Comparison => charts::comparison_spec(self.catalog.models(), &palette),
        }
    }
}

fn metrics_of(model: &common::ModelDescriptor) -> MetricsView {
    MetricsView {
        model: model.name.clone(),
        accuracy: model.accuracy_text(),
        rmse: model.rmse_text(),
        mae: model.mae_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartCall, HeadlessCharts};
    use crate::newsletter::{IDLE_PLACEHOLDER, INVALID_PLACEHOLDER};
    use crate::testing::*;
    use crate::theme::{MemoryStore, THEME_STORAGE_KEY};
    use common::{FORECAST_HOURS, HISTORY_DAYS};

    #[test]
    fn test_starts_on_overview_without_charts() {
        let controller = test_controller(DashboardConfig::default());
        assert_eq!(controller.active_section(), Section::Overview);
        assert_eq!(controller.charts().created().count(), 0);
        assert_eq!(controller.active_model(), "transformer");
        assert_eq!(controller.particles().len(), 50);
    }

    #[test]
    fn test_navigation_constructs_charts_once() {
        let mut controller = test_controller(DashboardConfig::default());
        assert_eq!(controller.navigate("dashboard"), Some(Section::Dashboard));
        controller.navigate("models");
        controller.navigate("dashboard");

        assert_eq!(creates(&controller, ChartKind::Forecast), 1);
        assert_eq!(creates(&controller, ChartKind::Historical), 1);
        assert_eq!(creates(&controller, ChartKind::Comparison), 1);
        let resizes = controller
            .charts()
            .backend()
            .count(|c| *c == ChartCall::Resize(ChartKind::Forecast));
        assert_eq!(resizes, 1);
    }

    #[test]
    fn test_unknown_section_keeps_active() {
        let mut controller = test_controller(DashboardConfig::default());
        controller.navigate("models");
        assert_eq!(controller.navigate("pricing"), None);
        assert_eq!(controller.active_section(), Section::Models);
    }

    #[test]
    fn test_theme_double_toggle_recolors_charts() {
        let mut controller = test_controller(DashboardConfig::default());
        assert!(controller.is_dark());
        controller.navigate("dashboard");

        controller.toggle_theme();
        controller.toggle_theme();

        assert!(controller.is_dark());
        assert_eq!(
            controller.preferences().get(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(controller.preferences().writes(), 2);
        let palette_calls = controller
            .charts()
            .backend()
            .count(|c| matches!(c, ChartCall::Palette(..)));
        assert_eq!(palette_calls, 4);
    }

    #[test]
    fn test_persisted_theme_is_loaded() {
        let store = MemoryStore::with_value(THEME_STORAGE_KEY, "light");
        let controller =
            PageController::new(DashboardConfig::default(), HeadlessCharts::new(), store, test_env())
                .unwrap();
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn test_tick_updates_forecast_chart_only_when_dashboard_visible() {
        let mut controller = test_controller(committing_config());
        controller.navigate("dashboard");
        controller.advance(ms(5000));
        assert_eq!(forecast_updates(&controller), 1);

        controller.navigate("models");
        let displayed = controller.series().displayed;
        controller.advance(ms(5000));
        assert_eq!(forecast_updates(&controller), 1);
        assert_ne!(controller.series().displayed, displayed);
    }

    #[test]
    fn test_revisited_dashboard_gets_hidden_forecast() {
        let mut controller = test_controller(committing_config());
        controller.navigate("dashboard");
        controller.navigate("models");
        controller.advance(ms(5000));
        assert_eq!(forecast_updates(&controller), 0);

        controller.navigate("dashboard");
        assert_eq!(forecast_updates(&controller), 1);
        let pushed = controller.charts().backend().calls().iter().rev().find_map(|call| match call {
            ChartCall::Update { kind: ChartKind::Forecast, values, .. } => Some(values.clone()),
            _ => None,
        });
        assert_eq!(pushed, Some(controller.series().forecast.to_vec()));
    }

    #[test]
    fn test_uncommitted_tick_leaves_ticker_alone() {
        let mut controller = test_controller(DashboardConfig {
            seed: Some(1),
            tick_delta: 0.0005,
            commit_threshold: 0.01,
            ..Default::default()
        });
        controller.navigate("dashboard");
        let price = controller.price_text();
        let ticker = controller.ticker_text();
        let trend = controller.series().trend;

        controller.advance(ms(5000));

        assert_eq!(controller.price_text(), price);
        assert_eq!(controller.ticker_text(), ticker);
        assert_eq!(controller.series().trend, trend);
        assert_eq!(controller.series().change_percent, 0.0);
        assert_eq!(forecast_updates(&controller), 0);
    }

    #[test]
    fn test_mutations_preserve_invariants() {
        let mut controller = test_controller(DashboardConfig {
            tick_delta: 0.2,
            forecast_point_delta: 0.2,
            region_delta: 0.5,
            ..committing_config()
        });
        controller.navigate("dashboard");
        for i in 0..200 {
            controller.advance(ms(5000));
            if i % 5 == 0 {
                controller.change_region("asia-pacific");
            }
            let series = controller.series();
            assert!(series.current >= 0.0);
            assert!(series.forecast.iter().all(|p| *p >= 0.0));
            assert_eq!(series.forecast.len(), FORECAST_HOURS);
            assert_eq!(series.history.len(), HISTORY_DAYS);
        }
    }

    #[test]
    fn test_region_change_applies_regardless_of_section() {
        let mut controller = test_controller(DashboardConfig { seed: Some(2), ..Default::default() });
        let update = controller.change_region("eu-central").unwrap();
        assert_eq!(controller.region(), Region::EuCentral);
        assert_eq!(controller.series().displayed, update.current);
        assert!(controller.change_region("atlantis").is_none());
        assert_eq!(controller.region(), Region::EuCentral);
    }

    #[test]
    fn test_model_selection() {
        let mut controller = test_controller(DashboardConfig::default());
        assert!(controller.select_model("lstm"));
        assert!(controller.select_model("transformer"));
        assert_eq!(controller.metrics().accuracy, "94.2%");
        assert_eq!(controller.metrics().rmse, "0.0208");
        assert_eq!(controller.metrics().mae, "0.0165");

        assert!(!controller.select_model("arima"));
        assert_eq!(controller.metrics().model, "Transformer");
        assert_eq!(controller.active_model(), "transformer");

        assert!(controller.select_model("Ensemble"));
        assert_eq!(controller.active_model(), "ensemble");
    }

    #[test]
    fn test_playground_responds_after_delay() {
        let mut controller = test_controller(DashboardConfig::default());
        controller.request_endpoint("/api/v1/forecast/24");
        assert!(controller.playground().loading);

        controller.advance(ms(799));
        assert!(controller.playground().loading);
        controller.advance(ms(1));

        let view = controller.playground();
        assert!(!view.loading);
        assert_eq!(view.status, Some(ResponseStatus::Success));
        let json: serde_json::Value = serde_json::from_str(&view.output).unwrap();
        assert_eq!(json["forecast"].as_array().unwrap().len(), 24);
    }

    #[test]
    fn test_playground_latest_request_wins() {
        let mut controller = test_controller(DashboardConfig::default());
        controller.request_endpoint("/api/v1/models");
        controller.advance(ms(400));
        controller.request_endpoint("/api/v1/unknown");
        controller.advance(ms(800));

        let view = controller.playground();
        assert_eq!(view.endpoint.as_deref(), Some("/api/v1/unknown"));
        assert_eq!(view.status, Some(ResponseStatus::Error));
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut controller = test_controller(DashboardConfig::default());
        controller.navigate("models");
        for _ in 0..10 {
            controller.on_resize();
            controller.advance(ms(100));
        }
        let resizes = |c: &TestController| {
            c.charts().backend().count(|call| matches!(call, ChartCall::Resize(_)))
        };
        assert_eq!(resizes(&controller), 0);
        controller.advance(ms(250));
        assert_eq!(resizes(&controller), 1);
    }

    #[test]
    fn test_counters_fire_once() {
        let mut controller = test_controller(DashboardConfig::default());
        assert!(controller.on_stats_visible());
        controller.advance(ms(20 * 100));
        assert!(controller.counters().is_finished());

        assert!(!controller.on_stats_visible());
        assert!(!controller.on_stats_visible());
        let texts: Vec<_> = controller.counters().counters().iter().map(|c| c.text()).collect();
        assert_eq!(texts[2], "2.0M");
    }

    #[test]
    fn test_newsletter_feedback_reverts() {
        let mut controller = test_controller(DashboardConfig::default());
        controller.set_newsletter_input("not-an-email");
        assert_eq!(controller.subscribe(), FormFeedback::Invalid);
        assert_eq!(controller.newsletter().feedback.placeholder(), INVALID_PLACEHOLDER);

        controller.advance(ms(2000));
        controller.set_newsletter_input("a@b.com");
        assert_eq!(controller.subscribe(), FormFeedback::Subscribed);

        // The first reset was cancelled by the second submission.
        controller.advance(ms(1500));
        assert_eq!(controller.newsletter().feedback, FormFeedback::Subscribed);
        controller.advance(ms(1500));
        assert_eq!(controller.newsletter().feedback, FormFeedback::Idle);
        assert_eq!(controller.newsletter().feedback.placeholder(), IDLE_PLACEHOLDER);
    }

    #[test]
    fn test_now_follows_virtual_clock() {
        let mut controller = test_controller(DashboardConfig::default());
        controller.advance(ms(60_000));
        assert_eq!(controller.now(), test_env().now + DateDuration::seconds(60));
    }

    #[test]
    fn test_teardown_destroys_charts_and_stops_ticks() {
        let mut controller = test_controller(committing_config());
        controller.navigate("dashboard");
        controller.teardown();
        assert_eq!(controller.charts().created().count(), 0);
        let displayed = controller.series().displayed;
        assert_eq!(controller.advance(ms(60_000)), 0);
        assert_eq!(controller.series().displayed, displayed);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = DashboardConfig { tick_interval_ms: 0, ..Default::default() };
        let result = PageController::new(config, HeadlessCharts::new(), MemoryStore::new(), test_env());
        assert!(result.is_err());
    }
}
