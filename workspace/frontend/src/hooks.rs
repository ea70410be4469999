use chrono::{Local, Timelike, Utc};
use compute::config::DashboardConfig;
use compute::controller::{PageController, PageEnvironment};
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};
use yew::prelude::*;

use crate::charts::PlotlyCharts;
use crate::storage::{os_prefers_dark, LocalStore};

/// Page controller as owned by the browser front end.
pub type Page = PageController<PlotlyCharts, LocalStore>;

/// Resolution of the virtual clock driver.
const CLOCK_RESOLUTION_MS: u32 = 20;

/// Share of an element that must be on screen before it fades in.
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Shared handle to the page controller.
///
/// Components read through [`PageContext::read`] and mutate through
/// [`PageContext::update`], which re-renders every consumer afterwards.
#[derive(Clone)]
pub struct PageContext {
    page: Rc<RefCell<Page>>,
    revision: u64,
    refresh: Callback<()>,
}

impl PartialEq for PageContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.page, &other.page) && self.revision == other.revision
    }
}

impl PageContext {
    pub fn read<R>(&self, f: impl FnOnce(&Page) -> R) -> R {
        f(&self.page.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        let result = {
            let mut page = self.page.borrow_mut();
            f(&mut page)
        };
        self.refresh.emit(());
        result
    }
}

/// Render counter bumped after every page mutation.
#[derive(Default, PartialEq)]
struct Revision(u64);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Rc::new(Revision(self.0.wrapping_add(1)))
    }
}

fn page_environment() -> PageEnvironment {
    let local = Local::now();
    PageEnvironment {
        os_prefers_dark: os_prefers_dark(),
        now: Utc::now(),
        local_hour: local.hour(),
        today: local.date_naive(),
    }
}

/// Builds the page from the configured settings, falling back to the
/// defaults when they are rejected.
fn build_page(config: DashboardConfig) -> Option<Page> {
    let env = page_environment();
    match PageController::new(config, PlotlyCharts, LocalStore, env) {
        Ok(page) => Some(page),
        Err(e) => {
            log::error!("Invalid dashboard settings ({}), using defaults", e);
            PageController::new(DashboardConfig::default(), PlotlyCharts, LocalStore, env)
                .map_err(|e| log::error!("Failed to start the dashboard: {}", e))
                .ok()
        }
    }
}

/// Clock interval and window listeners feeding one page. Dropping it
/// detaches everything and tears the page down.
struct PageDriver {
    page: Rc<RefCell<Page>>,
    window: Option<Window>,
    _clock: Interval,
    on_resize: Closure<dyn FnMut()>,
    on_scroll: Closure<dyn FnMut()>,
}

impl PageDriver {
    fn start(page: Rc<RefCell<Page>>, refresh: Callback<()>) -> Self {
        log::debug!("Starting page clock");
        let clock_page = page.clone();
        let clock_refresh = refresh.clone();
        let mut last = js_sys::Date::now();
        let clock = Interval::new(CLOCK_RESOLUTION_MS, move || {
            let now = js_sys::Date::now();
            let elapsed = (now - last).max(0.0);
            last = now;
            let fired = clock_page
                .borrow_mut()
                .advance(Duration::from_millis(elapsed as u64));
            if fired > 0 {
                clock_refresh.emit(());
            }
        });

        // Nothing visible changes until the debounced resize fires on the clock.
        let resize_page = page.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            resize_page.borrow_mut().on_resize();
        });

        let scroll_page = page.clone();
        let on_scroll = Closure::<dyn FnMut()>::new(move || {
            let offset = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
            let changed = {
                let mut page = scroll_page.borrow_mut();
                let before = *page.navbar();
                page.on_scroll(offset);
                page.navbar().solid != before.solid || page.navbar().hidden != before.hidden
            };
            if changed {
                refresh.emit(());
            }
        });

        let window = web_sys::window();
        if let Some(window) = &window {
            for (event, listener) in [("resize", &on_resize), ("scroll", &on_scroll)] {
                if let Err(e) = window.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref()) {
                    log::warn!("Failed to listen for {}: {:?}", event, e);
                }
            }
        }

        Self {
            page,
            window,
            _clock: clock,
            on_resize,
            on_scroll,
        }
    }
}

impl Drop for PageDriver {
    fn drop(&mut self) {
        log::debug!("Stopping page clock");
        if let Some(window) = &self.window {
            for (event, listener) in [("resize", &self.on_resize), ("scroll", &self.on_scroll)] {
                let _ = window.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
            }
        }
        self.page.borrow_mut().teardown();
    }
}

#[derive(Properties, PartialEq)]
pub struct PageProviderProps {
    pub config: DashboardConfig,
    pub children: Children,
}

/// Owns the page controller, drives its clock and forwards window events.
#[function_component(PageProvider)]
pub fn page_provider(props: &PageProviderProps) -> Html {
    let page = {
        let config = props.config.clone();
        use_memo((), move |_| build_page(config).map(|page| Rc::new(RefCell::new(page))))
    };
    let revision = use_reducer(Revision::default);

    let refresh = {
        let dispatcher = revision.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(()))
    };

    {
        let page = (*page).clone();
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            let driver = page.map(|page| PageDriver::start(page, refresh));
            move || drop(driver)
        });
    }

    match (*page).clone() {
        Some(page) => {
            let context = PageContext {
                page,
                revision: revision.0,
                refresh,
            };
            html! {
                <ContextProvider<PageContext> context={context}>
                    { for props.children.iter() }
                </ContextProvider<PageContext>>
            }
        }
        None => html! {
            <div class="alert alert-error" role="alert">
                {"The dashboard could not be started. Check the browser console for details."}
            </div>
        },
    }
}

/// Access to the page controller from any component below [`PageProvider`].
#[hook]
pub fn use_page() -> PageContext {
    use_context::<PageContext>().expect("use_page called outside PageProvider")
}

/// Fade-in on first appearance: returns the node to observe and whether it
/// has been on screen yet.
#[hook]
pub fn use_reveal() -> (NodeRef, bool) {
    let node = use_node_ref();
    let visible = use_state(|| false);

    {
        let node = node.clone();
        let setter = visible.setter();
        use_effect_with((), move |_| {
            let fallback = setter.clone();
            let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry = entry.unchecked_into::<IntersectionObserverEntry>();
                        if entry.is_intersecting() {
                            setter.set(true);
                            observer.unobserve(&entry.target());
                        }
                    }
                },
            );

            let options = IntersectionObserverInit::new();
            options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
            options.set_root_margin(REVEAL_ROOT_MARGIN);
            let observer = IntersectionObserver::new_with_options(
                on_intersect.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| {
                log::warn!("Scroll reveal unavailable: {:?}", e);
                fallback.set(true);
            })
            .ok();
            if let (Some(observer), Some(element)) = (&observer, node.cast::<web_sys::Element>()) {
                observer.observe(&element);
            }

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                drop(on_intersect);
            }
        });
    }

    (node, *visible)
}
