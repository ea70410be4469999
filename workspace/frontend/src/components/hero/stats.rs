use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::hooks::use_page;

/// Fraction of the stats block that must be visible to start the counters.
const VISIBILITY_THRESHOLD: f64 = 0.5;

#[function_component(HeroStats)]
pub fn hero_stats() -> Html {
    let page = use_page();
    let node = use_node_ref();
    let counters = page.read(|p| p.counters().counters().to_vec());

    {
        let page = page.clone();
        let node = node.clone();
        use_effect_with((), move |_| {
            let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    let visible = entries
                        .iter()
                        .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                        .any(|entry| entry.is_intersecting());
                    if visible && page.update(|p| p.on_stats_visible()) {
                        log::debug!("Hero counters started");
                    }
                },
            );

            let options = IntersectionObserverInit::new();
            options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
            let observer = match IntersectionObserver::new_with_options(
                on_intersect.as_ref().unchecked_ref(),
                &options,
            ) {
                Ok(observer) => {
                    if let Some(element) = node.cast::<web_sys::Element>() {
                        observer.observe(&element);
                    }
                    Some(observer)
                }
                Err(e) => {
                    log::warn!("IntersectionObserver unavailable: {:?}", e);
                    None
                }
            };

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                drop(on_intersect);
            }
        });
    }

    html! {
        <div class="hero-stats" ref={node}>
            { for counters.iter().map(|counter| html! {
                <div class="stat">
                    <div class="stat-value">{ counter.text() }</div>
                    <div class="stat-title">{ counter.label }</div>
                </div>
            })}
        </div>
    }
}
