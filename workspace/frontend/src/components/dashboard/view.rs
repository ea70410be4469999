use common::Region;
use compute::charts::ChartKind;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::ticker::Ticker;
use crate::widgets::reveal::Reveal;
use crate::hooks::use_page;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let page = use_page();
    let (price, trend, change, region) = page.read(|p| {
        let series = p.series();
        (p.price_text(), series.trend, series.change_percent, p.region())
    });

    let on_region = {
        let page = page.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) else {
                return;
            };
            let value = select.value();
            if page.update(|p| p.change_region(&value)).is_none() {
                log::warn!("Ignoring unknown region '{}'", value);
            }
        })
    };

    html! {
        <>
            <div class="dashboard-header">
                <Ticker />
                <select class="select select-bordered" id="region-select" onchange={on_region}>
                    { for Region::ALL.iter().map(|r| html! {
                        <option value={r.id()} selected={*r == region}>{ r.label() }</option>
                    })}
                </select>
            </div>
            <div class="stats shadow">
                <div class="stat">
                    <div class="stat-title">{"Current price"}</div>
                    <div class="stat-value" id="current-price">{ price }</div>
                    <div class={classes!("stat-desc", format!("trend--{}", trend.as_str()))}>
                        { format!("{} {:+.2}% vs. baseline", trend.arrow(), change) }
                    </div>
                </div>
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                <Reveal class="card shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"24-hour forecast"}</h2>
                        <div id={ChartKind::Forecast.element_id()} class="chart"></div>
                    </div>
                </Reveal>
                <Reveal class="card shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Last 7 days"}</h2>
                        <div id={ChartKind::Historical.element_id()} class="chart"></div>
                    </div>
                </Reveal>
            </div>
        </>
    }
}
