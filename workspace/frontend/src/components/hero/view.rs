use common::Section;
use yew::prelude::*;

use super::particles::Particles;
use super::stats::HeroStats;
use crate::components::layout::navbar::section_link;
use crate::hooks::use_page;

#[function_component(Hero)]
pub fn hero() -> Html {
    let page = use_page();

    html! {
        <div class="hero">
            <Particles />
            <div class="hero-content">
                <h1 class="hero-title">{"Forecast electricity prices before the market moves"}</h1>
                <p class="hero-subtitle">
                    {"Machine learning models trained on grid load, weather and market data deliver hourly price forecasts for the next day."}
                </p>
                <div class="hero-actions">
                    <a href="#dashboard" class="btn btn-primary"
                       onclick={section_link(page.clone(), Section::Dashboard)}>
                        {"Open dashboard"}
                    </a>
                    <a href="#playground" class="btn btn-outline"
                       onclick={section_link(page, Section::Playground)}>
                        {"Try the API"}
                    </a>
                </div>
                <HeroStats />
            </div>
        </div>
    }
}
