use common::Section;
use yew::prelude::*;

pub mod charts;
mod components;
pub mod hooks;
pub mod settings;
pub mod storage;
mod widgets;

use components::dashboard::view::Dashboard;
use components::hero::view::Hero;
use components::layout::layout::Layout;
use components::models::Models;
use components::playground::Playground;
use hooks::{use_page, PageProvider};
use widgets::reveal::Reveal;

/// Mirrors the active theme onto the document root for the stylesheet.
fn apply_color_scheme(scheme: &str) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("data-color-scheme", scheme) {
            log::warn!("Failed to apply color scheme: {:?}", e);
        }
    }
}

fn section_body(section: Section) -> Html {
    log::trace!("Rendering section {}", section.id());
    match section {
        Section::Overview => html! { <Hero /> },
        Section::Dashboard => html! { <Dashboard /> },
        Section::Models => html! { <Models /> },
        Section::Playground => html! { <Playground /> },
    }
}

#[function_component(Sections)]
fn sections() -> Html {
    let page = use_page();
    let (active, theme) = page.read(|p| (p.active_section(), p.theme()));

    use_effect_with(theme, |theme| {
        apply_color_scheme(theme.as_str());
    });

    html! {
        <Layout>
            { for Section::ALL.iter().map(|section| {
                let class = classes!("section", (*section == active).then_some("active"));
                html! {
                    <section id={section.id()} class={class}>
                        if *section != Section::Overview {
                            <Reveal class="section-header">
                                <h2>{ section.title() }</h2>
                            </Reveal>
                        }
                        { section_body(*section) }
                    </section>
                }
            })}
        </Layout>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = settings::get_settings().dashboard;
    html! {
        <PageProvider config={config}>
            <Sections />
        </PageProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== VoltCast Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Debug mode: {}", settings.debug_mode);

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
