use common::Section;
use yew::prelude::*;

use crate::hooks::use_page;

/// Scrolls the window back to the top after switching sections.
fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Click handler for any link that targets a section.
pub fn section_link(page: crate::hooks::PageContext, target: Section) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        let activated = page.update(|p| p.navigate(target.id()));
        if activated.is_some() {
            scroll_to_top();
        }
    })
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let page = use_page();
    let (class, active, is_dark) = page.read(|p| (p.navbar().class(), p.active_section(), p.is_dark()));

    let on_toggle_theme = {
        let page = page.clone();
        Callback::from(move |_| {
            let theme = page.update(|p| p.toggle_theme());
            log::debug!("Theme switched to {}", theme);
        })
    };

    html! {
        <nav class={class}>
            <div class="navbar-brand">
                <i class="fas fa-bolt"></i>
                <span>{"VoltCast"}</span>
            </div>
            <ul class="navbar-links">
                { for Section::ALL.iter().map(|section| {
                    let link_class = classes!("nav-link", (*section == active).then_some("active"));
                    html! {
                        <li>
                            <a href={format!("#{}", section.id())}
                               class={link_class}
                               onclick={section_link(page.clone(), *section)}>
                                { section.title() }
                            </a>
                        </li>
                    }
                })}
            </ul>
            <button class="btn btn-ghost btn-circle" id="theme-toggle" onclick={on_toggle_theme}
                    aria-label="Toggle color scheme">
                if is_dark {
                    <i class="fas fa-sun"></i>
                } else {
                    <i class="fas fa-moon"></i>
                }
            </button>
        </nav>
    }
}
