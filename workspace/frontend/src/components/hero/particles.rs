use yew::prelude::*;

use crate::hooks::use_page;

#[function_component(Particles)]
pub fn particles() -> Html {
    let page = use_page();
    let particles = page.read(|p| p.particles().to_vec());

    html! {
        <div class="particles" aria-hidden="true">
            { for particles.iter().map(|particle| html! {
                <span class="particle" style={particle.style()}></span>
            })}
        </div>
    }
}
