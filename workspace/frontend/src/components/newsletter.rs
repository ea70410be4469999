use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_page;

#[function_component(Newsletter)]
pub fn newsletter() -> Html {
    let page = use_page();
    let form = page.read(|p| p.newsletter().clone());

    let on_input = {
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                page.update(|p| p.set_newsletter_input(&input.value()));
            }
        })
    };

    let on_submit = {
        let page = page.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let feedback = page.update(|p| p.subscribe());
            log::debug!("Newsletter form feedback: {:?}", feedback);
        })
    };

    let feedback = form.feedback;
    html! {
        <form class="newsletter" onsubmit={on_submit}>
            <h3>{"Stay ahead of the market"}</h3>
            <div class="join">
                <input type="email"
                       class={classes!("input", "input-bordered", "join-item", feedback.input_class())}
                       placeholder={feedback.placeholder()}
                       value={form.input.clone()}
                       oninput={on_input} />
                <button type="submit" class="btn btn-primary join-item" disabled={feedback.button_disabled()}>
                    { feedback.button_label() }
                </button>
            </div>
        </form>
    }
}
