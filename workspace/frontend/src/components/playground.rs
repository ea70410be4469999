use common::ResponseStatus;
use compute::playground::Endpoint;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_page;
use crate::widgets::pending::Pending;

#[function_component(Playground)]
pub fn playground() -> Html {
    let page = use_page();
    let view = page.read(|p| p.playground().clone());
    let custom_path = use_state(String::new);

    let request = {
        let page = page.clone();
        Callback::from(move |path: String| {
            log::debug!("Playground request for {}", path);
            page.update(|p| p.request_endpoint(&path));
        })
    };

    let on_custom_input = {
        let custom_path = custom_path.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                custom_path.set(input.value());
            }
        })
    };

    let on_custom_submit = {
        let request = request.clone();
        let custom_path = custom_path.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let path = custom_path.trim().to_string();
            if !path.is_empty() {
                request.emit(path);
            }
        })
    };

    let status_class = match view.status {
        Some(ResponseStatus::Success) => "response--success",
        Some(ResponseStatus::Error) => "response--error",
        None => "response--idle",
    };

    html! {
        <div class="playground">
            <div class="endpoint-list">
                { for Endpoint::ALL.iter().map(|endpoint| {
                    let path = endpoint.path();
                    let active = view.endpoint.as_deref() == Some(path);
                    let onclick = {
                        let request = request.clone();
                        Callback::from(move |_| request.emit(path.to_string()))
                    };
                    html! {
                        <button class={classes!("endpoint", active.then_some("active"))} onclick={onclick}>
                            <code>{ format!("GET {}", path) }</code>
                            <span>{ endpoint.description() }</span>
                        </button>
                    }
                })}
                <form class="endpoint-custom" onsubmit={on_custom_submit}>
                    <input type="text" class="input input-bordered" placeholder="/api/v1/..."
                           value={(*custom_path).clone()} oninput={on_custom_input} />
                    <button type="submit" class="btn btn-primary">{"Send"}</button>
                </form>
            </div>
            <div class={classes!("response", status_class)}>
                if view.loading {
                    <Pending label="Waiting for response" />
                } else if view.output.is_empty() {
                    <p class="response-hint">{"Pick an endpoint to send a request."}</p>
                } else {
                    <pre><code>{ &view.output }</code></pre>
                }
            </div>
        </div>
    }
}
