use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PendingProps {
    pub label: AttrValue,
}

/// Pulsing dots shown while a simulated request is in flight.
#[function_component(Pending)]
pub fn pending(props: &PendingProps) -> Html {
    html! {
        <div class="pending" role="status" aria-live="polite">
            <span class="pending-dots" aria-hidden="true">
                <i></i><i></i><i></i>
            </span>
            <span class="pending-label">{ props.label.clone() }</span>
        </div>
    }
}
