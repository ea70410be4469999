use yew::prelude::*;

use crate::hooks::use_page;

#[function_component(Ticker)]
pub fn ticker() -> Html {
    let page = use_page();
    let (text, trend) = page.read(|p| (p.ticker_text(), p.series().trend));

    html! {
        <div class={classes!("ticker", format!("ticker--{}", trend.as_str()))}>
            <span class="ticker-label">{"Live price"}</span>
            <span class="ticker-value">{ text }</span>
        </div>
    }
}
