use yew::prelude::*;

use super::navbar::Navbar;
use crate::components::newsletter::Newsletter;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    html! {
        <div class="page">
            <Navbar />
            <main class="page-content">
                { for props.children.iter() }
            </main>
            <footer class="footer">
                <Newsletter />
                <p class="footer-note">{"Electricity price forecasting for the grid of tomorrow."}</p>
            </footer>
        </div>
    }
}
