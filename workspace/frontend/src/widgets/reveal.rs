use yew::prelude::*;

use crate::hooks::use_reveal;

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    pub children: Children,
}

/// Block that fades in the first time it scrolls into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let (node, visible) = use_reveal();
    html! {
        <div ref={node} id={props.id.clone()}
             class={classes!("fade-in", visible.then_some("visible"), props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}
