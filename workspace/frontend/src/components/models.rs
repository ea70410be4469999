use compute::catalog::ModelCatalog;
use compute::charts::ChartKind;
use yew::prelude::*;

use crate::hooks::use_page;
use crate::widgets::reveal::Reveal;

#[function_component(Models)]
pub fn models() -> Html {
    let page = use_page();
    let (models, metrics) = page.read(|p| (p.catalog().models().to_vec(), p.metrics().clone()));

    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                { for models.iter().map(|model| {
                    let tag = ModelCatalog::tag_for(model);
                    let selected = model.name == metrics.model;
                    let onclick = {
                        let page = page.clone();
                        let tag = tag.clone();
                        Callback::from(move |_| {
                            if !page.update(|p| p.select_model(&tag)) {
                                log::warn!("No model registered for '{}'", tag);
                            }
                        })
                    };
                    html! {
                        <div class={classes!("card", "model-card", selected.then_some("selected"))}
                             data-model={tag} onclick={onclick}>
                            <div class="card-body">
                                <h3 class="card-title">{ &model.name }</h3>
                                <p>{ &model.description }</p>
                                <span class="badge">{ model.accuracy_text() }</span>
                            </div>
                        </div>
                    }
                })}
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 mt-6">
                <Reveal class="card shadow" id="model-metrics">
                    <div class="card-body">
                        <h2 class="card-title">{ &metrics.model }</h2>
                        <dl class="metrics">
                            <dt>{"Accuracy"}</dt><dd>{ &metrics.accuracy }</dd>
                            <dt>{"RMSE"}</dt><dd>{ &metrics.rmse }</dd>
                            <dt>{"MAE"}</dt><dd>{ &metrics.mae }</dd>
                        </dl>
                    </div>
                </Reveal>
                <Reveal class={classes!("card", "shadow", "lg:col-span-2")}>
                    <div class="card-body">
                        <h2 class="card-title">{"Model comparison"}</h2>
                        <div id={ChartKind::Comparison.element_id()} class="chart"></div>
                    </div>
                </Reveal>
            </div>
        </>
    }
}
