use whereabouts_common::view::{Row, LIST_TITLE};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub rows: Vec<Row>,
    #[prop_or_default]
    pub empty_message: Option<&'static str>,
}

#[function_component(SavedList)]
pub fn saved_list(props: &Props) -> Html {
    html! {
        <div class="saved-list component-container">
            <h2>{LIST_TITLE}</h2>
            if let Some(message) = props.empty_message {
                <p>{message}</p>
            }
            {
                for props.rows.iter().enumerate().map(|(index, row)| html! {
                    <div key={index} class="location-item">
                        { for row.lines().into_iter().map(|line| html! { <div>{line}</div> }) }
                    </div>
                })
            }
        </div>
    }
}
