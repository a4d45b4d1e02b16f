//! Yew frontend for whereabouts
#![warn(missing_docs)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// #![deny(clippy::unwrap_used)]
// #![deny(clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::use_self)]
// This code will not be used on concurrent threads.
#![allow(clippy::future_not_send)]
#![allow(clippy::let_unit_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::option_if_let_else)]

mod components;
mod services;
mod whereabouts_wasm;

use std::rc::Rc;

use tracing::info;
use wasm_bindgen::prelude::*;
use whereabouts_common::{config::Config, version::Version};
use yew::prelude::*;

use components::location_screen::LocationScreen;

fn footer() -> Html {
    html! {
        <footer>
            <div>
                { for Version::get().lines().into_iter().map(|line| html! { <div>{line}</div> }) }
            </div>
            <div>
                { "Whereabouts" }
            </div>
        </footer>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config: Rc<Config> = use_memo((), |()| Config::from_build_env());

    html! {
        <>
            <LocationScreen config={config} />
            {footer()}
        </>
    }
}

/// The entry point for the frontend
#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    info!("Starting whereabouts");
    yew::Renderer::<App>::new().render();
    Ok(())
}
