use leaflet::Layer;
use wasm_bindgen::{prelude::*, JsCast};

#[wasm_bindgen]
extern "C" {
    /// Any layer that can carry a tooltip.
    #[derive(Debug, Clone)]
    #[wasm_bindgen(extends = Layer)]
    pub type TooltipLayer;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &TooltipLayer, content: &str) -> TooltipLayer;

    #[wasm_bindgen(method, js_name = setTooltipContent)]
    pub fn set_tooltip_content(this: &TooltipLayer, content: &str) -> TooltipLayer;
}

fn title_html(title: &str, description: &str) -> String {
    format!("<strong>{title}</strong><br>{description}")
}

/// Attach a tooltip with a bold title and a description line.
pub fn bind_title(layer: &Layer, title: &str, description: &str) {
    layer
        .unchecked_ref::<TooltipLayer>()
        .bind_tooltip(&title_html(title, description));
}

/// Replace the text of a tooltip added by [`bind_title`].
pub fn set_title(layer: &Layer, title: &str, description: &str) {
    layer
        .unchecked_ref::<TooltipLayer>()
        .set_tooltip_content(&title_html(title, description));
}
