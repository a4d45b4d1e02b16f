//! Browser implementations of the location screen services
pub mod geocoder;
pub mod geolocation;
pub mod storage;

use wasm_bindgen::JsValue;

/// Best effort text for an error thrown by a browser API.
fn js_error(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
