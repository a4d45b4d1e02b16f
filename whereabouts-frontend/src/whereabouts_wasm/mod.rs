//! Leaflet bindings the `leaflet` crate does not provide
pub mod tooltip;
