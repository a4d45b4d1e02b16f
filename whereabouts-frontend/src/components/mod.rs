//! Yew frontend components for whereabouts

pub mod location_screen;
pub mod map;
pub mod saved_list;
