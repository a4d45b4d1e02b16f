//! Common stuff shared by the whereabouts frontend and its native tests
#![warn(missing_docs)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::use_self)]
// This code will not be used on concurrent threads.
#![allow(clippy::future_not_send)]
#![allow(async_fn_in_trait)]

pub mod config;
pub mod effects;
pub mod geocode;
pub mod locations;
pub mod persistence;
pub mod platform;
pub mod screen;
pub mod version;
pub mod view;
