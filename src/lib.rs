#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod logging;
pub mod models;
pub mod components;
pub mod storage;
pub mod api;
pub mod autocomplete;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geometry;
pub mod map;
pub mod scheduler;
pub mod segmentation;
pub mod transform;

pub use components::app::App;
