//! Weather widget - city weather lookup on tui-dispatch
//!
//! The library exposes the app's modules for the binary and for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod dates;
pub mod effect;
pub mod icons;
pub mod logging;
pub mod pipeline;
pub mod reducer;
pub mod state;
pub mod storage;
