//! City weather lookup widget
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod capability;
pub mod client;
pub mod components;
pub mod config;
pub mod dates;
pub mod effect;
pub mod error;
pub mod flow;
pub mod forecast;
pub mod icons;
pub mod reducer;
pub mod sprites;
pub mod state;
pub mod voice;
