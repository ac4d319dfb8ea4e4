// Library surface for the binary, headless runs and integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod language;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod sound;
pub mod stats;
pub mod theme;
pub mod ui;

pub use error::{Error, Result};
