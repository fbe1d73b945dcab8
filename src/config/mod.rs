//! Configuration loading for the reading time driver.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so a session can still run.

mod defaults;
mod io;
mod models;

pub use io::load_config;
pub use models::{AppConfig, LayoutConfig, LogLevel, SessionConfig, StoreConfig};
