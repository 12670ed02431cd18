//! Demonstration entry point for the stockpile inventory store.

pub mod config;
pub mod demo;

pub use config::{AppConfig, ConfigError};
pub use demo::run_demo;
