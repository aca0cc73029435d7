//! CLI library for testing purposes

pub mod commands;
pub mod config;
pub mod converter;
pub mod inspect;
pub mod validation;

pub use commands::{
    ExtractOptions, run_extract, run_format, run_inspect, run_translate, run_update,
};
pub use config::{Config, load_config};
pub use converter::CommandConverter;
