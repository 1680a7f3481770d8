mod config;

pub use config::{Config, config_file};
