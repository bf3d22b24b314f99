//! Configuration module for the beneficios admin client
//!
//! Provides configuration management including CLI arguments and
//! runtime settings such as the backend base URL.

mod settings;

pub use settings::*;
