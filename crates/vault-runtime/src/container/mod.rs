//! # Vault Container
//!
//! Configuration and the composite state of one vault deployment.

pub mod config;
pub mod state;

pub use config::{component_address, ConfigError, VaultConfig, CONFIG_ENV};
pub use state::VaultState;
