//! # Genesis Module
//!
//! Builds the initial vault state from configuration.
//!
//! ## Initialization Sequence
//!
//! 1. Validate the configuration
//! 2. Create the vault with its genesis signer set
//! 3. Create the roster, owned by the vault identity and empty
//! 4. Create the registry, owned by the vault identity, unpaused and empty

pub mod builder;

pub use builder::GenesisBuilder;
