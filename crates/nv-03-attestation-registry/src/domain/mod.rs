//! # Domain Layer
//!
//! - `attestation`: the signed structured message and status codes
//! - `registry`: verification pipeline, document table, circuit breaker
//! - `errors`: `RegistryError`

pub mod attestation;
pub mod errors;
pub mod registry;

pub use attestation::*;
pub use errors::*;
pub use registry::*;
