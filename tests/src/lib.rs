//! # Notary-Vault Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployment harness over NotaryVaultService
//! ├── exploits/         # Attack simulations
//! │   ├── governance.rs # Trust-root takeover attempts
//! │   └── attestation.rs# Forgery and replay attempts
//! └── integration/      # End-to-end flows through service and bus
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p nv-tests
//! cargo test -p nv-tests integration::
//! cargo test -p nv-tests exploits::
//! cargo bench -p nv-tests
//! ```

#![allow(dead_code)]

pub mod exploits;
pub mod fixtures;
pub mod integration;
