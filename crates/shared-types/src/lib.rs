//! # Shared Types Crate
//!
//! Identifiers, the error taxonomy, and the clock port shared by every
//! Notary-Vault subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem identifiers live here.
//! - **Explicit Capabilities**: identities are plain `Address` values;
//!   authorization is always a set-membership test performed by the
//!   owning subsystem, never an ambient lookup.

pub mod command;
pub mod entities;
pub mod errors;
pub mod time;

pub use command::{Command, Payload};
pub use entities::*;
pub use errors::*;
pub use time::*;
