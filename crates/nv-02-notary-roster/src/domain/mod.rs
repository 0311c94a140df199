//! # Domain Layer

pub mod errors;
pub mod roster;

pub use errors::*;
pub use roster::*;
