//! # Ports Layer
//!
//! - **Inbound (Driving)**: notarization surface used by relayers
//! - **Outbound (Driven)**: notary membership lookup

pub mod inbound;
pub mod outbound;
