//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that admin-facing collaborators use
//! - **Outbound (Driven)**: governed components the vault calls into

pub mod inbound;
pub mod outbound;
