//! Cross-subsystem flows.

pub mod flows;
