//! Attack simulations against the governance and notarization surfaces.

pub mod attestation;
pub mod governance;
