//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid signature encoding (wrong length, zero or out-of-range scalar).
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28).
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Signature has high S value (EIP-2 malleability protection).
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Failed to recover a public key from the signature.
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Invalid private key.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing failed.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Invalid length for a fixed-width input.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Invalid hex input.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
