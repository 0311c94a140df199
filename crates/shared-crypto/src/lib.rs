//! # Shared Crypto - Signing and Recovery Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Fingerprints, address derivation |
//! | `ecdsa` | secp256k1 (recoverable) | Notary attestation signatures |
//! | `typed_data` | Domain-separated struct hashing | Attestation message digest |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **Recovery**: a pure `(digest, signature) -> Address` function; callers
//!   authorize by membership of the result, never by a claimed identity
//! - **Domain separation**: protocol name, version, execution context and
//!   verifying component are all bound into every digest

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod typed_data;

// Re-exports
pub use ecdsa::{address_from_verifying_key, recover_address, RecoverableSignature, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_concat, Hash, KeccakHasher};
pub use typed_data::{struct_hash, typed_data_digest, u64_word, TypedDataDomain};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
