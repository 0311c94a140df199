//! # Typed Structured Data Hashing
//!
//! Binds a struct hash to a domain separator so a signature produced for
//! one protocol, version, execution context, or verifying component cannot
//! be replayed against another.
//!
//! ```text
//! domainSeparator = keccak(TYPEHASH_DOMAIN ‖ keccak(name) ‖ keccak(version)
//!                          ‖ u256(chainId) ‖ pad32(verifyingContract))
//! digest          = keccak(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)
//! ```

use crate::hashing::{keccak256, Hash, KeccakHasher};
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Canonical domain type signature.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Domain separator inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataDomain {
    /// Protocol name.
    pub name: String,
    /// Protocol version.
    pub version: String,
    /// Execution context identifier (chain id).
    pub chain_id: u64,
    /// Identity of the component that verifies signatures under this domain.
    pub verifying_contract: Address,
}

impl TypedDataDomain {
    /// Compute the domain separator.
    #[must_use]
    pub fn separator(&self) -> Hash {
        struct_hash(
            DOMAIN_TYPE,
            &[
                keccak256(self.name.as_bytes()),
                keccak256(self.version.as_bytes()),
                u64_word(self.chain_id),
                self.verifying_contract.to_word(),
            ],
        )
    }
}

/// Hash a struct: `keccak(keccak(type_signature) ‖ word_0 ‖ … ‖ word_n)`.
#[must_use]
pub fn struct_hash(type_signature: &str, words: &[[u8; 32]]) -> Hash {
    let mut hasher = KeccakHasher::new();
    hasher.update(&keccak256(type_signature.as_bytes()));
    for word in words {
        hasher.update(word);
    }
    hasher.finalize()
}

/// Final digest to be signed: `keccak(0x1901 ‖ domainSeparator ‖ structHash)`.
#[must_use]
pub fn typed_data_digest(domain_separator: &Hash, struct_hash: &Hash) -> Hash {
    let mut hasher = KeccakHasher::new();
    hasher.update(&[0x19, 0x01]);
    hasher.update(domain_separator);
    hasher.update(struct_hash);
    hasher.finalize()
}

/// Big-endian 32-byte word for an unsigned integer.
#[must_use]
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}
