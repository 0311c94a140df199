//! # Vault Configuration
//!
//! Genesis and runtime parameters for the vault, the notary roster and the
//! attestation registry.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. JSON file (`--config` or `NV_CONFIG`)
//! 3. Environment overrides (`NV_SIGNERS`, `NV_THRESHOLD`,
//!    `NV_TIMELOCK_DELAY_SECS`, `NV_MAX_SIGNATURE_AGE_SECS`,
//!    `NV_MAX_FUTURE_SKEW_SECS`)

use nv_03_attestation_registry::{
    FreshnessPolicy, DEFAULT_MAX_FUTURE_SKEW_SECS, DEFAULT_MAX_SIGNATURE_AGE_SECS,
};
use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256, TypedDataDomain};
use shared_types::Address;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "NV_CONFIG";

/// Complete vault configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub governance: GovernanceConfig,
    pub attestation: AttestationConfig,
    pub components: ComponentsConfig,
}

/// Signer set genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Governance identity of the vault.
    pub vault_address: Address,
    pub signers: Vec<Address>,
    pub threshold: usize,
    pub timelock_delay_secs: u64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            vault_address: component_address("vault"),
            signers: Vec::new(),
            threshold: 1,
            timelock_delay_secs: 3600,
        }
    }
}

/// Attestation domain and freshness window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttestationConfig {
    pub protocol_name: String,
    pub protocol_version: String,
    /// Execution context identifier bound into every digest.
    pub chain_id: u64,
    pub max_signature_age_secs: u64,
    pub max_future_skew_secs: u64,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        Self {
            protocol_name: "NotaryVault".to_string(),
            protocol_version: "1".to_string(),
            chain_id: 31337,
            max_signature_age_secs: DEFAULT_MAX_SIGNATURE_AGE_SECS,
            max_future_skew_secs: DEFAULT_MAX_FUTURE_SKEW_SECS,
        }
    }
}

/// Identities of the governed components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    pub roster_address: Address,
    pub registry_address: Address,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            roster_address: component_address("notary-roster"),
            registry_address: component_address("attestation-registry"),
        }
    }
}

/// Deterministic identity for a named component.
pub fn component_address(label: &str) -> Address {
    let hash = keccak256(format!("notary-vault:{label}").as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one signer is required (set NV_SIGNERS or governance.signers)")]
    NoSigners,

    #[error("signer list contains the zero address")]
    ZeroSigner,

    #[error("duplicate signer {0}")]
    DuplicateSigner(Address),

    #[error("threshold {threshold} outside 1..={signers}")]
    InvalidThreshold { threshold: usize, signers: usize },

    #[error("{0} address must not be zero")]
    ZeroComponentAddress(&'static str),

    #[error("component addresses must be distinct: {0}")]
    ComponentAddressCollision(Address),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: String, value: String },

    #[error("cannot read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("cannot parse config {path}: {reason}")]
    Parse { path: String, reason: String },
}

impl VaultConfig {
    /// Defaults, then the file (if any), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var(CONFIG_ENV).ok();
        let path = path.or(env_path.as_deref().map(Path::new));

        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Apply `NV_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("NV_SIGNERS") {
            self.governance.signers = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().map_err(|_| invalid("NV_SIGNERS", &raw)))
                .collect::<Result<_, _>>()?;
        }
        if let Some(v) = parse_env(&lookup, "NV_THRESHOLD")? {
            self.governance.threshold = v;
        }
        if let Some(v) = parse_env(&lookup, "NV_TIMELOCK_DELAY_SECS")? {
            self.governance.timelock_delay_secs = v;
        }
        if let Some(v) = parse_env(&lookup, "NV_MAX_SIGNATURE_AGE_SECS")? {
            self.attestation.max_signature_age_secs = v;
        }
        if let Some(v) = parse_env(&lookup, "NV_MAX_FUTURE_SKEW_SECS")? {
            self.attestation.max_future_skew_secs = v;
        }
        Ok(())
    }

    /// Reject configurations that cannot form a valid genesis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gov = &self.governance;
        if gov.signers.is_empty() {
            return Err(ConfigError::NoSigners);
        }
        let mut seen = BTreeSet::new();
        for signer in &gov.signers {
            if signer.is_zero() {
                return Err(ConfigError::ZeroSigner);
            }
            if !seen.insert(*signer) {
                return Err(ConfigError::DuplicateSigner(*signer));
            }
        }
        if gov.threshold == 0 || gov.threshold > gov.signers.len() {
            return Err(ConfigError::InvalidThreshold {
                threshold: gov.threshold,
                signers: gov.signers.len(),
            });
        }

        let components = [
            ("vault", gov.vault_address),
            ("roster", self.components.roster_address),
            ("registry", self.components.registry_address),
        ];
        let mut ids = BTreeSet::new();
        for (name, address) in components {
            if address.is_zero() {
                return Err(ConfigError::ZeroComponentAddress(name));
            }
            if !ids.insert(address) {
                return Err(ConfigError::ComponentAddressCollision(address));
            }
        }
        Ok(())
    }

    /// Domain separator inputs for the registry.
    pub fn typed_data_domain(&self) -> TypedDataDomain {
        TypedDataDomain {
            name: self.attestation.protocol_name.clone(),
            version: self.attestation.protocol_version.clone(),
            chain_id: self.attestation.chain_id,
            verifying_contract: self.components.registry_address,
        }
    }

    pub fn freshness_policy(&self) -> FreshnessPolicy {
        FreshnessPolicy {
            max_age_secs: self.attestation.max_signature_age_secs,
            max_future_skew_secs: self.attestation.max_future_skew_secs,
        }
    }
}

fn invalid(var: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    }
}

fn parse_env<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(var)
        .map(|raw| raw.trim().parse().map_err(|_| invalid(var, &raw)))
        .transpose()
}
