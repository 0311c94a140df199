//! # Notary-Vault CLI
//!
//! Admin and relayer front end over one persisted vault state.
//!
//! Each invocation loads the snapshot, performs one operation through
//! `NotaryVaultService`, prints the audit events it caused as JSON lines,
//! saves the snapshot, and prints the result.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`NV_LOG`, default `info`, to stderr)
//! 2. Take the snapshot lock
//! 3. `init`: build genesis from configuration; otherwise load the snapshot
//! 4. Run the command, then persist

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nv_01_governance::GovernanceApi;
use nv_02_notary_roster::RosterApi;
use nv_03_attestation_registry::{Attestation, DocumentStatus, NotarizationApi};
use shared_bus::{EventFilter, InMemoryEventBus};
use shared_crypto::{RecoverableSignature, Secp256k1KeyPair};
use shared_types::{
    Address, Command, DocHash, ManualTimeSource, Payload, SystemTimeSource, TimeSource,
};
use vault_runtime::{GenesisBuilder, NotaryVaultService, SnapshotStore, VaultConfig, VaultError};

/// Log filter variable.
const LOG_ENV: &str = "NV_LOG";

#[derive(Parser, Debug)]
#[command(name = "notary-vault", version)]
#[command(about = "Threshold-governed notary attestation vault")]
struct Cli {
    /// Snapshot file holding the vault state
    #[arg(long, env = "NV_STATE", default_value = "notary-vault.json", global = true)]
    state: PathBuf,

    /// Configuration file used by `init` (falls back to NV_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pin the clock to this Unix time instead of the system clock
    #[arg(long, env = "NV_NOW", global = true)]
    now: Option<u64>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Create the genesis state from configuration
    Init,
    /// Print signer set, treasury, roster and registry summary
    Status,
    /// Deposit native value into the vault
    Deposit {
        #[arg(long)]
        from: Address,
        #[arg(long)]
        amount: u128,
    },
    /// Propose a privileged command (auto-confirmed by the proposer)
    Submit {
        #[arg(long = "as")]
        proposer: Address,
        /// `vault`, `roster`, `registry`, or an external 0x address
        #[arg(long)]
        target: Target,
        #[arg(long, default_value_t = 0)]
        value: u128,
        #[arg(long, value_enum)]
        op: Op,
        /// Operation argument (address, number, or hex call data)
        #[arg(long)]
        arg: Option<String>,
    },
    /// Confirm a pending transaction
    Confirm {
        #[arg(long = "as")]
        signer: Address,
        index: u64,
    },
    /// Withdraw a confirmation
    Revoke {
        #[arg(long = "as")]
        signer: Address,
        index: u64,
    },
    /// Execute a confirmed transaction whose timelock has elapsed
    Execute {
        #[arg(long = "as")]
        signer: Address,
        index: u64,
    },
    /// Show one ledger transaction
    Tx { index: u64 },
    /// Generate a notary key pair
    Keygen,
    /// Sign a document attestation for this vault's registry
    SignAttestation {
        /// Hex secret key
        #[arg(long, env = "NV_NOTARY_KEY", hide_env_values = true)]
        key: String,
        #[arg(long)]
        doc: DocHash,
        /// `pending`, `approved`, `rejected` or a code
        #[arg(long)]
        status: DocumentStatus,
        /// Defaults to the current time
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Relay a signed attestation to the registry
    Record {
        #[arg(long)]
        relayer: Address,
        #[arg(long)]
        doc: DocHash,
        /// Status name or raw wire code
        #[arg(long, value_parser = parse_status_code)]
        status: u8,
        #[arg(long)]
        timestamp: u64,
        /// 65-byte hex signature
        #[arg(long)]
        signature: RecoverableSignature,
    },
    /// Show the record for a document hash
    Document { doc: DocHash },
    /// Show a roster entry
    Notary { address: Address },
}

impl Cmd {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Deposit { .. }
                | Self::Submit { .. }
                | Self::Confirm { .. }
                | Self::Revoke { .. }
                | Self::Execute { .. }
                | Self::Record { .. }
        )
    }
}

#[derive(Debug, Clone)]
enum Target {
    Vault,
    Roster,
    Registry,
    External(Address),
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vault" => Ok(Self::Vault),
            "roster" => Ok(Self::Roster),
            "registry" => Ok(Self::Registry),
            other => other
                .parse()
                .map(Self::External)
                .map_err(|e| format!("{other}: {e}")),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Op {
    Transfer,
    AddSigner,
    RemoveSigner,
    ChangeThreshold,
    SetTimelockDelay,
    AddNotary,
    RemoveNotary,
    Pause,
    Unpause,
    Opaque,
}

impl Op {
    fn payload(self, arg: Option<&str>) -> Result<Payload> {
        let required = || arg.ok_or_else(|| anyhow!("--arg is required for {self:?}"));
        let address = || -> Result<Address> { Ok(required()?.parse()?) };
        Ok(match self {
            Self::Transfer => Payload::Transfer,
            Self::AddSigner => Payload::AddSigner(address()?),
            Self::RemoveSigner => Payload::RemoveSigner(address()?),
            Self::ChangeThreshold => Payload::ChangeThreshold(required()?.parse()?),
            Self::SetTimelockDelay => Payload::SetTimelockDelay(required()?.parse()?),
            Self::AddNotary => Payload::AddNotary(address()?),
            Self::RemoveNotary => Payload::RemoveNotary(address()?),
            Self::Pause => Payload::Pause,
            Self::Unpause => Payload::Unpause,
            Self::Opaque => {
                let data = arg.unwrap_or_default();
                Payload::Opaque(hex::decode(data.strip_prefix("0x").unwrap_or(data))?)
            }
        })
    }
}

fn parse_status_code(s: &str) -> Result<u8, String> {
    s.parse::<u8>()
        .or_else(|_| s.parse::<DocumentStatus>().map(DocumentStatus::code))
        .map_err(|e| e.to_string())
}

fn parse_key(hex_key: &str) -> Result<Secp256k1KeyPair> {
    let bytes = hex::decode(hex_key.trim().trim_start_matches("0x")).context("notary key is not hex")?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow!("notary key must be 32 bytes, got {}", b.len()))?;
    Ok(Secp256k1KeyPair::from_bytes(bytes)?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Cmd::Keygen = cli.command {
        let key = Secp256k1KeyPair::generate();
        return print_json(&json!({
            "secret_key": hex::encode(key.to_bytes()),
            "address": key.address(),
        }));
    }

    let store = SnapshotStore::open(&cli.state)?;
    let state_label = cli.state.display().to_string();

    if let Cmd::Init = cli.command {
        if store.exists() {
            bail!(VaultError::AlreadyInitialized(state_label));
        }
        let config = VaultConfig::load(cli.config.as_deref())?;
        let state = GenesisBuilder::new(config).build()?;
        store.save(&state)?;
        info!(state = %state_label, "Vault initialized");
        return print_json(&json!({
            "vault": state.vault_address(),
            "roster": state.roster_address,
            "registry": state.registry_address(),
            "signer_set": state.vault.signers(),
        }));
    }

    let state = store
        .load()?
        .ok_or(VaultError::NotInitialized(state_label))?;
    let clock: Arc<dyn TimeSource> = match cli.now {
        Some(now) => Arc::new(ManualTimeSource::new(now)),
        None => Arc::new(SystemTimeSource),
    };
    let bus = Arc::new(InMemoryEventBus::new());
    let mut events = bus.subscribe(EventFilter::all());
    let service = NotaryVaultService::new(state, Arc::clone(&clock), bus);

    let mutates = cli.command.mutates();
    let outcome = run(&service, clock.as_ref(), cli.command).await;

    for event in events.drain() {
        println!("{}", serde_json::to_string(&event)?);
    }
    if mutates {
        store.save(&service.snapshot().await)?;
    }
    print_json(&outcome?)
}

async fn run(service: &NotaryVaultService, clock: &dyn TimeSource, command: Cmd) -> Result<Value> {
    Ok(match command {
        Cmd::Init | Cmd::Keygen => Value::Null,
        Cmd::Status => {
            let signers = service.signer_set().await;
            json!({
                "vault": service.vault_address().await,
                "roster": service.roster_address().await,
                "registry": service.registry_address().await,
                "signers": signers.signers(),
                "threshold": signers.threshold(),
                "timelock_delay_secs": signers.timelock_delay(),
                "signer_set_version": signers.version(),
                "balance": service.balance().await.to_string(),
                "pending": service.pending().await,
                "notaries": service.notary_count().await,
                "paused": service.is_paused().await,
            })
        }
        Cmd::Deposit { from, amount } => {
            let balance = service.deposit(from, amount).await?;
            json!({ "balance": balance.to_string() })
        }
        Cmd::Submit {
            proposer,
            target,
            value,
            op,
            arg,
        } => {
            let target = match target {
                Target::Vault => service.vault_address().await,
                Target::Roster => service.roster_address().await,
                Target::Registry => service.registry_address().await,
                Target::External(address) => address,
            };
            let command = Command {
                target,
                value,
                payload: op.payload(arg.as_deref())?,
            };
            let index = service.submit(proposer, command).await?;
            json!({ "index": index })
        }
        Cmd::Confirm { signer, index } => {
            json!({ "confirmations": service.confirm(signer, index).await? })
        }
        Cmd::Revoke { signer, index } => {
            json!({ "confirmations": service.revoke(signer, index).await? })
        }
        Cmd::Execute { signer, index } => serde_json::to_value(service.execute(signer, index).await?)?,
        Cmd::Tx { index } => {
            let status = service.status(index).await?;
            json!({
                "status": status.to_string(),
                "transaction": service.transaction(index).await,
            })
        }
        Cmd::SignAttestation {
            key,
            doc,
            status,
            timestamp,
        } => {
            let key = parse_key(&key)?;
            let attestation = Attestation::new(doc, status, timestamp.unwrap_or_else(|| clock.now()));
            let signature = attestation.sign(&service.registry_domain().await, &key)?;
            json!({
                "notary": key.address(),
                "attestation": attestation,
                "signature": signature,
            })
        }
        Cmd::Record {
            relayer,
            doc,
            status,
            timestamp,
            signature,
        } => {
            let attestation = Attestation {
                doc_hash: doc,
                status,
                timestamp,
            };
            serde_json::to_value(service.record_action(relayer, attestation, signature).await?)?
        }
        Cmd::Document { doc } => serde_json::to_value(service.get_document(doc).await)?,
        Cmd::Notary { address } => json!({
            "active": service.is_notary(address).await,
            "entry": service.notary(address).await,
        }),
    })
}
