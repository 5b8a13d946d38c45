//! Off-chain tooling for the raffle: deployment, the keeper loop that checks
//! and performs upkeep, the development-only randomness relay, and the
//! front-end artifact publisher.

pub mod artifacts;
pub mod chain;
pub mod config;
pub mod deploy;
pub mod error;
pub mod local;
pub mod relay;
pub mod upkeep;
pub mod watch;
pub mod workflow;

pub use chain::{Chain, ContractKind, TxReceipt};
pub use config::{KeeperConfig, NetworkConfig, WatchConfig};
pub use error::KeeperError;
pub use local::LocalChain;
pub use workflow::{Keeper, UpkeepOutcome};
