//! Network table and environment-driven keeper configuration.
//!
//! Components never read the environment. [`KeeperConfig::from_env`] is the
//! only place that does, and everything downstream receives typed values.

use std::path::PathBuf;
use std::time::Duration;

use cosmwasm_std::{Coin, Uint128};

use crate::artifacts::{ArtifactConfig, DEFAULT_ADDRESSES_FILE, DEFAULT_INTERFACE_FILE};
use crate::error::KeeperError;

/// Networks on which the mock coordinator is deployed and the relay may run.
pub const DEVELOPMENT_CHAINS: [&str; 2] = ["local", "localwasm"];

pub const DEFAULT_NETWORK: &str = "local";

/// 30 gwei gas lane
const KEY_HASH: &str = "474e34a077df58807dbe9c96d3c009b23b3c6d0cce433e59bbf5b34f823bc56c";

pub fn is_development_chain(name: &str) -> bool {
    DEVELOPMENT_CHAINS.contains(&name)
}

/// Bounds on how long the keeper waits for a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(10),
        }
    }
}

impl WatchConfig {
    pub fn local() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: String,
    pub development: bool,
    /// Fee and prize denom
    pub denom: String,
    pub entrance_fee: Uint128,
    pub interval_seconds: u64,
    pub key_hash: String,
    pub callback_gas_limit: u32,
    /// Amount booked on a fresh mock subscription
    pub subscription_fund_amount: Uint128,
    /// Live coordinator address; development networks deploy a mock instead
    pub vrf_coordinator: Option<String>,
    pub subscription_id: Option<u64>,
    pub watch: WatchConfig,
}

impl NetworkConfig {
    pub fn for_network(name: &str) -> Result<Self, KeeperError> {
        match name {
            "local" | "localwasm" => Ok(Self {
                name: name.to_string(),
                chain_id: name.to_string(),
                development: is_development_chain(name),
                denom: "uraffle".to_string(),
                entrance_fee: Uint128::new(10_000),
                interval_seconds: 30,
                key_hash: KEY_HASH.to_string(),
                callback_gas_limit: 500_000,
                subscription_fund_amount: Uint128::new(10_000_000_000_000_000_000),
                vrf_coordinator: None,
                subscription_id: None,
                watch: WatchConfig::local(),
            }),
            "elgafar-1" => Ok(Self {
                name: name.to_string(),
                chain_id: "elgafar-1".to_string(),
                development: is_development_chain(name),
                denom: "ustars".to_string(),
                entrance_fee: Uint128::new(1_000_000),
                interval_seconds: 30,
                key_hash: KEY_HASH.to_string(),
                callback_gas_limit: 500_000,
                subscription_fund_amount: Uint128::zero(),
                vrf_coordinator: None,
                subscription_id: None,
                watch: WatchConfig::default(),
            }),
            other => Err(KeeperError::UnknownNetwork {
                name: other.to_string(),
            }),
        }
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    pub fn entrance_fee_coin(&self) -> Coin {
        Coin::new(self.entrance_fee, self.denom.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeeperConfig {
    pub network: NetworkConfig,
    pub artifacts: ArtifactConfig,
}

impl KeeperConfig {
    pub fn from_env() -> Result<Self, KeeperError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KeeperError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = lookup("RAFFLE_NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        let mut network = NetworkConfig::for_network(&name)?;

        if let Some(secs) = lookup("RAFFLE_WATCH_TIMEOUT_SECS") {
            let secs = parse_env("RAFFLE_WATCH_TIMEOUT_SECS", &secs)?;
            network.watch.timeout = Duration::from_secs(secs);
        }
        if let Some(addr) = lookup("RAFFLE_VRF_COORDINATOR") {
            network.vrf_coordinator = Some(addr);
        }
        if let Some(id) = lookup("RAFFLE_SUBSCRIPTION_ID") {
            network.subscription_id = Some(parse_env("RAFFLE_SUBSCRIPTION_ID", &id)?);
        }

        let artifacts = ArtifactConfig {
            enabled: lookup("UPDATE_FRONT_END").is_some_and(|v| !v.is_empty()),
            addresses_file: lookup("FRONT_END_ADDRESSES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ADDRESSES_FILE)),
            interface_file: lookup("FRONT_END_ABI_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INTERFACE_FILE)),
        };

        Ok(Self { network, artifacts })
    }
}

fn parse_env(name: &str, value: &str) -> Result<u64, KeeperError> {
    value.trim().parse().map_err(|_| KeeperError::InvalidEnv {
        name: name.to_string(),
        value: value.to_string(),
    })
}
