//! Writes the raffle's address and interface description where the front
//! end picks them up.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cosmwasm_std::Addr;
use log::info;

use crate::error::KeeperError;

pub const DEFAULT_ADDRESSES_FILE: &str = "../raffle-frontend/constants/contractAddresses.json";
pub const DEFAULT_INTERFACE_FILE: &str = "../raffle-frontend/constants/abi.json";

/// Chain id → deployed raffle addresses.
pub type AddressMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    /// Set from `UPDATE_FRONT_END`
    pub enabled: bool,
    pub addresses_file: PathBuf,
    pub interface_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishReport {
    Skipped,
    Published {
        /// False when the address was already listed for the chain
        added: bool,
    },
}

/// Rendered JSON interface of the raffle contract.
pub fn render_interface() -> Result<String, KeeperError> {
    Ok(raffle::interface().render().to_string()?)
}

pub struct ArtifactPublisher {
    config: ArtifactConfig,
}

impl ArtifactPublisher {
    pub fn new(config: ArtifactConfig) -> Self {
        Self { config }
    }

    /// Record `address` under `chain_id` and overwrite the interface file.
    pub fn publish(
        &self,
        chain_id: &str,
        address: &Addr,
        interface: &str,
    ) -> Result<PublishReport, KeeperError> {
        if !self.config.enabled {
            return Ok(PublishReport::Skipped);
        }
        info!("Updating front end...");

        let mut addresses = self.read_addresses()?;
        let listed = addresses.entry(chain_id.to_string()).or_default();
        let added = !listed.iter().any(|a| a == address.as_str());
        if added {
            listed.push(address.to_string());
        }

        write_file(
            &self.config.addresses_file,
            &serde_json::to_string_pretty(&addresses)?,
        )?;
        write_file(&self.config.interface_file, interface)?;

        info!("Front end written!");
        Ok(PublishReport::Published { added })
    }

    /// Current address map. A missing file reads as empty.
    pub fn read_addresses(&self) -> Result<AddressMap, KeeperError> {
        match fs::read_to_string(&self.config.addresses_file) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(AddressMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), KeeperError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
