use std::fmt::Debug;
use std::time::Duration;

use cosmwasm_std::{Addr, Binary, Coin, Event, Timestamp};
use raffle_common::wasm_event_type;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::KeeperError;

/// Contract code the tooling knows how to upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    Raffle,
    VrfCoordinatorMock,
}

impl ContractKind {
    /// Deployment name, as recorded in [`crate::deploy::Deployments`].
    pub fn name(&self) -> &'static str {
        match self {
            ContractKind::Raffle => "Raffle",
            ContractKind::VrfCoordinatorMock => "VRFCoordinatorV2Mock",
        }
    }
}

/// Events and data of a confirmed transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxReceipt {
    pub events: Vec<Event>,
    pub data: Option<Binary>,
}

impl TxReceipt {
    /// Events with the given name, with or without the chain's `wasm-` prefix.
    pub fn events_named(&self, name: &str) -> Vec<&Event> {
        let wasm_type = wasm_event_type(name);
        self.events
            .iter()
            .filter(|e| e.ty == wasm_type || e.ty == name)
            .collect()
    }

    /// First value of `key` on an event named `event`.
    pub fn attribute(&self, event: &str, key: &str) -> Option<&str> {
        self.events_named(event)
            .into_iter()
            .flat_map(|e| e.attributes.iter())
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn require_attribute(&self, event: &str, key: &str) -> Result<&str, KeeperError> {
        self.attribute(event, key)
            .ok_or_else(|| KeeperError::MissingEvent {
                event: event.to_string(),
            })
    }

    pub fn attribute_u64(&self, event: &str, key: &str) -> Result<u64, KeeperError> {
        let value = self.require_attribute(event, key)?;
        value.parse().map_err(|_| KeeperError::MalformedAttribute {
            event: event.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// The operations the keeper needs from a chain.
///
/// Every state-changing call returns only after the transaction is
/// confirmed, with the events it emitted.
pub trait Chain {
    fn upload(&mut self, kind: ContractKind) -> Result<u64, KeeperError>;

    fn instantiate<M: Serialize>(
        &mut self,
        code_id: u64,
        sender: &Addr,
        msg: &M,
        funds: &[Coin],
        label: &str,
    ) -> Result<Addr, KeeperError>;

    fn execute<M: Serialize + Debug>(
        &mut self,
        sender: &Addr,
        contract: &Addr,
        msg: &M,
        funds: &[Coin],
    ) -> Result<TxReceipt, KeeperError>;

    fn query<Q: Serialize, R: DeserializeOwned>(
        &self,
        contract: &Addr,
        msg: &Q,
    ) -> Result<R, KeeperError>;

    fn balance(&self, address: &Addr, denom: &str) -> Result<Coin, KeeperError>;

    fn block_time(&self) -> Timestamp;

    /// Let `duration` pass before the next call.
    fn wait(&mut self, duration: Duration);
}
