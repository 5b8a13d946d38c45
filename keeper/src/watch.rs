//! Bounded wait for the raffle to pick a winner.
//!
//! The watch is armed before the call that can trigger the pick, so a
//! winner picked inside that same call is never missed.

use std::time::Duration;

use cosmwasm_std::{Addr, Timestamp};
use log::debug;
use raffle_common::events::{ATTR_REQUEST_ID, ATTR_WINNER, WINNER_PICKED};

use crate::chain::{Chain, TxReceipt};
use crate::config::WatchConfig;
use crate::error::KeeperError;
use crate::upkeep::UpkeepRequest;

pub struct WinnerWatch {
    raffle: Addr,
    armed_at: Timestamp,
    config: WatchConfig,
}

impl WinnerWatch {
    /// Record the raffle's current last-draw timestamp.
    pub fn arm<C: Chain>(
        chain: &C,
        raffle: &Addr,
        config: WatchConfig,
    ) -> Result<Self, KeeperError> {
        let armed_at: Timestamp =
            chain.query(raffle, &raffle::msg::QueryMsg::LastTimestamp {})?;
        Ok(Self {
            raffle: raffle.clone(),
            armed_at,
            config,
        })
    }

    pub fn armed_at(&self) -> Timestamp {
        self.armed_at
    }

    /// Wait for the winner of `request`.
    ///
    /// `receipt` is the confirmation of the call expected to pick the winner,
    /// when the caller made it. Otherwise the raffle is polled until the
    /// timeout.
    pub fn wait<C: Chain>(
        &self,
        chain: &mut C,
        request: &UpkeepRequest,
        receipt: Option<&TxReceipt>,
    ) -> Result<Addr, KeeperError> {
        if let Some(winner) = receipt.and_then(|r| winner_in_receipt(r, request)) {
            return Ok(winner);
        }

        let step = self.config.poll_interval.max(Duration::from_secs(1));
        let mut waited = Duration::ZERO;
        loop {
            if let Some(winner) = self.poll(chain)? {
                return Ok(winner);
            }
            if waited >= self.config.timeout {
                return Err(KeeperError::WinnerTimeout {
                    request_id: request.request_id,
                    waited_secs: waited.as_secs(),
                });
            }
            debug!(
                "no winner for request {} yet, waited {}s",
                request.request_id,
                waited.as_secs()
            );
            let next = step.min(self.config.timeout - waited);
            chain.wait(next);
            waited += next;
        }
    }

    fn poll<C: Chain>(&self, chain: &C) -> Result<Option<Addr>, KeeperError> {
        let last: Timestamp =
            chain.query(&self.raffle, &raffle::msg::QueryMsg::LastTimestamp {})?;
        if last <= self.armed_at {
            return Ok(None);
        }
        Ok(chain.query(&self.raffle, &raffle::msg::QueryMsg::RecentWinner {})?)
    }
}

fn winner_in_receipt(receipt: &TxReceipt, request: &UpkeepRequest) -> Option<Addr> {
    let request_id = request.request_id.to_string();
    receipt
        .events_named(WINNER_PICKED)
        .into_iter()
        .find(|e| {
            e.attributes
                .iter()
                .any(|a| a.key == ATTR_REQUEST_ID && a.value == request_id)
        })
        .and_then(|e| e.attributes.iter().find(|a| a.key == ATTR_WINNER))
        .map(|a| Addr::unchecked(a.value.clone()))
}
