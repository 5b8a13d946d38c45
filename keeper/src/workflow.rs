use cosmwasm_std::Addr;
use log::info;

use crate::chain::Chain;
use crate::config::NetworkConfig;
use crate::error::KeeperError;
use crate::relay::FulfillmentRelay;
use crate::upkeep::{UpkeepChecker, UpkeepExecutor, UpkeepRequest};
use crate::watch::WinnerWatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpkeepOutcome {
    NotNeeded,
    WinnerPicked {
        request: UpkeepRequest,
        winner: Addr,
    },
}

/// One keeper pass over a raffle: check, perform, get randomness, report
/// the winner.
pub struct Keeper {
    network: NetworkConfig,
    raffle: Addr,
    /// Mock coordinator, required on development networks
    coordinator: Option<Addr>,
    sender: Addr,
}

impl Keeper {
    pub fn new(
        network: NetworkConfig,
        raffle: Addr,
        coordinator: Option<Addr>,
        sender: Addr,
    ) -> Self {
        Self {
            network,
            raffle,
            coordinator,
            sender,
        }
    }

    pub fn run_once<C: Chain>(&self, chain: &mut C) -> Result<UpkeepOutcome, KeeperError> {
        let check = UpkeepChecker::new(self.raffle.clone()).check(chain)?;
        if !check.upkeep_needed {
            info!("No upkeep needed!");
            return Ok(UpkeepOutcome::NotNeeded);
        }

        // Relay must be available before anything changes on chain
        let relay = if self.network.is_development() {
            let coordinator = self
                .coordinator
                .clone()
                .ok_or_else(|| KeeperError::MissingConfig {
                    field: "vrf_coordinator".to_string(),
                })?;
            Some(FulfillmentRelay::new(
                &self.network,
                coordinator,
                self.sender.clone(),
            )?)
        } else {
            None
        };

        let watch = WinnerWatch::arm(chain, &self.raffle, self.network.watch)?;
        let executor = UpkeepExecutor::new(self.raffle.clone(), self.sender.clone());
        let request = executor.execute(chain)?;
        info!("Performed upkeep with RequestId: {}", request.request_id);

        let receipt = match relay {
            Some(relay) => {
                info!("We on a local network? Ok let's pretend...");
                let receipt = relay.fulfill(chain, &request, &self.raffle)?;
                info!("Responded!");
                Some(receipt)
            }
            None => {
                info!("Waiting for the oracle to answer request {}", request.request_id);
                None
            }
        };

        let winner = watch.wait(chain, &request, receipt.as_ref())?;
        info!("The winner is: {winner}");
        Ok(UpkeepOutcome::WinnerPicked { request, winner })
    }
}
