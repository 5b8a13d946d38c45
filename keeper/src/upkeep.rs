use cosmwasm_std::{Addr, Binary};
use log::debug;
use raffle_common::events::{ATTR_REQUEST_ID, REQUESTED_RAFFLE_WINNER};
use raffle_common::CheckUpkeepResponse;

use crate::chain::{Chain, TxReceipt};
use crate::error::KeeperError;

/// A randomness request opened by upkeep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpkeepRequest {
    pub request_id: u64,
}

impl UpkeepRequest {
    /// Read the request from the raffle's `requested_raffle_winner` event.
    pub fn from_receipt(receipt: &TxReceipt) -> Result<Self, KeeperError> {
        let request_id = receipt.attribute_u64(REQUESTED_RAFFLE_WINNER, ATTR_REQUEST_ID)?;
        Ok(Self { request_id })
    }
}

/// Read-only readiness check.
pub struct UpkeepChecker {
    raffle: Addr,
}

impl UpkeepChecker {
    pub fn new(raffle: Addr) -> Self {
        Self { raffle }
    }

    pub fn check<C: Chain>(&self, chain: &C) -> Result<CheckUpkeepResponse, KeeperError> {
        let response: CheckUpkeepResponse = chain.query(
            &self.raffle,
            &raffle::msg::QueryMsg::CheckUpkeep {
                check_data: Binary::default(),
            },
        )?;
        debug!("checkUpkeep: upkeep_needed={}", response.upkeep_needed);
        Ok(response)
    }
}

/// Submits upkeep and reports the request it opened.
pub struct UpkeepExecutor {
    raffle: Addr,
    sender: Addr,
}

impl UpkeepExecutor {
    pub fn new(raffle: Addr, sender: Addr) -> Self {
        Self { raffle, sender }
    }

    pub fn execute<C: Chain>(&self, chain: &mut C) -> Result<UpkeepRequest, KeeperError> {
        let receipt = chain.execute(
            &self.sender,
            &self.raffle,
            &raffle::msg::ExecuteMsg::PerformUpkeep {
                perform_data: Binary::default(),
            },
            &[],
        )?;
        UpkeepRequest::from_receipt(&receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::deploy::{deploy_mocks, deploy_raffle, enter_raffle, Deployments};
    use crate::local::LocalChain;
    use cosmwasm_std::{coins, Event};
    use raffle_common::RaffleState;

    fn setup() -> (LocalChain, NetworkConfig, Addr) {
        let mut chain = LocalChain::new();
        let network = NetworkConfig::for_network("local").unwrap();
        let deployer = chain.account("deployer");
        let mut deployments = Deployments::default();
        deploy_mocks(&mut chain, &network, &deployer, &mut deployments).unwrap();
        let raffle = deploy_raffle(&mut chain, &network, &deployer, &mut deployments).unwrap();
        (chain, network, raffle)
    }

    fn enter(chain: &mut LocalChain, network: &NetworkConfig, raffle: &Addr, name: &str) {
        let player = chain.account(name);
        chain
            .fund(&player, coins(network.entrance_fee.u128(), &network.denom))
            .unwrap();
        enter_raffle(chain, raffle, &player).unwrap();
    }

    #[test]
    fn test_request_from_receipt() {
        let receipt = TxReceipt {
            events: vec![
                Event::new("wasm-random_words_requested").add_attribute("request_id", "3"),
                Event::new("wasm-requested_raffle_winner").add_attribute("request_id", "4"),
            ],
            data: None,
        };
        let request = UpkeepRequest::from_receipt(&receipt).unwrap();
        assert_eq!(request.request_id, 4);

        let err = UpkeepRequest::from_receipt(&TxReceipt::default()).unwrap_err();
        assert!(matches!(err, KeeperError::MissingEvent { .. }));
    }

    #[test]
    fn test_check_has_no_side_effects() {
        let (mut chain, network, raffle) = setup();
        enter(&mut chain, &network, &raffle, "player");
        chain.advance_time(network.interval_seconds + 1);

        let checker = UpkeepChecker::new(raffle.clone());
        assert!(checker.check(&chain).unwrap().upkeep_needed);
        assert!(checker.check(&chain).unwrap().upkeep_needed);

        let state: RaffleState = chain
            .query(&raffle, &raffle::msg::QueryMsg::RaffleState {})
            .unwrap();
        assert_eq!(state, RaffleState::Open);
    }

    #[test]
    fn test_execute_not_needed() {
        let (mut chain, _network, raffle) = setup();
        let keeper = chain.account("keeper");

        let err = UpkeepExecutor::new(raffle, keeper)
            .execute(&mut chain)
            .unwrap_err();
        assert!(matches!(err, KeeperError::Rejected { .. }));
        assert!(err.to_string().contains("upkeep not needed"));
    }

    #[test]
    fn test_execute_opens_request() {
        let (mut chain, network, raffle) = setup();
        enter(&mut chain, &network, &raffle, "player");
        chain.advance_time(network.interval_seconds + 1);
        let keeper = chain.account("keeper");

        let request = UpkeepExecutor::new(raffle.clone(), keeper)
            .execute(&mut chain)
            .unwrap();
        assert_eq!(request.request_id, 1);

        let state: RaffleState = chain
            .query(&raffle, &raffle::msg::QueryMsg::RaffleState {})
            .unwrap();
        assert_eq!(state, RaffleState::Calculating);

        let checker = UpkeepChecker::new(raffle);
        assert!(!checker.check(&chain).unwrap().upkeep_needed);
    }
}
