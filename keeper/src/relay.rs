use cosmwasm_std::{Addr, Uint128};
use log::debug;
use vrf_coordinator_mock::msg::ExecuteMsg as CoordinatorMsg;

use crate::chain::{Chain, TxReceipt};
use crate::config::NetworkConfig;
use crate::error::KeeperError;
use crate::upkeep::UpkeepRequest;

/// Answers randomness requests through the mock coordinator.
///
/// Only exists on development networks; on live networks the real oracle
/// answers on its own.
pub struct FulfillmentRelay {
    coordinator: Addr,
    sender: Addr,
}

impl FulfillmentRelay {
    pub fn new(
        network: &NetworkConfig,
        coordinator: Addr,
        sender: Addr,
    ) -> Result<Self, KeeperError> {
        if !network.is_development() {
            return Err(KeeperError::RelayOnLiveNetwork {
                network: network.name.clone(),
            });
        }
        Ok(Self {
            coordinator,
            sender,
        })
    }

    /// Deliver mock-derived words for `request` to `consumer`.
    pub fn fulfill<C: Chain>(
        &self,
        chain: &mut C,
        request: &UpkeepRequest,
        consumer: &Addr,
    ) -> Result<TxReceipt, KeeperError> {
        debug!("fulfilling request {} for {consumer}", request.request_id);
        chain.execute(
            &self.sender,
            &self.coordinator,
            &CoordinatorMsg::FulfillRandomWords {
                request_id: request.request_id,
                consumer: consumer.to_string(),
            },
            &[],
        )
    }

    /// Deliver the given words instead of derived ones.
    pub fn fulfill_with_words<C: Chain>(
        &self,
        chain: &mut C,
        request: &UpkeepRequest,
        consumer: &Addr,
        words: Vec<Uint128>,
    ) -> Result<TxReceipt, KeeperError> {
        debug!(
            "fulfilling request {} for {consumer} with {} fixed words",
            request.request_id,
            words.len()
        );
        chain.execute(
            &self.sender,
            &self.coordinator,
            &CoordinatorMsg::FulfillRandomWordsWithOverride {
                request_id: request.request_id,
                consumer: consumer.to_string(),
                words,
            },
            &[],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::{deploy_mocks, deploy_raffle, enter_raffle, Deployments};
    use crate::local::LocalChain;
    use crate::upkeep::UpkeepExecutor;
    use cosmwasm_std::coins;

    #[test]
    fn test_refused_on_live_network() {
        let network = NetworkConfig::for_network("elgafar-1").unwrap();
        let err = FulfillmentRelay::new(
            &network,
            Addr::unchecked("coordinator"),
            Addr::unchecked("keeper"),
        )
        .err()
        .unwrap();
        assert!(matches!(err, KeeperError::RelayOnLiveNetwork { .. }));
    }

    #[test]
    fn test_fulfill_once() {
        let mut chain = LocalChain::new();
        let network = NetworkConfig::for_network("local").unwrap();
        let deployer = chain.account("deployer");
        let keeper = chain.account("keeper");
        let mut deployments = Deployments::default();
        let coordinator = deploy_mocks(&mut chain, &network, &deployer, &mut deployments)
            .unwrap()
            .unwrap();
        let raffle = deploy_raffle(&mut chain, &network, &deployer, &mut deployments).unwrap();
        let relay = FulfillmentRelay::new(&network, coordinator, keeper.clone()).unwrap();

        // Nothing has been requested yet
        for request_id in [0, 1] {
            let err = relay
                .fulfill(&mut chain, &UpkeepRequest { request_id }, &raffle)
                .unwrap_err();
            assert_eq!(err.to_string(), "nonexistent request");
        }

        let player = chain.account("player");
        chain
            .fund(&player, coins(network.entrance_fee.u128(), &network.denom))
            .unwrap();
        enter_raffle(&mut chain, &raffle, &player).unwrap();
        chain.advance_time(network.interval_seconds + 1);
        let request = UpkeepExecutor::new(raffle.clone(), keeper)
            .execute(&mut chain)
            .unwrap();

        let receipt = relay
            .fulfill_with_words(&mut chain, &request, &raffle, vec![Uint128::new(42)])
            .unwrap();
        assert_eq!(receipt.events_named("winner_picked").len(), 1);
        assert_eq!(
            receipt.attribute("winner_picked", "winner"),
            Some(player.as_str())
        );

        let err = relay.fulfill(&mut chain, &request, &raffle).unwrap_err();
        assert_eq!(err.to_string(), "nonexistent request");
    }
}
