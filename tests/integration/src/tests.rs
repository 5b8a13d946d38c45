//! Integration tests for the raffle keeper.
//!
//! Every scenario runs on `LocalChain`: the raffle and the mock coordinator
//! are deployed the way the `deploy` binary deploys them, and the keeper
//! components drive them through the `Chain` trait.
//!
//! Run:
//! ```bash
//! cargo test -p raffle-integration-tests
//! ```

use std::time::Duration;

use cosmwasm_std::{coins, Addr, Timestamp, Uint128};
use raffle::msg::QueryMsg;
use raffle_common::RaffleState;
use raffle_keeper::artifacts::{
    render_interface, ArtifactConfig, ArtifactPublisher, PublishReport,
};
use raffle_keeper::deploy::{deploy_mocks, deploy_raffle, enter_raffle, Deployments};
use raffle_keeper::relay::FulfillmentRelay;
use raffle_keeper::upkeep::{UpkeepChecker, UpkeepExecutor, UpkeepRequest};
use raffle_keeper::watch::WinnerWatch;
use raffle_keeper::{
    Chain, Keeper, KeeperError, LocalChain, NetworkConfig, UpkeepOutcome, WatchConfig,
};

// ─── Helpers ───

struct Fixture {
    chain: LocalChain,
    network: NetworkConfig,
    raffle: Addr,
    coordinator: Addr,
    keeper: Addr,
}

impl Fixture {
    fn new() -> Self {
        let mut chain = LocalChain::new();
        let network = NetworkConfig::for_network("local").unwrap();
        let deployer = chain.account("deployer");
        let keeper = chain.account("keeper");
        let mut deployments = Deployments::default();

        let coordinator = deploy_mocks(&mut chain, &network, &deployer, &mut deployments)
            .unwrap()
            .unwrap();
        let raffle = deploy_raffle(&mut chain, &network, &deployer, &mut deployments).unwrap();

        Self {
            chain,
            network,
            raffle,
            coordinator,
            keeper,
        }
    }

    fn fee(&self) -> Uint128 {
        self.network.entrance_fee
    }

    /// Fund `name` with exactly one entrance fee and enter.
    fn enter(&mut self, name: &str) -> Addr {
        let player = self.chain.account(name);
        self.chain
            .fund(&player, coins(self.fee().u128(), &self.network.denom))
            .unwrap();
        enter_raffle(&mut self.chain, &self.raffle, &player).unwrap();
        player
    }

    fn balance(&self, who: &Addr) -> Uint128 {
        self.chain.balance(who, &self.network.denom).unwrap().amount
    }

    fn upkeep_needed(&self) -> bool {
        UpkeepChecker::new(self.raffle.clone())
            .check(&self.chain)
            .unwrap()
            .upkeep_needed
    }

    fn perform_upkeep(&mut self) -> Result<UpkeepRequest, KeeperError> {
        UpkeepExecutor::new(self.raffle.clone(), self.keeper.clone()).execute(&mut self.chain)
    }

    fn relay(&self) -> FulfillmentRelay {
        FulfillmentRelay::new(&self.network, self.coordinator.clone(), self.keeper.clone())
            .unwrap()
    }

    fn raffle_state(&self) -> RaffleState {
        self.chain
            .query(&self.raffle, &QueryMsg::RaffleState {})
            .unwrap()
    }

    fn last_timestamp(&self) -> Timestamp {
        self.chain
            .query(&self.raffle, &QueryMsg::LastTimestamp {})
            .unwrap()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_upkeep_readiness() {
    let mut f = Fixture::new();
    let interval = f.network.interval_seconds;

    // 1. Fresh raffle: no players, no balance
    f.chain.advance_time(interval + 1);
    assert!(!f.upkeep_needed());

    // 2. One entrant, interval not yet passed
    let mut f = Fixture::new();
    f.enter("player");
    f.chain.advance_time(interval - 5);
    assert!(!f.upkeep_needed());

    // 3. Exactly the interval is still not enough
    f.chain.advance_time(5);
    assert!(!f.upkeep_needed());

    // 4. Past the interval with a player and a balance
    f.chain.advance_time(1);
    assert!(f.upkeep_needed());

    // 5. Calculating: not open
    f.perform_upkeep().unwrap();
    assert!(!f.upkeep_needed());

    eprintln!("test_upkeep_readiness passed");
}

#[test]
fn test_perform_upkeep_gate() {
    let mut f = Fixture::new();

    // 1. Not ready → the contract's own rejection text
    let err = f.perform_upkeep().unwrap_err();
    assert!(matches!(err, KeeperError::Rejected { .. }));
    assert!(err.to_string().starts_with("upkeep not needed"));
    assert_eq!(f.raffle_state(), RaffleState::Open);

    // 2. Ready → request opened, state moves to calculating
    f.enter("player");
    f.chain.advance_time(f.network.interval_seconds + 1);
    let request = f.perform_upkeep().unwrap();
    assert_eq!(request.request_id, 1);
    assert_eq!(f.raffle_state(), RaffleState::Calculating);

    let pending: Option<u64> = f
        .chain
        .query(&f.raffle, &QueryMsg::PendingRequest {})
        .unwrap();
    assert_eq!(pending, Some(1));

    // 3. A second upkeep is rejected while calculating
    let err = f.perform_upkeep().unwrap_err();
    assert!(err.to_string().contains("upkeep not needed"));

    // 4. Entering while calculating is refused
    let late = f.chain.account("late");
    f.chain
        .fund(&late, coins(f.fee().u128(), &f.network.denom))
        .unwrap();
    let err = enter_raffle(&mut f.chain, &f.raffle, &late).unwrap_err();
    assert_eq!(err.to_string(), "raffle not open");

    eprintln!("test_perform_upkeep_gate passed");
}

#[test]
fn test_relay_request_lifecycle() {
    let mut f = Fixture::new();
    let relay = f.relay();

    // 1. Ids that were never issued
    for request_id in [0, 1] {
        let err = relay
            .fulfill(&mut f.chain, &UpkeepRequest { request_id }, &f.raffle)
            .unwrap_err();
        assert_eq!(err.to_string(), "nonexistent request");
    }

    // 2. A fresh id succeeds once
    f.enter("player");
    f.chain.advance_time(f.network.interval_seconds + 1);
    let request = f.perform_upkeep().unwrap();
    let receipt = relay.fulfill(&mut f.chain, &request, &f.raffle).unwrap();
    assert_eq!(
        receipt.attribute("random_words_fulfilled", "request_id"),
        Some("1")
    );

    // 3. Consumed ids are gone
    let err = relay
        .fulfill(&mut f.chain, &request, &f.raffle)
        .unwrap_err();
    assert_eq!(err.to_string(), "nonexistent request");

    // 4. The relay does not exist on live networks
    let live = NetworkConfig::for_network("elgafar-1").unwrap();
    let err = FulfillmentRelay::new(&live, f.coordinator.clone(), f.keeper.clone())
        .err()
        .unwrap();
    assert!(matches!(err, KeeperError::RelayOnLiveNetwork { .. }));

    eprintln!("test_relay_request_lifecycle passed");
}

#[test]
fn test_picks_winner_resets_and_pays() {
    let mut f = Fixture::new();

    // 1. Four entrants
    let players: Vec<Addr> = ["player0", "player1", "player2", "player3"]
        .iter()
        .map(|name| f.enter(name))
        .collect();
    let pot = f.fee() * Uint128::new(players.len() as u128);
    assert_eq!(f.balance(&f.raffle), pot);

    // 2. Draw
    f.chain.advance_time(f.network.interval_seconds + 1);
    let started = f.last_timestamp();
    let request = f.perform_upkeep().unwrap();

    // 3. 9 mod 4 = 1 → player1
    let receipt = f
        .relay()
        .fulfill_with_words(&mut f.chain, &request, &f.raffle, vec![Uint128::new(9)])
        .unwrap();
    assert_eq!(receipt.events_named("winner_picked").len(), 1);

    let winner: Option<Addr> = f
        .chain
        .query(&f.raffle, &QueryMsg::RecentWinner {})
        .unwrap();
    assert_eq!(winner, Some(players[1].clone()));

    // 4. Round reset
    assert_eq!(f.raffle_state(), RaffleState::Open);
    let number: u64 = f
        .chain
        .query(&f.raffle, &QueryMsg::NumberOfPlayers {})
        .unwrap();
    assert_eq!(number, 0);
    let first: Result<Addr, KeeperError> =
        f.chain.query(&f.raffle, &QueryMsg::Player { index: 0 });
    assert!(first.is_err());
    assert!(f.last_timestamp() > started);

    // 5. Whole pot paid to the winner
    assert_eq!(f.balance(&players[1]), pot);
    assert_eq!(f.balance(&players[0]), Uint128::zero());
    assert_eq!(f.balance(&f.raffle), Uint128::zero());

    eprintln!("test_picks_winner_resets_and_pays passed");
}

#[test]
fn test_end_to_end_single_participant() {
    let mut f = Fixture::new();

    // 1. One participant enters
    let player = f.enter("player");
    let after_entry = f.balance(&player);
    f.chain.advance_time(f.network.interval_seconds + 1);

    // 2. Check, arm the watch, perform
    assert!(f.upkeep_needed());
    let watch = WinnerWatch::arm(&f.chain, &f.raffle, f.network.watch).unwrap();
    assert_eq!(watch.armed_at(), f.last_timestamp());
    let request = f.perform_upkeep().unwrap();

    // 3. Relay and observe exactly one winner event
    let receipt = f.relay().fulfill(&mut f.chain, &request, &f.raffle).unwrap();
    assert_eq!(receipt.events_named("winner_picked").len(), 1);

    // 4. The watch reports the participant from the receipt
    let winner = watch.wait(&mut f.chain, &request, Some(&receipt)).unwrap();
    assert_eq!(winner, player);

    // 5. State reopened and the entrance fee came back
    assert_eq!(f.raffle_state(), RaffleState::Open);
    assert_eq!(f.balance(&player), after_entry + f.fee());

    eprintln!("test_end_to_end_single_participant passed");
}

#[test]
fn test_keeper_run_once() {
    let mut f = Fixture::new();
    let keeper = Keeper::new(
        f.network.clone(),
        f.raffle.clone(),
        Some(f.coordinator.clone()),
        f.keeper.clone(),
    );

    // 1. Nothing to do on a fresh raffle
    assert_eq!(keeper.run_once(&mut f.chain).unwrap(), UpkeepOutcome::NotNeeded);

    // 2. Two rounds in a row
    for round in 1..=2u64 {
        let a = f.enter(&format!("alice{round}"));
        let b = f.enter(&format!("bob{round}"));
        f.chain.advance_time(f.network.interval_seconds + 1);

        match keeper.run_once(&mut f.chain).unwrap() {
            UpkeepOutcome::WinnerPicked { request, winner } => {
                assert_eq!(request.request_id, round);
                assert!(winner == a || winner == b);
                assert_eq!(f.balance(&winner), f.fee() * Uint128::new(2));
            }
            other => panic!("expected a winner, got {:?}", other),
        }
    }

    eprintln!("test_keeper_run_once passed");
}

#[test]
fn test_live_keeper_times_out_without_oracle() {
    let mut f = Fixture::new();
    f.enter("player");
    f.chain.advance_time(f.network.interval_seconds + 1);

    // Live configuration: no relay, the watch polls for the real oracle
    let mut live = NetworkConfig::for_network("elgafar-1").unwrap();
    live.watch = WatchConfig {
        timeout: Duration::from_secs(30),
        poll_interval: Duration::from_secs(10),
    };
    let keeper = Keeper::new(live, f.raffle.clone(), None, f.keeper.clone());

    let err = keeper.run_once(&mut f.chain).unwrap_err();
    assert!(matches!(
        err,
        KeeperError::WinnerTimeout {
            request_id: 1,
            waited_secs: 30
        }
    ));

    // The request stays open for the oracle to answer later
    assert_eq!(f.raffle_state(), RaffleState::Calculating);
    let receipt = f
        .relay()
        .fulfill(&mut f.chain, &UpkeepRequest { request_id: 1 }, &f.raffle)
        .unwrap();
    assert_eq!(receipt.events_named("winner_picked").len(), 1);

    eprintln!("test_live_keeper_times_out_without_oracle passed");
}

#[test]
fn test_publish_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::new();
    let publisher = ArtifactPublisher::new(ArtifactConfig {
        enabled: true,
        addresses_file: dir.path().join("contractAddresses.json"),
        interface_file: dir.path().join("abi.json"),
    });
    let interface = render_interface().unwrap();

    // 1. First publish adds the address, second is a no-op on the map
    assert_eq!(
        publisher
            .publish(&f.network.chain_id, &f.raffle, &interface)
            .unwrap(),
        PublishReport::Published { added: true }
    );
    assert_eq!(
        publisher
            .publish(&f.network.chain_id, &f.raffle, &interface)
            .unwrap(),
        PublishReport::Published { added: false }
    );

    // 2. Another chain gets its own entry
    publisher
        .publish("elgafar-1", &Addr::unchecked("stars1raffle"), &interface)
        .unwrap();

    let addresses = publisher.read_addresses().unwrap();
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses["local"], vec![f.raffle.to_string()]);
    assert_eq!(addresses["elgafar-1"], vec!["stars1raffle".to_string()]);

    let written = std::fs::read_to_string(dir.path().join("abi.json")).unwrap();
    assert_eq!(written, interface);

    // 3. Disabled publisher leaves everything alone
    let skipped = ArtifactPublisher::new(ArtifactConfig {
        enabled: false,
        addresses_file: dir.path().join("other.json"),
        interface_file: dir.path().join("other_abi.json"),
    });
    assert_eq!(
        skipped.publish("local", &f.raffle, &interface).unwrap(),
        PublishReport::Skipped
    );
    assert!(!dir.path().join("other.json").exists());

    eprintln!("test_publish_artifacts passed");
}
