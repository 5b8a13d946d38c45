use std::collections::BTreeMap;

use cosmwasm_std::{Addr, Coin, Uint128};
use log::info;
use raffle_common::events::{ATTR_SUBSCRIPTION_ID, SUBSCRIPTION_CREATED};

use crate::chain::{Chain, ContractKind, TxReceipt};
use crate::config::NetworkConfig;
use crate::error::KeeperError;

/// 0.25 LINK per fulfillment
pub const BASE_FEE: u128 = 250_000_000_000_000_000;
/// LINK per unit of callback gas
pub const GAS_PRICE_LINK: u128 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Addr,
    pub code_id: u64,
}

/// Contracts deployed in this session, by name.
#[derive(Debug, Clone, Default)]
pub struct Deployments {
    entries: BTreeMap<String, Deployment>,
}

impl Deployments {
    pub fn insert(&mut self, name: &str, deployment: Deployment) {
        self.entries.insert(name.to_string(), deployment);
    }

    pub fn get(&self, name: &str) -> Result<&Deployment, KeeperError> {
        self.entries
            .get(name)
            .ok_or_else(|| KeeperError::UnknownDeployment {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Deploy the mock coordinator on development networks. Live networks are
/// left untouched.
pub fn deploy_mocks<C: Chain>(
    chain: &mut C,
    network: &NetworkConfig,
    deployer: &Addr,
    deployments: &mut Deployments,
) -> Result<Option<Addr>, KeeperError> {
    if !network.is_development() {
        return Ok(None);
    }

    info!("Local network detected. Deploying mocks....");
    let kind = ContractKind::VrfCoordinatorMock;
    let code_id = chain.upload(kind)?;
    let address = chain.instantiate(
        code_id,
        deployer,
        &vrf_coordinator_mock::msg::InstantiateMsg {
            base_fee: Uint128::new(BASE_FEE),
            gas_price_link: Uint128::new(GAS_PRICE_LINK),
        },
        &[],
        kind.name(),
    )?;
    info!("Mock deployed!");

    deployments.insert(
        kind.name(),
        Deployment {
            address: address.clone(),
            code_id,
        },
    );
    Ok(Some(address))
}

/// Deploy the raffle against the network's coordinator.
///
/// On development networks a subscription is opened and funded on the mock
/// and the raffle is registered as its consumer.
pub fn deploy_raffle<C: Chain>(
    chain: &mut C,
    network: &NetworkConfig,
    deployer: &Addr,
    deployments: &mut Deployments,
) -> Result<Addr, KeeperError> {
    let (coordinator, subscription_id) = if network.is_development() {
        let coordinator = deployments
            .get(ContractKind::VrfCoordinatorMock.name())?
            .address
            .clone();
        let receipt = chain.execute(
            deployer,
            &coordinator,
            &vrf_coordinator_mock::msg::ExecuteMsg::CreateSubscription {},
            &[],
        )?;
        let subscription_id = receipt.attribute_u64(SUBSCRIPTION_CREATED, ATTR_SUBSCRIPTION_ID)?;
        chain.execute(
            deployer,
            &coordinator,
            &vrf_coordinator_mock::msg::ExecuteMsg::FundSubscription {
                subscription_id,
                amount: network.subscription_fund_amount,
            },
            &[],
        )?;
        (coordinator, subscription_id)
    } else {
        let coordinator =
            network
                .vrf_coordinator
                .clone()
                .ok_or_else(|| KeeperError::MissingConfig {
                    field: "vrf_coordinator".to_string(),
                })?;
        let subscription_id = network
            .subscription_id
            .ok_or_else(|| KeeperError::MissingConfig {
                field: "subscription_id".to_string(),
            })?;
        (Addr::unchecked(coordinator), subscription_id)
    };

    let kind = ContractKind::Raffle;
    let code_id = chain.upload(kind)?;
    let raffle = chain.instantiate(
        code_id,
        deployer,
        &raffle::msg::InstantiateMsg {
            vrf_coordinator: coordinator.to_string(),
            entrance_fee: network.entrance_fee_coin(),
            interval_seconds: network.interval_seconds,
            key_hash: network.key_hash.clone(),
            subscription_id,
            callback_gas_limit: network.callback_gas_limit,
        },
        &[],
        kind.name(),
    )?;
    info!("Raffle deployed at {raffle} (subscription {subscription_id})");

    if network.is_development() {
        chain.execute(
            deployer,
            &coordinator,
            &vrf_coordinator_mock::msg::ExecuteMsg::AddConsumer {
                subscription_id,
                consumer: raffle.to_string(),
            },
            &[],
        )?;
        info!("Consumer registered");
    }

    deployments.insert(
        kind.name(),
        Deployment {
            address: raffle.clone(),
            code_id,
        },
    );
    Ok(raffle)
}

/// Enter the raffle paying exactly the entrance fee.
pub fn enter_raffle<C: Chain>(
    chain: &mut C,
    raffle: &Addr,
    player: &Addr,
) -> Result<TxReceipt, KeeperError> {
    let fee: Coin = chain.query(raffle, &raffle::msg::QueryMsg::EntranceFee {})?;
    let receipt = chain.execute(
        player,
        raffle,
        &raffle::msg::ExecuteMsg::Enter {},
        std::slice::from_ref(&fee),
    )?;
    info!("Entered! {fee}");
    Ok(receipt)
}
