//! In-process development chain backed by `cw-multi-test`.

use std::fmt::Debug;
use std::time::Duration;

use cosmwasm_std::{Addr, Coin, Empty, Timestamp};
use cw_multi_test::{App, AppResponse, BankSudo, Contract, ContractWrapper, Executor, SudoMsg};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::chain::{Chain, ContractKind, TxReceipt};
use crate::error::KeeperError;

/// Average block time used when the clock is moved forward.
const BLOCK_SECONDS: u64 = 5;

fn contract_raffle() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        raffle::contract::execute,
        raffle::contract::instantiate,
        raffle::contract::query,
    )
    .with_reply(raffle::contract::reply);
    Box::new(contract)
}

fn contract_vrf_coordinator_mock() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        vrf_coordinator_mock::contract::execute,
        vrf_coordinator_mock::contract::instantiate,
        vrf_coordinator_mock::contract::query,
    );
    Box::new(contract)
}

/// Surface a failed call with the contract's own error text.
fn rejected(err: anyhow::Error) -> KeeperError {
    KeeperError::Rejected {
        reason: err.root_cause().to_string(),
    }
}

fn receipt(response: AppResponse) -> TxReceipt {
    TxReceipt {
        events: response.events,
        data: response.data,
    }
}

pub struct LocalChain {
    app: App,
}

impl Default for LocalChain {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalChain {
    pub fn new() -> Self {
        Self {
            app: App::default(),
        }
    }

    /// Deterministic address for a named account.
    pub fn account(&self, name: &str) -> Addr {
        self.app.api().addr_make(name)
    }

    /// Mint `amount` into `to`.
    pub fn fund(&mut self, to: &Addr, amount: Vec<Coin>) -> Result<(), KeeperError> {
        self.app
            .sudo(SudoMsg::Bank(BankSudo::Mint {
                to_address: to.to_string(),
                amount,
            }))
            .map_err(rejected)?;
        Ok(())
    }

    /// Move the clock forward and produce the blocks that would cover it.
    pub fn advance_time(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += (seconds / BLOCK_SECONDS).max(1);
        });
    }
}

impl Chain for LocalChain {
    fn upload(&mut self, kind: ContractKind) -> Result<u64, KeeperError> {
        let code = match kind {
            ContractKind::Raffle => contract_raffle(),
            ContractKind::VrfCoordinatorMock => contract_vrf_coordinator_mock(),
        };
        Ok(self.app.store_code(code))
    }

    fn instantiate<M: Serialize>(
        &mut self,
        code_id: u64,
        sender: &Addr,
        msg: &M,
        funds: &[Coin],
        label: &str,
    ) -> Result<Addr, KeeperError> {
        self.app
            .instantiate_contract(code_id, sender.clone(), msg, funds, label, None)
            .map_err(rejected)
    }

    fn execute<M: Serialize + Debug>(
        &mut self,
        sender: &Addr,
        contract: &Addr,
        msg: &M,
        funds: &[Coin],
    ) -> Result<TxReceipt, KeeperError> {
        self.app
            .execute_contract(sender.clone(), contract.clone(), msg, funds)
            .map(receipt)
            .map_err(rejected)
    }

    fn query<Q: Serialize, R: DeserializeOwned>(
        &self,
        contract: &Addr,
        msg: &Q,
    ) -> Result<R, KeeperError> {
        Ok(self.app.wrap().query_wasm_smart(contract, msg)?)
    }

    fn balance(&self, address: &Addr, denom: &str) -> Result<Coin, KeeperError> {
        Ok(self.app.wrap().query_balance(address, denom)?)
    }

    fn block_time(&self) -> Timestamp {
        self.app.block_info().time
    }

    fn wait(&mut self, duration: Duration) {
        self.advance_time(duration.as_secs());
    }
}
