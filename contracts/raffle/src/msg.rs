use cosmwasm_schema::{cw_serde, generate_api, Api, QueryResponses};
use cosmwasm_std::{Addr, Binary, Coin, Timestamp, Uint128};
use raffle_common::{CheckUpkeepResponse, RaffleState};

use crate::state::RaffleConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub vrf_coordinator: String,
    pub entrance_fee: Coin,
    pub interval_seconds: u64,
    /// Hex-encoded gas lane (32 bytes = 64 hex chars)
    pub key_hash: String,
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Buy into the current round. Requires at least the entrance fee.
    Enter {},
    /// Close the round and request randomness. Anyone can call once upkeep is needed.
    PerformUpkeep { perform_data: Binary },
    /// Randomness callback. Coordinator only.
    RawFulfillRandomWords {
        request_id: u64,
        random_words: Vec<Uint128>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CheckUpkeepResponse)]
    CheckUpkeep { check_data: Binary },

    #[returns(RaffleConfig)]
    Config {},

    #[returns(Coin)]
    EntranceFee {},

    #[returns(u64)]
    Interval {},

    #[returns(RaffleState)]
    RaffleState {},

    #[returns(Addr)]
    Player { index: u64 },

    #[returns(u64)]
    NumberOfPlayers {},

    #[returns(Option<Addr>)]
    RecentWinner {},

    #[returns(Timestamp)]
    LastTimestamp {},

    #[returns(Option<u64>)]
    PendingRequest {},
}

/// JSON-schema description of the contract's messages.
pub fn interface() -> Api {
    generate_api! {
        instantiate: InstantiateMsg,
        execute: ExecuteMsg,
        query: QueryMsg,
    }
}
