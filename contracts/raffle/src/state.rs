use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Timestamp};
use cw_storage_plus::Item;
use raffle_common::RaffleState;

pub const CONFIG: Item<RaffleConfig> = Item::new("config");
pub const RAFFLE_STATE: Item<RaffleState> = Item::new("raffle_state");
pub const PLAYERS: Item<Vec<Addr>> = Item::new("players");
pub const LAST_TIMESTAMP: Item<Timestamp> = Item::new("last_timestamp");
pub const RECENT_WINNER: Item<Addr> = Item::new("recent_winner");
/// Request id of the in-flight randomness request, set between upkeep and fulfillment
pub const PENDING_REQUEST: Item<u64> = Item::new("pending_request");

pub const REQUEST_CONFIRMATIONS: u16 = 3;
pub const NUM_WORDS: u32 = 1;
pub const REQUEST_RANDOMNESS_REPLY_ID: u64 = 1;

#[cw_serde]
pub struct RaffleConfig {
    pub vrf_coordinator: Addr,
    /// Minimum payment to enter; its denom is also the prize denom
    pub entrance_fee: Coin,
    /// Minimum seconds between draws
    pub interval_seconds: u64,
    /// Gas lane, hex-encoded 32 bytes
    pub key_hash: String,
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
}
