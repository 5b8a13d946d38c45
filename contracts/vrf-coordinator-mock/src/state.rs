use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<CoordinatorConfig> = Item::new("config");
pub const SUBSCRIPTIONS: Map<u64, Subscription> = Map::new("subscriptions");
pub const REQUESTS: Map<u64, PendingRequest> = Map::new("requests");
pub const NEXT_SUBSCRIPTION_ID: Item<u64> = Item::new("next_subscription_id");
pub const NEXT_REQUEST_ID: Item<u64> = Item::new("next_request_id");

/// Upper bound on words per request.
pub const MAX_NUM_WORDS: u32 = 500;

#[cw_serde]
pub struct CoordinatorConfig {
    /// Flat fee charged per fulfillment
    pub base_fee: Uint128,
    /// Price per unit of callback gas
    pub gas_price_link: Uint128,
}

#[cw_serde]
pub struct Subscription {
    pub id: u64,
    pub owner: Addr,
    pub balance: Uint128,
    pub consumers: Vec<Addr>,
}

#[cw_serde]
pub struct PendingRequest {
    pub request_id: u64,
    pub subscription_id: u64,
    pub consumer: Addr,
    pub num_words: u32,
    pub callback_gas_limit: u32,
    pub request_confirmations: u16,
    pub requested_at_height: u64,
}
