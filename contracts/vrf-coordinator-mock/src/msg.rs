use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::{CoordinatorConfig, PendingRequest, Subscription};

#[cw_serde]
pub struct InstantiateMsg {
    /// Flat fee charged per fulfillment
    pub base_fee: Uint128,
    /// Price per unit of callback gas
    pub gas_price_link: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open a subscription owned by the sender.
    CreateSubscription {},
    /// Top up a subscription balance.
    FundSubscription {
        subscription_id: u64,
        amount: Uint128,
    },
    /// Allow a consumer contract to request against a subscription (owner only).
    AddConsumer {
        subscription_id: u64,
        consumer: String,
    },
    /// Revoke a consumer (owner only).
    RemoveConsumer {
        subscription_id: u64,
        consumer: String,
    },
    /// Register a randomness request. Called by consumer contracts.
    RequestRandomWords {
        key_hash: String,
        subscription_id: u64,
        request_confirmations: u16,
        callback_gas_limit: u32,
        num_words: u32,
    },
    /// Deliver derived words for a pending request to its consumer.
    FulfillRandomWords { request_id: u64, consumer: String },
    /// Deliver caller-chosen words for a pending request to its consumer.
    FulfillRandomWordsWithOverride {
        request_id: u64,
        consumer: String,
        words: Vec<Uint128>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CoordinatorConfig)]
    Config {},

    #[returns(Subscription)]
    Subscription { subscription_id: u64 },

    #[returns(Option<PendingRequest>)]
    Request { request_id: u64 },

    #[returns(u64)]
    NextRequestId {},
}
