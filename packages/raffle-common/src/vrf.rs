use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// The part of the coordinator API a consumer contract calls.
#[cw_serde]
pub enum CoordinatorExecuteMsg {
    RequestRandomWords {
        /// Hex-encoded gas lane (32 bytes = 64 hex chars)
        key_hash: String,
        subscription_id: u64,
        request_confirmations: u16,
        callback_gas_limit: u32,
        num_words: u32,
    },
}

/// Callback delivered by the coordinator to a consumer once a request is
/// fulfilled.
#[cw_serde]
pub enum VrfConsumerExecuteMsg {
    RawFulfillRandomWords {
        request_id: u64,
        random_words: Vec<Uint128>,
    },
}
