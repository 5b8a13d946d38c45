//! Event and attribute names shared by the contracts and the off-chain
//! tooling. Contracts emit the bare names; the chain prefixes custom events
//! with `wasm-`, so readers should match on [`wasm_event_type`].

pub const RANDOM_WORDS_REQUESTED: &str = "random_words_requested";
pub const RANDOM_WORDS_FULFILLED: &str = "random_words_fulfilled";
pub const SUBSCRIPTION_CREATED: &str = "subscription_created";
pub const RAFFLE_ENTER: &str = "raffle_enter";
pub const REQUESTED_RAFFLE_WINNER: &str = "requested_raffle_winner";
pub const WINNER_PICKED: &str = "winner_picked";

pub const ATTR_REQUEST_ID: &str = "request_id";
pub const ATTR_SUBSCRIPTION_ID: &str = "subscription_id";
pub const ATTR_CONSUMER: &str = "consumer";
pub const ATTR_PLAYER: &str = "player";
pub const ATTR_WINNER: &str = "winner";
pub const ATTR_PAYMENT: &str = "payment";

/// Event type as it appears on chain for a custom contract event.
pub fn wasm_event_type(name: &str) -> String {
    format!("wasm-{name}")
}
