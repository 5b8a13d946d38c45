use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid subscription {subscription_id}")]
    InvalidSubscription { subscription_id: u64 },

    #[error("invalid consumer {consumer} for subscription {subscription_id}")]
    InvalidConsumer {
        subscription_id: u64,
        consumer: String,
    },

    #[error("num words must be at least 1")]
    NoWordsRequested,

    #[error("num words too big: requested {requested}, max {max}")]
    NumWordsTooBig { requested: u32, max: u32 },

    #[error("nonexistent request")]
    NonexistentRequest { request_id: u64 },

    #[error("consumer mismatch for request {request_id}: expected {expected}, got {got}")]
    ConsumerMismatch {
        request_id: u64,
        expected: String,
        got: String,
    },

    #[error("invalid random words: expected {expected}, got {got}")]
    InvalidRandomWords { expected: u32, got: usize },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: String, available: String },
}
