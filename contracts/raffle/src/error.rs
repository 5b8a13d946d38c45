use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("not enough funds entered: need {required}, sent {sent}")]
    NotEnoughFundsEntered { required: String, sent: String },

    #[error("raffle not open")]
    RaffleNotOpen,

    #[error("upkeep not needed: balance {balance}, players {players}, state {state}")]
    UpkeepNotNeeded {
        balance: String,
        players: u64,
        state: u8,
    },

    #[error("only coordinator can fulfill: have {have}, want {want}")]
    OnlyCoordinatorCanFulfill { have: String, want: String },

    #[error("unknown randomness request {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("fulfillment carried no random words")]
    NoRandomWords,

    #[error("no players to pick a winner from")]
    NoPlayers,

    #[error("coordinator reply carried no request id")]
    MissingRequestId,

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("invalid key hash length: expected 32 bytes, got {got}")]
    InvalidKeyHashLength { got: usize },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
