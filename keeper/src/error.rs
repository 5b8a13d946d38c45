use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Schema(#[from] cosmwasm_schema::idl::EncodeError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The chain or a contract refused the call. The reason is the
    /// contract's own error text.
    #[error("{reason}")]
    Rejected { reason: String },

    #[error("no `{event}` event in transaction receipt")]
    MissingEvent { event: String },

    #[error("event `{event}` has malformed `{key}`: {value}")]
    MalformedAttribute {
        event: String,
        key: String,
        value: String,
    },

    #[error("unknown network: {name}")]
    UnknownNetwork { name: String },

    #[error("fulfillment relay is only available on development networks, not {network}")]
    RelayOnLiveNetwork { network: String },

    #[error("missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },

    #[error("no deployment named {name}")]
    UnknownDeployment { name: String },

    #[error("no winner picked for request {request_id} after {waited_secs}s")]
    WinnerTimeout { request_id: u64, waited_secs: u64 },
}
