use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

/// Lifecycle of a raffle round. Entries are only accepted while `Open`;
/// `Calculating` covers the window between an upkeep and its randomness
/// fulfillment.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum RaffleState {
    Open,
    Calculating,
}

impl RaffleState {
    /// Numeric code of the state (0 = open, 1 = calculating).
    pub fn code(&self) -> u8 {
        match self {
            RaffleState::Open => 0,
            RaffleState::Calculating => 1,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, RaffleState::Open)
    }
}

impl std::fmt::Display for RaffleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaffleState::Open => write!(f, "open"),
            RaffleState::Calculating => write!(f, "calculating"),
        }
    }
}

/// Result of the upkeep check.
#[cw_serde]
pub struct CheckUpkeepResponse {
    pub upkeep_needed: bool,
    /// Opaque data the contract wants echoed back into `PerformUpkeep`.
    pub perform_data: Binary,
}
