pub mod events;
pub mod types;
pub mod vrf;

pub use events::wasm_event_type;
pub use types::{CheckUpkeepResponse, RaffleState};
pub use vrf::{CoordinatorExecuteMsg, VrfConsumerExecuteMsg};
