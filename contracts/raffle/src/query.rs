use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdError, StdResult};
use raffle_common::CheckUpkeepResponse;

use crate::execute::readiness;
use crate::state::{CONFIG, LAST_TIMESTAMP, PENDING_REQUEST, PLAYERS, RAFFLE_STATE, RECENT_WINNER};

pub fn query_check_upkeep(deps: Deps, env: Env) -> StdResult<Binary> {
    let readiness = readiness(deps, &env)?;
    to_json_binary(&CheckUpkeepResponse {
        upkeep_needed: readiness.upkeep_needed(),
        perform_data: Binary::default(),
    })
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_entrance_fee(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.entrance_fee)
}

pub fn query_interval(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.interval_seconds)
}

pub fn query_raffle_state(deps: Deps) -> StdResult<Binary> {
    let state = RAFFLE_STATE.load(deps.storage)?;
    to_json_binary(&state)
}

pub fn query_player(deps: Deps, index: u64) -> StdResult<Binary> {
    let players = PLAYERS.load(deps.storage)?;
    let player = usize::try_from(index)
        .ok()
        .and_then(|i| players.get(i))
        .ok_or_else(|| StdError::generic_err(format!("no player at index {index}")))?;
    to_json_binary(player)
}

pub fn query_number_of_players(deps: Deps) -> StdResult<Binary> {
    let players = PLAYERS.load(deps.storage)?;
    to_json_binary(&(players.len() as u64))
}

pub fn query_recent_winner(deps: Deps) -> StdResult<Binary> {
    let winner = RECENT_WINNER.may_load(deps.storage)?;
    to_json_binary(&winner)
}

pub fn query_last_timestamp(deps: Deps) -> StdResult<Binary> {
    let last = LAST_TIMESTAMP.load(deps.storage)?;
    to_json_binary(&last)
}

pub fn query_pending_request(deps: Deps) -> StdResult<Binary> {
    let pending = PENDING_REQUEST.may_load(deps.storage)?;
    to_json_binary(&pending)
}
