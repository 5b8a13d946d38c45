use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, Coin, Deps, DepsMut, Env, Event, MessageInfo, Reply,
    Response, StdError, StdResult, SubMsg, Uint128, WasmMsg,
};
use raffle_common::events::{
    ATTR_PLAYER, ATTR_REQUEST_ID, ATTR_WINNER, RAFFLE_ENTER, RANDOM_WORDS_REQUESTED,
    REQUESTED_RAFFLE_WINNER, WINNER_PICKED,
};
use raffle_common::{wasm_event_type, CoordinatorExecuteMsg, RaffleState};

use crate::error::ContractError;
use crate::state::{
    CONFIG, LAST_TIMESTAMP, NUM_WORDS, PENDING_REQUEST, PLAYERS, RAFFLE_STATE, RECENT_WINNER,
    REQUEST_CONFIRMATIONS, REQUEST_RANDOMNESS_REPLY_ID,
};

/// The four conditions that must all hold for upkeep to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub time_passed: bool,
    pub is_open: bool,
    pub balance: Uint128,
    pub players: u64,
    pub state: RaffleState,
}

impl Readiness {
    pub fn upkeep_needed(&self) -> bool {
        self.time_passed && self.is_open && !self.balance.is_zero() && self.players > 0
    }
}

/// Evaluate upkeep readiness against the current block.
pub fn readiness(deps: Deps, env: &Env) -> StdResult<Readiness> {
    let config = CONFIG.load(deps.storage)?;
    let state = RAFFLE_STATE.load(deps.storage)?;
    let last_timestamp = LAST_TIMESTAMP.load(deps.storage)?;
    let players = PLAYERS.load(deps.storage)?.len() as u64;
    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.entrance_fee.denom)?
        .amount;

    let elapsed = env.block.time.seconds().saturating_sub(last_timestamp.seconds());

    Ok(Readiness {
        time_passed: elapsed > config.interval_seconds,
        is_open: state.is_open(),
        balance,
        players,
        state,
    })
}

/// Enter the current round.
pub fn enter(deps: DepsMut, _env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let sent = info
        .funds
        .iter()
        .find(|c| c.denom == config.entrance_fee.denom)
        .map(|c| c.amount)
        .unwrap_or(Uint128::zero());

    if sent < config.entrance_fee.amount {
        return Err(ContractError::NotEnoughFundsEntered {
            required: config.entrance_fee.to_string(),
            sent: Coin::new(sent, config.entrance_fee.denom.clone()).to_string(),
        });
    }

    if !RAFFLE_STATE.load(deps.storage)?.is_open() {
        return Err(ContractError::RaffleNotOpen);
    }

    let mut players = PLAYERS.load(deps.storage)?;
    players.push(info.sender.clone());
    PLAYERS.save(deps.storage, &players)?;

    Ok(Response::new()
        .add_attribute("action", "enter")
        .add_attribute(ATTR_PLAYER, info.sender.to_string())
        .add_event(
            Event::new(RAFFLE_ENTER)
                .add_attribute(ATTR_PLAYER, info.sender.to_string())
                .add_attribute("amount", sent.to_string())
                .add_attribute("players", players.len().to_string()),
        ))
}

/// Close the round and ask the coordinator for randomness.
///
/// The request id is only known once the coordinator answers, so it is
/// picked up in [`handle_request_reply`].
pub fn perform_upkeep(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    _perform_data: Binary,
) -> Result<Response, ContractError> {
    let readiness = readiness(deps.as_ref(), &env)?;
    if !readiness.upkeep_needed() {
        return Err(ContractError::UpkeepNotNeeded {
            balance: readiness.balance.to_string(),
            players: readiness.players,
            state: readiness.state.code(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    RAFFLE_STATE.save(deps.storage, &RaffleState::Calculating)?;

    let request = WasmMsg::Execute {
        contract_addr: config.vrf_coordinator.to_string(),
        msg: to_json_binary(&CoordinatorExecuteMsg::RequestRandomWords {
            key_hash: config.key_hash,
            subscription_id: config.subscription_id,
            request_confirmations: REQUEST_CONFIRMATIONS,
            callback_gas_limit: config.callback_gas_limit,
            num_words: NUM_WORDS,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(
            request,
            REQUEST_RANDOMNESS_REPLY_ID,
        ))
        .add_attribute("action", "perform_upkeep")
        .add_attribute("players", readiness.players.to_string()))
}

/// Record the request id assigned by the coordinator.
///
/// The id is read from the coordinator's `random_words_requested` event by
/// name, never by position in the event list.
pub fn handle_request_reply(
    deps: DepsMut,
    _env: Env,
    msg: Reply,
) -> Result<Response, ContractError> {
    let response = msg.result.into_result().map_err(StdError::generic_err)?;

    let wasm_type = wasm_event_type(RANDOM_WORDS_REQUESTED);
    let request_id = response
        .events
        .iter()
        .filter(|e| e.ty == wasm_type || e.ty == RANDOM_WORDS_REQUESTED)
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == ATTR_REQUEST_ID)
        .ok_or(ContractError::MissingRequestId)?
        .value
        .parse::<u64>()
        .map_err(|_| ContractError::MissingRequestId)?;

    PENDING_REQUEST.save(deps.storage, &request_id)?;

    Ok(Response::new()
        .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
        .add_event(
            Event::new(REQUESTED_RAFFLE_WINNER)
                .add_attribute(ATTR_REQUEST_ID, request_id.to_string()),
        ))
}

/// Randomness callback: pick the winner, pay out, reopen.
pub fn fulfill_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    random_words: Vec<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.vrf_coordinator {
        return Err(ContractError::OnlyCoordinatorCanFulfill {
            have: info.sender.to_string(),
            want: config.vrf_coordinator.to_string(),
        });
    }

    match PENDING_REQUEST.may_load(deps.storage)? {
        Some(pending) if pending == request_id => {}
        _ => return Err(ContractError::UnknownRequest { request_id }),
    }

    let word = random_words.first().ok_or(ContractError::NoRandomWords)?;
    let players = PLAYERS.load(deps.storage)?;
    if players.is_empty() {
        return Err(ContractError::NoPlayers);
    }

    let index = (word.u128() % players.len() as u128) as usize;
    let winner = players[index].clone();

    // Whole pot goes to the winner
    let prize = deps
        .querier
        .query_balance(&env.contract.address, &config.entrance_fee.denom)?;

    RAFFLE_STATE.save(deps.storage, &RaffleState::Open)?;
    PLAYERS.save(deps.storage, &vec![])?;
    LAST_TIMESTAMP.save(deps.storage, &env.block.time)?;
    RECENT_WINNER.save(deps.storage, &winner)?;
    PENDING_REQUEST.remove(deps.storage);

    let mut response = Response::new()
        .add_attribute("action", "fulfill_random_words")
        .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
        .add_attribute(ATTR_WINNER, winner.to_string())
        .add_event(
            Event::new(WINNER_PICKED)
                .add_attribute(ATTR_WINNER, winner.to_string())
                .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
                .add_attribute("prize", prize.to_string()),
        );

    if !prize.amount.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: winner.to_string(),
            amount: vec![prize],
        });
    }

    Ok(response)
}
