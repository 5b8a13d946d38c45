#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult};
use cw2::set_contract_version;
use raffle_common::RaffleState;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{
    RaffleConfig, CONFIG, LAST_TIMESTAMP, PLAYERS, RAFFLE_STATE, REQUEST_RANDOMNESS_REPLY_ID,
};

const CONTRACT_NAME: &str = "crates.io:raffle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Decode and validate gas lane
    let key_hash_bytes = hex::decode(&msg.key_hash).map_err(|_| ContractError::InvalidHex {
        field: "key_hash".to_string(),
    })?;
    if key_hash_bytes.len() != 32 {
        return Err(ContractError::InvalidKeyHashLength {
            got: key_hash_bytes.len(),
        });
    }

    if msg.interval_seconds == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "interval must be positive".to_string(),
        });
    }
    if msg.entrance_fee.amount.is_zero() {
        return Err(ContractError::InvalidConfig {
            reason: "entrance fee must be positive".to_string(),
        });
    }

    let config = RaffleConfig {
        vrf_coordinator: deps.api.addr_validate(&msg.vrf_coordinator)?,
        entrance_fee: msg.entrance_fee,
        interval_seconds: msg.interval_seconds,
        key_hash: msg.key_hash,
        subscription_id: msg.subscription_id,
        callback_gas_limit: msg.callback_gas_limit,
    };

    CONFIG.save(deps.storage, &config)?;
    RAFFLE_STATE.save(deps.storage, &RaffleState::Open)?;
    PLAYERS.save(deps.storage, &vec![])?;
    LAST_TIMESTAMP.save(deps.storage, &env.block.time)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle")
        .add_attribute("entrance_fee", config.entrance_fee.to_string())
        .add_attribute("interval_seconds", config.interval_seconds.to_string())
        .add_attribute("owner", info.sender.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Enter {} => execute::enter(deps, env, info),
        ExecuteMsg::PerformUpkeep { perform_data } => {
            execute::perform_upkeep(deps, env, info, perform_data)
        }
        ExecuteMsg::RawFulfillRandomWords {
            request_id,
            random_words,
        } => execute::fulfill_random_words(deps, env, info, request_id, random_words),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REQUEST_RANDOMNESS_REPLY_ID => execute::handle_request_reply(deps, env, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::CheckUpkeep { check_data: _ } => query::query_check_upkeep(deps, env),
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::EntranceFee {} => query::query_entrance_fee(deps),
        QueryMsg::Interval {} => query::query_interval(deps),
        QueryMsg::RaffleState {} => query::query_raffle_state(deps),
        QueryMsg::Player { index } => query::query_player(deps, index),
        QueryMsg::NumberOfPlayers {} => query::query_number_of_players(deps),
        QueryMsg::RecentWinner {} => query::query_recent_winner(deps),
        QueryMsg::LastTimestamp {} => query::query_last_timestamp(deps),
        QueryMsg::PendingRequest {} => query::query_pending_request(deps),
    }
}
