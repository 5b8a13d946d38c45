#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{CoordinatorConfig, CONFIG, NEXT_REQUEST_ID, NEXT_SUBSCRIPTION_ID};

const CONTRACT_NAME: &str = "crates.io:vrf-coordinator-mock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = CoordinatorConfig {
        base_fee: msg.base_fee,
        gas_price_link: msg.gas_price_link,
    };

    CONFIG.save(deps.storage, &config)?;
    // Ids start at 1 so that 0 is never a valid request
    NEXT_SUBSCRIPTION_ID.save(deps.storage, &1u64)?;
    NEXT_REQUEST_ID.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "vrf-coordinator-mock")
        .add_attribute("base_fee", msg.base_fee.to_string())
        .add_attribute("gas_price_link", msg.gas_price_link.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateSubscription {} => execute::create_subscription(deps, env, info),
        ExecuteMsg::FundSubscription {
            subscription_id,
            amount,
        } => execute::fund_subscription(deps, env, info, subscription_id, amount),
        ExecuteMsg::AddConsumer {
            subscription_id,
            consumer,
        } => execute::add_consumer(deps, env, info, subscription_id, consumer),
        ExecuteMsg::RemoveConsumer {
            subscription_id,
            consumer,
        } => execute::remove_consumer(deps, env, info, subscription_id, consumer),
        ExecuteMsg::RequestRandomWords {
            key_hash: _,
            subscription_id,
            request_confirmations,
            callback_gas_limit,
            num_words,
        } => execute::request_random_words(
            deps,
            env,
            info,
            subscription_id,
            request_confirmations,
            callback_gas_limit,
            num_words,
        ),
        ExecuteMsg::FulfillRandomWords {
            request_id,
            consumer,
        } => execute::fulfill_random_words(deps, env, info, request_id, consumer, None),
        ExecuteMsg::FulfillRandomWordsWithOverride {
            request_id,
            consumer,
            words,
        } => execute::fulfill_random_words(deps, env, info, request_id, consumer, Some(words)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Subscription { subscription_id } => {
            query::query_subscription(deps, subscription_id)
        }
        QueryMsg::Request { request_id } => query::query_request(deps, request_id),
        QueryMsg::NextRequestId {} => query::query_next_request_id(deps),
    }
}
