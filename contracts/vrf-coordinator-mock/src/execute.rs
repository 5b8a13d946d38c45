use cosmwasm_std::{
    to_json_binary, Addr, DepsMut, Env, Event, MessageInfo, Response, Storage, Uint128, WasmMsg,
};
use raffle_common::events::{
    ATTR_CONSUMER, ATTR_PAYMENT, ATTR_REQUEST_ID, ATTR_SUBSCRIPTION_ID, RANDOM_WORDS_FULFILLED,
    RANDOM_WORDS_REQUESTED, SUBSCRIPTION_CREATED,
};
use raffle_common::vrf::VrfConsumerExecuteMsg;

use crate::error::ContractError;
use crate::state::{
    PendingRequest, Subscription, CONFIG, MAX_NUM_WORDS, NEXT_REQUEST_ID, NEXT_SUBSCRIPTION_ID,
    REQUESTS, SUBSCRIPTIONS,
};
use crate::words::derive_words;

/// Open a new subscription owned by the sender.
pub fn create_subscription(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let subscription_id = NEXT_SUBSCRIPTION_ID.load(deps.storage)?;
    NEXT_SUBSCRIPTION_ID.save(deps.storage, &(subscription_id + 1))?;

    let subscription = Subscription {
        id: subscription_id,
        owner: info.sender.clone(),
        balance: Uint128::zero(),
        consumers: vec![],
    };
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "create_subscription")
        .add_attribute(ATTR_SUBSCRIPTION_ID, subscription_id.to_string())
        .add_event(
            Event::new(SUBSCRIPTION_CREATED)
                .add_attribute(ATTR_SUBSCRIPTION_ID, subscription_id.to_string())
                .add_attribute("owner", info.sender.to_string()),
        )
        .set_data(to_json_binary(&subscription_id)?))
}

/// Top up a subscription. The mock does not move tokens, it only books the amount.
pub fn fund_subscription(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    subscription_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let mut subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::InvalidSubscription { subscription_id })?;

    subscription.balance = subscription.balance.checked_add(amount)?;
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "fund_subscription")
        .add_attribute(ATTR_SUBSCRIPTION_ID, subscription_id.to_string())
        .add_attribute("new_balance", subscription.balance.to_string()))
}

/// Register a consumer on a subscription. Owner only.
pub fn add_consumer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    consumer: String,
) -> Result<Response, ContractError> {
    let mut subscription = load_owned_subscription(deps.storage, &info.sender, subscription_id)?;
    let consumer = deps.api.addr_validate(&consumer)?;

    if !subscription.consumers.contains(&consumer) {
        subscription.consumers.push(consumer.clone());
    }
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "add_consumer")
        .add_attribute(ATTR_SUBSCRIPTION_ID, subscription_id.to_string())
        .add_attribute(ATTR_CONSUMER, consumer.to_string()))
}

/// Remove a consumer from a subscription. Owner only.
pub fn remove_consumer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    consumer: String,
) -> Result<Response, ContractError> {
    let mut subscription = load_owned_subscription(deps.storage, &info.sender, subscription_id)?;
    let consumer = deps.api.addr_validate(&consumer)?;

    if !subscription.consumers.contains(&consumer) {
        return Err(ContractError::InvalidConsumer {
            subscription_id,
            consumer: consumer.to_string(),
        });
    }
    subscription.consumers.retain(|c| *c != consumer);
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "remove_consumer")
        .add_attribute(ATTR_SUBSCRIPTION_ID, subscription_id.to_string())
        .add_attribute(ATTR_CONSUMER, consumer.to_string()))
}

/// Record a randomness request from a registered consumer.
/// The assigned request id is emitted in `random_words_requested` and
/// returned as the response data.
pub fn request_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    subscription_id: u64,
    request_confirmations: u16,
    callback_gas_limit: u32,
    num_words: u32,
) -> Result<Response, ContractError> {
    let subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::InvalidSubscription { subscription_id })?;

    if !subscription.consumers.contains(&info.sender) {
        return Err(ContractError::InvalidConsumer {
            subscription_id,
            consumer: info.sender.to_string(),
        });
    }

    if num_words == 0 {
        return Err(ContractError::NoWordsRequested);
    }
    if num_words > MAX_NUM_WORDS {
        return Err(ContractError::NumWordsTooBig {
            requested: num_words,
            max: MAX_NUM_WORDS,
        });
    }

    let request_id = NEXT_REQUEST_ID.load(deps.storage)?;
    NEXT_REQUEST_ID.save(deps.storage, &(request_id + 1))?;

    let request = PendingRequest {
        request_id,
        subscription_id,
        consumer: info.sender.clone(),
        num_words,
        callback_gas_limit,
        request_confirmations,
        requested_at_height: env.block.height,
    };
    REQUESTS.save(deps.storage, request_id, &request)?;

    Ok(Response::new()
        .add_attribute("action", "request_random_words")
        .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
        .add_event(
            Event::new(RANDOM_WORDS_REQUESTED)
                .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
                .add_attribute(ATTR_SUBSCRIPTION_ID, subscription_id.to_string())
                .add_attribute(ATTR_CONSUMER, info.sender.to_string())
                .add_attribute("num_words", num_words.to_string()),
        )
        .set_data(to_json_binary(&request_id)?))
}

/// Fulfill a pending request and call back the consumer.
///
/// A request can be fulfilled once: it is removed before the callback is
/// dispatched, so a repeated call fails with `nonexistent request`.
pub fn fulfill_random_words(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    request_id: u64,
    consumer: String,
    words_override: Option<Vec<Uint128>>,
) -> Result<Response, ContractError> {
    let request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::NonexistentRequest { request_id })?;

    let consumer = deps.api.addr_validate(&consumer)?;
    if consumer != request.consumer {
        return Err(ContractError::ConsumerMismatch {
            request_id,
            expected: request.consumer.to_string(),
            got: consumer.to_string(),
        });
    }

    let random_words = match words_override {
        Some(words) => {
            if words.len() != request.num_words as usize {
                return Err(ContractError::InvalidRandomWords {
                    expected: request.num_words,
                    got: words.len(),
                });
            }
            words
        }
        None => derive_words(request_id, request.num_words),
    };

    // Charge the subscription
    let config = CONFIG.load(deps.storage)?;
    let payment = config
        .gas_price_link
        .checked_mul(Uint128::from(request.callback_gas_limit))?
        .checked_add(config.base_fee)?;

    let mut subscription = SUBSCRIPTIONS
        .may_load(deps.storage, request.subscription_id)?
        .ok_or(ContractError::InvalidSubscription {
            subscription_id: request.subscription_id,
        })?;
    if subscription.balance < payment {
        return Err(ContractError::InsufficientBalance {
            needed: payment.to_string(),
            available: subscription.balance.to_string(),
        });
    }
    subscription.balance -= payment;
    SUBSCRIPTIONS.save(deps.storage, request.subscription_id, &subscription)?;

    REQUESTS.remove(deps.storage, request_id);

    let callback = WasmMsg::Execute {
        contract_addr: consumer.to_string(),
        msg: to_json_binary(&VrfConsumerExecuteMsg::RawFulfillRandomWords {
            request_id,
            random_words,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback)
        .add_attribute("action", "fulfill_random_words")
        .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
        .add_event(
            Event::new(RANDOM_WORDS_FULFILLED)
                .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
                .add_attribute(ATTR_CONSUMER, consumer.to_string())
                .add_attribute(ATTR_PAYMENT, payment.to_string()),
        ))
}

fn load_owned_subscription(
    storage: &dyn Storage,
    sender: &Addr,
    subscription_id: u64,
) -> Result<Subscription, ContractError> {
    let subscription = SUBSCRIPTIONS
        .may_load(storage, subscription_id)?
        .ok_or(ContractError::InvalidSubscription { subscription_id })?;

    if subscription.owner != *sender {
        return Err(ContractError::Unauthorized {
            reason: "only the subscription owner can manage consumers".to_string(),
        });
    }
    Ok(subscription)
}
