#![allow(deprecated)] // events().publish migration tracked separately

use common::Role;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub funding_source: Address,
    pub timestamp: u64,
}

/// Fired when a pool joins the registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool: Address,
    pub index: u32,
    pub weight: i128,
    pub total_weight: i128,
    pub timestamp: u64,
}

/// Fired when a pool leaves the registry.
///
/// `moved` is the pool that was swapped into `index`, if any.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRemovedEvent {
    pub pool: Address,
    pub index: u32,
    pub moved: Option<Address>,
    pub weight: i128,
    pub total_weight: i128,
    pub timestamp: u64,
}

/// Fired when a pool's weight changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightAdjustedEvent {
    pub pool: Address,
    pub index: u32,
    pub old_weight: i128,
    pub new_weight: i128,
    pub total_weight: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub old_rate: i128,
    pub new_rate: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingSourceSetEvent {
    pub old_source: Address,
    pub new_source: Address,
    pub timestamp: u64,
}

/// Fired for every non-zero share pushed to a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRewardedEvent {
    pub pool: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a pool's share could not be transferred and was refunded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRewardRejectedEvent {
    pub pool: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired once per settlement that moved tokens.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDistributedEvent {
    pub owed: i128,
    pub distributed: i128,
    pub refunded: i128,
    pub elapsed: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_token: Address,
    funding_source: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            funding_source,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(env: &Env, pool: Address, index: u32, weight: i128, total_weight: i128) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool.clone()),
        PoolAddedEvent {
            pool,
            index,
            weight,
            total_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_removed(
    env: &Env,
    pool: Address,
    index: u32,
    moved: Option<Address>,
    weight: i128,
    total_weight: i128,
) {
    env.events().publish(
        (symbol_short!("POOL_RM"), pool.clone()),
        PoolRemovedEvent {
            pool,
            index,
            moved,
            weight,
            total_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_weight_adjusted(
    env: &Env,
    pool: Address,
    index: u32,
    old_weight: i128,
    new_weight: i128,
    total_weight: i128,
) {
    env.events().publish(
        (symbol_short!("WGHT_SET"), pool.clone()),
        WeightAdjustedEvent {
            pool,
            index,
            old_weight,
            new_weight,
            total_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, old_rate: i128, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        RewardRateSetEvent {
            old_rate,
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_funding_source_set(env: &Env, old_source: Address, new_source: Address) {
    env.events().publish(
        (symbol_short!("FUND_SET"),),
        FundingSourceSetEvent {
            old_source,
            new_source,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_rewarded(env: &Env, pool: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("POOL_RWD"), pool.clone()),
        PoolRewardedEvent {
            pool,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_reward_rejected(env: &Env, pool: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("POOL_RJCT"), pool.clone()),
        PoolRewardRejectedEvent {
            pool,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_distributed(
    env: &Env,
    owed: i128,
    distributed: i128,
    refunded: i128,
    elapsed: u64,
) {
    env.events().publish(
        (symbol_short!("DIST"),),
        RewardsDistributedEvent {
            owed,
            distributed,
            refunded,
            elapsed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVKD"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}
