#![no_std]

pub mod distribution;
pub mod events;
pub mod registry;

use common::{access, ttl};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

pub use common::Role;
pub use registry::PoolEntry;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const FUNDING_SOURCE: Symbol = symbol_short!("FUND_SRC");
const REWARD_PER_SECOND: Symbol = symbol_short!("RWD_RATE");
const LAST_DISTRIBUTION: Symbol = symbol_short!("LAST_DST");

/// Roles allowed to trigger a distribution.
const DISTRIBUTOR_ROLES: [Role; 2] = [Role::Governance, Role::RewardDistributor];

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    PermissionDenied = 3,
    AlreadyRegistered = 4,
    IndexOutOfRange = 5,
    InvalidInput = 6,
    InsufficientAllowance = 7,
    ArithmeticOverflow = 8,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Outcome of a single settlement, returned by `distribute_rewards`.
///
/// `owed == distributed + refunded` always holds. `refunded` is the rounding
/// loss plus `rejected`, the shares of pools whose transfer failed; the
/// rounding part (`refunded - rejected`) is strictly less than the number of
/// registered pools.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DistributionSummary {
    pub owed: i128,
    pub distributed: i128,
    pub rejected: i128,
    pub refunded: i128,
    pub elapsed: u64,
    pub timestamp: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingManagerContract;

#[contractimpl]
impl StakingManagerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin`          – receives the `Governance` role.
    /// * `reward_token`   – token contract rewards are paid in.
    /// * `funding_source` – account that pre-approves this contract to pull
    ///                      rewards and receives rounding remainders back.
    ///
    /// The emission rate starts at zero and the accrual clock at "now".
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        funding_source: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        let now = env.ledger().timestamp();

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&FUNDING_SOURCE, &funding_source);
        env.storage().instance().set(&REWARD_PER_SECOND, &0i128);
        env.storage().instance().set(&LAST_DISTRIBUTION, &now);
        // POOL_CNT and TOT_WGHT start at zero; the registry reads absent
        // keys as zero.
        ttl::extend_instance(&env);

        access::grant_role(&env, Role::Governance, &admin);

        events::publish_initialized(&env, admin, reward_token, funding_source);

        Ok(())
    }

    // ── Registry mutation ───────────────────────────────────────────────────

    /// Register `pool` with `weight`.
    ///
    /// Rewards accrued so far are settled under the current weights first,
    /// so the new pool never shares in past emission.
    pub fn add_pool(
        env: Env,
        caller: Address,
        pool: Address,
        weight: i128,
    ) -> Result<u32, ContractError> {
        Self::require_role(&env, &caller, Role::Governance)?;

        if weight < 0 {
            return Err(ContractError::InvalidInput);
        }
        if registry::is_added(&env, &pool) {
            return Err(ContractError::AlreadyRegistered);
        }

        Self::settle(&env)?;

        let index = registry::push(&env, &pool, weight)?;

        events::publish_pool_added(&env, pool, index, weight, registry::total_weight(&env));

        Ok(index)
    }

    /// Remove the pool at `index`.
    ///
    /// The last entry is moved into `index` unless `index` already is the
    /// last entry. Callers removing several pools should always remove at
    /// index 0 or always remove the tail.
    pub fn remove_pool(env: Env, caller: Address, index: u32) -> Result<PoolEntry, ContractError> {
        Self::require_role(&env, &caller, Role::Governance)?;

        if index >= registry::count(&env) {
            return Err(ContractError::IndexOutOfRange);
        }

        Self::settle(&env)?;

        let removed = registry::swap_remove(&env, index)?;
        let moved = registry::get(&env, index).map(|entry| entry.pool);

        events::publish_pool_removed(
            &env,
            removed.pool.clone(),
            index,
            moved,
            removed.weight,
            registry::total_weight(&env),
        );

        Ok(removed)
    }

    /// Set the weight of the pool at `index`.
    ///
    /// Elapsed time is settled at the old weight before the change. A zero
    /// weight keeps the pool registered but pays it nothing.
    pub fn adjust_weight(
        env: Env,
        caller: Address,
        index: u32,
        weight: i128,
    ) -> Result<(), ContractError> {
        Self::require_role(&env, &caller, Role::Governance)?;

        if weight < 0 {
            return Err(ContractError::InvalidInput);
        }
        if index >= registry::count(&env) {
            return Err(ContractError::IndexOutOfRange);
        }

        Self::settle(&env)?;

        let old_weight = registry::set_weight(&env, index, weight)?;
        let pool = registry::get(&env, index)
            .ok_or(ContractError::IndexOutOfRange)?
            .pool;

        events::publish_weight_adjusted(
            &env,
            pool,
            index,
            old_weight,
            weight,
            registry::total_weight(&env),
        );

        Ok(())
    }

    // ── Configuration ────────────────────────────────────────────────────────

    /// Update the emission rate (18-decimal tokens per second).
    ///
    /// Elapsed time is settled at the old rate before the change. Rates above
    /// `MAX_REWARD_PER_SECOND` are rejected so that settlement cannot
    /// overflow for any window up to `u32::MAX` seconds.
    pub fn set_reward_per_second(
        env: Env,
        caller: Address,
        rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_role(&env, &caller, Role::Governance)?;

        if !(0..=distribution::MAX_REWARD_PER_SECOND).contains(&rate) {
            return Err(ContractError::InvalidInput);
        }

        Self::settle(&env)?;

        let old_rate = Self::get_reward_per_second(env.clone());
        env.storage().instance().set(&REWARD_PER_SECOND, &rate);

        events::publish_reward_rate_set(&env, old_rate, rate);

        Ok(())
    }

    /// Point the contract at a new funding source.
    ///
    /// The window accrued so far is still pulled from the old source.
    pub fn set_funding_source(
        env: Env,
        caller: Address,
        source: Address,
    ) -> Result<(), ContractError> {
        Self::require_role(&env, &caller, Role::Governance)?;

        Self::settle(&env)?;

        let old_source = Self::get_funding_source(env.clone())?;
        env.storage().instance().set(&FUNDING_SOURCE, &source);

        events::publish_funding_source_set(&env, old_source, source);

        Ok(())
    }

    // ── Distribution ─────────────────────────────────────────────────────────

    /// Settle all rewards accrued since the last distribution.
    ///
    /// Callable by `Governance` or `RewardDistributor`. Fails as a whole,
    /// clock included, if the funding source has not approved enough.
    pub fn distribute_rewards(
        env: Env,
        caller: Address,
    ) -> Result<DistributionSummary, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !access::has_any_role(&env, &DISTRIBUTOR_ROLES, &caller) {
            return Err(ContractError::PermissionDenied);
        }

        Self::settle(&env)
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Grant `role` to `account`. Governance only; granting a held role is a
    /// no-op.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_role(&env, &caller, Role::Governance)?;

        if access::grant_role(&env, role, &account) {
            events::publish_role_granted(&env, role, account, caller);
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Governance only.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_role(&env, &caller, Role::Governance)?;

        if access::revoke_role(&env, role, &account) {
            events::publish_role_revoked(&env, role, account, caller);
        }
        Ok(())
    }

    /// Drop a role the caller holds.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        if access::revoke_role(&env, role, &account) {
            events::publish_role_revoked(&env, role, account.clone(), account);
        }
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Snapshot of every registered pool in current index order.
    pub fn get_pools(env: Env) -> Vec<PoolEntry> {
        registry::all(&env)
    }

    pub fn get_pool(env: Env, index: u32) -> Result<PoolEntry, ContractError> {
        registry::get(&env, index).ok_or(ContractError::IndexOutOfRange)
    }

    pub fn pool_count(env: Env) -> u32 {
        registry::count(&env)
    }

    pub fn is_pool_added(env: Env, pool: Address) -> bool {
        registry::is_added(&env, &pool)
    }

    /// Sum of all registered weights.
    pub fn get_total_weight(env: Env) -> i128 {
        registry::total_weight(&env)
    }

    pub fn get_last_distribution(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&LAST_DISTRIBUTION)
            .unwrap_or(0)
    }

    pub fn get_reward_per_second(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&REWARD_PER_SECOND)
            .unwrap_or(0)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_funding_source(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&FUNDING_SOURCE)
            .ok_or(ContractError::NotInitialized)
    }

    /// Amount a settlement at the current timestamp would pull.
    ///
    /// Zero while no weight is registered, matching what
    /// `distribute_rewards` would actually move.
    pub fn pending_rewards(env: Env) -> Result<i128, ContractError> {
        if registry::total_weight(&env) <= 0 {
            return Ok(0);
        }
        let elapsed = env
            .ledger()
            .timestamp()
            .saturating_sub(Self::get_last_distribution(env.clone()));
        distribution::owed(Self::get_reward_per_second(env), elapsed)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        access::has_role(&env, role, &account)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        access::role_members(&env, role)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and require it to hold `role`.
    fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !access::has_role(env, role, caller) {
            return Err(ContractError::PermissionDenied);
        }
        Ok(())
    }

    /// Pay out everything accrued since `LAST_DST` under the weights and rate
    /// currently in storage, then move the clock to now.
    ///
    /// Every mutating entry point calls this before touching the registry or
    /// the rate. The clock is advanced even when nothing is owed so that no
    /// window is ever priced twice.
    fn settle(env: &Env) -> Result<DistributionSummary, ContractError> {
        ttl::extend_instance(env);

        let now = env.ledger().timestamp();
        let last: u64 = env
            .storage()
            .instance()
            .get(&LAST_DISTRIBUTION)
            .unwrap_or(now);
        let elapsed = now.saturating_sub(last);

        // Never move the clock backwards.
        env.storage()
            .instance()
            .set(&LAST_DISTRIBUTION, &now.max(last));

        let mut summary = DistributionSummary {
            elapsed,
            timestamp: now.max(last),
            ..Default::default()
        };
        if elapsed == 0 {
            return Ok(summary);
        }

        let rate: i128 = env
            .storage()
            .instance()
            .get(&REWARD_PER_SECOND)
            .unwrap_or(0);
        let owed = distribution::owed(rate, elapsed).ok_or(ContractError::ArithmeticOverflow)?;
        let total_weight = registry::total_weight(env);
        if owed == 0 || total_weight <= 0 {
            return Ok(summary);
        }

        let reward_token: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let funding_source: Address = env
            .storage()
            .instance()
            .get(&FUNDING_SOURCE)
            .ok_or(ContractError::NotInitialized)?;
        let this = env.current_contract_address();
        let token = token::Client::new(env, &reward_token);

        // 1. Pull the whole window into custody.
        if token.allowance(&funding_source, &this) < owed {
            return Err(ContractError::InsufficientAllowance);
        }
        token.transfer_from(&this, &funding_source, &this, &owed);

        // 2. Push each pool its truncated pro-rata share. A pool that cannot
        //    receive is skipped and its share joins the refund.
        let mut distributed: i128 = 0;
        let mut rejected: i128 = 0;
        for entry in registry::all(env).iter() {
            let amount = distribution::share(env, owed, entry.weight, total_weight)
                .ok_or(ContractError::ArithmeticOverflow)?;
            if amount <= 0 {
                continue;
            }
            match token.try_transfer(&this, &entry.pool, &amount) {
                Ok(Ok(())) => {
                    distributed = distributed.saturating_add(amount);
                    events::publish_pool_rewarded(env, entry.pool, amount);
                }
                _ => {
                    rejected = rejected.saturating_add(amount);
                    events::publish_pool_reward_rejected(env, entry.pool, amount);
                }
            }
        }

        // 3. Hand the remainder back so no balance is retained.
        let refunded = distribution::remainder(owed, distributed);
        if refunded > 0 {
            token.transfer(&this, &funding_source, &refunded);
        }

        events::publish_rewards_distributed(env, owed, distributed, refunded, elapsed);

        summary.owed = owed;
        summary.distributed = distributed;
        summary.rejected = rejected;
        summary.refunded = refunded;
        Ok(summary)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_access;
