//! Weight registry: a dense, index-addressed arena of pool entries.
//!
//! Entries live under `(POOL, index)` for `index in 0..count`, with a
//! `(POOL_ADD, pool)` flag mirroring membership. Removal swaps the tail entry
//! into the vacated slot and shrinks `count`, so it is O(1) but reorders:
//! the pool formerly at the tail now occupies the removed index. Callers
//! removing several pools by index must account for that.
//!
//! The running `TOT_WGHT` total is adjusted on every mutation and never
//! recomputed by scanning.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_ADDED: Symbol = symbol_short!("POOL_ADD");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGHT");

/// A registered pool and its 18-decimal weight.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolEntry {
    pub pool: Address,
    pub weight: i128,
}

fn entry_key(index: u32) -> (Symbol, u32) {
    (POOL, index)
}

fn added_key(pool: &Address) -> (Symbol, Address) {
    (POOL_ADDED, pool.clone())
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn total_weight(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn is_added(env: &Env, pool: &Address) -> bool {
    let key = added_key(pool);
    let added = env.storage().persistent().has(&key);
    if added {
        ttl::extend_persistent(env, &key);
    }
    added
}

pub fn get(env: &Env, index: u32) -> Option<PoolEntry> {
    if index >= count(env) {
        return None;
    }
    let key = entry_key(index);
    let entry: Option<PoolEntry> = env.storage().persistent().get(&key);
    if entry.is_some() {
        ttl::extend_persistent(env, &key);
    }
    entry
}

/// Snapshot of the whole registry in current index order.
pub fn all(env: &Env) -> Vec<PoolEntry> {
    let mut entries = Vec::new(env);
    for index in 0..count(env) {
        if let Some(entry) = get(env, index) {
            entries.push_back(entry);
        }
    }
    entries
}

// ── Writes ───────────────────────────────────────────────────────────────────

fn store(env: &Env, index: u32, entry: &PoolEntry) {
    let key = entry_key(index);
    env.storage().persistent().set(&key, entry);
    ttl::extend_persistent(env, &key);
}

fn set_count(env: &Env, count: u32) {
    env.storage().instance().set(&POOL_COUNT, &count);
}

fn set_total_weight(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_WEIGHT, &total);
}

/// Appends `pool` at the tail. Returns the index it was stored at.
pub fn push(env: &Env, pool: &Address, weight: i128) -> Result<u32, ContractError> {
    if is_added(env, pool) {
        return Err(ContractError::AlreadyRegistered);
    }

    let total = total_weight(env)
        .checked_add(weight)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let index = count(env);

    store(
        env,
        index,
        &PoolEntry {
            pool: pool.clone(),
            weight,
        },
    );
    let flag = added_key(pool);
    env.storage().persistent().set(&flag, &true);
    ttl::extend_persistent(env, &flag);

    set_count(env, index + 1);
    set_total_weight(env, total);

    Ok(index)
}

/// Removes the entry at `index` by moving the tail entry into its slot.
///
/// Removing the tail itself only truncates, leaving every other index intact.
pub fn swap_remove(env: &Env, index: u32) -> Result<PoolEntry, ContractError> {
    let removed = get(env, index).ok_or(ContractError::IndexOutOfRange)?;
    let total = total_weight(env)
        .checked_sub(removed.weight)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let last = count(env) - 1;

    if index != last {
        let tail = get(env, last).ok_or(ContractError::IndexOutOfRange)?;
        store(env, index, &tail);
    }
    env.storage().persistent().remove(&entry_key(last));
    env.storage().persistent().remove(&added_key(&removed.pool));

    set_count(env, last);
    set_total_weight(env, total);

    Ok(removed)
}

/// Replaces the weight at `index`. Returns the previous weight.
pub fn set_weight(env: &Env, index: u32, weight: i128) -> Result<i128, ContractError> {
    let mut entry = get(env, index).ok_or(ContractError::IndexOutOfRange)?;
    let previous = entry.weight;

    let total = total_weight(env)
        .checked_sub(previous)
        .and_then(|t| t.checked_add(weight))
        .ok_or(ContractError::ArithmeticOverflow)?;

    entry.weight = weight;
    store(env, index, &entry);
    set_total_weight(env, total);

    Ok(previous)
}
