use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ttl;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_MEMBERS: Symbol = symbol_short!("ROLE_LST");

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Permission classes understood by the staking manager.
///
/// - `Governance`        – Manages the pool registry, the emission rate,
///                         the funding source and role assignments.
/// - `RewardDistributor` – May trigger a reward distribution, nothing else.
///
/// Roles are independent: holding one never implies the other. Entry points
/// that accept either role check both explicitly.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Governance = 1,
    RewardDistributor = 2,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn members_key(role: Role) -> (Symbol, Role) {
    (ROLE_MEMBERS, role)
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns `true` if `account` currently holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        ttl::extend_persistent(env, &key);
    }
    held
}

/// Returns `true` if `account` holds at least one of `roles`.
pub fn has_any_role(env: &Env, roles: &[Role], account: &Address) -> bool {
    roles.iter().any(|role| has_role(env, *role, account))
}

/// Grants `role` to `account`.
///
/// Only callable internally; callers must verify authorization beforehand.
/// Returns `false` if the account already held the role.
pub fn grant_role(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
    track_member(env, role, account);
    true
}

/// Revokes `role` from `account`.
///
/// Returns `false` if the account did not hold the role.
pub fn revoke_role(env: &Env, role: Role, account: &Address) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));
    untrack_member(env, role, account);
    true
}

// ── Member Tracking ──────────────────────────────────────────────────────────

/// Returns every address currently holding `role`, in grant order.
pub fn role_members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&members_key(role))
        .unwrap_or(Vec::new(env))
}

fn track_member(env: &Env, role: Role, account: &Address) {
    let key = members_key(role);
    let mut members = role_members(env, role);
    if !members.contains(account) {
        members.push_back(account.clone());
        env.storage().persistent().set(&key, &members);
        ttl::extend_persistent(env, &key);
    }
}

fn untrack_member(env: &Env, role: Role, account: &Address) {
    let key = members_key(role);
    let mut members = role_members(env, role);
    if let Some(index) = members.first_index_of(account) {
        members.remove(index);
        env.storage().persistent().set(&key, &members);
        ttl::extend_persistent(env, &key);
    }
}
