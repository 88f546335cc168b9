extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{distribution::ONE, ContractError, Role, StakingManagerContract, StakingManagerContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingManagerContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let token_id = reward_token.address();

    let contract_id = env.register(StakingManagerContract, ());
    let client = StakingManagerContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let funding = Address::generate(&env);
    client.initialize(&admin, &token_id, &funding);

    StellarAssetClient::new(&env, &token_id).mint(&funding, &(1_000 * ONE));
    let expiration = env.ledger().sequence() + 10_000;
    TokenClient::new(&env, &token_id).approve(&funding, &contract_id, &(1_000 * ONE), &expiration);

    (env, client, admin, token_id)
}

fn assert_denied<T: core::fmt::Debug, E: core::fmt::Debug>(
    result: Result<T, Result<ContractError, E>>,
) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::PermissionDenied),
        other => unreachable!("Expected PermissionDenied, got {:?}", other),
    }
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[test]
fn test_admin_holds_governance_after_init() {
    let (_env, client, admin, _) = setup();

    assert!(client.has_role(&Role::Governance, &admin));
    assert!(!client.has_role(&Role::RewardDistributor, &admin));
    assert_eq!(client.get_role_members(&Role::Governance).len(), 1);
}

// ── Governance-only entry points ─────────────────────────────────────────────

#[test]
fn test_outsider_cannot_mutate_registry_or_rate() {
    let (env, client, admin, _) = setup();
    let pool = Address::generate(&env);
    client.add_pool(&admin, &pool, &ONE);
    client.set_reward_per_second(&admin, &7);

    let outsider = Address::generate(&env);
    env.ledger().set_timestamp(500);

    assert_denied(client.try_add_pool(&outsider, &Address::generate(&env), &ONE));
    assert_denied(client.try_remove_pool(&outsider, &0));
    assert_denied(client.try_adjust_weight(&outsider, &0, &(2 * ONE)));
    assert_denied(client.try_set_reward_per_second(&outsider, &1));
    assert_denied(client.try_set_funding_source(&outsider, &outsider));
    assert_denied(client.try_distribute_rewards(&outsider));

    // Nothing moved, not even the clock.
    assert_eq!(client.pool_count(), 1);
    assert_eq!(client.get_total_weight(), ONE);
    assert_eq!(client.get_reward_per_second(), 7);
    assert_eq!(client.get_last_distribution(), 0);
}

#[test]
fn test_distributor_cannot_govern() {
    let (env, client, admin, _) = setup();
    let distributor = Address::generate(&env);
    client.grant_role(&admin, &Role::RewardDistributor, &distributor);

    assert_denied(client.try_add_pool(&distributor, &Address::generate(&env), &ONE));
    assert_denied(client.try_set_reward_per_second(&distributor, &1));
    assert_denied(client.try_grant_role(&distributor, &Role::Governance, &distributor));
}

// ── Distributor role ─────────────────────────────────────────────────────────

#[test]
fn test_distributor_can_distribute() {
    let (env, client, admin, token_id) = setup();
    let pool = Address::generate(&env);
    client.add_pool(&admin, &pool, &ONE);
    client.set_reward_per_second(&admin, &4);

    let distributor = Address::generate(&env);
    client.grant_role(&admin, &Role::RewardDistributor, &distributor);

    env.ledger().set_timestamp(25);
    let summary = client.distribute_rewards(&distributor);

    assert_eq!(summary.owed, 100);
    assert_eq!(TokenClient::new(&env, &token_id).balance(&pool), 100);
}

#[test]
fn test_revoked_distributor_is_denied() {
    let (env, client, admin, _) = setup();
    let distributor = Address::generate(&env);
    client.grant_role(&admin, &Role::RewardDistributor, &distributor);
    client.revoke_role(&admin, &Role::RewardDistributor, &distributor);

    assert!(!client.has_role(&Role::RewardDistributor, &distributor));
    assert_denied(client.try_distribute_rewards(&distributor));
}

// ── Role management ──────────────────────────────────────────────────────────

#[test]
fn test_granted_governor_can_add_pools() {
    let (env, client, admin, _) = setup();
    let governor = Address::generate(&env);
    client.grant_role(&admin, &Role::Governance, &governor);

    client.add_pool(&governor, &Address::generate(&env), &ONE);
    assert_eq!(client.pool_count(), 1);
    assert_eq!(client.get_role_members(&Role::Governance).len(), 2);
}

#[test]
fn test_grant_is_idempotent() {
    let (env, client, admin, _) = setup();
    let distributor = Address::generate(&env);

    client.grant_role(&admin, &Role::RewardDistributor, &distributor);
    client.grant_role(&admin, &Role::RewardDistributor, &distributor);

    assert_eq!(client.get_role_members(&Role::RewardDistributor).len(), 1);
}

#[test]
fn test_renounce_drops_own_role() {
    let (env, client, admin, _) = setup();
    let governor = Address::generate(&env);
    client.grant_role(&admin, &Role::Governance, &governor);

    client.renounce_role(&governor, &Role::Governance);

    assert!(!client.has_role(&Role::Governance, &governor));
    assert_denied(client.try_add_pool(&governor, &Address::generate(&env), &ONE));
}
