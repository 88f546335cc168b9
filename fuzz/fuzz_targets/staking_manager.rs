#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_manager::{StakingManagerContract, StakingManagerContractClient};

const SUPPLY: i128 = i128::MAX / 2;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    AddPool { weight: u64 },
    RemovePool { index: u8 },
    AdjustWeight { index: u8, weight: u64 },
    SetRate { rate: u64 },
    Advance { seconds: u16 },
    Distribute { as_outsider: bool },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token_id = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingManagerContract, ());
    let client = StakingManagerContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let outsider = Address::generate(&env);
    let funding = Address::generate(&env);
    client.initialize(&admin, &token_id, &funding);

    StellarAssetClient::new(&env, &token_id).mint(&funding, &SUPPLY);
    let token = TokenClient::new(&env, &token_id);
    token.approve(&funding, &contract_id, &SUPPLY, &10_000);

    let mut pools: Vec<Address> = Vec::new();

    // Errors are expected; we are looking for panics and broken invariants.
    for action in actions {
        match action {
            FuzzAction::AddPool { weight } => {
                let pool = Address::generate(&env);
                if client.try_add_pool(&admin, &pool, &(weight as i128)).is_ok() {
                    pools.push(pool);
                }
            }
            FuzzAction::RemovePool { index } => {
                let _ = client.try_remove_pool(&admin, &(index as u32));
            }
            FuzzAction::AdjustWeight { index, weight } => {
                let _ = client.try_adjust_weight(&admin, &(index as u32), &(weight as i128));
            }
            FuzzAction::SetRate { rate } => {
                let _ = client.try_set_reward_per_second(&admin, &(rate as i128));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
            FuzzAction::Distribute { as_outsider } => {
                let caller = if as_outsider { &outsider } else { &admin };
                let _ = client.try_distribute_rewards(caller);
            }
        }

        let sum: i128 = client.get_pools().iter().map(|entry| entry.weight).sum();
        assert_eq!(client.get_total_weight(), sum);
        assert_eq!(token.balance(&contract_id), 0);
        let paid: i128 = pools.iter().map(|pool| token.balance(pool)).sum();
        assert_eq!(token.balance(&funding) + paid, SUPPLY);
    }
});
