//! Property-based tests for the weight registry.
//!
//! Invariants tested:
//! - `get_total_weight` always equals the sum of registered weights
//! - Membership always mirrors the registered pools, without duplicates
//! - Removal follows swap-and-truncate ordering
//! - Out-of-range indices always fail and leave state untouched

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use staking_manager::ContractError;

use crate::harness::{Harness, Op};

fn assert_matches_model(h: &Harness, model: &[(Address, i128)], removed: &[Address]) {
    let pools = h.client.get_pools();
    assert_eq!(pools.len() as usize, model.len());
    for (i, (pool, weight)) in model.iter().enumerate() {
        let entry = pools.get(i as u32).unwrap();
        assert_eq!(&entry.pool, pool);
        assert_eq!(entry.weight, *weight);
        assert!(h.client.is_pool_added(pool));
    }
    for pool in removed {
        assert!(!h.client.is_pool_added(pool));
    }
    let sum: i128 = model.iter().map(|(_, w)| *w).sum();
    assert_eq!(h.client.get_total_weight(), sum);
    assert_eq!(h.client.pool_count() as usize, model.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any sequence of registry operations keeps the contract identical to a
    /// swap-remove vector model.
    #[test]
    fn prop_registry_matches_model(ops in prop::collection::vec(any::<Op>(), 1..24)) {
        let h = Harness::new(0);
        let mut model: Vec<(Address, i128)> = Vec::new();
        let mut removed: Vec<Address> = Vec::new();

        for op in ops {
            match op {
                Op::Add(weight) => {
                    let pool = Address::generate(&h.env);
                    h.client.add_pool(&h.admin, &pool, &weight);
                    model.push((pool, weight));
                }
                Op::Remove(index) => {
                    let result = h.client.try_remove_pool(&h.admin, &index);
                    if (index as usize) < model.len() {
                        prop_assert!(result.is_ok());
                        let (pool, _) = model.swap_remove(index as usize);
                        removed.push(pool);
                    } else {
                        prop_assert_eq!(result, Err(Ok(ContractError::IndexOutOfRange)));
                    }
                }
                Op::Adjust(index, weight) => {
                    let result = h.client.try_adjust_weight(&h.admin, &index, &weight);
                    if (index as usize) < model.len() {
                        prop_assert!(result.is_ok());
                        model[index as usize].1 = weight;
                    } else {
                        prop_assert_eq!(result, Err(Ok(ContractError::IndexOutOfRange)));
                    }
                }
                Op::Advance(seconds) => h.advance(seconds),
                Op::Distribute => {
                    h.client.distribute_rewards(&h.admin);
                }
            }
            assert_matches_model(&h, &model, &removed);
        }
    }

    /// Re-adding a registered pool always fails and changes nothing.
    #[test]
    fn prop_duplicate_add_rejected(weight in 0i128..=1_000_000, again in 0i128..=1_000_000) {
        let h = Harness::new(0);
        let pool = Address::generate(&h.env);
        h.client.add_pool(&h.admin, &pool, &weight);

        let result = h.client.try_add_pool(&h.admin, &pool, &again);
        prop_assert_eq!(result, Err(Ok(ContractError::AlreadyRegistered)));
        prop_assert_eq!(h.client.get_total_weight(), weight);
        prop_assert_eq!(h.client.pool_count(), 1);
    }
}
