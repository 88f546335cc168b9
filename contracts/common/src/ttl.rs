use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-ledger threshold below which an entry's TTL gets bumped.
pub const TTL_THRESHOLD: u32 = 518_400;
/// Number of ledgers an entry is kept alive for after a bump.
pub const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extends the TTL of a persistent entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of the contract instance (and every instance key).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
