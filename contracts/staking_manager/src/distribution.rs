use soroban_sdk::{Env, I256};

/// One whole unit in 18-decimal fixed point.
///
/// Weights and the per-second emission rate are expressed in this scale.
/// Only ratios of weights matter, so the scale never appears in the share
/// formula itself.
pub const ONE: i128 = 1_000_000_000_000_000_000;

/// Highest accepted emission rate.
///
/// At this rate `owed` stays within `i128` for any window of up to
/// `u32::MAX` seconds (about 136 years) between settlements.
pub const MAX_REWARD_PER_SECOND: i128 = i128::MAX / u32::MAX as i128;

// ── Core distribution math ──────────────────────────────────────────────────

/// Total reward owed for `elapsed` seconds at `reward_per_second`.
///
/// ```text
/// owed = reward_per_second × elapsed
/// ```
///
/// Returns `None` on overflow. A non-positive rate owes nothing.
pub fn owed(reward_per_second: i128, elapsed: u64) -> Option<i128> {
    if reward_per_second <= 0 || elapsed == 0 {
        return Some(0);
    }
    // u64::MAX < i128::MAX, so the widening cast is lossless.
    reward_per_second.checked_mul(elapsed as i128)
}

/// A single pool's pro-rata slice of `owed`.
///
/// ```text
/// share = owed × weight / total_weight
/// ```
///
/// The product is formed in 256 bits so 18-decimal weights cannot overflow,
/// and the quotient truncates toward zero. Summed over every pool this
/// under-distributes by strictly less than one unit per pool.
///
/// Returns `None` if the result does not fit back into `i128`, which can
/// only happen when `weight > total_weight`.
pub fn share(env: &Env, owed: i128, weight: i128, total_weight: i128) -> Option<i128> {
    if owed <= 0 || weight <= 0 || total_weight <= 0 {
        return Some(0);
    }
    I256::from_i128(env, owed)
        .mul(&I256::from_i128(env, weight))
        .div(&I256::from_i128(env, total_weight))
        .to_i128()
}

/// The undistributed rounding loss handed back to the funding source.
pub fn remainder(owed: i128, distributed: i128) -> i128 {
    owed.saturating_sub(distributed).max(0)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
