//! Seed derivation for independent trial blocks.
//!
//! Every block of trials owns its own RNG whose seed depends only on the base
//! seed, the edge count and the block index. Execution order and thread count
//! therefore never change the sampled graphs.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio) used for seed derivation.
const SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
fn mix(base_seed: u64, lane: u64) -> u64 {
    splitmix64(base_seed ^ lane.wrapping_add(1).wrapping_mul(SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Derives the seed for trial block `block` of the point at `edge_count`.
#[inline]
pub(crate) fn block_seed(base_seed: u64, edge_count: usize, block: usize) -> u64 {
    mix(mix(base_seed, edge_count as u64), block as u64)
}

pub(crate) fn block_rng(base_seed: u64, edge_count: usize, block: usize) -> SmallRng {
    SmallRng::seed_from_u64(block_seed(base_seed, edge_count, block))
}
