//! Seed mixing for caller-level regeneration after a stall.

/// Seed for the given regeneration attempt. Attempt zero keeps the caller's seed.
pub(crate) fn attempt_seed(seed: u64, attempt: u32) -> u64 {
    if attempt == 0 { seed } else { mix_seed_stream(seed, u64::from(attempt)) }
}

fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}
