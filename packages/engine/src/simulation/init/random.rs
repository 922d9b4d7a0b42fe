//! Tie-break generator seeding.

/// Seed for a chunk's xorshift32 generator.
///
/// A pure function of `(chunk_id, salt)`: runs over the same world are
/// reproducible, while neighbouring chunks get unrelated streams.
/// Never returns zero (xorshift32 would stick there).
pub fn chunk_seed(chunk_id: usize, salt: u64) -> u32 {
    // splitmix64 finaliser over the salted id
    let mut z = salt ^ (chunk_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;

    let folded = (z as u32) ^ ((z >> 32) as u32);
    if folded == 0 { 0x9E37_79B9 } else { folded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_reproducible_and_distinct() {
        let salt = 0xABCD;
        assert_eq!(chunk_seed(3, salt), chunk_seed(3, salt));

        let seeds: std::collections::HashSet<u32> = (0..256).map(|id| chunk_seed(id, salt)).collect();
        assert_eq!(seeds.len(), 256);
        assert!(!seeds.contains(&0));

        assert_ne!(chunk_seed(3, salt), chunk_seed(3, salt + 1));
    }
}
