use hypart_core::derive_substream_seed;

/// Derives the deterministic seed for pass-order shuffling.
pub fn shuffle_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 0)
}

/// Derives the deterministic seed for rating tie-breaks.
pub fn tie_break_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 1)
}
