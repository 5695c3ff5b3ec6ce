/// MurmurHash2 64-bit variant ("MurmurHash64A"), fixed seed
/// `1203989050`, `m = 0xC6A4A7935BD1E995`, shift `r = 47`, little-endian
/// 8-byte block reads, standard tail-mixing. A bit-exact algorithm pinned
/// for reproducible state hashes, not a place to reach for a hashing crate.
pub const MURMUR_SEED: u64 = 1203989050;
const M: u64 = 0xC6A4A7935BD1E995;
const R: u32 = 47;

pub fn murmur64a(data: &[u8], seed: u64) -> u64 {
    let len = data.len();
    let mut h: u64 = seed ^ (len as u64).wrapping_mul(M);

    let chunks = data.chunks_exact(8);
    let tail = chunks.remainder();

    for chunk in chunks {
        let mut k = u64::from_le_bytes(chunk.try_into().unwrap());
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h ^= k;
        h = h.wrapping_mul(M);
    }

    if !tail.is_empty() {
        // each remaining byte contributes at its own shift, mirroring the
        // reference implementation's fallthrough `switch (len & 7)`.
        for (i, &byte) in tail.iter().enumerate() {
            h ^= (byte as u64) << (8 * i);
        }
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_deterministic() {
        assert_eq!(murmur64a(b"", MURMUR_SEED), murmur64a(b"", MURMUR_SEED));
    }

    #[test]
    fn differing_inputs_differ() {
        assert_ne!(murmur64a(b"abc", MURMUR_SEED), murmur64a(b"abd", MURMUR_SEED));
    }

    #[test]
    fn same_input_same_seed_is_stable_across_lengths() {
        let short = murmur64a(b"1234567", MURMUR_SEED);
        let exact = murmur64a(b"12345678", MURMUR_SEED);
        let long = murmur64a(b"123456789", MURMUR_SEED);
        assert_ne!(short, exact);
        assert_ne!(exact, long);
    }
}
