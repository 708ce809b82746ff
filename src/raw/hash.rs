// FNV-1a offset basis.
const SEED: u32 = 2_166_136_261;

// FNV-1a 32-bit prime.
const PRIME: u32 = 16_777_619;

/// Hashes a key with 32-bit FNV-1a followed by an avalanche mix.
///
/// This is the hash a [`SymbolTable`](crate::SymbolTable) reduces modulo its
/// capacity to pick a bucket. It depends only on the key's bytes.
///
/// ```
/// assert_eq!(symtab::symbol_hash(b"apple"), symtab::symbol_hash(b"apple"));
/// assert_ne!(symtab::symbol_hash(b"apple"), symtab::symbol_hash(b"banana"));
/// ```
#[inline]
pub fn symbol_hash(key: &[u8]) -> u32 {
    let mut hash = key
        .iter()
        .fold(SEED, |hash, &b| (hash ^ b as u32).wrapping_mul(PRIME));

    hash = hash.wrapping_add(hash << 13);
    hash ^= hash >> 7;
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 17;
    hash = hash.wrapping_add(hash << 5);
    hash
}

// Returns the bucket index for `key` in a table of `capacity` buckets.
#[inline]
pub fn bucket(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    symbol_hash(key.as_bytes()) as usize % capacity
}
