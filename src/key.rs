use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Maps a key to an unsigned 64-bit hash value.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

/// Decides whether two keys name the same entry.
pub trait KeyEq<K: ?Sized> {
    fn keys_equal(&self, a: &K, b: &K) -> bool;
}

/// Primary hasher backed by `std::hash::Hash` with fixed SipHash keys, so it
/// is deterministic for a given toolchain.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdHasher;

impl<K> KeyHasher<K> for StdHasher
where
    K: Hash + ?Sized,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher: DefaultHasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

/// Key equality through `PartialEq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdKeyEq;

impl<K> KeyEq<K> for StdKeyEq
where
    K: PartialEq + ?Sized,
{
    #[inline]
    fn keys_equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_hasher_is_deterministic() {
        let h: StdHasher = StdHasher;
        assert_eq!(h.hash_key("cat"), h.hash_key("cat"));
        assert_eq!(h.hash_key(&42u64), StdHasher.hash_key(&42u64));
        assert_ne!(h.hash_key("cat"), h.hash_key("dog"));
    }

    #[test]
    fn std_key_eq_uses_partial_eq() {
        assert!(StdKeyEq.keys_equal("a", "a"));
        assert!(!StdKeyEq.keys_equal(&1, &2));
    }
}
