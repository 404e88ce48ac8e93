//! Lock-sharded concurrent map.
//!
//! A logical key -> value map physically partitioned into a fixed number of
//! independently locked shards. Worker threads touching keys in different
//! shards never block each other; same-shard operations serialize. One
//! instance is scoped to a single parallel aggregation: created, filled,
//! drained, discarded.

use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Maps a key to its owning shard. Implemented for the integer types; other
/// key types must supply their own stable shard hash.
pub trait ShardKey: Ord + Copy + Send {
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($ty:ty),* $(,)?) => {
        $(impl ShardKey for $ty {
            fn shard_index(&self, shard_count: usize) -> usize {
                // Two's-complement wrap keeps negative keys well distributed.
                (*self as u64 % shard_count as u64) as usize
            }
        })*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V: Default + Send> ConcurrentMap<K, V> {
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard_index(self.shards.len())]
    }

    /// Run `f` against the slot for `key` under the owning shard's lock,
    /// creating the slot with a default value if absent. The lock is held
    /// only for the duration of the closure and released on every exit path.
    pub fn update<R>(&self, key: K, f: impl FnOnce(&mut V) -> R) -> R {
        let mut shard = self.shard(&key).lock();
        f(shard.entry(key).or_default())
    }

    /// Remove `key` if present, locking only its shard.
    pub fn erase(&self, key: &K) {
        self.shard(key).lock().remove(key);
    }

    /// Merge all shards into one ordered map. Consuming `self` means no other
    /// thread can still hold a shard lock, so the drain cannot deadlock or
    /// lose a concurrent update.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }
}
