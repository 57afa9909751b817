use crate::config::{TableConfig, CAPACITIES};
use crate::error::{HashTableError, Result};
use crate::key::{KeyEq, KeyHasher, StdHasher, StdKeyEq};
use crate::probe::{LinearProber, Prober};
use log::{debug, error, trace, warn};
use std::fmt::{Debug, Display};
use std::io::{self, Write};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub enum Slot<K, V> {
    Empty,
    Occupied(K, V),
    /// Logically deleted. The pair is kept for diagnostics until a resize.
    Tombstoned(K, V),
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(..))
    }

    #[inline]
    pub fn is_tombstoned(&self) -> bool {
        matches!(self, Slot::Tombstoned(..))
    }
}

/// Outcome of probing for a key.
enum Probe {
    /// A live slot holds an equal key.
    Found(usize),
    /// The key is absent; this is the first empty or tombstoned slot seen.
    Vacant(usize),
    /// The key is absent and the sequence ran out without a usable slot.
    Exhausted,
}

/// An open addressing hash table.
///
/// Collisions are resolved by the prober `P`, keys are mapped to a starting
/// slot by `H` and compared with `E`. Removal leaves a tombstone behind, and
/// tombstones are only reclaimed when the table grows to the next capacity of
/// the ladder in [`CAPACITIES`].
#[derive(Debug, Clone)]
pub struct HashTable<K, V, P = LinearProber, H = StdHasher, E = StdKeyEq> {
    slots: Vec<Slot<K, V>>,
    capacity_index: usize,
    count: usize,
    config: TableConfig,
    prober: P,
    hasher: H,
    key_eq: E,
}

impl<K, V> HashTable<K, V>
where
    K: std::hash::Hash + PartialEq,
{
    /// Table with linear probing, the std hasher and the default config.
    pub fn new() -> Self {
        Self::with_parts(TableConfig::default(), LinearProber::new(), StdHasher, StdKeyEq)
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: std::hash::Hash + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P, H, E> HashTable<K, V, P, H, E>
where
    P: Prober<K> + Clone,
    H: KeyHasher<K>,
    E: KeyEq<K>,
{
    /// Builds a table from a validated config and the three key functors.
    pub fn with_config(config: TableConfig, prober: P, hasher: H, key_eq: E) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(config, prober, hasher, key_eq))
    }

    /// Default config with a custom prober and hasher.
    pub fn with_prober(prober: P, hasher: H) -> Self
    where
        E: Default,
    {
        Self::with_parts(TableConfig::default(), prober, hasher, E::default())
    }

    fn with_parts(config: TableConfig, prober: P, hasher: H, key_eq: E) -> Self {
        let mut slots: Vec<Slot<K, V>> = Vec::with_capacity(CAPACITIES[0]);
        slots.resize_with(CAPACITIES[0], Slot::default);
        Self {
            slots,
            capacity_index: 0,
            count: 0,
            config,
            prober,
            hasher,
            key_eq,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entries.
    #[inline]
    pub fn size(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_tombstoned()).count()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Inserts `key`, or overwrites the value if `key` is already present.
    ///
    /// If the load factor is already at or above the resize threshold the
    /// table grows first, as many ladder steps as it takes to bring the load
    /// factor below the threshold. The entry is not placed when an error is
    /// returned; growth steps that already succeeded are kept.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        while self.load_factor() >= self.config.resize_threshold {
            self.resize()?;
        }

        match self.probe(&key, true) {
            Probe::Found(i) => {
                if let Slot::Occupied(_, v) = &mut self.slots[i] {
                    *v = value;
                }
            }
            Probe::Vacant(i) => {
                self.slots[i] = Slot::Occupied(key, value);
                self.count += 1;
            }
            Probe::Exhausted => {
                error!("no free location found, capacity {}", self.capacity());
                return Err(HashTableError::ProbeExhausted {
                    capacity: self.capacity(),
                });
            }
        }
        Ok(())
    }

    /// Tombstones the entry for `key`. Returns whether a live entry existed.
    pub fn remove(&mut self, key: &K) -> bool {
        if let Probe::Found(i) = self.probe(key, false) {
            let slot: Slot<K, V> = std::mem::take(&mut self.slots[i]);
            if let Slot::Occupied(k, v) = slot {
                self.slots[i] = Slot::Tombstoned(k, v);
                self.count -= 1;
                return true;
            }
        }
        false
    }

    pub fn find(&self, key: &K) -> Option<(&K, &V)> {
        match self.probe(key, false) {
            Probe::Found(i) => match &self.slots[i] {
                Slot::Occupied(k, v) => Some((k, v)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn find_mut(&mut self, key: &K) -> Option<(&K, &mut V)> {
        match self.probe(key, false) {
            Probe::Found(i) => match &mut self.slots[i] {
                Slot::Occupied(k, v) => Some((&*k, v)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn at(&self, key: &K) -> Result<&V> {
        self.find(key)
            .map(|(_, v)| v)
            .ok_or(HashTableError::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.find_mut(key)
            .map(|(_, v)| v)
            .ok_or(HashTableError::KeyNotFound)
    }

    /// Grows the table to the next capacity of the ladder.
    ///
    /// Live entries are re-probed into the new slot array and tombstones are
    /// dropped. The table is left untouched if there is no further capacity.
    pub fn resize(&mut self) -> Result<()> {
        let new_index: usize = self.capacity_index + 1;
        let max_index: usize = self
            .config
            .max_capacity_index()
            .unwrap_or(CAPACITIES.len() - 1);
        if new_index > max_index || new_index >= CAPACITIES.len() {
            warn!(
                "maximum capacity {} reached, cannot resize further",
                self.capacity()
            );
            return Err(HashTableError::CapacityExhausted {
                capacity: self.capacity(),
            });
        }

        let new_capacity: usize = CAPACITIES[new_index];
        let placement: Vec<usize> = self.plan_placement(new_capacity)?;

        let mut new_slots: Vec<Slot<K, V>> = Vec::with_capacity(new_capacity);
        new_slots.resize_with(new_capacity, Slot::default);
        let old_slots: Vec<Slot<K, V>> = std::mem::replace(&mut self.slots, new_slots);
        let mut reclaimed: usize = 0;
        let mut live: Vec<(K, V)> = Vec::with_capacity(placement.len());
        for slot in old_slots {
            match slot {
                Slot::Occupied(k, v) => live.push((k, v)),
                Slot::Tombstoned(..) => reclaimed += 1,
                Slot::Empty => (),
            }
        }
        // plan_placement yields one target per live entry, in slot order
        debug_assert_eq!(live.len(), placement.len());
        for ((k, v), loc) in live.into_iter().zip(placement) {
            self.slots[loc] = Slot::Occupied(k, v);
        }

        debug!(
            "resized from {} to {}, {} live entries, {} tombstones reclaimed",
            CAPACITIES[self.capacity_index], new_capacity, self.count, reclaimed
        );
        self.capacity_index = new_index;
        Ok(())
    }

    /// Iterates over the live entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter().enumerate(),
        }
    }

    /// Computes, for every live entry in slot order, where it lands in a
    /// table of `capacity` slots. Nothing is moved.
    fn plan_placement(&self, capacity: usize) -> Result<Vec<usize>> {
        let mut taken: Vec<bool> = vec![false; capacity];
        let mut targets: Vec<usize> = Vec::with_capacity(self.count);
        let mut prober: P = self.prober.clone();
        for slot in self.slots.iter() {
            if let Slot::Occupied(k, _) = slot {
                let start: usize = (self.hasher.hash_key(k) % capacity as u64) as usize;
                prober.init(start, capacity, k);
                let mut target: Option<usize> = None;
                while let Some(loc) = prober.next() {
                    if !taken[loc] {
                        target = Some(loc);
                        break;
                    }
                }
                match target {
                    Some(loc) => {
                        taken[loc] = true;
                        targets.push(loc);
                    }
                    None => {
                        error!("no free location found while resizing to {}", capacity);
                        return Err(HashTableError::ProbeExhausted { capacity });
                    }
                }
            }
        }
        Ok(targets)
    }

    /// Walks the probe sequence of `key`.
    ///
    /// Tombstones never stop the walk, so a key placed past an entry that was
    /// later removed is still found. An empty slot ends it. When
    /// `want_vacancy` is set the first empty or tombstoned slot seen is kept
    /// as the place to insert at.
    fn probe(&self, key: &K, want_vacancy: bool) -> Probe {
        let capacity: usize = self.capacity();
        let start: usize = (self.hasher.hash_key(key) % capacity as u64) as usize;
        let mut prober: P = self.prober.clone();
        prober.init(start, capacity, key);

        let mut vacancy: Option<usize> = None;
        while let Some(loc) = prober.next() {
            match &self.slots[loc] {
                Slot::Empty => {
                    trace!("probe ended at empty slot {} after {} probes", loc, prober.probes());
                    return Probe::Vacant(vacancy.unwrap_or(loc));
                }
                Slot::Occupied(k, _) if self.key_eq.keys_equal(k, key) => {
                    trace!("key found at slot {} after {} probes", loc, prober.probes());
                    return Probe::Found(loc);
                }
                Slot::Tombstoned(..) if want_vacancy && vacancy.is_none() => {
                    vacancy = Some(loc);
                }
                _ => (),
            }
        }
        match vacancy {
            Some(loc) => Probe::Vacant(loc),
            None => Probe::Exhausted,
        }
    }
}

impl<K, V, P, H, E> HashTable<K, V, P, H, E>
where
    K: Display,
    V: Display,
{
    /// Writes one `Bucket <slot>: <key> - <value>` line per live entry.
    pub fn report_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(k, v) = slot {
                writeln!(out, "Bucket {}: {} - {}", i, k, v)?;
            }
        }
        Ok(())
    }
}

impl<K, V, P, H, E> Index<&K> for HashTable<K, V, P, H, E>
where
    K: Debug,
    P: Prober<K> + Clone,
    H: KeyHasher<K>,
    E: KeyEq<K>,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.at(key) {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", e, key),
        }
    }
}

impl<K, V, P, H, E> IndexMut<&K> for HashTable<K, V, P, H, E>
where
    K: Debug,
    P: Prober<K> + Clone,
    H: KeyHasher<K>,
    E: KeyEq<K>,
{
    fn index_mut(&mut self, key: &K) -> &mut V {
        match self.at_mut(key) {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", e, key),
        }
    }
}

/// Live entries of a [`HashTable`] as `(slot, key, value)`.
pub struct Iter<'a, K, V> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Slot<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (usize, &'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for (i, slot) in self.inner.by_ref() {
            if let Slot::Occupied(k, v) = slot {
                return Some((i, k, v));
            }
        }
        None
    }
}
