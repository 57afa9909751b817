use crate::key::KeyHasher;

/// Moduli used to derive the double hashing step. Each entry is a prime a
/// little below the matching table capacity.
pub const DOUBLE_HASH_MOD_VALUES: [usize; 28] = [
    7, 19, 43, 89, 193, 389, 787, 1583, 3191, 6397, 12841, 25703, 51431, 102871, 205721, 411503,
    823051, 1646221, 3292463, 6584957, 13169963, 26339921, 52679927, 105359939, 210719881,
    421439749, 842879563, 1685759113,
];

/// A collision resolution strategy.
///
/// After `init` the prober yields candidate slot indices from `next` until it
/// has issued `capacity` of them, then returns `None`. Calling `init` again
/// restarts the sequence for another key.
pub trait Prober<K: ?Sized> {
    fn init(&mut self, start: usize, capacity: usize, key: &K);

    fn next(&mut self) -> Option<usize>;

    /// Probes issued since the last `init`.
    fn probes(&self) -> usize;
}

/// Bookkeeping shared by every prober.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeState {
    pub start: usize,
    pub capacity: usize,
    pub probes: usize,
}

impl ProbeState {
    #[inline]
    fn reset(&mut self, start: usize, capacity: usize) {
        self.start = start;
        self.capacity = capacity;
        self.probes = 0;
    }

    #[inline]
    fn exhausted(&self) -> bool {
        self.probes >= self.capacity
    }
}

/// Visits `start, start + 1, ...` modulo the capacity. Always covers every slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProber {
    state: ProbeState,
}

impl LinearProber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: ?Sized> Prober<K> for LinearProber {
    fn init(&mut self, start: usize, capacity: usize, _key: &K) {
        self.state.reset(start, capacity);
    }

    fn next(&mut self) -> Option<usize> {
        if self.state.exhausted() {
            return None;
        }
        let loc: usize = (self.state.start + self.state.probes) % self.state.capacity;
        self.state.probes += 1;
        Some(loc)
    }

    fn probes(&self) -> usize {
        self.state.probes
    }
}

/// Visits `start + i * step` modulo the capacity, where the step comes from a
/// secondary hash of the key.
///
/// Every slot is visited only when the step and the capacity are coprime.
/// Most ladder capacities are prime, but not all of them (105359969 is
/// 11 * 9578179), so a step sharing a factor with the capacity is moved up to
/// the next coprime value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleHashProber<H2> {
    h2: H2,
    state: ProbeState,
    step: usize,
    loc: usize,
}

impl<H2> DoubleHashProber<H2> {
    pub fn new(h2: H2) -> Self {
        Self {
            h2,
            state: ProbeState::default(),
            step: 0,
            loc: 0,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the largest modulus strictly below `capacity`.
    ///
    /// A capacity at or below the smallest modulus clamps to the smallest one,
    /// and a capacity above the whole ladder uses the last one.
    pub fn modulus_for_capacity(capacity: usize) -> usize {
        match DOUBLE_HASH_MOD_VALUES.iter().position(|&m| m >= capacity) {
            Some(0) => DOUBLE_HASH_MOD_VALUES[0],
            Some(i) => DOUBLE_HASH_MOD_VALUES[i - 1],
            None => DOUBLE_HASH_MOD_VALUES[DOUBLE_HASH_MOD_VALUES.len() - 1],
        }
    }
}

impl<K, H2> Prober<K> for DoubleHashProber<H2>
where
    K: ?Sized,
    H2: KeyHasher<K>,
{
    fn init(&mut self, start: usize, capacity: usize, key: &K) {
        self.state.reset(start, capacity);
        let modulus: u64 = Self::modulus_for_capacity(capacity) as u64;
        let step: usize = (modulus - self.h2.hash_key(key) % modulus) as usize;
        self.step = coprime_step(step, capacity);
        self.loc = if capacity > 0 { start % capacity } else { 0 };
    }

    fn next(&mut self) -> Option<usize> {
        if self.state.exhausted() {
            return None;
        }
        let loc: usize = self.loc;
        self.loc = (self.loc + self.step) % self.state.capacity;
        self.state.probes += 1;
        Some(loc)
    }

    fn probes(&self) -> usize {
        self.state.probes
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t: usize = a % b;
        a = b;
        b = t;
    }
    a
}

/// Smallest step at or above `step` (wrapping to 1) that is coprime with
/// `capacity`.
fn coprime_step(step: usize, capacity: usize) -> usize {
    if capacity <= 1 {
        return 1;
    }
    let mut step: usize = step % capacity;
    if step == 0 {
        step = 1;
    }
    while gcd(step, capacity) != 1 {
        step = if step + 1 >= capacity { 1 } else { step + 1 };
    }
    step
}
