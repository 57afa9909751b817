use crate::key::KeyHasher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of characters folded into one base-36 chunk.
const CHUNK_LEN: usize = 6;

/// Number of chunks, so only the last `CHUNK_LEN * CHUNKS` characters of a
/// key contribute to its hash.
const CHUNKS: usize = 5;

/// Coefficients used when the hash is built in deterministic mode.
pub const DEFAULT_COEFFICIENTS: [u64; CHUNKS] =
    [983132572, 1468777056, 552714139, 984953261, 261934300];

/// Hashes a string by reading its last 30 characters as five base-36 numbers
/// of six digits each and taking a weighted sum of them.
///
/// Letters map to the digits 0 to 25 regardless of case and decimal digits map
/// to 26 to 35. Any other character counts as digit 0. Chunks are taken from
/// the end of the key backward, so the last six characters form the last
/// chunk and a key shorter than 30 characters is padded with zero chunks on
/// the left.
///
/// Keys that share their last 30 characters always collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringHash {
    coefficients: [u64; CHUNKS],
}

impl Default for StringHash {
    fn default() -> Self {
        Self::new()
    }
}

impl StringHash {
    /// Deterministic hash using the fixed coefficient set.
    pub fn new() -> Self {
        Self {
            coefficients: DEFAULT_COEFFICIENTS,
        }
    }

    /// Hash with coefficients drawn once from a generator seeded by the system
    /// clock. Values differ between runs.
    pub fn randomized() -> Self {
        let seed: u64 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// Randomized coefficients from an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let mut coefficients: [u64; CHUNKS] = [0; CHUNKS];
        for c in coefficients.iter_mut() {
            *c = rng.gen::<u32>() as u64;
        }
        Self { coefficients }
    }

    pub fn with_coefficients(coefficients: [u64; CHUNKS]) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[u64; CHUNKS] {
        &self.coefficients
    }

    #[inline]
    pub fn letter_digit_to_number(c: char) -> u64 {
        match c {
            'a'..='z' => c as u64 - 'a' as u64,
            'A'..='Z' => c as u64 - 'A' as u64,
            '0'..='9' => 26 + (c as u64 - '0' as u64),
            _ => 0,
        }
    }

    pub fn hash(&self, key: &str) -> u64 {
        let digits: Vec<u64> = key.chars().map(Self::letter_digit_to_number).collect();
        let mut w: [u64; CHUNKS] = [0; CHUNKS];
        let mut end: usize = digits.len();
        let mut index: usize = CHUNKS;
        while index > 0 && end > 0 {
            index -= 1;
            let start: usize = end.saturating_sub(CHUNK_LEN);
            w[index] = Self::chunk_value(&digits[start..end]);
            end = start;
        }

        let mut hash: u64 = 0;
        for (r, w) in self.coefficients.iter().zip(w.iter()) {
            hash = hash.wrapping_add(r.wrapping_mul(*w));
        }
        hash
    }

    /// Reads a chunk as a base-36 number, most significant digit first.
    fn chunk_value(digits: &[u64]) -> u64 {
        digits.iter().fold(0, |value, d| value * 36 + d)
    }
}

impl KeyHasher<str> for StringHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self.hash(key)
    }
}

impl KeyHasher<String> for StringHash {
    #[inline]
    fn hash_key(&self, key: &String) -> u64 {
        self.hash(key)
    }
}
