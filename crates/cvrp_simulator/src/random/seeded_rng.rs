use rand::RngCore;

use crate::error::{Result, SimulatorError};

use super::seed::Seed;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hashes a seed into the 32-bit state of the generator.
///
/// Text seeds are hashed over their UTF-16 code units with FNV-1a, numbers
/// are floored and reduced modulo `u32::MAX`.
pub fn hash_seed(seed: &Seed) -> u32 {
    match seed {
        Seed::Number(value) => {
            let value = value.floor().abs();
            if value.is_finite() {
                (value % f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        Seed::Text(text) => text.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
            (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
        }),
    }
}

/// Deterministic mulberry32 stream.
///
/// Every draw advances the state; two generators built from the same seed
/// yield the same sequence for the same calls.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: impl Into<Seed>) -> Self {
        let hashed = hash_seed(&seed.into());

        SeededRng {
            // A zero state would start the stream on a fixed point of the mixer.
            state: if hashed == 0 { 1 } else { hashed },
        }
    }

    #[inline]
    fn advance(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.advance()) / TWO_POW_32
    }

    /// Uniform integer in `[0, max_exclusive)`, `0` when `max_exclusive` is `0`.
    pub fn next_int(&mut self, max_exclusive: usize) -> usize {
        (self.next_f64() * max_exclusive as f64).floor() as usize
    }

    /// Uniform float in `[min, max)`.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    pub fn pick<'a, T>(&mut self, values: &'a [T]) -> Result<&'a T> {
        if values.is_empty() {
            return Err(SimulatorError::EmptyInput);
        }

        let index = self.next_int(values.len());
        Ok(&values[index])
    }

    /// Fisher-Yates over a copy of `values`, drawing exactly `len - 1` times.
    pub fn shuffle<T: Clone>(&mut self, values: &[T]) -> Result<Vec<T>> {
        if values.is_empty() {
            return Err(SimulatorError::EmptyInput);
        }

        let mut shuffled = values.to_vec();
        for i in (1..shuffled.len()).rev() {
            let j = self.next_int(i + 1);
            shuffled.swap(i, j);
        }

        Ok(shuffled)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.advance());
        let high = u64::from(self.advance());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut first = SeededRng::new("abc");
        let mut second = SeededRng::new("abc");

        for _ in 0..1000 {
            assert_eq!(first.next_f64(), second.next_f64());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut first = SeededRng::new("abc");
        let mut second = SeededRng::new("abd");

        let diverged = (0..5).any(|_| first.next_f64() != second.next_f64());
        assert!(diverged);
    }

    #[test]
    fn test_hash_seed() {
        // FNV-1a of the empty string is the offset basis.
        assert_eq!(hash_seed(&Seed::from("")), FNV_OFFSET_BASIS);
        assert_eq!(hash_seed(&Seed::from("a")), 0xE40C_292C);

        assert_eq!(hash_seed(&Seed::from(42u32)), 42);
        assert_eq!(hash_seed(&Seed::from(-42.7)), 43);
        assert_eq!(hash_seed(&Seed::Number(f64::from(u32::MAX))), 0);
        assert_eq!(hash_seed(&Seed::Number(f64::NAN)), 0);
    }

    #[test]
    fn test_zero_seed_is_replaced() {
        let mut zero = SeededRng::new(0u32);
        let mut one = SeededRng::new(1u32);

        assert_eq!(zero.next_f64(), one.next_f64());
    }

    #[test]
    fn test_mulberry32_reference_values() {
        let mut rng = SeededRng::new(1u32);

        assert_eq!(rng.next_u32(), 2_693_262_067);
        assert_eq!(rng.next_u32(), 11_749_833);
    }

    #[test]
    fn test_ranges() {
        let mut rng = SeededRng::new("ranges");

        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));

            let int = rng.next_int(21);
            assert!(int < 21);

            let ranged = rng.next_range(8.0, 92.0);
            assert!((8.0..92.0).contains(&ranged));
        }

        assert_eq!(rng.next_int(0), 0);
    }

    #[test]
    fn test_pick() {
        let mut rng = SeededRng::new("pick");
        let values = [1, 2, 3];

        let picked = rng.pick(&values).unwrap();
        assert!(values.contains(picked));

        let empty: [u8; 0] = [];
        assert!(matches!(rng.pick(&empty), Err(SimulatorError::EmptyInput)));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = SeededRng::new("shuffle");
        let values: Vec<usize> = (0..20).collect();

        let mut shuffled = rng.shuffle(&values).unwrap();
        assert_eq!(values, (0..20).collect::<Vec<_>>());

        shuffled.sort();
        assert_eq!(shuffled, values);
    }

    #[test]
    fn test_shuffle_draw_count() {
        let values = [1, 2, 3, 4, 5];

        let mut shuffled_rng = SeededRng::new("draws");
        shuffled_rng.shuffle(&values).unwrap();

        let mut manual_rng = SeededRng::new("draws");
        for _ in 0..values.len() - 1 {
            manual_rng.next_f64();
        }

        assert_eq!(shuffled_rng.next_f64(), manual_rng.next_f64());
    }

    #[test]
    fn test_shuffle_empty() {
        let mut rng = SeededRng::new("empty");
        let empty: Vec<u8> = vec![];

        assert!(matches!(rng.shuffle(&empty), Err(SimulatorError::EmptyInput)));
    }

    #[test]
    fn test_rng_core_adaptor() {
        let mut rng = SeededRng::new("core");
        let value: u8 = rng.random_range(0..10);
        assert!(value < 10);

        let mut bytes = [0u8; 7];
        rng.fill_bytes(&mut bytes);
    }
}
