//! RNG module - element sources for board generation and refill
//!
//! Every random element the engine draws goes through [`ElementSource`], so a game can be
//! replayed from a seed and tests can script exact refill sequences.
//!
//! Also provides a simple LCG for deterministic games.

use rand::rngs::StdRng;
use rand::Rng;

use crate::types::ElementId;

/// Supplier of element ids in `[0, num_elements)`.
pub trait ElementSource {
    /// Draw the next element. `num_elements` is always at least 1.
    fn next_element(&mut self, num_elements: u8) -> ElementId;
}

impl<S: ElementSource + ?Sized> ElementSource for &mut S {
    fn next_element(&mut self, num_elements: u8) -> ElementId {
        (**self).next_element(num_elements)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of a power-of-two LCG cycle with short periods; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ElementSource for SimpleRng {
    fn next_element(&mut self, num_elements: u8) -> ElementId {
        self.next_range(u32::from(num_elements)) as ElementId
    }
}

impl ElementSource for StdRng {
    fn next_element(&mut self, num_elements: u8) -> ElementId {
        self.gen_range(0..num_elements.max(1))
    }
}

/// Replays a fixed cycle of elements, wrapping around at the end.
///
/// Values are reduced modulo `num_elements` so any script stays in range.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<ElementId>,
    pos: usize,
}

impl SequenceSource {
    /// An empty script behaves like a constant `0` source.
    pub fn new(values: impl Into<Vec<ElementId>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// Always yields `value`
    pub fn constant(value: ElementId) -> Self {
        Self::new(vec![value])
    }

    /// Number of elements drawn so far
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl ElementSource for SequenceSource {
    fn next_element(&mut self, num_elements: u8) -> ElementId {
        let value = if self.values.is_empty() {
            0
        } else {
            self.values[self.pos % self.values.len()]
        };
        self.pos += 1;
        value % num_elements.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(rng.next_u32(), one.next_u32());
    }

    #[test]
    fn test_simple_rng_elements_in_range_and_varied() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let e = rng.next_element(5);
            assert!(e < 5);
            seen[e as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every element should appear: {:?}", seen);
    }

    #[test]
    fn test_std_rng_elements_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            assert!(rng.next_element(4) < 4);
        }
    }

    #[test]
    fn test_sequence_source_cycles_and_wraps() {
        let mut src = SequenceSource::new(vec![1, 2, 7]);
        assert_eq!(src.next_element(5), 1);
        assert_eq!(src.next_element(5), 2);
        assert_eq!(src.next_element(5), 2); // 7 % 5
        assert_eq!(src.next_element(5), 1);
        assert_eq!(src.drawn(), 4);

        let mut empty = SequenceSource::new(Vec::new());
        assert_eq!(empty.next_element(3), 0);
    }
}
