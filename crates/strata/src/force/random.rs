//! Seeded linear congruential generator
//!
//! Used only to nudge coincident points apart, so runs are reproducible for
//! a given seed.

const A: u64 = 1_664_525;
const C: u64 = 1_013_904_223;
const M: u64 = 1 << 32;

#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = (A * self.state + C) % M;
        self.state as f64 / M as f64
    }

    /// A tiny non-zero offset
    pub fn jiggle(&mut self) -> f64 {
        (self.next_f64() - 0.5) * 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_reproducible() {
        let mut a = Lcg::new(1);
        let mut b = Lcg::new(1);
        for _ in 0..10 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_first_value_from_seed_one() {
        let mut lcg = Lcg::new(1);
        let expected = (1_664_525u64 + 1_013_904_223) as f64 / 4_294_967_296.0;
        assert_eq!(lcg.next_f64(), expected);
    }

    #[test]
    fn test_jiggle_is_tiny() {
        let mut lcg = Lcg::new(7);
        for _ in 0..100 {
            assert!(lcg.jiggle().abs() <= 0.5e-6);
        }
    }
}
