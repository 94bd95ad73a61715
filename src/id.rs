//! Monotonic 64-bit ID generator for `nuid`s.
//!
//! Mirrors `aoi::NuidGenerator` from the original engine: a counter seeded
//! once from a pseudo-random source (to lessen collisions across restarts)
//! and then simply post-incremented. Unlike the original, the counter is an
//! instance field rather than process-wide `static` state, so tests can run
//! isolated generators instead of sharing one across the whole binary.

use rand::Rng;

/// Supplies unique, increasing 64-bit IDs for players and (per-owner) sensors.
#[derive(Debug)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Seeds the counter from `rand`, matching the original's
    /// `srand(time(NULL)); return rand();` seeding scheme.
    pub fn new() -> Self {
        let seed = rand::thread_rng().gen::<u32>() as u64;
        Self { next: seed }
    }

    /// Constructs a generator starting at an explicit value. Useful in tests
    /// that want deterministic, collision-free IDs.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Returns the next ID and advances the counter.
    pub fn gen_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_sequence() {
        let mut gen = IdGenerator::starting_at(42);
        let a = gen.gen_id();
        let b = gen.gen_id();
        let c = gen.gen_id();
        assert_eq!(b, a + 1);
        assert_eq!(c, b + 1);
    }

    #[test]
    fn independent_instances_dont_share_state() {
        let mut a = IdGenerator::starting_at(0);
        let mut b = IdGenerator::starting_at(100);
        assert_eq!(a.gen_id(), 0);
        assert_eq!(b.gen_id(), 100);
        assert_eq!(a.gen_id(), 1);
    }

    #[test]
    fn random_seeding_produces_a_usable_generator() {
        let mut gen = IdGenerator::new();
        let a = gen.gen_id();
        let b = gen.gen_id();
        assert_eq!(b, a + 1);
    }
}
