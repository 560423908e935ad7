//! Visiting order for a pass
//!
//! Each pass starts at a uniformly random index and wraps around. When runs
//! are routinely cut short, a fixed start would keep re-verifying the same
//! prefix and never reach files late in the list; a random start gives every
//! file the same long-run chance of being visited without storing a cursor.

use uuid::Uuid;

/// Picks the index a pass starts from.
pub trait StartSelector {
    /// Return an index in `0..len`. Only called with `len > 0`.
    fn select(&mut self, len: usize) -> usize;
}

/// Start index drawn from the operating system's random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStart;

impl StartSelector for RandomStart {
    fn select(&mut self, len: usize) -> usize {
        // v4 UUIDs carry 122 random bits; the modulo bias is negligible
        (Uuid::new_v4().as_u128() % len as u128) as usize
    }
}

/// Reproducible start indices from a seed (SplitMix64).
#[derive(Debug, Clone)]
pub struct SeededStart {
    state: u64,
}

impl SeededStart {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl StartSelector for SeededStart {
    fn select(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

/// Always start at the same index.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStart(pub usize);

impl StartSelector for FixedStart {
    fn select(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

/// Indices `start, start+1, .., len-1, 0, .., start-1`.
pub fn rotated(len: usize, start: usize) -> impl Iterator<Item = usize> {
    let start = if len == 0 { 0 } else { start % len };
    (start..len).chain(0..start)
}
