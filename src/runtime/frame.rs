//! Deterministic synthetic frames
//!
//! A frame is a horizontal gradient with low-amplitude noise and a few
//! saturated square patches. Everything is drawn from one 32-bit linear
//! congruential generator seeded with the run's seed, so the same seed
//! and dimensions always produce byte-identical frames.

use ndarray::{ArrayViewMut2, s};
use rand::{RngCore, SeedableRng};

/// LCG multiplier (Numerical Recipes)
pub const LCG_MULTIPLIER: u32 = 1_664_525;
/// LCG increment (Numerical Recipes)
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Noise is the top byte of each draw masked to 0..=31
pub const NOISE_MASK: u32 = 0x1F;
/// Number of hot patches stamped after the base pass
pub const HOT_PATCHES: usize = 3;
/// Half-width of a hot patch; patches cover `2 * radius + 1` samples per side
pub const HOT_PATCH_RADIUS: usize = 3;
/// Amount added to every sample under a hot patch (saturating)
pub const HOT_PATCH_BOOST: u8 = 120;

/// 32-bit linear congruential generator
///
/// `state <- 1664525 * state + 1013904223 (mod 2^32)`; each draw returns
/// the new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomLcg {
    state: u32,
}

impl BloomLcg {
    /// Create a generator whose state starts at `seed`
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RngCore for BloomLcg {
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    // Low half first
    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            for (slot, byte) in chunk.iter_mut().zip(bytes) {
                *slot = byte;
            }
        }
    }
}

impl SeedableRng for BloomLcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Fill `frame` (rows x columns) with the synthetic pattern for `seed`
///
/// Base pass, row-major: `x * 255 / max(width - 1, 1)` plus 0..=31 of
/// noise, capped at 255. Then [`HOT_PATCHES`] squares centred on random
/// samples are raised by [`HOT_PATCH_BOOST`], clipped to the frame edges.
pub fn synthesize_frame(frame: &mut ArrayViewMut2<'_, u8>, seed: u32) {
    let (height, width) = frame.dim();
    if width == 0 || height == 0 {
        return;
    }

    let mut rng = BloomLcg::new(seed);
    let denom = width.saturating_sub(1).max(1);

    for ((_, x), sample) in frame.indexed_iter_mut() {
        let noise = ((rng.next_u32() >> 24) & NOISE_MASK) as usize;
        let base = x * 255 / denom;
        *sample = (base + noise).min(255) as u8;
    }

    for _ in 0..HOT_PATCHES {
        let cx = rng.next_u32() as usize % width;
        let cy = rng.next_u32() as usize % height;

        let x0 = cx.saturating_sub(HOT_PATCH_RADIUS);
        let x1 = (cx + HOT_PATCH_RADIUS + 1).min(width);
        let y0 = cy.saturating_sub(HOT_PATCH_RADIUS);
        let y1 = (cy + HOT_PATCH_RADIUS + 1).min(height);

        frame
            .slice_mut(s![y0..y1, x0..x1])
            .mapv_inplace(|v| v.saturating_add(HOT_PATCH_BOOST));
    }
}
