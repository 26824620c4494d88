//! Reproducible test data with the PCG32 generator.
//!
//! The generator is the minimal XSH-RR variant with 64 bits of state and a selectable stream, as
//! described at <https://www.pcg-random.org>. Sequences and the derived floats and integers are
//! bit-exact with the reference implementation, so data generated here can be compared against
//! other hosts.
use rand_core::RngCore;

/// A permuted congruential generator with 32-bit output.
#[derive(Clone, Debug)]
pub struct Pcg32 {
    inner: rand_pcg::Pcg32,
}

impl Pcg32 {
    /// Seed with an initial state and a stream selector.
    ///
    /// Generators with different stream selectors produce unrelated sequences even for the same
    /// initial state.
    pub fn new(initstate: u64, initseq: u64) -> Self {
        Pcg32 {
            inner: rand_pcg::Pcg32::new(initstate, initseq),
        }
    }

    /// Generate a uniformly distributed 32-bit number.
    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// A float in `[0, 1)`, the output scaled by 2⁻³².
    ///
    /// The conversion rounds to the nearest float so outputs close to `u32::MAX` become `1.0`,
    /// exactly as in the reference.
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 * (1.0 / 4_294_967_296.0)
    }

    /// A float in `[low, high)`.
    pub fn next_f32_range(&mut self, low: f32, high: f32) -> f32 {
        self.next_f32() * (high - low) + low
    }

    /// Fill with floats in `[0, 1)`.
    pub fn fill_floats(&mut self, out: &mut [f32]) {
        for value in out {
            *value = self.next_f32();
        }
    }

    /// Fill with floats in `[low, high)`.
    pub fn fill_floats_range(&mut self, out: &mut [f32], low: f32, high: f32) {
        let diff = high - low;
        for value in out {
            *value = self.next_f32() * diff + low;
        }
    }

    /// Fill with integers uniformly distributed in `[low, high]`, both inclusive.
    ///
    /// Uses rejection sampling with the smallest bit mask covering the range. Each 32-bit output
    /// is consumed in mask-sized chunks, from the low bits up, before another is drawn.
    pub fn fill_ints_range(&mut self, out: &mut [i32], low: i32, high: i32) {
        let diff = high.wrapping_sub(low) as u32;
        let bits_needed = if diff == 0 { 1 } else { 32 - diff.leading_zeros() };
        let mask = if diff == 0 { 0 } else { u32::MAX >> (32 - bits_needed) };
        let chunks = 32 / bits_needed;

        for value in out {
            let offset = 'draw: loop {
                let mut bits = self.next_u32();
                for _ in 0..chunks {
                    if bits & mask <= diff {
                        break 'draw bits & mask;
                    }
                    bits = bits.checked_shr(bits_needed).unwrap_or(0);
                }
            };

            *value = low.wrapping_add(offset as i32);
        }
    }
}
