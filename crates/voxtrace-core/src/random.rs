//! Stateless pseudo-randomness for per-pixel sampling.
//!
//! Every draw is a pure function of its seed, and seeds are derived only from inputs like pixel coordinates and the
//! frame's jitter value. Tracing the same pixel twice with the same inputs produces the same samples, while a new
//! jitter value decorrelates consecutive frames.

use crate::glam::Vec3A;

/// Number of candidates drawn by [`random_in_unit_sphere`] before giving up.
pub const MAX_SPHERE_TRIALS: u32 = 16;

/// PCG output permutation of one 32-bit input.
#[inline]
pub fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747796405).wrapping_add(2891336453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277803737);
    (word >> 22) ^ word
}

/// Derives the sampling seed of pixel `(x, y)` for a frame rendered with `jitter`.
#[inline]
pub fn pixel_seed(x: u32, y: u32, jitter: f32) -> u32 {
    pcg_hash(x ^ pcg_hash(y ^ pcg_hash(jitter.to_bits())))
}

/// Advances `seed` and returns a value in `[0, 1)`.
#[inline]
pub fn random_f32(seed: &mut u32) -> f32 {
    *seed = pcg_hash(*seed);
    // Only the top 24 bits fit in the mantissa; this keeps the result strictly below 1.
    (*seed >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Returns a value in `[min, max)`.
#[inline]
pub fn random_range(seed: &mut u32, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(seed)
}

/// Rejection samples a point strictly inside the unit sphere. Returns zero if all [`MAX_SPHERE_TRIALS`] candidates
/// fall outside.
pub fn random_in_unit_sphere(seed: &mut u32) -> Vec3A {
    for _ in 0..MAX_SPHERE_TRIALS {
        let p = Vec3A::new(
            random_range(seed, -1.0, 1.0),
            random_range(seed, -1.0, 1.0),
            random_range(seed, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    Vec3A::ZERO
}

/// Unit length, or zero when sampling failed.
pub fn random_unit_vector(seed: &mut u32) -> Vec3A {
    random_in_unit_sphere(seed).normalize_or_zero()
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
