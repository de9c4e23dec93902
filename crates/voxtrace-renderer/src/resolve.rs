//! Temporal anti-aliasing: blends each pixel of the current frame with the reprojected, neighborhood-clamped output of
//! the previous frame.
//!
//! All image buffers are row-major with `index = x + y * width`. Texel `(x, y)` has its center at `(x + 0.5, y + 0.5)`
//! in texel space.

use crate::core::glam::{Vec2, Vec4};

use rayon::prelude::*;

/// Read-only images shared by every pixel of a resolve pass.
#[derive(Clone, Copy)]
pub struct ResolveInputs<'a> {
    pub width: u32,
    pub height: u32,
    pub current: &'a [Vec4],
    pub velocity: &'a [Vec2],
    pub history: &'a [Vec4],
}

impl<'a> ResolveInputs<'a> {
    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        let x = x.clamp(0, self.width as i32 - 1);
        let y = y.clamp(0, self.height as i32 - 1);

        x as usize + y as usize * self.width as usize
    }

    /// Bilinear sample of `image` at texel-space position `p`, with clamp-to-edge addressing.
    pub fn sample_bilinear(&self, image: &[Vec4], p: Vec2) -> Vec4 {
        // Anything past one texel outside the image samples the edge anyway; clamping first keeps the casts in range.
        let q = (p - Vec2::splat(0.5))
            .max(Vec2::splat(-1.0))
            .min(Vec2::new(self.width as f32, self.height as f32));
        let x0 = q.x.floor();
        let y0 = q.y.floor();
        let fx = q.x - x0;
        let fy = q.y - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let top = image[self.index(x0, y0)].lerp(image[self.index(x0 + 1, y0)], fx);
        let bottom = image[self.index(x0, y0 + 1)].lerp(image[self.index(x0 + 1, y0 + 1)], fx);

        top.lerp(bottom, fy)
    }

    /// Component-wise min and max of the current color over pixel `(x, y)` and its four axis neighbors.
    pub fn neighborhood_bounds(&self, x: i32, y: i32) -> (Vec4, Vec4) {
        let center = self.current[self.index(x, y)];
        let mut min = center;
        let mut max = center;
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let c = self.current[self.index(x + dx, y + dy)];
            min = min.min(c);
            max = max.max(c);
        }

        (min, max)
    }

    /// The resolved color of pixel `(x, y)`. `blend` is the weight of the history.
    pub fn resolve_pixel(&self, x: u32, y: u32, blend: f32) -> Vec4 {
        let i = x as usize + y as usize * self.width as usize;
        let current = self.current[i];

        let velocity = self.velocity[i];
        let velocity = if velocity.x.is_finite() && velocity.y.is_finite() {
            velocity
        } else {
            Vec2::ZERO
        };
        let size = Vec2::new(self.width as f32, self.height as f32);
        let prev_position = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - velocity * size;
        let history = self.sample_bilinear(self.history, prev_position);

        let (min, max) = self.neighborhood_bounds(x as i32, y as i32);
        let clamped = history.max(min).min(max);

        current.lerp(clamped, blend)
    }
}

/// Resolves every pixel into `output`, one row per parallel task.
///
/// Without `history`, the current frame is copied through unchanged.
pub fn resolve_pass(
    width: u32,
    height: u32,
    current: &[Vec4],
    velocity: &[Vec2],
    history: Option<&[Vec4]>,
    blend: f32,
    output: &mut [Vec4],
) {
    let history = match history {
        Some(history) => history,
        None => {
            output.copy_from_slice(current);
            return;
        }
    };
    let inputs = ResolveInputs {
        width,
        height,
        current,
        velocity,
        history,
    };

    output
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = inputs.resolve_pixel(x as u32, y as u32, blend);
            }
        });
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use crate::core::approx::assert_relative_eq;
    use crate::core::random::{pixel_seed, random_f32};

    const W: u32 = 8;
    const H: u32 = 6;

    fn noise_image(salt: u32) -> Vec<Vec4> {
        let mut seed = pixel_seed(salt, 0, 0.0);
        (0..W * H)
            .map(|_| {
                Vec4::new(
                    random_f32(&mut seed),
                    random_f32(&mut seed),
                    random_f32(&mut seed),
                    1.0,
                )
            })
            .collect()
    }

    #[test]
    fn bilinear_at_texel_center_is_exact() {
        let image = noise_image(1);
        let velocity = vec![Vec2::ZERO; image.len()];
        let inputs = ResolveInputs {
            width: W,
            height: H,
            current: &image,
            velocity: &velocity,
            history: &image,
        };

        for y in 0..H {
            for x in 0..W {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                assert_eq!(inputs.sample_bilinear(&image, p), image[(x + y * W) as usize]);
            }
        }
    }

    #[test]
    fn bilinear_between_texels_and_off_edge() {
        let mut image = vec![Vec4::ZERO; (W * H) as usize];
        image[1] = Vec4::ONE;
        let velocity = vec![Vec2::ZERO; image.len()];
        let inputs = ResolveInputs {
            width: W,
            height: H,
            current: &image,
            velocity: &velocity,
            history: &image,
        };

        // Halfway between texels (0, 0) and (1, 0).
        let s = inputs.sample_bilinear(&image, Vec2::new(1.0, 0.5));
        assert_relative_eq!(s.x, 0.5);

        // Far off the left edge clamps to column 0.
        let s = inputs.sample_bilinear(&image, Vec2::new(-10.0, -10.0));
        assert_eq!(s, Vec4::ZERO);
    }

    #[test]
    fn zero_velocity_and_same_history_is_identity() {
        let current = noise_image(2);
        let velocity = vec![Vec2::ZERO; current.len()];
        let mut output = vec![Vec4::ZERO; current.len()];

        resolve_pass(W, H, &current, &velocity, Some(&current), 0.9, &mut output);
        assert_eq!(output, current);
    }

    #[test]
    fn output_stays_in_neighborhood_box() {
        let current = noise_image(3);
        let history = noise_image(4);
        let mut seed = pixel_seed(9, 9, 0.0);
        let velocity: Vec<Vec2> = (0..W * H)
            .map(|_| Vec2::new(random_f32(&mut seed) - 0.5, random_f32(&mut seed) - 0.5))
            .collect();
        let mut output = vec![Vec4::ZERO; current.len()];

        resolve_pass(W, H, &current, &velocity, Some(&history), 0.9, &mut output);

        let inputs = ResolveInputs {
            width: W,
            height: H,
            current: &current,
            velocity: &velocity,
            history: &history,
        };
        for y in 0..H {
            for x in 0..W {
                let (min, max) = inputs.neighborhood_bounds(x as i32, y as i32);
                let out = output[(x + y * W) as usize];
                let eps = Vec4::splat(1e-6);
                assert!(out.cmpge(min - eps).all() && out.cmple(max + eps).all(), "{:?}", out);
            }
        }
    }

    #[test]
    fn missing_history_copies_current() {
        let current = noise_image(5);
        let velocity = vec![Vec2::new(0.1, -0.2); current.len()];
        let mut output = vec![Vec4::ZERO; current.len()];

        resolve_pass(W, H, &current, &velocity, None, 0.9, &mut output);
        assert_eq!(output, current);
    }

    #[test]
    fn blend_weights_history() {
        let current = vec![Vec4::ZERO; (W * H) as usize];
        let history = vec![Vec4::ONE; current.len()];
        let velocity = vec![Vec2::ZERO; current.len()];
        let mut output = vec![Vec4::splat(-1.0); current.len()];

        // A flat neighborhood clamps all history away.
        resolve_pass(W, H, &current, &velocity, Some(&history), 0.9, &mut output);
        assert!(output.iter().all(|&c| c == Vec4::ZERO));

        // With no clamping needed, the blend weight decides.
        let mut current = current;
        current[0] = Vec4::ONE;
        let inputs = ResolveInputs {
            width: W,
            height: H,
            current: &current,
            velocity: &velocity,
            history: &history,
        };
        let c = inputs.resolve_pixel(1, 0, 0.9);
        assert_relative_eq!(c.x, 0.9);
    }

    #[test]
    fn velocity_reads_history_from_previous_position() {
        // A checkerboard makes every neighborhood span [0, 1], so history is never clamped.
        let current: Vec<Vec4> = (0..W * H)
            .map(|i| Vec4::splat(((i % W + i / W) % 2) as f32))
            .collect();
        let mut history = vec![Vec4::ZERO; current.len()];
        history[2 + 3 * W as usize] = Vec4::ONE;

        // Pixel (3, 3) moved one texel right since the previous frame.
        let mut velocity = vec![Vec2::ZERO; current.len()];
        velocity[3 + 3 * W as usize] = Vec2::new(1.0 / W as f32, 0.0);

        let inputs = ResolveInputs {
            width: W,
            height: H,
            current: &current,
            velocity: &velocity,
            history: &history,
        };
        assert_eq!(inputs.resolve_pixel(3, 3, 1.0), Vec4::ONE);
        assert_eq!(inputs.resolve_pixel(4, 3, 1.0), Vec4::ZERO);
        assert_eq!(inputs.resolve_pixel(2, 3, 1.0), Vec4::ONE);
    }

    #[test]
    fn huge_velocity_samples_the_nearest_edge() {
        let current: Vec<Vec4> = (0..W * H)
            .map(|i| Vec4::splat(((i % W + i / W) % 2) as f32))
            .collect();
        // Left column is 1, right column is 0.5, everything else 0.
        let history: Vec<Vec4> = (0..W * H)
            .map(|i| match i % W {
                0 => Vec4::ONE,
                x if x == W - 1 => Vec4::splat(0.5),
                _ => Vec4::ZERO,
            })
            .collect();
        let center = 3 + 3 * W as usize;

        let mut velocity = vec![Vec2::ZERO; current.len()];
        let mut resolve = |v: Vec2| {
            velocity[center] = v;
            let inputs = ResolveInputs {
                width: W,
                height: H,
                current: &current,
                velocity: &velocity,
                history: &history,
            };
            inputs.resolve_pixel(3, 3, 1.0)
        };

        assert_eq!(resolve(Vec2::new(1e10, 0.0)), Vec4::ONE);
        assert_eq!(resolve(Vec2::new(-1e10, 1e10)), Vec4::splat(0.5));
        // Non-finite motion is treated as no motion.
        assert_eq!(resolve(Vec2::new(f32::INFINITY, 0.0)), Vec4::ZERO);
        assert_eq!(resolve(Vec2::new(f32::NAN, f32::NEG_INFINITY)), Vec4::ZERO);
    }

    #[test]
    fn bilinear_at_infinity_clamps_to_corner() {
        let image = noise_image(6);
        let velocity = vec![Vec2::ZERO; image.len()];
        let inputs = ResolveInputs {
            width: W,
            height: H,
            current: &image,
            velocity: &velocity,
            history: &image,
        };

        let s = inputs.sample_bilinear(&image, Vec2::splat(f32::INFINITY));
        assert_eq!(s, image[(W * H - 1) as usize]);
        let s = inputs.sample_bilinear(&image, Vec2::splat(f32::NEG_INFINITY));
        assert_eq!(s, image[0]);
    }
}
