//! Pivot-noise generators
//!
//! Each generator scatters random pivot points over the unit square and
//! colors every pixel from its distance relationships to them. The distance
//! maps are deliberately sharp so nearby pivots produce cell-like features.

use contracts::{ProgressSink, Rgba, TextureBuffer};
use rand::Rng;

use crate::generate::generate_custom;

const SHARPNESS: f32 = 15.0;
const FALLOFF: f32 = 3.0;

/// Hyperbolic ramp over [0, 1): zero at 0, steep near 1
fn dist_map(x: f32) -> f32 {
    -1.0 / (FALLOFF * (x - 1.0)) - 1.0 / FALLOFF
}

/// Shifted sigmoid over [0, 1]
fn dist_map_sigmoid(x: f32) -> f32 {
    -1.0 / (1.0 + (-SHARPNESS * (x - 0.5)).exp()) + 1.0
}

fn scatter_points(count: u32, rng: &mut impl Rng) -> Vec<[f32; 2]> {
    (0..count).map(|_| [rng.random(), rng.random()]).collect()
}

fn distances(points: &[[f32; 2]], x: f32, y: f32) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut sum = 0.0;
    for p in points {
        let xd = x - p[0];
        let yd = y - p[1];
        let d = (xd * xd + yd * yd).sqrt();
        sum += d;
        min = min.min(d);
    }
    (min, sum / points.len() as f32)
}

/// Grayscale pivot-distance noise
pub fn noisy(
    texture: &mut TextureBuffer,
    pivots: u32,
    rng: &mut impl Rng,
    sink: &mut dyn ProgressSink,
) {
    let points = scatter_points(pivots, rng);
    generate_custom(
        texture,
        |x, y| {
            let (min, avg) = distances(&points, x, y);
            let v = (dist_map(avg - min) * 255.0).ceil() as u8;
            Rgba::opaque(v, v, v)
        },
        sink,
    );
}

/// Colored pivot-distance noise; brightness shrinks as pivot count grows
pub fn wosy(
    texture: &mut TextureBuffer,
    pivots: u32,
    rng: &mut impl Rng,
    sink: &mut dyn ProgressSink,
) {
    let points = scatter_points(pivots, rng);
    let damping = ((pivots as f64 / 10.0).log10().max(1.0)) as f32;
    generate_custom(
        texture,
        |x, y| {
            let (min, avg) = distances(&points, x, y);
            Rgba::opaque(
                (dist_map(avg - min) * 255.0 / damping).ceil() as u8,
                (dist_map_sigmoid(min / avg) * 255.0 / damping).ceil() as u8,
                (dist_map(dist_map_sigmoid(min * avg)) * 255.0 / damping).ceil() as u8,
            )
        },
        sink,
    );
}

/// Directional pivot noise: each pivot carries two unit directions whose
/// projections tint the red/green channels around it
pub fn directional_noise(
    texture: &mut TextureBuffer,
    pivots: u32,
    rng: &mut impl Rng,
    sink: &mut dyn ProgressSink,
) {
    struct Pivot {
        pos: [f32; 2],
        dir_a: [f32; 2],
        dir_b: [f32; 2],
    }

    fn unit_dir(rng: &mut impl Rng) -> [f32; 2] {
        let x: f32 = rng.random();
        let y: f32 = rng.random();
        let norm = (x * x + y * y).sqrt();
        [x / norm, y / norm]
    }

    let points: Vec<Pivot> = (0..pivots)
        .map(|_| Pivot {
            pos: [rng.random(), rng.random()],
            dir_a: unit_dir(rng),
            dir_b: unit_dir(rng),
        })
        .collect();

    generate_custom(
        texture,
        |x, y| {
            let mut nearest_dist = f32::MAX;
            let mut sum = 0.0;
            let mut proj_a = 0.0;
            let mut proj_b = 0.0;
            for p in &points {
                let xd = x - p.pos[0];
                let yd = y - p.pos[1];
                let d = (xd * xd + yd * yd).sqrt();
                sum += d;
                if d < nearest_dist {
                    nearest_dist = d;
                    proj_a = xd * p.dir_a[0] + yd * p.dir_a[1];
                    proj_b = xd * p.dir_b[0] + yd * p.dir_b[1];
                }
            }
            let avg = sum / points.len() as f32;
            Rgba::opaque(
                (dist_map(0.5 * proj_a + 0.5) * 255.0).ceil() as u8,
                (dist_map_sigmoid(0.5 * proj_b + 0.5) * 200.0).ceil() as u8,
                (dist_map(avg - nearest_dist) * 255.0).ceil() as u8,
            )
        },
        sink,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_dist_map_ramp() {
        assert!(dist_map(0.0).abs() < 1e-6);
        assert!(dist_map(0.5) < dist_map(0.9));
    }

    #[test]
    fn test_noisy_is_grayscale_and_opaque() {
        let mut texture = TextureBuffer::new(16, 16);
        noisy(
            &mut texture,
            5,
            &mut SmallRng::seed_from_u64(11),
            &mut |_| true,
        );
        for p in texture.pixels() {
            assert_eq!(p.r, p.g);
            assert_eq!(p.g, p.b);
            assert_eq!(p.a, 255);
        }
    }

    #[test]
    fn test_wosy_is_deterministic_under_seed() {
        let mut a = TextureBuffer::new(16, 16);
        let mut b = TextureBuffer::new(16, 16);
        wosy(&mut a, 4, &mut SmallRng::seed_from_u64(2), &mut |_| true);
        wosy(&mut b, 4, &mut SmallRng::seed_from_u64(2), &mut |_| true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_directional_noise_fills_buffer() {
        let mut texture = TextureBuffer::new(8, 8);
        directional_noise(
            &mut texture,
            3,
            &mut SmallRng::seed_from_u64(5),
            &mut |_| true,
        );
        assert!(texture.pixels().iter().all(|p| p.a == 255));
    }
}
