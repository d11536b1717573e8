//! Per-pixel transforms
//!
//! `process_pixels` walks the buffer handing each pixel's current color to a
//! transform; the result is alpha-blended back, so a transform controls its
//! own write strength through the alpha it returns.

use contracts::{ProgressSink, Rgba, TextureBuffer};
use rand::Rng;

use crate::ProgressTicker;

/// Apply a color transform to every pixel, alpha-lerped into the buffer
pub fn process_pixels(
    texture: &mut TextureBuffer,
    color: impl Fn(f32, f32, Rgba) -> Rgba,
    sink: &mut dyn ProgressSink,
) {
    let width = texture.width();
    let height = texture.height();
    let size = texture.len();
    let mut ticker = ProgressTicker::new(size);

    for y in 0..height {
        let ny = y as f32 / (height - 1) as f32;
        for x in 0..width {
            let nx = x as f32 / (width - 1) as f32;
            let ind = texture.index(x, y);

            let current = texture.pixels()[ind];
            let new = color(nx, ny, current);
            texture.pixels_mut()[ind] = current.lerp(new, new.a as f32 / 255.0);

            if !ticker.tick(ind, sink) {
                return;
            }
        }
    }
    sink.report(1.0);
}

/// Black out the normalized rectangle (x1, y1)..(x2, y2)
pub fn room(
    texture: &mut TextureBuffer,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    sink: &mut dyn ProgressSink,
) {
    process_pixels(
        texture,
        |x, y, current| {
            if x > x1 && x < x2 && y > y1 && y < y2 {
                Rgba::opaque(0, 0, 0)
            } else {
                current
            }
        },
        sink,
    );
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn ceil_byte(v: f32) -> u8 {
    (v * 255.0).ceil() as u8
}

/// Recolor each pixel by the cross product of its offset from a fixed point
/// and its own normalized color
pub fn point_cross(texture: &mut TextureBuffer, px: f32, py: f32, sink: &mut dyn ProgressSink) {
    process_pixels(
        texture,
        |x, y, current| {
            let xd = x - px;
            let yd = y - py;
            let offset = [xd, yd, (xd * xd + yd * yd).sqrt()];
            let tint = [
                current.r as f32 / 255.0,
                current.g as f32 / 255.0,
                current.b as f32 / 255.0,
            ];
            let c = cross(offset, tint);
            Rgba::opaque(ceil_byte(c[0]), ceil_byte(c[1]), ceil_byte(c[2]))
        },
        sink,
    );
}

/// Recolor each pixel by the cross product of its color and the direction
/// carried by the nearest random pivot
pub fn noisy_cross(
    texture: &mut TextureBuffer,
    pivots: u32,
    mono: bool,
    rng: &mut impl Rng,
    sink: &mut dyn ProgressSink,
) {
    struct Pivot {
        pos: [f32; 2],
        dir: [f32; 3],
    }

    let points: Vec<Pivot> = (0..pivots)
        .map(|_| {
            let dir: [f32; 3] = [rng.random(), rng.random(), rng.random()];
            let norm = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
            Pivot {
                pos: [rng.random(), rng.random()],
                dir: [dir[0] / norm, dir[1] / norm, dir[2] / norm],
            }
        })
        .collect();

    process_pixels(
        texture,
        |x, y, current| {
            let mut nearest = [0.0, 0.0, 0.0];
            let mut nearest_dist = f32::MAX;
            for p in &points {
                let xd = x - p.pos[0];
                let yd = y - p.pos[1];
                let d = (xd * xd + yd * yd).sqrt();
                if d < nearest_dist {
                    nearest_dist = d;
                    nearest = p.dir;
                }
            }
            let tint = [
                current.r as f32 / 255.0,
                current.g as f32 / 255.0,
                current.b as f32 / 255.0,
            ];
            let c = cross(tint, nearest);
            let r = ceil_byte(c[0]);
            if mono {
                Rgba::opaque(r, r, r)
            } else {
                Rgba::opaque(r, ceil_byte(c[1]), ceil_byte(c[2]))
            }
        },
        sink,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn solid(width: u32, height: u32, color: Rgba) -> TextureBuffer {
        TextureBuffer::from_pixels(width, height, vec![color; (width * height) as usize])
    }

    #[test]
    fn test_room_blacks_inside_only() {
        let mut texture = solid(10, 10, Rgba::opaque(200, 200, 200));
        room(&mut texture, 0.25, 0.25, 0.75, 0.75, &mut |_| true);

        let center = texture.pixels()[texture.index(5, 5)];
        assert_eq!(center, Rgba::opaque(0, 0, 0));

        let corner = texture.pixels()[texture.index(0, 0)];
        assert_eq!(corner, Rgba::opaque(200, 200, 200));
    }

    #[test]
    fn test_process_pixels_respects_alpha() {
        let mut texture = solid(4, 4, Rgba::opaque(100, 100, 100));
        // Zero-alpha transform writes nothing.
        process_pixels(
            &mut texture,
            |_, _, _| Rgba {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            },
            &mut |_| true,
        );
        assert!(texture
            .pixels()
            .iter()
            .all(|p| *p == Rgba::opaque(100, 100, 100)));
    }

    #[test]
    fn test_point_cross_rewrites_colors() {
        let mut texture = solid(8, 8, Rgba::opaque(30, 90, 200));
        point_cross(&mut texture, 0.5, 0.5, &mut |_| true);
        assert!(texture.pixels().iter().all(|p| p.a == 255));
        // The cross of non-parallel vectors is nonzero somewhere.
        assert!(texture
            .pixels()
            .iter()
            .any(|p| *p != Rgba::opaque(30, 90, 200)));
    }

    #[test]
    fn test_noisy_cross_mono_collapses_channels() {
        let mut texture = solid(8, 8, Rgba::opaque(10, 120, 240));
        noisy_cross(
            &mut texture,
            4,
            true,
            &mut SmallRng::seed_from_u64(9),
            &mut |_| true,
        );
        for p in texture.pixels() {
            assert_eq!(p.r, p.g);
            assert_eq!(p.g, p.b);
        }
    }
}
