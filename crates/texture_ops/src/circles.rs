//! Circle drawing

use contracts::{ProgressSink, Rgba, TextureBuffer};
use rand::Rng;

use crate::ProgressTicker;

/// One circle in normalized coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Randomly place `count` circles of a shared radius over the unit square
pub fn scatter_circles(count: u32, radius: f32, rng: &mut impl Rng) -> Vec<Circle> {
    (0..count)
        .map(|_| Circle {
            x: rng.random(),
            y: rng.random(),
            radius,
        })
        .collect()
}

/// Shade every circle into the buffer: bright at the center, falling off
/// radially, alpha-blended over the last 1% of the radius for a soft edge
pub fn draw_circles(texture: &mut TextureBuffer, circles: &[Circle], sink: &mut dyn ProgressSink) {
    let width = texture.width();
    let height = texture.height();
    let size = texture.len();
    let mut ticker = ProgressTicker::new(size);

    let radius_sq: Vec<f32> = circles.iter().map(|c| c.radius * c.radius).collect();

    for y in 0..height {
        let ny = y as f32 / (height - 1) as f32;
        for x in 0..width {
            let nx = x as f32 / (width - 1) as f32;
            let ind = texture.index(x, y);

            for (circle, r_sq) in circles.iter().zip(&radius_sq) {
                let dx = circle.x - nx;
                let dy = circle.y - ny;
                if dx.abs() > circle.radius || dy.abs() > circle.radius {
                    continue;
                }

                let d = 1.0 - (dx * dx + dy * dy) / r_sq;
                if d > 0.01 {
                    texture.pixels_mut()[ind] = Rgba::from_normalized(d, d, d, 1.0);
                } else if d > 0.0 {
                    let shade = Rgba::from_normalized(d, d, d, 1.0);
                    let current = texture.pixels()[ind];
                    texture.pixels_mut()[ind] = current.lerp(shade, d / 0.01);
                }
            }

            if !ticker.tick(ind, sink) {
                return;
            }
        }
    }
    sink.report(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_places_in_unit_square() {
        let circles = scatter_circles(20, 0.1, &mut SmallRng::seed_from_u64(4));
        assert_eq!(circles.len(), 20);
        for c in circles {
            assert!((0.0..=1.0).contains(&c.x));
            assert!((0.0..=1.0).contains(&c.y));
            assert_eq!(c.radius, 0.1);
        }
    }

    #[test]
    fn test_circle_center_is_bright() {
        let mut texture = TextureBuffer::new(32, 32);
        let circles = [Circle {
            x: 0.5,
            y: 0.5,
            radius: 0.3,
        }];
        draw_circles(&mut texture, &circles, &mut |_| true);

        let center = texture.pixels()[texture.index(16, 16)];
        assert!(center.r > 200);
        // A corner outside the circle stays untouched.
        let corner = texture.pixels()[0];
        assert_eq!(corner, Rgba::default());
    }

    #[test]
    fn test_shading_falls_off_with_distance() {
        let mut texture = TextureBuffer::new(64, 64);
        let circles = [Circle {
            x: 0.5,
            y: 0.5,
            radius: 0.4,
        }];
        draw_circles(&mut texture, &circles, &mut |_| true);

        let center = texture.pixels()[texture.index(32, 32)].r;
        let edgeward = texture.pixels()[texture.index(46, 32)].r;
        assert!(center > edgeward);
    }
}
