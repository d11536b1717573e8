//! Box blur via summed-area tables
//!
//! Two passes: build per-channel prefix sums (progress is reported here, this
//! is the expensive pass), then average each pixel's window with four table
//! lookups. Window extent is `(2 * radius + 1)` per axis, clamped at the
//! borders.

use contracts::{ProgressSink, TextureBuffer};

use crate::ProgressTicker;

pub fn blur(
    texture: &mut TextureBuffer,
    radius_x: u32,
    radius_y: u32,
    sink: &mut dyn ProgressSink,
) {
    let width = texture.width() as usize;
    let height = texture.height() as usize;
    let size = width * height;
    if size == 0 {
        sink.report(1.0);
        return;
    }
    let rx = radius_x as isize;
    let ry = radius_y as isize;
    let mut ticker = ProgressTicker::new(size);

    let mut sums = vec![[0i64; 4]; size];
    let channels = |p: contracts::Rgba| [p.r as i64, p.g as i64, p.b as i64, p.a as i64];

    {
        let pixels = texture.pixels();
        for x in 0..width {
            sums[x] = channels(pixels[x]);
        }
        for y in 1..height {
            sums[y * width] = channels(pixels[y * width]);
        }
        for y in 1..height {
            for x in 1..width {
                let ind = y * width + x;
                let c = channels(pixels[ind]);
                for i in 0..4 {
                    sums[ind][i] =
                        c[i] + sums[ind - width][i] + sums[ind - 1][i] - sums[ind - width - 1][i];
                }
                if !ticker.tick(ind, sink) {
                    return;
                }
            }
        }
    }

    let pixels = texture.pixels_mut();
    for y in 0..height as isize {
        for x in 0..width as isize {
            let min_x = (x - rx - 1).max(0) as usize;
            let max_x = (x + rx).min(width as isize - 1) as usize;
            let min_y = (y - ry - 1).max(0) as usize;
            let max_y = (y + ry).min(height as isize - 1) as usize;

            let area = ((max_x - min_x) * (max_y - min_y)).max(1) as i64;
            let window = |i: usize| {
                (sums[max_y * width + max_x][i] - sums[max_y * width + min_x][i]
                    - sums[min_y * width + max_x][i]
                    + sums[min_y * width + min_x][i])
                    / area
            };

            let p = &mut pixels[y as usize * width + x as usize];
            p.r = window(0).clamp(0, 255) as u8;
            p.g = window(1).clamp(0, 255) as u8;
            p.b = window(2).clamp(0, 255) as u8;
            p.a = window(3).clamp(0, 255) as u8;
        }
    }
    sink.report(1.0);
}
