//! Color and gamma correction

use contracts::{ProgressSink, TextureBuffer};

use crate::ProgressTicker;

/// Add a normalized offset to each channel, clamped to the byte range.
/// Negative offsets darken.
pub fn color_correction(
    texture: &mut TextureBuffer,
    red: f32,
    green: f32,
    blue: f32,
    sink: &mut dyn ProgressSink,
) {
    let size = texture.len();
    let mut ticker = ProgressTicker::new(size);
    let shift = |channel: u8, offset: f32| (channel as f32 + offset * 255.0).clamp(0.0, 255.0) as u8;

    for ind in 0..size {
        let p = &mut texture.pixels_mut()[ind];
        p.r = shift(p.r, red);
        p.g = shift(p.g, green);
        p.b = shift(p.b, blue);

        if !ticker.tick(ind, sink) {
            return;
        }
    }
    sink.report(1.0);
}

/// Apply a power curve to each color channel; alpha is untouched
pub fn gamma_correction(texture: &mut TextureBuffer, gamma: f32, sink: &mut dyn ProgressSink) {
    let size = texture.len();
    let mut ticker = ProgressTicker::new(size);
    let curve = |channel: u8| ((channel as f32 / 255.0).powf(gamma) * 255.0) as u8;

    for ind in 0..size {
        let p = &mut texture.pixels_mut()[ind];
        p.r = curve(p.r);
        p.g = curve(p.g);
        p.b = curve(p.b);

        if !ticker.tick(ind, sink) {
            return;
        }
    }
    sink.report(1.0);
}
