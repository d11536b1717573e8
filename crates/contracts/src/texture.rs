//! Pixel and buffer types
//!
//! `TextureBuffer` is the unit of work: each worker owns exactly one for the
//! run's duration. Stage routines receive it by mutable borrow and never hold
//! it across calls.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// One RGBA8 pixel, laid out to match the common raster byte order
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully opaque pixel from byte channels
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pixel from normalized channels, saturating at the byte range
    pub fn from_normalized(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (r * 255.0) as u8,
            g: (g * 255.0) as u8,
            b: (b * 255.0) as u8,
            a: (a * 255.0) as u8,
        }
    }

    /// Linear interpolation toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |l: u8, r: u8| (l as f32 * (1.0 - t) + t * r as f32) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// One worker's image buffer
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl TextureBuffer {
    /// Allocate a zeroed (transparent black) buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::default(); (width * height) as usize],
        }
    }

    /// Wrap an existing pixel vector.
    ///
    /// # Panics
    /// Panics if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Self {
        assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major index of (x, y)
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Raw RGBA8 bytes, for encode/decode boundaries
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Build a buffer from raw RGBA8 bytes.
    ///
    /// # Panics
    /// Panics if `bytes.len() != width * height * 4`.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Self {
        let pixels: Vec<Rgba> = bytemuck::cast_slice(bytes).to_vec();
        Self::from_pixels(width, height, pixels)
    }
}
