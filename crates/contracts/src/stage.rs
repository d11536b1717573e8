//! Stage definitions
//!
//! A pipeline is an ordered chain of stages. The leading stage must be a
//! generator/input kind (it produces each worker's buffer); every later stage
//! must be a processor kind (it mutates an existing buffer).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Stage kind, used for pipe-legality checks and dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    /// Random-coefficient gradient generator
    Generate,
    /// Load source images from disk, one per worker
    Input,
    /// Pivot-distance noise generator (grayscale)
    Noisy,
    /// Pivot-distance noise generator (colored)
    Wosy,
    /// Directional pivot-noise generator
    DirectionalNoise,
    /// Save the buffer to disk
    Output,
    /// Box blur
    Blur,
    /// Draw randomly placed circles
    RandomCircles,
    /// Black out a normalized rectangle
    Room,
    /// Additive per-channel color correction
    ColorCorrection,
    /// Per-channel gamma curve
    GammaCorrection,
    /// Cross-product recoloring against pivot directions
    NoisyCross,
    /// Cross-product recoloring against a fixed point
    PointCross,
}

impl StageKind {
    /// Kinds that may start a chain (they produce a buffer)
    pub fn is_generator(self) -> bool {
        matches!(
            self,
            Self::Generate | Self::Input | Self::Noisy | Self::Wosy | Self::DirectionalNoise
        )
    }

    /// Kinds that may only be piped into (they mutate a buffer)
    pub fn is_processor(self) -> bool {
        !self.is_generator()
    }

    /// The command word users type for this kind
    pub fn command_name(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Input => "input",
            Self::Noisy => "noisy",
            Self::Wosy => "wosy",
            Self::DirectionalNoise => "dirsey",
            Self::Output => "output",
            Self::Blur => "blur",
            Self::RandomCircles => "randcir",
            Self::Room => "room",
            Self::ColorCorrection => "colorcor",
            Self::GammaCorrection => "gamma",
            Self::NoisyCross => "noicross",
            Self::PointCross => "pcross",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

/// One fully parsed pipeline stage with typed arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StageSpec {
    /// `generate <count> <width> <height>`
    Generate { count: u32, width: u32, height: u32 },
    /// `input <path>...` - one worker per path
    Input { paths: Vec<PathBuf> },
    /// `noisy <count> <pivots> <width> <height>`
    Noisy {
        count: u32,
        pivots: u32,
        width: u32,
        height: u32,
    },
    /// `wosy <count> <pivots> <width> <height>`
    Wosy {
        count: u32,
        pivots: u32,
        width: u32,
        height: u32,
    },
    /// `dirsey <count> <pivots> <width> <height>`
    DirectionalNoise {
        count: u32,
        pivots: u32,
        width: u32,
        height: u32,
    },
    /// `output <path>` - saved as `{stem}_{worker}.{ext}`
    Output { path: String },
    /// `blur <radius_x> <radius_y>`
    Blur { radius_x: u32, radius_y: u32 },
    /// `randcir <count> <radius>`
    RandomCircles { count: u32, radius: f32 },
    /// `room <x1> <y1> <x2> <y2>` - normalized coordinates
    Room { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// `colorcor <red> <green> <blue>`
    ColorCorrection { red: f32, green: f32, blue: f32 },
    /// `gamma <gamma>`
    GammaCorrection { gamma: f32 },
    /// `noicross <pivots> <mono>`
    NoisyCross { pivots: u32, mono: bool },
    /// `pcross <x> <y>` - normalized coordinates
    PointCross { x: f32, y: f32 },
}

impl StageSpec {
    /// Kind of this stage
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Generate { .. } => StageKind::Generate,
            Self::Input { .. } => StageKind::Input,
            Self::Noisy { .. } => StageKind::Noisy,
            Self::Wosy { .. } => StageKind::Wosy,
            Self::DirectionalNoise { .. } => StageKind::DirectionalNoise,
            Self::Output { .. } => StageKind::Output,
            Self::Blur { .. } => StageKind::Blur,
            Self::RandomCircles { .. } => StageKind::RandomCircles,
            Self::Room { .. } => StageKind::Room,
            Self::ColorCorrection { .. } => StageKind::ColorCorrection,
            Self::GammaCorrection { .. } => StageKind::GammaCorrection,
            Self::NoisyCross { .. } => StageKind::NoisyCross,
            Self::PointCross { .. } => StageKind::PointCross,
        }
    }
}
