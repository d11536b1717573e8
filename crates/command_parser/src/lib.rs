//! # Command Parser
//!
//! Turns one typed command line into a validated [`Command`]. Pipelines are
//! pipe-chains of stage commands; everything a stage needs (arity, types,
//! value ranges, pipe legality, readable input files) is checked here, so the
//! runner can treat the resulting [`PipelineSpec`] as trusted.
//!
//! # Example
//!
//! ```
//! use command_parser::{parse, Command, ParserOptions};
//!
//! let options = ParserOptions::default();
//! match parse("generate 3 256 256 | blur 2 2 | output img.png", &options) {
//!     Ok(Command::Pipeline(spec)) => assert_eq!(spec.stage_count(), 3),
//!     other => panic!("unexpected parse result: {other:?}"),
//! }
//! ```

mod parser;
mod validator;

use contracts::{PipelineError, PipelineSpec, StageKind};

/// Parser behavior switches, owned by the caller (the shell)
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Reject counts above this value until the user opts out with `yolo`
    pub large_count_limit: Option<u32>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            large_count_limit: Some(100),
        }
    }
}

impl ParserOptions {
    /// Lift the large-count warning, as the `yolo` command does
    pub fn disable_warnings(&mut self) {
        self.large_count_limit = None;
    }
}

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A runnable stage chain
    Pipeline(PipelineSpec),
    /// `help [command]`
    Help(Option<StageKind>),
    /// `yolo` - lift value warnings for the rest of the session
    DisableWarnings,
    /// `exit`
    Exit,
}

/// Parse one command line
pub fn parse(line: &str, options: &ParserOptions) -> Result<Command, PipelineError> {
    parser::parse_line(line, options)
}

/// Usage line for one stage command, shown by `help` and `commands`
pub fn usage(kind: StageKind) -> &'static str {
    match kind {
        StageKind::Generate => "generate <count> <width> <height> - gradient images",
        StageKind::Input => "input <path>... - load one image per path",
        StageKind::Noisy => "noisy <count> <pivots> <width> <height> - grayscale pivot noise",
        StageKind::Wosy => "wosy <count> <pivots> <width> <height> - colored pivot noise",
        StageKind::DirectionalNoise => {
            "dirsey <count> <pivots> <width> <height> - directional pivot noise"
        }
        StageKind::Output => "output <path> - save as {path}_{worker}.{ext}, default jpg",
        StageKind::Blur => "blur <radius_x> <radius_y> - box blur",
        StageKind::RandomCircles => "randcir <count> <radius> - draw random circles",
        StageKind::Room => "room <x1> <y1> <x2> <y2> - black out a rectangle, coords in [0,1]",
        StageKind::ColorCorrection => "colorcor <red> <green> <blue> - additive channel shift",
        StageKind::GammaCorrection => "gamma <gamma> - per-channel power curve",
        StageKind::NoisyCross => "noicross <pivots> <mono> - cross-product recolor by pivots",
        StageKind::PointCross => "pcross <x> <y> - cross-product recolor by a point",
    }
}

/// Every stage command with its usage line, in help order
pub fn command_summaries() -> Vec<&'static str> {
    ALL_STAGE_KINDS.iter().map(|k| usage(*k)).collect()
}

pub(crate) const ALL_STAGE_KINDS: [StageKind; 13] = [
    StageKind::Generate,
    StageKind::Input,
    StageKind::Noisy,
    StageKind::Wosy,
    StageKind::DirectionalNoise,
    StageKind::Output,
    StageKind::Blur,
    StageKind::RandomCircles,
    StageKind::Room,
    StageKind::ColorCorrection,
    StageKind::GammaCorrection,
    StageKind::NoisyCross,
    StageKind::PointCross,
];
