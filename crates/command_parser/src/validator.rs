//! Value-range validation
//!
//! Typed arguments are checked here after parsing: positive counts and
//! dimensions, normalized coordinates, the large-count warning, and input
//! paths that must point at decodable images before a run may start.

use std::path::Path;

use contracts::{PipelineError, StageSpec};
use image::ImageReader;

use crate::ParserOptions;

/// Verify a path points at a decodable image without decoding the pixels
fn probe(path: &Path) -> Result<(), PipelineError> {
    ImageReader::open(path)
        .map_err(|e| PipelineError::image_decode(path.display().to_string(), e.to_string()))?
        .into_dimensions()
        .map_err(|e| PipelineError::image_decode(path.display().to_string(), e.to_string()))?;
    Ok(())
}

pub(crate) fn check_stage(stage: &StageSpec, options: &ParserOptions) -> Result<(), PipelineError> {
    let command = stage.kind().command_name();
    match stage {
        StageSpec::Generate {
            count,
            width,
            height,
        } => {
            check_count(command, *count, options)?;
            check_dimensions(command, *width, *height)
        }
        StageSpec::Noisy {
            count,
            pivots,
            width,
            height,
        }
        | StageSpec::Wosy {
            count,
            pivots,
            width,
            height,
        }
        | StageSpec::DirectionalNoise {
            count,
            pivots,
            width,
            height,
        } => {
            check_count(command, *count, options)?;
            check_positive(command, "pivots", *pivots)?;
            check_dimensions(command, *width, *height)
        }
        StageSpec::Input { paths } => {
            for path in paths {
                probe(path)?;
            }
            Ok(())
        }
        StageSpec::RandomCircles { count, .. } => check_count(command, *count, options),
        StageSpec::NoisyCross { pivots, .. } => {
            check_positive(command, "pivots", *pivots)?;
            check_limit(command, *pivots, options)
        }
        StageSpec::Room { x1, y1, x2, y2 } => {
            check_normalized(command, &[("x1", *x1), ("y1", *y1), ("x2", *x2), ("y2", *y2)])
        }
        StageSpec::PointCross { x, y } => check_normalized(command, &[("x", *x), ("y", *y)]),
        StageSpec::Output { .. }
        | StageSpec::Blur { .. }
        | StageSpec::ColorCorrection { .. }
        | StageSpec::GammaCorrection { .. } => Ok(()),
    }
}

fn check_count(command: &str, count: u32, options: &ParserOptions) -> Result<(), PipelineError> {
    check_positive(command, "count", count)?;
    check_limit(command, count, options)
}

fn check_positive(command: &str, name: &str, value: u32) -> Result<(), PipelineError> {
    if value == 0 {
        return Err(PipelineError::parse_arguments(
            command,
            format!("{name} must be a positive integer"),
        ));
    }
    Ok(())
}

fn check_limit(command: &str, value: u32, options: &ParserOptions) -> Result<(), PipelineError> {
    if let Some(limit) = options.large_count_limit {
        if value > limit {
            return Err(PipelineError::parse_arguments(
                command,
                format!(
                    "{value} is too large, recommended value <= {limit}; \
                     type 'yolo' to disable this warning"
                ),
            ));
        }
    }
    Ok(())
}

fn check_dimensions(command: &str, width: u32, height: u32) -> Result<(), PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::parse_arguments(
            command,
            "width and height must be positive integers",
        ));
    }
    Ok(())
}

fn check_normalized(command: &str, values: &[(&str, f32)]) -> Result<(), PipelineError> {
    for (name, value) in values {
        if !(0.0..=1.0).contains(value) {
            return Err(PipelineError::parse_arguments(
                command,
                format!("{name} must belong to the range [0,1], found {value}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Command};

    fn lenient() -> ParserOptions {
        ParserOptions {
            large_count_limit: None,
        }
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = parse("generate 0 32 32", &ParserOptions::default()).unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = parse("generate 1 0 32", &ParserOptions::default()).unwrap_err();
        assert!(err.to_string().contains("width and height"));
    }

    #[test]
    fn test_large_count_warns_until_yolo() {
        let strict = ParserOptions::default();
        let err = parse("generate 500 32 32", &strict).unwrap_err();
        assert!(err.to_string().contains("yolo"));

        let ok = parse("generate 500 32 32", &lenient());
        assert!(matches!(ok, Ok(Command::Pipeline(_))));
    }

    #[test]
    fn test_limit_applies_to_circle_and_pivot_counts() {
        let strict = ParserOptions::default();
        assert!(parse("generate 1 32 32 | randcir 101 0.1", &strict).is_err());
        assert!(parse("generate 1 32 32 | noicross 101 false", &strict).is_err());
        assert!(parse("generate 1 32 32 | randcir 101 0.1", &lenient()).is_ok());
    }

    #[test]
    fn test_room_bounds() {
        let err = parse("generate 1 32 32 | room 0.2 0.2 1.5 0.8", &ParserOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("[0,1]"));
    }

    #[test]
    fn test_pcross_bounds() {
        let err =
            parse("generate 1 32 32 | pcross -0.1 0.5", &ParserOptions::default()).unwrap_err();
        assert!(err.to_string().contains("[0,1]"));
    }

    #[test]
    fn test_input_requires_readable_images() {
        let err = parse("input nothing/here.png", &ParserOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::ImageDecode { .. }));
    }

    #[test]
    fn test_input_accepts_real_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let line = format!("input {}", path.display());
        let parsed = parse(&line, &ParserOptions::default()).unwrap();
        let Command::Pipeline(spec) = parsed else {
            panic!("expected pipeline");
        };
        assert_eq!(spec.worker_count(), Some(1));
    }
}
