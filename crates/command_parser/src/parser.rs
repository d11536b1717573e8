//! Line tokenizing and per-command argument parsing

use std::path::PathBuf;

use contracts::{PipelineError, PipelineSpec, StageKind, StageSpec};

use crate::validator;
use crate::{Command, ParserOptions, ALL_STAGE_KINDS};

/// A recognized command word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word {
    Stage(StageKind),
    Help,
    DisableWarnings,
    Exit,
}

fn lookup(word: &str) -> Option<Word> {
    if let Some(kind) = ALL_STAGE_KINDS
        .iter()
        .find(|k| k.command_name() == word)
        .copied()
    {
        return Some(Word::Stage(kind));
    }
    match word {
        "help" => Some(Word::Help),
        "yolo" => Some(Word::DisableWarnings),
        "exit" => Some(Word::Exit),
        _ => None,
    }
}

pub(crate) fn parse_line(line: &str, options: &ParserOptions) -> Result<Command, PipelineError> {
    let line = line.trim();
    let segments: Vec<&str> = line.split('|').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(PipelineError::parse_syntax(
            "empty command in a pipe sequence",
        ));
    }

    let mut stages = Vec::with_capacity(segments.len());
    for (position, segment) in segments.iter().enumerate() {
        let mut tokens = segment.split_whitespace();
        // Command words are case-insensitive; arguments (paths) are not.
        let word = tokens.next().expect("segment verified non-empty").to_lowercase();
        let word = word.as_str();
        let args: Vec<&str> = tokens.collect();

        let Some(found) = lookup(word) else {
            return Err(PipelineError::parse_syntax(format!(
                "command '{word}' not found"
            )));
        };

        match found {
            Word::Stage(kind) if position == 0 => {
                if kind.is_processor() {
                    return Err(PipelineError::parse_syntax(format!(
                        "command '{word}' is used for processing and cannot start a chain; \
                         try piping into it"
                    )));
                }
                stages.push(parse_stage(kind, &args, options)?);
            }
            Word::Stage(kind) => {
                if !kind.is_processor() {
                    return Err(PipelineError::parse_syntax(format!(
                        "command '{word}' cannot be piped into"
                    )));
                }
                stages.push(parse_stage(kind, &args, options)?);
            }
            // Standalone verbs are only legal as a whole line.
            standalone => {
                if segments.len() > 1 {
                    return Err(PipelineError::parse_syntax(format!(
                        "command '{word}' is standalone and cannot be piped"
                    )));
                }
                return parse_standalone(standalone, &args);
            }
        }
    }

    Ok(Command::Pipeline(PipelineSpec::new(stages)))
}

fn parse_standalone(word: Word, args: &[&str]) -> Result<Command, PipelineError> {
    match word {
        Word::Help => match args {
            [] => Ok(Command::Help(None)),
            [topic] => match lookup(&topic.to_lowercase()) {
                Some(Word::Stage(kind)) => Ok(Command::Help(Some(kind))),
                _ => Err(PipelineError::parse_arguments(
                    "help",
                    format!("'{topic}' is not a recognized command name"),
                )),
            },
            _ => Err(PipelineError::parse_arguments(
                "help",
                "expects no arguments or a single command name",
            )),
        },
        Word::DisableWarnings => {
            expect_arity("yolo", args, 0)?;
            Ok(Command::DisableWarnings)
        }
        Word::Exit => {
            expect_arity("exit", args, 0)?;
            Ok(Command::Exit)
        }
        Word::Stage(_) => unreachable!("stages are handled by the chain loop"),
    }
}

fn parse_stage(
    kind: StageKind,
    args: &[&str],
    options: &ParserOptions,
) -> Result<StageSpec, PipelineError> {
    let command = kind.command_name();
    let stage = match kind {
        StageKind::Generate => {
            expect_arity(command, args, 3)?;
            StageSpec::Generate {
                count: parse_u32(command, args, 0)?,
                width: parse_u32(command, args, 1)?,
                height: parse_u32(command, args, 2)?,
            }
        }
        StageKind::Input => {
            if args.is_empty() {
                return Err(PipelineError::parse_arguments(
                    command,
                    "expects at least 1 filepath",
                ));
            }
            StageSpec::Input {
                paths: args.iter().map(PathBuf::from).collect(),
            }
        }
        StageKind::Noisy | StageKind::Wosy | StageKind::DirectionalNoise => {
            expect_arity(command, args, 4)?;
            let count = parse_u32(command, args, 0)?;
            let pivots = parse_u32(command, args, 1)?;
            let width = parse_u32(command, args, 2)?;
            let height = parse_u32(command, args, 3)?;
            match kind {
                StageKind::Noisy => StageSpec::Noisy {
                    count,
                    pivots,
                    width,
                    height,
                },
                StageKind::Wosy => StageSpec::Wosy {
                    count,
                    pivots,
                    width,
                    height,
                },
                _ => StageSpec::DirectionalNoise {
                    count,
                    pivots,
                    width,
                    height,
                },
            }
        }
        StageKind::Output => {
            expect_arity(command, args, 1)?;
            StageSpec::Output {
                path: args[0].to_string(),
            }
        }
        StageKind::Blur => {
            expect_arity(command, args, 2)?;
            StageSpec::Blur {
                radius_x: parse_u32(command, args, 0)?,
                radius_y: parse_u32(command, args, 1)?,
            }
        }
        StageKind::RandomCircles => {
            expect_arity(command, args, 2)?;
            StageSpec::RandomCircles {
                count: parse_u32(command, args, 0)?,
                radius: parse_f32(command, args, 1)?,
            }
        }
        StageKind::Room => {
            expect_arity(command, args, 4)?;
            StageSpec::Room {
                x1: parse_f32(command, args, 0)?,
                y1: parse_f32(command, args, 1)?,
                x2: parse_f32(command, args, 2)?,
                y2: parse_f32(command, args, 3)?,
            }
        }
        StageKind::ColorCorrection => {
            expect_arity(command, args, 3)?;
            StageSpec::ColorCorrection {
                red: parse_f32(command, args, 0)?,
                green: parse_f32(command, args, 1)?,
                blue: parse_f32(command, args, 2)?,
            }
        }
        StageKind::GammaCorrection => {
            expect_arity(command, args, 1)?;
            StageSpec::GammaCorrection {
                gamma: parse_f32(command, args, 0)?,
            }
        }
        StageKind::NoisyCross => {
            expect_arity(command, args, 2)?;
            StageSpec::NoisyCross {
                pivots: parse_u32(command, args, 0)?,
                mono: parse_bool(command, args, 1)?,
            }
        }
        StageKind::PointCross => {
            expect_arity(command, args, 2)?;
            StageSpec::PointCross {
                x: parse_f32(command, args, 0)?,
                y: parse_f32(command, args, 1)?,
            }
        }
    };

    validator::check_stage(&stage, options)?;
    Ok(stage)
}

fn expect_arity(command: &str, args: &[&str], expected: usize) -> Result<(), PipelineError> {
    if args.len() != expected {
        return Err(PipelineError::parse_arguments(
            command,
            format!("expects {expected} arguments, found {}", args.len()),
        ));
    }
    Ok(())
}

fn parse_u32(command: &str, args: &[&str], index: usize) -> Result<u32, PipelineError> {
    args[index].parse().map_err(|_| {
        PipelineError::parse_arguments(
            command,
            format!(
                "argument {}: '{}' is not a non-negative integer",
                index + 1,
                args[index]
            ),
        )
    })
}

fn parse_f32(command: &str, args: &[&str], index: usize) -> Result<f32, PipelineError> {
    args[index].parse().map_err(|_| {
        PipelineError::parse_arguments(
            command,
            format!(
                "argument {}: '{}' is not a number (for fractions try 0.5)",
                index + 1,
                args[index]
            ),
        )
    })
}

fn parse_bool(command: &str, args: &[&str], index: usize) -> Result<bool, PipelineError> {
    args[index].parse().map_err(|_| {
        PipelineError::parse_arguments(
            command,
            format!(
                "argument {}: '{}' is not 'true' or 'false'",
                index + 1,
                args[index]
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(line: &str) -> Command {
        parse_line(line, &ParserOptions::default()).unwrap()
    }

    fn parse_err(line: &str) -> PipelineError {
        parse_line(line, &ParserOptions::default()).unwrap_err()
    }

    #[test]
    fn test_full_chain_parses() {
        let Command::Pipeline(spec) =
            parse_ok("generate 3 256 256 | blur 2 2 | gamma 0.8 | output img.png")
        else {
            panic!("expected pipeline");
        };
        assert_eq!(spec.stage_count(), 4);
        assert_eq!(spec.worker_count(), Some(3));
        assert_eq!(spec.leading_kind(), StageKind::Generate);
    }

    #[test]
    fn test_case_and_whitespace_are_forgiven() {
        let Command::Pipeline(spec) = parse_ok("  GENERATE 1 32 32  |   GAMMA 1.0 ") else {
            panic!("expected pipeline");
        };
        assert_eq!(spec.stage_count(), 2);
    }

    #[test]
    fn test_unknown_command_rejected() {
        let err = parse_err("frobnicate 1 2 3");
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_empty_pipe_segment_rejected() {
        let err = parse_err("generate 1 32 32 | | gamma 0.5");
        assert!(err.to_string().contains("empty command"));
    }

    #[test]
    fn test_processor_cannot_lead() {
        let err = parse_err("blur 2 2");
        assert!(err.to_string().contains("cannot start a chain"));
    }

    #[test]
    fn test_generator_cannot_be_piped_into() {
        let err = parse_err("generate 1 32 32 | noisy 1 4 32 32");
        assert!(err.to_string().contains("cannot be piped into"));
    }

    #[test]
    fn test_standalone_cannot_be_piped() {
        let err = parse_err("exit | gamma 0.5");
        assert!(err.to_string().contains("standalone"));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let err = parse_err("generate 1 32");
        assert!(err.to_string().contains("expects 3 arguments"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = parse_err("generate one 32 32");
        assert!(err.to_string().contains("argument 1"));
    }

    #[test]
    fn test_bool_argument() {
        let Command::Pipeline(spec) = parse_ok("generate 1 32 32 | noicross 5 true") else {
            panic!("expected pipeline");
        };
        assert_eq!(
            spec.stages()[1],
            StageSpec::NoisyCross {
                pivots: 5,
                mono: true
            }
        );
        assert!(parse_line("generate 1 32 32 | noicross 5 yes", &ParserOptions::default()).is_err());
    }

    #[test]
    fn test_standalone_commands() {
        assert_eq!(parse_ok("exit"), Command::Exit);
        assert_eq!(parse_ok("yolo"), Command::DisableWarnings);
        assert_eq!(parse_ok("help"), Command::Help(None));
        assert_eq!(parse_ok("help blur"), Command::Help(Some(StageKind::Blur)));
    }

    #[test]
    fn test_help_rejects_unknown_topic() {
        let err = parse_err("help frobnicate");
        assert!(err.to_string().contains("not a recognized command"));
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = parse_err("generate -3 32 32");
        assert!(err.to_string().contains("argument 1"));
    }
}
