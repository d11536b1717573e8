//! PipelineSpec - a validated, immutable chain of stages
//!
//! Produced by the command parser, shared read-only by all workers. The worker
//! count is derived from the leading stage: input chains get one worker per
//! source path, generator chains carry an explicit count argument.

use serde::{Deserialize, Serialize};

use crate::{StageKind, StageSpec};

/// Validated ordered list of stages with concrete arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    stages: Vec<StageSpec>,
}

impl PipelineSpec {
    /// Build a spec from parsed stages.
    ///
    /// The parser guarantees pipe legality; this constructor only stores.
    pub fn new(stages: Vec<StageSpec>) -> Self {
        debug_assert!(!stages.is_empty());
        Self { stages }
    }

    /// All stages in execution order
    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// The leading (generator/input) stage
    pub fn leading(&self) -> &StageSpec {
        &self.stages[0]
    }

    /// Number of stages each worker executes
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of workers this pipeline fans out to.
    ///
    /// Returns `None` when the leading stage is not a generator/input kind,
    /// which a correctly validated spec never exhibits.
    pub fn worker_count(&self) -> Option<usize> {
        match self.leading() {
            StageSpec::Generate { count, .. }
            | StageSpec::Noisy { count, .. }
            | StageSpec::Wosy { count, .. }
            | StageSpec::DirectionalNoise { count, .. } => Some(*count as usize),
            StageSpec::Input { paths } => Some(paths.len()),
            _ => None,
        }
    }

    /// Kind of the leading stage
    pub fn leading_kind(&self) -> StageKind {
        self.leading().kind()
    }
}
