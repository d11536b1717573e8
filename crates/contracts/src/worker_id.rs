//! WorkerId newtype
//!
//! Identifies one worker (and therefore one output image, one buffer, and one
//! progress slot) within a run. Ids are dense: `0..worker_count`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Worker identifier, stable for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(pub usize);

impl WorkerId {
    /// Index into per-worker tables
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for WorkerId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}
