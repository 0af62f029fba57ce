use std::fmt::{self, Display};

use sieve_core::errors::{SieveError, Stage};

///
/// Observable state of a pipeline run. `Published` and `Failed` are terminal.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Running(Stage),
    Published,
    Failed(SieveError),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Published | PipelineState::Failed(_))
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Running(stage) => Some(*stage),
            PipelineState::Failed(err) => Some(err.stage()),
            _ => None,
        }
    }
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Pending => write!(f, "Pending"),
            PipelineState::Running(stage) => write!(f, "{}", stage),
            PipelineState::Published => write!(f, "Published"),
            PipelineState::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}
