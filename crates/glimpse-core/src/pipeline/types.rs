use crate::asset::Segment;
use crate::render::RenderedOutput;
use crate::scorespace::Waypoint;

/// Director pipeline stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum DirectorStage {
    Splitting,
    Scoring,
    Solving,
    Rendering,
}

impl std::fmt::Display for DirectorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Splitting => write!(f, "Splitting source"),
            Self::Scoring => write!(f, "Composing and scoring views"),
            Self::Solving => write!(f, "Solving path"),
            Self::Rendering => write!(f, "Rendering output"),
        }
    }
}

/// Everything the director produced: the segment plan, the chosen path,
/// and the final rendered video.
#[derive(Clone, Debug)]
pub struct DirectorOutput {
    pub segments: Vec<Segment>,
    pub path: Vec<Waypoint>,
    pub output: RenderedOutput,
}

/// Thread-safe progress reporting for the director pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage (e.g., candidate directions), if known.
    fn begin_stage(&self, _stage: DirectorStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_director` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
