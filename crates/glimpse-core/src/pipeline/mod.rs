mod orchestrator;
mod types;

pub use orchestrator::{run_director, run_director_reported};
pub use types::{DirectorOutput, DirectorStage, ProgressReporter};
