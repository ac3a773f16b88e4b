use std::sync::Arc;

use tracing::info;

use crate::asset::VideoAsset;
use crate::compose::compose_views;
use crate::config::DirectorConfig;
use crate::error::Result;
use crate::render::render_path;
use crate::score::GlimpseScorer;
use crate::scorespace::ScoreSpace;
use crate::split::split_video;

use super::types::{DirectorOutput, DirectorStage, NoOpReporter, ProgressReporter};

/// File the score grid snapshot is written to, for offline inspection.
const SNAPSHOT_NAME: &str = "scores.json";

/// Run the full direction pipeline: split the source, compose and score a
/// view per candidate direction per segment, solve for the best smooth
/// path, and render it.
pub fn run_director(
    asset: &VideoAsset,
    config: &DirectorConfig,
    scorer: &dyn GlimpseScorer,
) -> Result<DirectorOutput> {
    run_director_reported(asset, config, scorer, Arc::new(NoOpReporter))
}

/// Run the full direction pipeline with a thread-safe progress reporter.
pub fn run_director_reported(
    asset: &VideoAsset,
    config: &DirectorConfig,
    scorer: &dyn GlimpseScorer,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<DirectorOutput> {
    let workdir = asset.ensure_workdir()?;
    info!(
        source = %asset.path.display(),
        fps = asset.fps,
        frames = asset.total_frames,
        "directing"
    );

    reporter.begin_stage(DirectorStage::Splitting, None);
    let segments = split_video(asset, config, &workdir)?;
    reporter.finish_stage();

    let grid = &config.grid;
    let directions = grid.phi_count() * grid.lambda_count();
    let mut space = ScoreSpace::new(segments.len(), grid.clone(), config.smoothness_weight);

    reporter.begin_stage(DirectorStage::Scoring, Some(directions));
    let mut done = 0;
    for phi_index in 0..grid.phi_count() {
        for lambda_index in 0..grid.lambda_count() {
            let views = compose_views(asset, &segments, phi_index, lambda_index, config, &workdir)?;
            for view in &views {
                let score = scorer.score_view(view)?;
                space.set(view.segment_index, phi_index, lambda_index, score);
            }
            done += 1;
            reporter.advance(done);
        }
    }
    reporter.finish_stage();

    // Kept on disk next to the outputs so a scoring run can be replayed
    // without recomputing every view.
    space.save_snapshot(&workdir.join(SNAPSHOT_NAME))?;

    reporter.begin_stage(DirectorStage::Solving, None);
    let path = space.best_path()?;
    reporter.finish_stage();

    reporter.begin_stage(DirectorStage::Rendering, None);
    let output = render_path(asset, &path, config, &workdir)?;
    reporter.finish_stage();

    info!(output = %output.path.display(), "directing complete");
    Ok(DirectorOutput {
        segments,
        path,
        output,
    })
}
