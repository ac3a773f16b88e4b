use ndarray::Array2;
use rayon::prelude::*;

use crate::asset::View;
use crate::consts::SCORING_BATCH_SIZE;
use crate::error::Result;
use crate::frame::Frame;
use crate::io::ser::SerReader;

use super::GlimpseScorer;

/// Compute Laplacian variance of a frame — higher means sharper.
///
/// Convolves with the 3x3 Laplacian kernel:
///   0  1  0
///   1 -4  1
///   0  1  0
/// Then returns the variance of the result.
pub fn laplacian_variance(frame: &Frame) -> f64 {
    laplacian_variance_array(&frame.data)
}

pub fn laplacian_variance_array(data: &Array2<f32>) -> f64 {
    let (h, w) = data.dim();
    if h < 3 || w < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let count = ((h - 2) * (w - 2)) as f64;

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let lap = -4.0 * data[[row, col]] as f64
                + data[[row - 1, col]] as f64
                + data[[row + 1, col]] as f64
                + data[[row, col - 1]] as f64
                + data[[row, col + 1]] as f64;
            sum += lap;
            sum_sq += lap * lap;
        }
    }

    let mean = sum / count;
    sum_sq / count - mean * mean
}

/// Built-in scorer: a view's desirability is the mean Laplacian variance
/// over its frames, favoring directions with sharp detail.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaplacianScorer;

impl GlimpseScorer for LaplacianScorer {
    /// Frames are read in batches of [`SCORING_BATCH_SIZE`] and scored in
    /// parallel, then dropped before the next batch is decoded.
    fn score_view(&self, view: &View) -> Result<f64> {
        let reader = SerReader::open(&view.path)?;
        let total = reader.frame_count();
        if total == 0 {
            return Ok(0.0);
        }

        let mut sum = 0.0f64;
        for batch_start in (0..total).step_by(SCORING_BATCH_SIZE) {
            let batch_end = (batch_start + SCORING_BATCH_SIZE).min(total);
            let batch: Vec<Frame> = (batch_start..batch_end)
                .map(|i| reader.read_frame(i))
                .collect::<Result<_>>()?;

            sum += batch.par_iter().map(laplacian_variance).sum::<f64>();
        }

        Ok(sum / total as f64)
    }
}
