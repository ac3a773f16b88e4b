pub mod laplacian;

use crate::asset::View;
use crate::error::Result;

pub use laplacian::LaplacianScorer;

/// Produces one desirability score for a materialized view clip.
///
/// The path search consumes scores only through
/// [`ScoreSpace::set`](crate::scorespace::ScoreSpace::set), so any external
/// scorer can stand in for the built-in one.
pub trait GlimpseScorer {
    fn score_view(&self, view: &View) -> Result<f64>;
}
