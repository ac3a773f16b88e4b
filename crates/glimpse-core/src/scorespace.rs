use std::fs;
use std::path::Path;

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AngleGrid;
use crate::error::{GlimpseError, Result};

/// One chosen direction in the path: indices into the angle grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Tilt index.
    pub phi: usize,
    /// Pan index.
    pub lambda: usize,
}

/// Desirability scores over (time segment, tilt index, pan index), and the
/// dynamic-programming search for the best smooth direction path.
///
/// Cells never written stay at −∞ and can neither be chosen nor serve as
/// an ancestor. `best_path` recomputes the trellis from the scores present
/// at call time, so setting more scores and re-querying is valid.
pub struct ScoreSpace {
    space: Array3<f64>,
    grid: AngleGrid,
    smoothness_weight: f64,
}

/// Trellis cell: best cumulative score ending here plus the predecessor
/// indices at the previous time step.
#[derive(Clone, Copy, Debug)]
struct Trace {
    phi: usize,
    lambda: usize,
    score: f64,
}

impl ScoreSpace {
    pub fn new(split_count: usize, grid: AngleGrid, smoothness_weight: f64) -> Self {
        let space = Array3::from_elem(
            (split_count, grid.phi_count(), grid.lambda_count()),
            f64::NEG_INFINITY,
        );
        Self {
            space,
            grid,
            smoothness_weight,
        }
    }

    /// (time, tilt, pan) dimensions of the grid.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.space.dim()
    }

    /// Record (or overwrite) the score for one cell.
    ///
    /// Out-of-range indices are a caller bug and panic. Non-finite scores
    /// would alias the unset sentinel and are rejected the same way.
    pub fn set(&mut self, time: usize, phi: usize, lambda: usize, score: f64) {
        assert!(score.is_finite(), "score must be finite");
        self.space[[time, phi, lambda]] = score;
    }

    /// Score currently stored in a cell, `None` if unset.
    pub fn get(&self, time: usize, phi: usize, lambda: usize) -> Option<f64> {
        let v = self.space[[time, phi, lambda]];
        v.is_finite().then_some(v)
    }

    /// Compute the best path of one waypoint per time segment.
    ///
    /// Forward Viterbi pass: the first layer's cumulative score is its own
    /// score; every later cell adds its own score to the best reachable
    /// ancestor's cumulative score minus the transition penalty. The path
    /// is recovered by backtracking from the best final-layer cell.
    ///
    /// Ties keep the lowest tilt index, then the lowest pan index, so
    /// repeated calls on the same grid return identical paths.
    pub fn best_path(&self) -> Result<Vec<Waypoint>> {
        let (times, phis, lambdas) = self.space.dim();
        if times == 0 {
            return Err(GlimpseError::EmptySequence);
        }

        let mut accumulator = Array3::from_elem(
            (times, phis, lambdas),
            Trace {
                phi: 0,
                lambda: 0,
                score: f64::NEG_INFINITY,
            },
        );

        for phi in 0..phis {
            for lambda in 0..lambdas {
                accumulator[[0, phi, lambda]].score = self.space[[0, phi, lambda]];
            }
        }

        for time in 1..times {
            for phi in 0..phis {
                for lambda in 0..lambdas {
                    let own = self.space[[time, phi, lambda]];
                    if own == f64::NEG_INFINITY {
                        continue;
                    }
                    if let Some(best) = self.find_best_ancestor(&accumulator, time, phi, lambda) {
                        accumulator[[time, phi, lambda]] = Trace {
                            phi: best.phi,
                            lambda: best.lambda,
                            score: own + best.score,
                        };
                    }
                }
            }
        }

        // Best cell in the final layer, lowest indices on ties.
        let mut end = Waypoint { phi: 0, lambda: 0 };
        let mut end_score = f64::NEG_INFINITY;
        for phi in 0..phis {
            for lambda in 0..lambdas {
                let s = accumulator[[times - 1, phi, lambda]].score;
                if s > end_score {
                    end_score = s;
                    end = Waypoint { phi, lambda };
                }
            }
        }
        if end_score == f64::NEG_INFINITY {
            return Err(GlimpseError::Director(
                "No reachable path: a time segment has no scored directions".into(),
            ));
        }

        let mut path = Vec::with_capacity(times);
        path.push(end);
        let mut current = end;
        for time in (1..times).rev() {
            let trace = accumulator[[time, current.phi, current.lambda]];
            current = Waypoint {
                phi: trace.phi,
                lambda: trace.lambda,
            };
            path.push(current);
        }
        path.reverse();

        debug!(segments = times, score = end_score, "best path found");
        Ok(path)
    }

    /// Among all predecessor cells at `time - 1`, find the one maximizing
    /// cumulative score minus the transition penalty to (phi, lambda).
    /// Returns `None` when no predecessor is reachable.
    fn find_best_ancestor(
        &self,
        accumulator: &Array3<Trace>,
        time: usize,
        phi: usize,
        lambda: usize,
    ) -> Option<Trace> {
        let (_, phis, lambdas) = self.space.dim();
        let mut best: Option<Trace> = None;

        for prev_phi in 0..phis {
            for prev_lambda in 0..lambdas {
                let prev = accumulator[[time - 1, prev_phi, prev_lambda]].score;
                if prev == f64::NEG_INFINITY {
                    continue;
                }
                let candidate = prev - self.transition_penalty((prev_phi, prev_lambda), (phi, lambda));
                if best.map_or(true, |b| candidate > b.score) {
                    best = Some(Trace {
                        phi: prev_phi,
                        lambda: prev_lambda,
                        score: candidate,
                    });
                }
            }
        }

        best
    }

    /// Smoothness cost of moving between two grid directions across one
    /// segment boundary: weight × angular distance in degrees (pan taking
    /// the shorter way around the circle). Monotonic in distance, zero for
    /// staying put.
    fn transition_penalty(&self, from: (usize, usize), to: (usize, usize)) -> f64 {
        self.smoothness_weight * self.grid.angular_distance(from, to)
    }

    /// Serialize the score grid to JSON for offline inspection.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = Snapshot {
            times: self.space.dim().0,
            phis: self.grid.phis.clone(),
            lambdas: self.grid.lambdas.clone(),
            smoothness_weight: self.smoothness_weight,
            scores: self
                .space
                .iter()
                .map(|&v| v.is_finite().then_some(v))
                .collect(),
        };
        let json = serde_json::to_string(&snapshot)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Rebuild a score space from a JSON snapshot.
    pub fn load_snapshot(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;

        let grid = AngleGrid {
            phis: snapshot.phis,
            lambdas: snapshot.lambdas,
        };
        let expected = snapshot.times * grid.phi_count() * grid.lambda_count();
        if snapshot.scores.len() != expected {
            return Err(GlimpseError::Director(format!(
                "Snapshot cell count {} does not match dimensions ({} expected)",
                snapshot.scores.len(),
                expected
            )));
        }

        let mut space = Self::new(snapshot.times, grid, snapshot.smoothness_weight);
        let flat: Vec<f64> = snapshot
            .scores
            .into_iter()
            .map(|v| v.unwrap_or(f64::NEG_INFINITY))
            .collect();
        for (cell, v) in space.space.iter_mut().zip(flat) {
            *cell = v;
        }
        Ok(space)
    }
}

/// On-disk form of the grid. Unset cells are stored as nulls since JSON
/// has no −∞.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    times: usize,
    phis: Vec<f64>,
    lambdas: Vec<f64>,
    smoothness_weight: f64,
    scores: Vec<Option<f64>>,
}
