use serde::{Deserialize, Serialize};

/// Discrete candidate viewing directions: the tilt (phi) and pan (lambda)
/// angle sets, in degrees. Grid indices used throughout the score space and
/// path search refer to positions in these two lists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AngleGrid {
    /// Tilt angles in degrees, ascending. -90 is straight down, 90 straight up.
    pub phis: Vec<f64>,
    /// Pan angles in degrees, ascending, covering [0, 360).
    pub lambdas: Vec<f64>,
}

impl Default for AngleGrid {
    fn default() -> Self {
        Self {
            phis: vec![-45.0, 0.0, 45.0],
            lambdas: vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0],
        }
    }
}

impl AngleGrid {
    pub fn phi_count(&self) -> usize {
        self.phis.len()
    }

    pub fn lambda_count(&self) -> usize {
        self.lambdas.len()
    }

    /// Tilt angle in degrees for a grid index.
    pub fn phi(&self, index: usize) -> f64 {
        self.phis[index]
    }

    /// Pan angle in degrees for a grid index.
    pub fn lambda(&self, index: usize) -> f64 {
        self.lambdas[index]
    }

    /// Angular distance in degrees between two grid directions.
    ///
    /// Pan difference takes the shorter way around the 360° circle; tilt
    /// difference is plain.
    pub fn angular_distance(&self, a: (usize, usize), b: (usize, usize)) -> f64 {
        let d_phi = self.phis[b.0] - self.phis[a.0];
        let raw = (self.lambdas[b.1] - self.lambdas[a.1]).abs() % 360.0;
        let d_lam = raw.min(360.0 - raw);
        (d_phi * d_phi + d_lam * d_lam).sqrt()
    }
}

/// Fixed configuration for the whole direction pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectorConfig {
    /// Width of perspective (glimpse) output frames, in pixels.
    pub glimpse_width: usize,
    /// Height of perspective (glimpse) output frames, in pixels.
    pub glimpse_height: usize,
    /// Nominal segment duration in seconds.
    pub split_length_secs: f64,
    /// Weight of the angular smoothness penalty in the path search.
    /// 0 disables smoothing entirely.
    pub smoothness_weight: f64,
    #[serde(default)]
    pub grid: AngleGrid,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            glimpse_width: 512,
            glimpse_height: 512,
            split_length_secs: 5.0,
            smoothness_weight: 0.01,
            grid: AngleGrid::default(),
        }
    }
}

impl DirectorConfig {
    /// Whole frames per nominal segment at the given frame rate.
    pub fn frames_per_segment(&self, fps: f64) -> usize {
        (fps * self.split_length_secs).round() as usize
    }
}
