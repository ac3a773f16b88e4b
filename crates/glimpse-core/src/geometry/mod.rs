pub mod erp;
pub mod gnomonic;
pub mod stereographic;

use ndarray::Array2;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

pub use erp::{deg2rad, rad_to_erp};

/// Projection model used to extract a perspective view from an
/// equirectangular frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Rectilinear central projection, narrow field of view.
    Gnomonic,
    /// Wide-angle projection used for glimpse views and path rendering.
    Stereographic,
}

/// Per-pixel lookup table mapping every output (perspective) pixel to a
/// fractional coordinate in the equirectangular source frame.
///
/// Both arrays have shape (output height, output width). Recomputed when
/// the viewing direction changes and reused across frames otherwise.
#[derive(Clone, Debug)]
pub struct DisplacementMap {
    /// Fractional source row per output pixel.
    pub rows: Array2<f32>,
    /// Fractional source column per output pixel.
    pub cols: Array2<f32>,
}

impl DisplacementMap {
    pub fn dim(&self) -> (usize, usize) {
        self.rows.dim()
    }
}

/// Build the displacement map for a viewing direction.
///
/// `phi_deg` is tilt, `lambda_deg` pan, both in degrees. `out_dim` and
/// `src_dim` are (height, width) pairs. Purely computed from closed-form
/// trigonometry; no source pixel access.
pub fn displacement_map(
    projection: Projection,
    phi_deg: f64,
    lambda_deg: f64,
    out_dim: (usize, usize),
    src_dim: (usize, usize),
) -> DisplacementMap {
    match projection {
        Projection::Gnomonic => gnomonic::displacement_map(phi_deg, lambda_deg, out_dim, src_dim),
        Projection::Stereographic => {
            stereographic::displacement_map(phi_deg, lambda_deg, out_dim, src_dim)
        }
    }
}

/// Fill a map from a per-pixel function `(row, col) -> (src_row, src_col)`.
///
/// Pixels are independent, so large maps are filled with row-level
/// parallelism.
pub(crate) fn fill_map(
    out_dim: (usize, usize),
    pixel: impl Fn(usize, usize) -> (f64, f64) + Sync,
) -> DisplacementMap {
    let (h, w) = out_dim;
    let mut rows = Array2::<f32>::zeros((h, w));
    let mut cols = Array2::<f32>::zeros((h, w));

    let zip = ndarray::Zip::indexed(&mut rows).and(&mut cols);
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|(row, col), r, c| {
            let (src_row, src_col) = pixel(row, col);
            *r = src_row as f32;
            *c = src_col as f32;
        });
    } else {
        zip.for_each(|(row, col), r, c| {
            let (src_row, src_col) = pixel(row, col);
            *r = src_row as f32;
            *c = src_col as f32;
        });
    }

    DisplacementMap { rows, cols }
}
