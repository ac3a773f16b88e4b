use std::f64::consts::PI;

use crate::consts::GNOMONIC_FOV_DEG;

use super::erp::{deg2rad, rad_to_erp};
use super::{fill_map, DisplacementMap};

/// Build the gnomonic (rectilinear) displacement map for a direction.
///
/// Standard central projection: a pixel at radius ρ from the optical
/// center deviates by `c = atan(ρ/R)` from the viewing axis, with `R`
/// fixed by the half-width and the field of view.
pub fn displacement_map(
    phi_deg: f64,
    lambda_deg: f64,
    out_dim: (usize, usize),
    src_dim: (usize, usize),
) -> DisplacementMap {
    let (out_h, out_w) = out_dim;
    let half_h = (out_h / 2) as i64;
    let half_w = (out_w / 2) as i64;
    let phi1 = deg2rad(phi_deg);
    let lam0 = deg2rad(lambda_deg);
    let r = half_w as f64 / (GNOMONIC_FOV_DEG / 360.0 * PI).tan();

    fill_map(out_dim, |row, col| {
        let y = (row as i64 - half_h) as f64;
        let x = (col as i64 - half_w) as f64;
        let ro = (x * x + y * y).sqrt();

        // ρ → 0 limit: the axis pixel looks exactly along (phi1, lam0).
        if ro == 0.0 {
            return rad_to_erp(phi1, lam0, src_dim);
        }

        let c = (ro / r).atan();
        let r_phi = (c.cos() * phi1.sin() + y * c.sin() * phi1.cos() / ro)
            .clamp(-1.0, 1.0)
            .asin();

        // The general longitude formula divides by a term that vanishes
        // at the poles.
        let r_lam = if phi_deg == 90.0 {
            lam0 + (x / -y).atan()
        } else if phi_deg == -90.0 {
            lam0 + (x / y).atan()
        } else {
            lam0 + (x * c.sin() / (ro * phi1.cos() * c.cos() - y * phi1.sin() * c.sin())).atan()
        };

        rad_to_erp(r_phi, r_lam, src_dim)
    })
}
