use std::f64::consts::PI;

use crate::consts::STEREOGRAPHIC_FOV_DEG;

use super::erp::{deg2rad, rad_to_erp};
use super::{fill_map, DisplacementMap};

/// Build the stereographic displacement map for a direction.
///
/// Same overall structure as the gnomonic model but with
/// `c = 2·atan(ρ/2R)`, plus an antipodal correction: pixels outside an
/// ellipse centered below the optical center image the far hemisphere,
/// so their computed longitude gets π added.
pub fn displacement_map(
    phi_deg: f64,
    lambda_deg: f64,
    out_dim: (usize, usize),
    src_dim: (usize, usize),
) -> DisplacementMap {
    let (out_h, out_w) = out_dim;
    let (src_h, src_w) = src_dim;
    let half_h = (out_h / 2) as i64;
    let half_w = (out_w / 2) as i64;
    let phi1 = deg2rad(phi_deg);
    let lam0 = deg2rad(lambda_deg);
    let r = half_w as f64 / (STEREOGRAPHIC_FOV_DEG / 360.0 * PI).tan() / 2.0;

    // Far-hemisphere boundary circle in output coordinates.
    let m_sy = -2.0 * r * phi1.tan();
    let m_r = 2.0 * r / phi1.cos();

    fill_map(out_dim, |row, col| {
        let y = (row as i64 - half_h) as f64;
        let x = (col as i64 - half_w) as f64;
        let ro = (x * x + y * y).sqrt();

        // The formulas divide by ρ; the exact center maps to the source
        // center by definition.
        if ro == 0.0 {
            return (src_h as f64 / 2.0 - 0.5, src_w as f64 / 2.0 - 0.5);
        }

        let c = 2.0 * (ro / (2.0 * r)).atan();
        let r_phi = (c.cos() * phi1.sin() + y * c.sin() * phi1.cos() / ro)
            .clamp(-1.0, 1.0)
            .asin();

        let mut r_lam = if phi_deg == 90.0 {
            lam0 + (x / -y).atan()
        } else if phi_deg == -90.0 {
            lam0 + (x / y).atan()
        } else {
            lam0 + (x * c.sin() / (ro * phi1.cos() * c.cos() - y * phi1.sin() * c.sin())).atan()
        };

        if x * x + (y - m_sy) * (y - m_sy) > m_r * m_r {
            r_lam += PI;
        }

        rad_to_erp(r_phi, r_lam, src_dim)
    })
}
