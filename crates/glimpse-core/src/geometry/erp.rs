use std::f64::consts::{PI, TAU};

pub fn deg2rad(deg: f64) -> f64 {
    deg / 180.0 * PI
}

/// Convert a (latitude, longitude) direction in radians to a fractional
/// equirectangular pixel coordinate (row, col).
///
/// Latitude is shifted by +90° into [0, π] and scaled by `height/π`;
/// longitude is wrapped into [0, 2π) by adding π and taking the modulo
/// (correcting negative results), then scaled by `width/2π`. Shared by
/// both projection models.
pub fn rad_to_erp(phi: f64, lambda: f64, src_dim: (usize, usize)) -> (f64, f64) {
    let (height, width) = src_dim;
    let phi = phi + PI / 2.0;
    let mut lambda = (lambda + PI) % TAU;
    if lambda < 0.0 {
        lambda += TAU;
    }
    (
        phi / PI * height as f64,
        lambda / TAU * width as f64,
    )
}
