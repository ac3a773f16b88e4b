use ndarray::Array2;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::Frame;
use crate::geometry::DisplacementMap;

/// Sample `data` at a fractional (y, x) coordinate with bilinear
/// interpolation. Out-of-range taps read as 0.
pub fn bilinear_sample(data: &Array2<f32>, y: f64, x: f64) -> f32 {
    let (h, w) = data.dim();

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let sample = |r: i64, c: i64| -> f32 {
        if r >= 0 && r < h as i64 && c >= 0 && c < w as i64 {
            data[[r as usize, c as usize]]
        } else {
            0.0
        }
    };

    let v00 = sample(y0, x0);
    let v10 = sample(y0, x1);
    let v01 = sample(y1, x0);
    let v11 = sample(y1, x1);

    v00 * (1.0 - fx) * (1.0 - fy)
        + v10 * fx * (1.0 - fy)
        + v01 * (1.0 - fx) * fy
        + v11 * fx * fy
}

/// Reproject a source frame through a displacement map, producing a
/// perspective frame of the map's size.
pub fn warp_frame(frame: &Frame, map: &DisplacementMap) -> Frame {
    let (h, w) = map.dim();
    let mut result = Array2::<f32>::zeros((h, w));

    let zip = ndarray::Zip::indexed(&mut result);
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|(row, col), out| {
            let src_y = map.rows[[row, col]] as f64;
            let src_x = map.cols[[row, col]] as f64;
            *out = bilinear_sample(&frame.data, src_y, src_x);
        });
    } else {
        zip.for_each(|(row, col), out| {
            let src_y = map.rows[[row, col]] as f64;
            let src_x = map.cols[[row, col]] as f64;
            *out = bilinear_sample(&frame.data, src_y, src_x);
        });
    }

    Frame::new(result, frame.original_bit_depth)
}
