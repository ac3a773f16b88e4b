use std::path::{Path, PathBuf};

use tracing::info;

use crate::asset::VideoAsset;
use crate::config::DirectorConfig;
use crate::error::{GlimpseError, Result};
use crate::frame::Frame;
use crate::geometry::{displacement_map, Projection};
use crate::io::ser::{SerHeader, SerReader};
use crate::io::ser_writer::SerWriter;
use crate::remap::warp_frame;
use crate::scorespace::Waypoint;

/// Descriptor of the final rendered video.
#[derive(Clone, Debug)]
pub struct RenderedOutput {
    pub path: PathBuf,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
}

/// Render the chosen path into a single continuously panning output video.
///
/// The first waypoint's direction is held for the first half segment, then
/// pan and tilt are interpolated linearly between consecutive waypoints
/// over each segment's frames, and the last waypoint is held while the
/// remaining source frames drain. The displacement map is only recomputed
/// when the direction actually changes. A source shorter than the path
/// plan requires is a fatal error.
pub fn render_path(
    asset: &VideoAsset,
    path: &[Waypoint],
    config: &DirectorConfig,
    workdir: &Path,
) -> Result<RenderedOutput> {
    if path.is_empty() {
        return Err(GlimpseError::EmptySequence);
    }

    let video = SerReader::open(&asset.path)?;
    let segment_frames = config.frames_per_segment(asset.fps);
    let half_frames = ((config.split_length_secs / 2.0) * asset.fps).ceil() as usize;
    let planned = half_frames + (path.len() - 1) * segment_frames;

    let output_path = workdir.join("output.ser");
    let header = SerHeader::mono(
        config.glimpse_width as u32,
        config.glimpse_height as u32,
        asset.bit_depth,
        0,
    );
    let mut writer = SerWriter::create(&output_path, &header)?;

    let out_dim = (config.glimpse_height, config.glimpse_width);
    let src_dim = (asset.height as usize, asset.width as usize);
    let grid = &config.grid;

    let mut cursor = 0usize;

    // Hold the first waypoint for the opening half segment.
    let mut map = displacement_map(
        Projection::Stereographic,
        grid.phi(path[0].phi),
        grid.lambda(path[0].lambda),
        out_dim,
        src_dim,
    );
    for _ in 0..half_frames {
        let frame = must_read(&video, &mut cursor, planned)?;
        writer.write_frame(&warp_frame(&frame, &map))?;
    }

    // Sweep between consecutive waypoints.
    for s in 1..path.len() {
        let start_phi = grid.phi(path[s - 1].phi);
        let start_lambda = grid.lambda(path[s - 1].lambda);
        let diff_phi = grid.phi(path[s].phi) - start_phi;
        let diff_lambda = grid.lambda(path[s].lambda) - start_lambda;

        for i in 0..segment_frames {
            if diff_phi != 0.0 || diff_lambda != 0.0 {
                let progress = i as f64 / segment_frames as f64;
                map = displacement_map(
                    Projection::Stereographic,
                    start_phi + progress * diff_phi,
                    start_lambda + progress * diff_lambda,
                    out_dim,
                    src_dim,
                );
            }
            let frame = must_read(&video, &mut cursor, planned)?;
            writer.write_frame(&warp_frame(&frame, &map))?;
        }
    }

    // Hold the last waypoint and drain whatever is left.
    let last = path[path.len() - 1];
    map = displacement_map(
        Projection::Stereographic,
        grid.phi(last.phi),
        grid.lambda(last.lambda),
        out_dim,
        src_dim,
    );
    while cursor < video.frame_count() {
        let frame = video.read_frame(cursor)?;
        cursor += 1;
        writer.write_frame(&warp_frame(&frame, &map))?;
    }

    let frame_count = writer.finalize()? as usize;
    info!(frames = frame_count, output = %output_path.display(), "path rendered");

    Ok(RenderedOutput {
        path: output_path,
        fps: asset.fps,
        width: config.glimpse_width as u32,
        height: config.glimpse_height as u32,
        frame_count,
    })
}

fn must_read(video: &SerReader, cursor: &mut usize, planned: usize) -> Result<Frame> {
    if *cursor >= video.frame_count() {
        return Err(GlimpseError::StreamExhausted {
            expected: planned,
            available: video.frame_count(),
        });
    }
    let frame = video.read_frame(*cursor)?;
    *cursor += 1;
    Ok(frame)
}
