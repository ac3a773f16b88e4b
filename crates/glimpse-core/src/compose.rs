use std::path::Path;

use tracing::debug;

use crate::asset::{Segment, VideoAsset, View};
use crate::config::DirectorConfig;
use crate::error::Result;
use crate::geometry::{displacement_map, Projection};
use crate::io::ser::{SerHeader, SerReader};
use crate::io::ser_writer::SerWriter;
use crate::remap::warp_frame;

/// Materialize the glimpse view of every segment under one fixed
/// direction, given by grid indices.
///
/// The stereographic displacement map is computed once and reused across
/// all frames of all segments, valid because the direction never changes
/// within this call. Writes one view file per segment into `workdir`.
pub fn compose_views(
    asset: &VideoAsset,
    segments: &[Segment],
    phi_index: usize,
    lambda_index: usize,
    config: &DirectorConfig,
    workdir: &Path,
) -> Result<Vec<View>> {
    let phi_deg = config.grid.phi(phi_index);
    let lambda_deg = config.grid.lambda(lambda_index);
    let map = displacement_map(
        Projection::Stereographic,
        phi_deg,
        lambda_deg,
        (config.glimpse_height, config.glimpse_width),
        (asset.height as usize, asset.width as usize),
    );

    let mut views = Vec::with_capacity(segments.len());
    for segment in segments {
        let clip = SerReader::open(&segment.path)?;
        let path = workdir.join(asset.view_name(segment.index, lambda_deg, phi_deg));

        let header = SerHeader::mono(
            config.glimpse_width as u32,
            config.glimpse_height as u32,
            asset.bit_depth,
            clip.frame_count() as u32,
        );
        let mut writer = SerWriter::create(&path, &header)?;
        for frame in clip.frames() {
            writer.write_frame(&warp_frame(&frame?, &map))?;
        }
        let frame_count = writer.finalize()? as usize;

        debug!(
            segment = segment.index,
            phi = phi_deg,
            lambda = lambda_deg,
            "view composed"
        );
        views.push(View {
            path,
            fps: segment.fps,
            width: config.glimpse_width as u32,
            height: config.glimpse_height as u32,
            segment_index: segment.index,
            phi_index,
            lambda_index,
            frame_count,
        });
    }

    Ok(views)
}
