use std::path::Path;

use tracing::info;

use crate::asset::{Segment, VideoAsset};
use crate::config::DirectorConfig;
use crate::error::{GlimpseError, Result};
use crate::io::ser::{SerHeader, SerReader};
use crate::io::ser_writer::SerWriter;

/// Cut the source video into consecutive fixed-duration segments.
///
/// Each segment holds `round(fps × split_length)` frames except the last,
/// which is truncated at end of stream. A source whose length is an exact
/// multiple of the segment length produces exactly that many segments and
/// no trailing empty one. Writes one `<name>_gNNNN.ser` file per segment
/// into `workdir`.
pub fn split_video(
    asset: &VideoAsset,
    config: &DirectorConfig,
    workdir: &Path,
) -> Result<Vec<Segment>> {
    let frames_per_segment = config.frames_per_segment(asset.fps);
    if frames_per_segment == 0 {
        return Err(GlimpseError::Director(format!(
            "Segment length {}s at {} fps holds no frames",
            config.split_length_secs, asset.fps
        )));
    }

    let reader = SerReader::open(&asset.path)?;
    let total = reader.frame_count();
    if total == 0 {
        return Err(GlimpseError::EmptySequence);
    }

    let mut segments = Vec::new();
    let mut start = 0usize;
    while start < total {
        let take = frames_per_segment.min(total - start);
        let index = segments.len();
        let path = workdir.join(asset.split_name(index));

        let header = SerHeader::mono(asset.width, asset.height, asset.bit_depth, take as u32);
        let mut writer = SerWriter::create(&path, &header)?;
        for i in start..start + take {
            let frame = reader.read_frame(i)?;
            writer.write_frame(&frame)?;
        }
        writer.finalize()?;

        segments.push(Segment {
            path,
            fps: asset.fps,
            width: asset.width,
            height: asset.height,
            index,
            frame_count: take,
        });
        start += take;
    }

    info!(
        segments = segments.len(),
        frames_per_segment, "source split"
    );
    Ok(segments)
}
