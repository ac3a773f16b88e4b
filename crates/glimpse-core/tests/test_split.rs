#[allow(dead_code)]
mod common;

use glimpse_core::asset::VideoAsset;
use glimpse_core::config::DirectorConfig;
use glimpse_core::io::ser::SerReader;
use glimpse_core::split::split_video;
use tempfile::TempDir;

fn test_config(split_length_secs: f64) -> DirectorConfig {
    DirectorConfig {
        glimpse_width: 16,
        glimpse_height: 16,
        split_length_secs,
        ..Default::default()
    }
}

#[test]
fn exact_multiple_produces_exactly_n_segments() {
    let dir = TempDir::new().unwrap();
    // 4 seconds at 2 fps, split every 2 seconds: exactly 2 segments of 4
    // frames, no trailing empty one.
    let ser = common::build_gradient_source(8, 4, 8);
    let src = common::write_ser_named(dir.path(), "pano.ser", &ser);

    let asset = VideoAsset::from_ser(&src, Some(2.0)).unwrap();
    let workdir = asset.ensure_workdir().unwrap();
    let segments = split_video(&asset, &test_config(2.0), &workdir).unwrap();

    assert_eq!(segments.len(), 2);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.index, i);
        assert_eq!(segment.frame_count, 4);
        let reader = SerReader::open(&segment.path).unwrap();
        assert_eq!(reader.frame_count(), 4);
        assert_eq!(reader.header.width, 8);
        assert_eq!(reader.header.height, 4);
    }
}

#[test]
fn fractional_remainder_truncates_final_segment() {
    let dir = TempDir::new().unwrap();
    // 11 frames at 2 fps, split every 2 seconds: 2 full segments of 4
    // frames plus a truncated 3-frame tail.
    let ser = common::build_gradient_source(8, 4, 11);
    let src = common::write_ser_named(dir.path(), "pano.ser", &ser);

    let asset = VideoAsset::from_ser(&src, Some(2.0)).unwrap();
    let workdir = asset.ensure_workdir().unwrap();
    let segments = split_video(&asset, &test_config(2.0), &workdir).unwrap();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].frame_count, 4);
    assert_eq!(segments[1].frame_count, 4);
    assert_eq!(segments[2].frame_count, 3);
}

#[test]
fn segment_files_follow_naming_scheme() {
    let dir = TempDir::new().unwrap();
    let ser = common::build_gradient_source(8, 4, 5);
    let src = common::write_ser_named(dir.path(), "holiday.ser", &ser);

    let asset = VideoAsset::from_ser(&src, Some(2.0)).unwrap();
    let workdir = asset.ensure_workdir().unwrap();
    let segments = split_video(&asset, &test_config(2.0), &workdir).unwrap();

    assert_eq!(
        segments[0].path.file_name().unwrap().to_str().unwrap(),
        "holiday_g0000.ser"
    );
    assert_eq!(
        segments[1].path.file_name().unwrap().to_str().unwrap(),
        "holiday_g0001.ser"
    );
    assert!(workdir.ends_with("holiday"));
}

#[test]
fn segment_frames_match_source_frames() {
    let dir = TempDir::new().unwrap();
    let ser = common::build_gradient_source(8, 4, 6);
    let src = common::write_ser_named(dir.path(), "pano.ser", &ser);

    let asset = VideoAsset::from_ser(&src, Some(2.0)).unwrap();
    let workdir = asset.ensure_workdir().unwrap();
    let segments = split_video(&asset, &test_config(2.0), &workdir).unwrap();

    let source = SerReader::open(&src).unwrap();
    let mut source_index = 0;
    for segment in &segments {
        let reader = SerReader::open(&segment.path).unwrap();
        for i in 0..reader.frame_count() {
            let a = reader.read_frame(i).unwrap();
            let b = source.read_frame(source_index).unwrap();
            for (x, y) in a.data.iter().zip(b.data.iter()) {
                assert!((x - y).abs() < 1.0 / 255.0);
            }
            source_index += 1;
        }
    }
    assert_eq!(source_index, 6);
}
