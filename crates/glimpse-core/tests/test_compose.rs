#[allow(dead_code)]
mod common;

use glimpse_core::asset::VideoAsset;
use glimpse_core::compose::compose_views;
use glimpse_core::config::{AngleGrid, DirectorConfig};
use glimpse_core::io::ser::SerReader;
use glimpse_core::split::split_video;
use tempfile::TempDir;

fn test_config() -> DirectorConfig {
    DirectorConfig {
        glimpse_width: 12,
        glimpse_height: 12,
        split_length_secs: 2.0,
        grid: AngleGrid {
            phis: vec![-45.0, 0.0, 45.0],
            lambdas: vec![0.0, 90.0, 180.0, 270.0],
        },
        ..Default::default()
    }
}

#[test]
fn one_view_per_segment_with_glimpse_size() {
    let dir = TempDir::new().unwrap();
    let ser = common::build_gradient_source(32, 16, 8);
    let src = common::write_ser_named(dir.path(), "pano.ser", &ser);

    let asset = VideoAsset::from_ser(&src, Some(2.0)).unwrap();
    let config = test_config();
    let workdir = asset.ensure_workdir().unwrap();
    let segments = split_video(&asset, &config, &workdir).unwrap();
    assert_eq!(segments.len(), 2);

    let views = compose_views(&asset, &segments, 1, 2, &config, &workdir).unwrap();
    assert_eq!(views.len(), 2);

    for (i, view) in views.iter().enumerate() {
        assert_eq!(view.segment_index, i);
        assert_eq!(view.phi_index, 1);
        assert_eq!(view.lambda_index, 2);
        assert_eq!(view.frame_count, segments[i].frame_count);

        let reader = SerReader::open(&view.path).unwrap();
        assert_eq!(reader.header.width, 12);
        assert_eq!(reader.header.height, 12);
        assert_eq!(reader.frame_count(), segments[i].frame_count);
    }
}

#[test]
fn view_files_follow_naming_scheme() {
    let dir = TempDir::new().unwrap();
    let ser = common::build_gradient_source(32, 16, 4);
    let src = common::write_ser_named(dir.path(), "pano.ser", &ser);

    let asset = VideoAsset::from_ser(&src, Some(2.0)).unwrap();
    let config = test_config();
    let workdir = asset.ensure_workdir().unwrap();
    let segments = split_video(&asset, &config, &workdir).unwrap();

    // tilt index 0 = -45°, pan index 1 = 90°
    let views = compose_views(&asset, &segments, 0, 1, &config, &workdir).unwrap();
    assert_eq!(
        views[0].path.file_name().unwrap().to_str().unwrap(),
        "pano_g0000_h090_v-45.ser"
    );
}

#[test]
fn missing_segment_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let ser = common::build_gradient_source(32, 16, 4);
    let src = common::write_ser_named(dir.path(), "pano.ser", &ser);

    let asset = VideoAsset::from_ser(&src, Some(2.0)).unwrap();
    let config = test_config();
    let workdir = asset.ensure_workdir().unwrap();
    let mut segments = split_video(&asset, &config, &workdir).unwrap();

    std::fs::remove_file(&segments[0].path).unwrap();
    segments.truncate(1);
    assert!(compose_views(&asset, &segments, 0, 0, &config, &workdir).is_err());
}
