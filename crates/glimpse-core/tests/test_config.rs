use glimpse_core::config::{AngleGrid, DirectorConfig};

#[test]
fn default_config_is_sane() {
    let config = DirectorConfig::default();
    assert!(config.glimpse_width > 0);
    assert!(config.glimpse_height > 0);
    assert!(config.split_length_secs > 0.0);
    assert!(config.grid.phi_count() > 0);
    assert!(config.grid.lambda_count() > 0);
}

#[test]
fn toml_round_trip() {
    let config = DirectorConfig {
        glimpse_width: 640,
        glimpse_height: 480,
        split_length_secs: 3.0,
        smoothness_weight: 0.05,
        grid: AngleGrid {
            phis: vec![-30.0, 0.0, 30.0],
            lambdas: vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0],
        },
    };

    let text = toml::to_string(&config).unwrap();
    let parsed: DirectorConfig = toml::from_str(&text).unwrap();

    assert_eq!(parsed.glimpse_width, 640);
    assert_eq!(parsed.glimpse_height, 480);
    assert_eq!(parsed.split_length_secs, 3.0);
    assert_eq!(parsed.smoothness_weight, 0.05);
    assert_eq!(parsed.grid.phis, config.grid.phis);
    assert_eq!(parsed.grid.lambdas, config.grid.lambdas);
}

#[test]
fn grid_defaults_when_missing_from_toml() {
    let text = r#"
glimpse_width = 512
glimpse_height = 512
split_length_secs = 5.0
smoothness_weight = 0.01
"#;
    let parsed: DirectorConfig = toml::from_str(text).unwrap();
    assert_eq!(parsed.grid.phi_count(), AngleGrid::default().phi_count());
}

#[test]
fn pan_distance_wraps_around_the_circle() {
    let grid = AngleGrid {
        phis: vec![0.0],
        lambdas: vec![10.0, 350.0],
    };
    // 10° -> 350° is 20° the short way, not 340°.
    let d = grid.angular_distance((0, 0), (0, 1));
    assert!((d - 20.0).abs() < 1e-9);
}

#[test]
fn frames_per_segment_rounds() {
    let config = DirectorConfig {
        split_length_secs: 5.0,
        ..Default::default()
    };
    assert_eq!(config.frames_per_segment(30.0), 150);
    assert_eq!(config.frames_per_segment(29.97), 150);
}
