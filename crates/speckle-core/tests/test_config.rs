use speckle_core::consts::{DEFAULT_GAUSS_MASK_SIZE, DEFAULT_TEAM_SIZE};
use speckle_core::error::SpeckleError;
use speckle_core::params::{DispatchOptions, ImageParams, SpeckleConfig};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_image_params_default() {
    let p = ImageParams::default();
    assert_eq!(p.gauss_mask_size, DEFAULT_GAUSS_MASK_SIZE);
    assert!(p.validate().is_ok());
}

#[test]
fn test_dispatch_options_default_is_flat() {
    let d = DispatchOptions::default();
    assert!(!d.use_hierarchical_parallelism);
    assert_eq!(d.team_size, DEFAULT_TEAM_SIZE);
    assert_eq!(d, DispatchOptions::flat());
}

#[test]
fn test_hierarchical_constructor() {
    let d = DispatchOptions::hierarchical(128);
    assert!(d.use_hierarchical_parallelism);
    assert_eq!(d.team_size, 128);
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_toml_empty_uses_defaults() {
    let config = SpeckleConfig::from_toml_str("").unwrap();
    assert_eq!(config, SpeckleConfig::default());
}

#[test]
fn test_toml_partial_tables() {
    let text = r#"
[image]
gauss_mask_size = 11

[dispatch]
use_hierarchical_parallelism = true
"#;
    let config = SpeckleConfig::from_toml_str(text).unwrap();
    assert_eq!(config.image.gauss_mask_size, 11);
    assert!(config.dispatch.use_hierarchical_parallelism);
    assert_eq!(config.dispatch.team_size, DEFAULT_TEAM_SIZE);
}

#[test]
fn test_toml_roundtrip() {
    let config = SpeckleConfig {
        image: ImageParams::with_gauss_mask_size(9),
        dispatch: DispatchOptions::hierarchical(64),
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(SpeckleConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_toml_invalid_mask_is_config_error() {
    let err = SpeckleConfig::from_toml_str("[image]\ngauss_mask_size = 6\n").unwrap_err();
    assert!(matches!(err, SpeckleError::Config(_)));
}

#[test]
fn test_toml_zero_team_is_config_error() {
    let err = SpeckleConfig::from_toml_str("[dispatch]\nteam_size = 0\n").unwrap_err();
    assert!(matches!(err, SpeckleError::Config(_)));
}

#[test]
fn test_toml_syntax_error_is_config_error() {
    let err = SpeckleConfig::from_toml_str("[image\n").unwrap_err();
    assert!(matches!(err, SpeckleError::Config(_)));
}

#[test]
fn test_toml_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speckle.toml");
    std::fs::write(&path, "[image]\ngauss_mask_size = 5\n").unwrap();
    let config = SpeckleConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.image.gauss_mask_size, 5);
}

// ---------------------------------------------------------------------------
// JSON (serde derive sanity)
// ---------------------------------------------------------------------------

#[test]
fn test_dispatch_options_json_defaults() {
    let d: DispatchOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(d, DispatchOptions::default());

    let d: DispatchOptions =
        serde_json::from_str(r#"{"use_hierarchical_parallelism": true, "team_size": 32}"#).unwrap();
    assert_eq!(d, DispatchOptions::hierarchical(32));
}

#[test]
fn test_image_params_json_roundtrip() {
    let p = ImageParams::with_gauss_mask_size(13);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(serde_json::from_str::<ImageParams>(&json).unwrap(), p);
}
