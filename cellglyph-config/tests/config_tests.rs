use cellglyph_config::{Config, ConfigError, LogLevel};

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.font_path, None);
    assert_eq!(config.face_index, 0);
    assert_eq!(config.font_size, 12.0);
    assert_eq!(config.dpi_x, 96);
    assert_eq!(config.dpi_y, 96);
    assert!(config.hinting);
    assert_eq!(config.hintstyle, 3);
    assert_eq!(config.cell_width, None);
    assert_eq!(config.scale_cache_entries, 8);
    assert_eq!(config.log_level, LogLevel::Off);
    assert_eq!(config.log_file, None);
}

#[test]
fn test_config_builders() {
    let config = Config::new()
        .with_font_path("/tmp/mono.ttf")
        .with_font_size(16.0)
        .with_hinting(false, 1)
        .with_cell_width(9);
    assert_eq!(
        config.font_path.as_deref(),
        Some(std::path::Path::new("/tmp/mono.ttf"))
    );
    assert_eq!(config.font_size, 16.0);
    assert!(!config.hinting);
    assert_eq!(config.hintstyle, 1);
    assert_eq!(config.cell_width, Some(9));
}

#[test]
fn test_char_size_26_6() {
    assert_eq!(Config::new().char_size_26_6(), 768);
    assert_eq!(Config::new().with_font_size(10.5).char_size_26_6(), 672);
}

#[test]
fn test_config_yaml_serialization() {
    let config = Config::default();
    let yaml = serde_yaml_ng::to_string(&config).unwrap();
    assert!(yaml.contains("font_size: 12.0"));
    assert!(yaml.contains("hintstyle: 3"));
    assert!(yaml.contains("log_level: off"));
}

#[test]
fn test_config_partial_yaml() {
    let yaml = r#"
font_size: 14.0
cell_width: 10
log_level: debug
"#;
    let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(config.font_size, 14.0);
    assert_eq!(config.cell_width, Some(10));
    assert_eq!(config.log_level, LogLevel::Debug);
    // Unset fields take their defaults
    assert_eq!(config.dpi_x, 96);
    assert!(config.hinting);
}

#[test]
fn test_validate_rejects_bad_values() {
    assert!(Config::new().validate().is_ok());

    let err = Config::new().with_font_size(0.0).validate().unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("font_size")));

    let mut config = Config::new();
    config.dpi_y = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));

    assert!(Config::new().with_cell_width(0).validate().is_err());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = Config::new().with_font_size(18.0).with_cell_width(11);

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "font_size: [not, a, number]\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_from_reports_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "dpi_x: 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Validation(_))
    ));
}

#[test]
fn test_load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}

#[test]
fn test_config_path_ends_with_app_dir() {
    let path = Config::config_path();
    assert!(path.ends_with("cellglyph/config.yaml") || path.ends_with("config.yaml"));
    assert_eq!(path.parent(), Some(Config::config_dir().as_path()));
}
