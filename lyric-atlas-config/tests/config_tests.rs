use lyric_atlas_config::{
    CompressorConfig, Config, ConfigError, DefinitionFormat, FontWeightName, LogLevel,
};

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.font_family, "Segoe UI");
    assert_eq!(config.font_weight, FontWeightName::Bold);
    assert_eq!(config.font_size, 31);
    assert_eq!(config.cjk_font_size, 31);
    assert_eq!(config.glyph_row_height, 52);
    assert_eq!(config.horizontal_margin, 8);
    assert_eq!(config.spacing_adjustment, 0);
    assert!(config.accurate_inner_rects);
    assert!(!config.reverse_colors);
    assert!(config.drop_shadow.enabled);
    assert_eq!(config.drop_shadow.direction, 310.0);
    assert_eq!(config.compressor, CompressorConfig::default());
    assert_eq!(config.definition_format, DefinitionFormat::Xml);
    assert_eq!(config.log_level, LogLevel::Warn);
}

#[test]
fn test_config_with_font_sizes_zero_cjk_reuses_default() {
    let config = Config::new().with_font_sizes(40, 0);
    assert_eq!(config.font_size, 40);
    assert_eq!(config.cjk_font_size, 40);

    let config = Config::new().with_font_sizes(40, 36);
    assert_eq!(config.cjk_font_size, 36);
}

#[test]
fn test_config_yaml_partial_deserialization() {
    let yaml = r#"
font_family: "Noto Sans CJK JP"
font_weight: semi_bold
cjk_font_size: 28
drop_shadow:
  enabled: false
definition_format: json
"#;
    let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(config.font_family, "Noto Sans CJK JP");
    assert_eq!(config.font_weight, FontWeightName::SemiBold);
    assert_eq!(config.font_size, 31);
    assert_eq!(config.cjk_font_size, 28);
    assert!(!config.drop_shadow.enabled);
    assert_eq!(config.drop_shadow.depth, 4.0);
    assert_eq!(config.definition_format, DefinitionFormat::Json);
}

#[test]
fn test_validate_clamps_font_sizes() {
    let mut config = Config::new().with_font_sizes(10, 90);
    config.validate().unwrap();
    assert_eq!(config.font_size, 18);
    assert_eq!(config.cjk_font_size, 60);
}

#[test]
fn test_validate_rejects_zero_row_height() {
    let mut config = Config {
        glyph_row_height: 0,
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_validate_rejects_bad_shadow_opacity() {
    let mut config = Config::default();
    config.drop_shadow.opacity = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("absent.yaml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = Config::new()
        .with_font_family("Meiryo")
        .with_horizontal_margin(4)
        .with_spacing_adjustment(-2);
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_invalid_yaml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "font_size: [not, a, number]").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_valid_font_size_bounds() {
    assert_eq!(Config::valid_font_size(17), 18);
    assert_eq!(Config::valid_font_size(18), 18);
    assert_eq!(Config::valid_font_size(31), 31);
    assert_eq!(Config::valid_font_size(61), 60);
}
