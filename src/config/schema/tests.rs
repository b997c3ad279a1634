use super::*;

#[test]
fn test_default_config_validates() {
    Config::default().validate().unwrap();
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.sticker.target_size, 512);
    assert_eq!(config.sticker.quality_start, 80);
    assert_eq!(config.cooldowns.sticker_secs, 5);
    assert!(config.scan.enabled);
    assert!(config.channels.console.enabled);
}

#[test]
fn test_empty_json_uses_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.bot.name, "Sticker Bot");
    assert_eq!(config.sticker.size_budget_bytes, 1024 * 1024);
}

#[test]
fn test_partial_json_overrides() {
    let config: Config =
        serde_json::from_str(r#"{"sticker":{"target_size":256},"scan":{"enabled":false}}"#)
            .unwrap();
    assert_eq!(config.sticker.target_size, 256);
    assert!(!config.scan.enabled);
    // Untouched sections keep defaults
    assert_eq!(config.sticker.quality_start, 80);
}

#[test]
fn test_validate_rejects_bad_target_size() {
    let mut config = Config::default();
    config.sticker.target_size = 16;
    assert!(config.validate().is_err());
    config.sticker.target_size = 4096;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_quality() {
    let mut config = Config::default();
    config.sticker.quality_start = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_tiny_budget() {
    let mut config = Config::default();
    config.sticker.size_budget_bytes = 100;
    assert!(config.validate().is_err());
}

#[test]
fn test_options_carry_transparency() {
    let config = Config::default();
    let options = config.sticker.options(true);
    assert!(options.transparent_background);
    assert_eq!(options.target_size, 512);
}

#[test]
fn test_roundtrip_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back.bot.author, config.bot.author);
    assert_eq!(back.cooldowns.scan_secs, config.cooldowns.scan_secs);
}
