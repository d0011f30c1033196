use rxscribe::infrastructure::observability::TracingConfig;

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
    assert_eq!(config.level, "info");
}

#[test]
fn given_explicit_level_when_building_directive_then_level_leads_and_crate_is_verbose() {
    let config = TracingConfig::new("prod", "warn", true);

    let directive = config.default_directive();

    assert!(directive.starts_with("warn,"));
    assert!(directive.contains("rxscribe=debug"));
    assert!(config.json_format);
}
