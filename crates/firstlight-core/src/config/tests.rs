//! Tests for configuration module.

use super::*;
use config::{File, FileFormat};

fn settings_from_toml(toml: &str) -> Settings {
    Settings::with_defaults()
        .unwrap()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test_log::test]
fn test_defaults_apply_without_sources() {
    let settings = settings_from_toml("");

    assert!(settings.calendar.ical_url().is_none());
    assert_eq!(settings.calendar.timezone, "America/Chicago");
    assert_eq!(settings.calendar.fetch_timeout_secs, 10);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_toml_overrides_defaults() {
    let settings = settings_from_toml(
        r#"
[calendar]
ical_url = "https://calendar.example.com/basic.ics"
timezone = "Europe/Berlin"
fetch_timeout_secs = 3

[logging]
level = "debug"
"#,
    );

    assert_eq!(
        settings.calendar.ical_url(),
        Some("https://calendar.example.com/basic.ics")
    );
    assert_eq!(settings.calendar.timezone().unwrap(), chrono_tz::Europe::Berlin);
    assert_eq!(settings.calendar.fetch_timeout(), Duration::from_secs(3));
    assert_eq!(settings.logging.level, "debug");
}

#[test]
fn test_blank_url_is_absent() {
    let config = CalendarConfig {
        ical_url: Some("   ".to_string()),
        ..CalendarConfig::default()
    };

    assert!(config.ical_url().is_none());
}

#[test_log::test]
fn test_unknown_timezone_is_rejected() {
    let config = CalendarConfig {
        timezone: "Mars/Olympus_Mons".to_string(),
        ..CalendarConfig::default()
    };

    let err = config.timezone().unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration(_)));
    assert!(err.to_string().contains("Mars/Olympus_Mons"));
}

#[test]
fn test_default_timezone_resolves() {
    let config = CalendarConfig::default();

    assert_eq!(config.timezone().unwrap(), chrono_tz::America::Chicago);
}

#[test]
fn test_calendar_config_clone() {
    let config = CalendarConfig {
        ical_url: Some("https://example.com/cal.ics".to_string()),
        timezone: "Asia/Tokyo".to_string(),
        fetch_timeout_secs: 5,
    };

    let cloned = config.clone();
    assert_eq!(cloned.ical_url, config.ical_url);
    assert_eq!(cloned.timezone().unwrap(), chrono_tz::Asia::Tokyo);
}
