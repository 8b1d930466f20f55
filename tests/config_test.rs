//! Integration tests for configuration loading
//!
//! Tests touching environment variables use names no other test reads,
//! since tests in this binary run in parallel.

use piiguard::anonymization::AnonymizationStrategy;
use piiguard::config::{load_config, load_config_or_default, PiiGuardConfig};
use piiguard::core::pipeline::Pipeline;
use piiguard::domain::{PiiError, PiiType};
use secrecy::ExposeSecret;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r##"
[detection]
confidence_threshold = 0.6
context_window = 20
enabled_detectors = ["pattern"]

[pii_types.name]
enabled = false

[pii_types.phone]
enabled = true
confidence = 0.7

[anonymization]
default_strategy = "replace"
mask_character = "#"
preserve_format = true

[anonymization.replacement_patterns]
email = "<EMAIL>"

[compliance]
region = "EU"
gdpr_mode = true

[performance]
max_text_length = 5000

[logging]
level = "debug"
local_rotation = "hourly"
"##,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.detection.confidence_threshold, 0.6);
    assert_eq!(config.detection.context_window, 20);
    assert!(!config.detection.detector_enabled("context"));
    assert!(!config.is_type_enabled(&PiiType::Name));
    assert!(config.is_type_enabled(&PiiType::Email));
    assert!(!config.is_type_enabled(&PiiType::DriverLicense));
    assert_eq!(config.pii_types["phone"].confidence, Some(0.7));
    assert_eq!(config.anonymization.mask_character, '#');
    assert_eq!(config.compliance.region, "EU");
    assert!(config.compliance.gdpr_mode);
    assert_eq!(config.performance.max_text_length, 5000);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.detection.confidence_threshold, 0.4);
    assert_eq!(config.detection.enabled_detectors, vec!["pattern", "context"]);
    assert_eq!(config.anonymization.default_strategy, "mask");
    assert_eq!(config.anonymization.hash_salt.expose_secret().as_ref(), "piiguard");
    assert!(config.is_type_enabled(&PiiType::Ssn));
    assert!(!config.is_type_enabled(&PiiType::Passport));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(load_config(&path), Err(PiiError::Configuration(_))));
    let config = load_config_or_default(&path).unwrap();
    assert_eq!(config.detection.context_window, 50);
}

#[test]
fn test_env_substitution() {
    std::env::set_var("PIIGUARD_TEST_SUBST_SALT", "from-env");
    let file = write_config(
        r#"
# hash_salt = "${PIIGUARD_TEST_NEVER_SET}"
[anonymization]
hash_salt = "${PIIGUARD_TEST_SUBST_SALT}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.anonymization.hash_salt.expose_secret().as_ref(), "from-env");
}

#[test]
fn test_missing_env_variable() {
    let file = write_config(
        r#"
[anonymization]
hash_salt = "${PIIGUARD_TEST_UNSET_VARIABLE}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("PIIGUARD_TEST_UNSET_VARIABLE"));
}

#[test]
fn test_env_override() {
    std::env::set_var("PIIGUARD_LOGGING_LOCAL_PATH", "/tmp/piiguard-env-logs");
    let file = write_config("[logging]\nlocal_path = \"/var/log/elsewhere\"\n");
    let config = load_config(file.path());
    std::env::remove_var("PIIGUARD_LOGGING_LOCAL_PATH");

    assert_eq!(config.unwrap().logging.local_path, "/tmp/piiguard-env-logs");
}

#[test]
fn test_validation_errors() {
    let cases = [
        "[detection]\nconfidence_threshold = -0.1\n",
        "[detection]\nenabled_detectors = [\"ml\"]\n",
        "[logging]\nlevel = \"loud\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[performance]\nmax_parallel = 0\n",
    ];

    for contents in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            err.to_string().contains("validation failed"),
            "{contents}: {err}"
        );
    }
}

#[test]
fn test_malformed_toml() {
    let file = write_config("[detection\nconfidence_threshold = 0.5\n");
    assert!(matches!(load_config(file.path()), Err(PiiError::Configuration(_))));
}

#[test]
fn test_unknown_strategy_is_lenient() {
    let file = write_config("[anonymization]\ndefault_strategy = \"scramble\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(
        AnonymizationStrategy::resolve(&config.anonymization.default_strategy),
        AnonymizationStrategy::Mask
    );
}

#[test]
fn test_dotted_lookup() {
    let config = PiiGuardConfig::default();

    assert_eq!(
        config.get("anonymization.default_strategy"),
        Some(toml::Value::String("mask".to_string()))
    );
    assert_eq!(config.get_or("performance.max_parallel", 0usize), 4);
    assert_eq!(config.get_or("detection.no_such_key", 7u32), 7);
    assert!(config.get("nothing.here").is_none());
}

#[test]
fn test_pattern_library_from_config() {
    let dir = TempDir::new().unwrap();
    let library = dir.path().join("patterns.toml");
    std::fs::write(
        &library,
        r#"
[[rules]]
pii_type = "employee_id"
pattern = "EMP-\\d{6}"
confidence = 0.8
"#,
    )
    .unwrap();

    let file = write_config(&format!(
        "[detection]\npattern_library = \"{}\"\n",
        library.display()
    ));
    let config = load_config(file.path()).unwrap();
    let pipeline = Pipeline::from_config(&config).unwrap();

    let matches = pipeline.scan("badge EMP-123456 and a@b.io").unwrap();
    let types: Vec<&PiiType> = matches.iter().map(|m| m.pii_type()).collect();
    assert_eq!(types, vec![&PiiType::from_tag("employee_id"), &PiiType::Email]);
}

#[test]
fn test_bad_pattern_library_fails_pipeline() {
    let dir = TempDir::new().unwrap();
    let library = dir.path().join("patterns.toml");
    std::fs::write(&library, "[[rules]]\npii_type = \"bad\"\npattern = \"(\"\n").unwrap();

    let mut config = PiiGuardConfig::default();
    config.detection.pattern_library = Some(library);

    assert!(matches!(
        Pipeline::from_config(&config),
        Err(PiiError::Pattern { .. })
    ));
}
