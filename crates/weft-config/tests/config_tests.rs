// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Weft configuration system.

use weft_config::diagnostic::ConfigError;
use weft_config::{
    load_and_validate, load_and_validate_str, load_config_from_path, load_config_from_str,
    render_errors,
};
use weft_core::{ContextualizerMode, InnerIdMode};

/// Every known key deserializes.
#[test]
fn valid_toml_deserializes_into_weft_config() {
    let toml = r#"
[host]
contextualizer = "post_injection"
pipeline_id = "ingest"

[factory]
inner_ids = "host_assigned"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.host.contextualizer, ContextualizerMode::PostInjection);
    assert_eq!(config.host.pipeline_id, "ingest");
    assert_eq!(config.factory.inner_ids, InnerIdMode::HostAssigned);
}

/// Missing sections fall back to defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.host.contextualizer, ContextualizerMode::Auto);
    assert_eq!(config.host.pipeline_id, "main");
    assert_eq!(config.factory.inner_ids, InnerIdMode::Sequence);
}

/// A misspelled key produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_is_reported_with_suggestion() {
    let toml = r#"
[factory]
iner_ids = "sequence"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "iner_ids");
            assert_eq!(suggestion.as_deref(), Some("inner_ids"));
        }
        other => panic!("expected UnknownKey, got: {other:?}"),
    }
}

/// An unknown section is rejected at the top level.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[agent]
name = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown section");
    assert!(
        matches!(&errors[0], ConfigError::UnknownKey { key, .. } if key == "agent"),
        "got: {errors:?}"
    );
}

/// A bad enum value is reported as an invalid value, not silently defaulted.
#[test]
fn unknown_contextualizer_mode_is_rejected() {
    let toml = r#"
[host]
contextualizer = "pre_injection_please"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject bad variant");
    let rendered = errors[0].to_string();
    assert!(
        rendered.contains("contextualizer") || rendered.contains("pre_injection_please"),
        "error should name the key or the value, got: {rendered}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_surface_from_load_and_validate() {
    let toml = r#"
[host]
pipeline_id = " main "
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Config is read from an explicit file path.
#[test]
fn load_from_file_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("weft.toml");
    std::fs::write(&path, "[factory]\ninner_ids = \"host_assigned\"\n").expect("write config");

    let config = load_config_from_path(&path).expect("file should load");
    assert_eq!(config.factory.inner_ids, InnerIdMode::HostAssigned);
}

/// `WEFT_FACTORY_INNER_IDS` maps to `factory.inner_ids`, not `factory.inner.ids`.
#[test]
fn env_var_overrides_file_value() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("weft.toml", "[factory]\ninner_ids = \"sequence\"\n")?;
        jail.set_env("WEFT_FACTORY_INNER_IDS", "host_assigned");
        jail.set_env("WEFT_HOST_PIPELINE_ID", "from-env");

        let config = load_config_from_path(std::path::Path::new("weft.toml"))?;
        assert_eq!(config.factory.inner_ids, InnerIdMode::HostAssigned);
        assert_eq!(config.host.pipeline_id, "from-env");
        Ok(())
    });
}

/// The standard hierarchy: defaults, then `./weft.toml`, then `WEFT_*`.
#[test]
fn standard_hierarchy_layers_local_file_and_env() {
    figment::Jail::expect_with(|jail| {
        let dir = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", dir.display());
        jail.create_file(
            "weft.toml",
            "[host]\npipeline_id = \"from-file\"\ncontextualizer = \"post_injection\"\n",
        )?;
        jail.set_env("WEFT_HOST_PIPELINE_ID", "from-env");

        let config = load_and_validate().expect("layered config should validate");
        assert_eq!(config.host.pipeline_id, "from-env");
        assert_eq!(config.host.contextualizer, ContextualizerMode::PostInjection);
        assert_eq!(config.factory.inner_ids, InnerIdMode::Sequence);
        Ok(())
    });
}

/// A typo in `./weft.toml` is reported and rendered with its help.
#[test]
fn unknown_key_in_local_file_is_reported() {
    figment::Jail::expect_with(|jail| {
        let dir = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", dir.display());
        jail.create_file("weft.toml", "[host]\npipline_id = \"main\"\n")?;

        let errors = load_and_validate().expect_err("typo should be rejected");
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => {
                assert_eq!(key, "pipline_id");
                assert_eq!(suggestion.as_deref(), Some("pipeline_id"));
            }
            other => panic!("expected UnknownKey, got: {other:?}"),
        }

        let rendered = render_errors(&errors);
        assert!(rendered.contains("did you mean `pipeline_id`?"), "{rendered}");
        Ok(())
    });
}
