// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::WeftConfig;

/// Validate a deserialized configuration, collecting every error.
pub fn validate_config(config: &WeftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // The value is checked exactly as the host will store it.
    let pipeline_id = config.host.pipeline_id.as_str();
    if pipeline_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "host.pipeline_id must not be empty".to_string(),
        });
    } else if pipeline_id.trim() != pipeline_id {
        errors.push(ConfigError::Validation {
            message: format!(
                "host.pipeline_id `{pipeline_id}` must not have leading or trailing whitespace"
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
