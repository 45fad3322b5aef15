// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};
use weft_core::{ContextualizerMode, InnerIdMode};

/// Top-level Weft configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeftConfig {
    /// Host capabilities and the context handed to outer plugins.
    #[serde(default)]
    pub host: HostConfig,

    /// Plugin factory behavior.
    #[serde(default)]
    pub factory: FactoryConfig,
}

/// Host-side settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Which contextualization protocol the host may select.
    #[serde(default)]
    pub contextualizer: ContextualizerMode,

    /// Pipeline id of the execution context given to outer plugins.
    #[serde(default = "default_pipeline_id")]
    pub pipeline_id: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            contextualizer: ContextualizerMode::default(),
            pipeline_id: default_pipeline_id(),
        }
    }
}

fn default_pipeline_id() -> String {
    "main".to_string()
}

/// Plugin factory settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryConfig {
    /// How inner plugins without an explicit `id` are named.
    #[serde(default)]
    pub inner_ids: InnerIdMode,
}
