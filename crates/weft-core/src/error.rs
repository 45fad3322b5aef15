// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Weft plugin factory.

use thiserror::Error;

use crate::types::PluginCategory;

/// The error type returned by every fallible Weft operation.
///
/// Errors raised by a plugin's own constructor or by a host initializer are
/// handed back to the caller exactly as they were returned.
#[derive(Debug, Error)]
pub enum WeftError {
    /// A type could not be composed with factory support (raised once, at registration).
    #[error("cannot compose `{type_name}`: {reason}")]
    Composition { type_name: String, reason: String },

    /// No class is registered for the requested category and name.
    #[error("plugin not found: {category}/{name}")]
    PluginNotFound {
        category: PluginCategory,
        name: String,
    },

    /// A plugin constructor or context-aware initializer failed.
    #[error("failed to construct plugin `{plugin}`: {source}")]
    Construction {
        plugin: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, unknown keys, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WeftError {
    /// Shorthand for a [`WeftError::Construction`] carrying a plain message.
    pub fn construction(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        let message: String = message.into();
        WeftError::Construction {
            plugin: plugin.into(),
            source: message.into(),
        }
    }

    /// Returns true if this error reports an unresolvable plugin.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeftError::PluginNotFound { .. })
    }
}
