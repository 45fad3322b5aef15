// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, the factory, and plugin implementations.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// String-keyed construction parameters, passed through verbatim.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// The params key holding a plugin's identifier.
pub const ID_PARAM: &str = "id";

/// The closed set of plugin kinds a registry can resolve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PluginCategory {
    Input,
    Output,
    Filter,
    Codec,
}

impl PluginCategory {
    /// All categories, in declaration order.
    pub const ALL: [PluginCategory; 4] = [
        PluginCategory::Input,
        PluginCategory::Output,
        PluginCategory::Filter,
        PluginCategory::Codec,
    ];
}

/// How identifiers are chosen for inner plugins that were not given one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnerIdMode {
    /// `{outer}/inner-{category}-{name}@{sequence}`, unique per factory.
    #[default]
    Sequence,
    /// No id is injected; the plugin base assigns its own.
    HostAssigned,
}

/// Which contextualization protocol a host may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextualizerMode {
    /// Pre-injection when the host supplies an initializer, post-injection otherwise.
    #[default]
    Auto,
    /// Always construct first and assign the context afterwards.
    PostInjection,
}

/// Host-supplied metadata shared by every plugin of one pipeline.
///
/// Cloning is cheap and yields a handle to the same context, so
/// [`ExecutionContext::same_as`] holds between a clone and its original.
#[derive(Clone)]
pub struct ExecutionContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    pipeline_id: String,
}

impl ExecutionContext {
    /// Create a new context for the given pipeline.
    pub fn new(pipeline_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                pipeline_id: pipeline_id.into(),
            }),
        }
    }

    /// The id of the pipeline this context belongs to.
    pub fn pipeline_id(&self) -> &str {
        &self.inner.pipeline_id
    }

    /// Returns true if both handles refer to the same context.
    pub fn same_as(&self, other: &ExecutionContext) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("pipeline_id", &self.inner.pipeline_id)
            .field("addr", &Arc::as_ptr(&self.inner))
            .finish()
    }
}
