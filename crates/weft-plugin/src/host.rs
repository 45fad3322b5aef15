// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The host: registry, contextualization strategy, and inner-id policy.
//!
//! A [`PluginHost`] is assembled once with [`PluginHostBuilder`] and then
//! shared behind an `Arc`. Every class is negotiated for factory support as
//! it is registered, and the contextualization strategy is fixed when the
//! host is built.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};
use weft_config::WeftConfig;
use weft_core::{
    ContextualizerMode, ExecutionContext, InnerIdMode, Params, PluginCategory, WeftError,
};

use crate::contextualizer::{select_contextualizer, ContextualInitializer, Contextualizer};
use crate::plugin::Plugin;
use crate::registry::{PluginClass, PluginRegistry, ResolvedClass};
use crate::support::include_factory_support;

/// Shared runtime state for every plugin built by one host.
pub struct PluginHost {
    registry: PluginRegistry,
    contextualizer: Box<dyn Contextualizer>,
    inner_ids: InnerIdMode,
    execution_context: ExecutionContext,
}

impl PluginHost {
    pub fn builder() -> PluginHostBuilder {
        PluginHostBuilder::new()
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn contextualizer(&self) -> &dyn Contextualizer {
        self.contextualizer.as_ref()
    }

    pub fn inner_ids(&self) -> InnerIdMode {
        self.inner_ids
    }

    /// The context handed to outer plugins by [`PluginHost::instantiate`].
    pub fn execution_context(&self) -> &ExecutionContext {
        &self.execution_context
    }

    /// Build an outer plugin carrying the host's execution context.
    pub fn instantiate(
        self: &Arc<Self>,
        category: PluginCategory,
        name: &str,
        params: Params,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        self.instantiate_with_context(category, name, params, &self.execution_context)
    }

    /// Build an outer plugin carrying `context`.
    pub fn instantiate_with_context(
        self: &Arc<Self>,
        category: PluginCategory,
        name: &str,
        params: Params,
        context: &ExecutionContext,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        let class = self.registry.resolve(category, name)?;
        self.contextualizer.initialize_contextualized(
            ResolvedClass::new(class, self),
            params,
            Some(context.clone()),
        )
    }
}

impl fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHost")
            .field("classes", &ClassNames(&self.registry))
            .field("contextualizer", &self.contextualizer.kind())
            .field("inner_ids", &self.inner_ids)
            .field("execution_context", &self.execution_context)
            .finish()
    }
}

/// Registered classes grouped by category, for debug output.
struct ClassNames<'a>(&'a PluginRegistry);

impl fmt::Debug for ClassNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for category in PluginCategory::ALL {
            let names: Vec<&str> =
                self.0.list(category).into_iter().map(PluginClass::name).collect();
            if !names.is_empty() {
                map.entry(&category, &names);
            }
        }
        map.finish()
    }
}

/// Assembles a [`PluginHost`].
pub struct PluginHostBuilder {
    registry: PluginRegistry,
    initializer: Option<Arc<dyn ContextualInitializer>>,
    contextualizer_mode: ContextualizerMode,
    inner_ids: InnerIdMode,
    pipeline_id: String,
}

impl PluginHostBuilder {
    fn new() -> Self {
        Self {
            registry: PluginRegistry::new(),
            initializer: None,
            contextualizer_mode: ContextualizerMode::default(),
            inner_ids: InnerIdMode::default(),
            pipeline_id: "main".to_string(),
        }
    }

    /// Start from loaded configuration.
    pub fn from_config(config: &WeftConfig) -> Self {
        Self::new()
            .contextualizer_mode(config.host.contextualizer)
            .inner_ids(config.factory.inner_ids)
            .pipeline_id(config.host.pipeline_id.clone())
    }

    /// Start from the standard config hierarchy (files, then `WEFT_*` env vars).
    ///
    /// Every config diagnostic is rendered into a single [`WeftError::Config`].
    pub fn from_standard_config() -> Result<Self, WeftError> {
        let config = weft_config::load_and_validate()
            .map_err(|errors| weft_config::into_weft_error(&errors))?;
        Ok(Self::from_config(&config))
    }

    /// Negotiate factory support for `class` and register it.
    pub fn register(mut self, mut class: PluginClass) -> Result<Self, WeftError> {
        include_factory_support(&mut class)?;
        self.registry.register(class)?;
        Ok(self)
    }

    /// Offer a context-aware initializer (the pre-injection capability).
    pub fn contextual_initializer(mut self, initializer: Arc<dyn ContextualInitializer>) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn contextualizer_mode(mut self, mode: ContextualizerMode) -> Self {
        self.contextualizer_mode = mode;
        self
    }

    pub fn inner_ids(mut self, mode: InnerIdMode) -> Self {
        self.inner_ids = mode;
        self
    }

    pub fn pipeline_id(mut self, pipeline_id: impl Into<String>) -> Self {
        self.pipeline_id = pipeline_id.into();
        self
    }

    pub fn build(self) -> Arc<PluginHost> {
        let contextualizer = select_contextualizer(self.contextualizer_mode, self.initializer);

        if self.registry.is_empty() {
            warn!("plugin host built with no registered plugin classes");
        }

        info!(
            classes = self.registry.len(),
            contextualizer = %contextualizer.kind(),
            inner_ids = ?self.inner_ids,
            pipeline_id = %self.pipeline_id,
            "plugin host ready"
        );

        Arc::new(PluginHost {
            registry: self.registry,
            contextualizer,
            inner_ids: self.inner_ids,
            execution_context: ExecutionContext::new(self.pipeline_id),
        })
    }
}
