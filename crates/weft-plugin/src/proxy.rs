// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proxies bound to one `(factory, category, name)` triple.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use weft_core::{InnerIdMode, Params, PluginCategory, WeftError, ID_PARAM};

use crate::factory::PluginFactory;
use crate::host::PluginHost;
use crate::plugin::Plugin;
use crate::registry::ResolvedClass;

/// Stands in for the plugin class registered under a category and name.
///
/// Proxies are cheap, immutable, and hold no state of their own; every
/// call to a factory's category accessor returns a new one.
pub struct PluginClassProxy<'a> {
    factory: &'a dyn PluginFactory,
    host: &'a Arc<PluginHost>,
    category: PluginCategory,
    name: String,
}

impl<'a> PluginClassProxy<'a> {
    pub fn new(
        factory: &'a dyn PluginFactory,
        host: &'a Arc<PluginHost>,
        category: PluginCategory,
        name: &str,
    ) -> Self {
        Self {
            factory,
            host,
            category,
            name: name.to_string(),
        }
    }

    pub fn category(&self) -> PluginCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct an inner plugin sharing the outer plugin's execution context.
    ///
    /// An explicit `"id"` in `params` is used as-is and consumes no sequence
    /// value. Otherwise an id relating the new plugin to its outer plugin is
    /// generated. `params` itself is never modified.
    pub fn construct(&self, params: &Params) -> Result<Box<dyn Plugin>, WeftError> {
        let params_with_id = self.params_with_id(params);

        let class = self.host.registry().resolve(self.category, &self.name)?;
        let plugin = self.host.contextualizer().initialize_contextualized(
            ResolvedClass::new(class, self.host),
            params_with_id,
            self.factory.execution_context(),
        )?;

        debug!(
            inner_plugin_id = plugin.id(),
            outer_plugin_id = self.factory.outer_plugin_id(),
            "initializing inner {} {}",
            self.name,
            self.category,
        );

        Ok(plugin)
    }

    fn params_with_id(&self, params: &Params) -> Params {
        let mut params = params.clone();
        if !params.contains_key(ID_PARAM) && self.host.inner_ids() == InnerIdMode::Sequence {
            params.insert(ID_PARAM.to_string(), Value::String(self.generate_inner_id()));
        }
        params
    }

    fn generate_inner_id(&self) -> String {
        inner_id(
            self.factory.outer_plugin_id(),
            self.category,
            &self.name,
            self.factory.next_sequence_id(),
        )
    }
}

impl fmt::Debug for PluginClassProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginClassProxy")
            .field("outer_plugin_id", &self.factory.outer_plugin_id())
            .field("category", &self.category)
            .field("name", &self.name)
            .finish()
    }
}

/// `{outer}/inner-{category}-{name}@{sequence}`
pub fn inner_id(outer_id: &str, category: PluginCategory, name: &str, sequence: u64) -> String {
    format!("{outer_id}/inner-{category}-{name}@{sequence}")
}
