// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin class registry.
//!
//! The `PluginRegistry` is a lookup table of [`PluginClass`] descriptors keyed
//! by category and name. It is filled while a host is being built and is
//! read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use weft_core::{ExecutionContext, Params, PluginCategory, WeftError};

use crate::host::PluginHost;
use crate::plugin::{Plugin, PluginInit};
use crate::support::FactorySupport;

/// Builds a plugin instance from its init.
pub type Constructor =
    Arc<dyn Fn(PluginInit) -> Result<Box<dyn Plugin>, WeftError> + Send + Sync>;

/// Describes a constructible plugin type.
#[derive(Clone)]
pub struct PluginClass {
    name: String,
    category: Option<PluginCategory>,
    constructor: Constructor,
    provides_plugin_factory: bool,
    factory_support: FactorySupport,
}

impl PluginClass {
    /// Describe a plugin type of the given category.
    pub fn new<F>(category: PluginCategory, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(PluginInit) -> Result<Box<dyn Plugin>, WeftError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            category: Some(category),
            constructor: Arc::new(constructor),
            provides_plugin_factory: false,
            factory_support: FactorySupport::Unattached,
        }
    }

    /// Describe a type that belongs to no plugin category.
    ///
    /// Such a type cannot be registered or given factory support.
    pub fn uncategorized<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(PluginInit) -> Result<Box<dyn Plugin>, WeftError> + Send + Sync + 'static,
    {
        Self {
            category: None,
            ..Self::new(PluginCategory::Input, name, constructor)
        }
    }

    /// Declare that the type overrides [`Plugin::plugin_factory`] itself.
    ///
    /// Instances of such a class must return `Some` from `plugin_factory`
    /// when built by a host; [`ResolvedClass::instantiate`] rejects one that
    /// does not with [`WeftError::Composition`].
    pub fn with_native_factory(mut self) -> Self {
        self.provides_plugin_factory = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<PluginCategory> {
        self.category
    }

    pub fn provides_plugin_factory(&self) -> bool {
        self.provides_plugin_factory
    }

    pub fn factory_support(&self) -> FactorySupport {
        self.factory_support
    }

    pub(crate) fn set_factory_support(&mut self, support: FactorySupport) {
        self.factory_support = support;
    }

    /// `"{category}/{name}"`, or just the name for uncategorized types.
    pub fn qualified_name(&self) -> String {
        match self.category {
            Some(category) => format!("{category}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Debug for PluginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginClass")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("provides_plugin_factory", &self.provides_plugin_factory)
            .field("factory_support", &self.factory_support)
            .finish()
    }
}

/// A class resolved through a host, ready to be instantiated.
#[derive(Clone, Copy)]
pub struct ResolvedClass<'a> {
    class: &'a PluginClass,
    host: &'a Arc<PluginHost>,
}

impl<'a> ResolvedClass<'a> {
    pub fn new(class: &'a PluginClass, host: &'a Arc<PluginHost>) -> Self {
        Self { class, host }
    }

    pub fn class(&self) -> &'a PluginClass {
        self.class
    }

    /// Run the class constructor.
    ///
    /// A `context` given here is visible to the constructor through
    /// [`PluginInit::execution_context`] and is already set on the base.
    pub fn instantiate(
        &self,
        params: Params,
        context: Option<ExecutionContext>,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        let init = PluginInit::for_host(
            &self.class.name,
            params,
            context,
            self.host,
            self.class.factory_support,
        );
        let plugin = (self.class.constructor)(init)?;

        let native = self.class.factory_support == FactorySupport::Native;
        if native && plugin.plugin_factory().is_none() {
            return Err(WeftError::Composition {
                type_name: self.class.qualified_name(),
                reason: "declares a native plugin factory but its instance provides none".into(),
            });
        }
        Ok(plugin)
    }
}

/// Lookup table of plugin classes keyed by `(category, name)`.
#[derive(Default)]
pub struct PluginRegistry {
    classes: HashMap<(PluginCategory, String), PluginClass>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any class with the same category and name.
    pub fn register(&mut self, class: PluginClass) -> Result<(), WeftError> {
        let category = class.category.ok_or_else(|| WeftError::Composition {
            type_name: class.name.clone(),
            reason: "only input, output, filter and codec classes can be registered".into(),
        })?;

        debug!(class = %class.qualified_name(), support = ?class.factory_support, "registering plugin class");
        self.classes.insert((category, class.name.clone()), class);
        Ok(())
    }

    /// Resolve a class, failing with [`WeftError::PluginNotFound`].
    pub fn resolve(&self, category: PluginCategory, name: &str) -> Result<&PluginClass, WeftError> {
        self.get(category, name).ok_or_else(|| WeftError::PluginNotFound {
            category,
            name: name.to_string(),
        })
    }

    pub fn get(&self, category: PluginCategory, name: &str) -> Option<&PluginClass> {
        self.classes.get(&(category, name.to_string()))
    }

    /// All classes of one category, sorted by name.
    pub fn list(&self, category: PluginCategory) -> Vec<&PluginClass> {
        let mut classes: Vec<&PluginClass> = self
            .classes
            .iter()
            .filter(|((c, _), _)| *c == category)
            .map(|(_, class)| class)
            .collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
