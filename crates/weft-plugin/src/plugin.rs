// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin capability: identity, execution context, and factory access.
//!
//! Concrete plugins embed a [`PluginBase`] built from the [`PluginInit`]
//! their constructor receives and implement [`Plugin::base`]. Everything
//! else has a provided implementation.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde_json::Value;
use weft_core::{ExecutionContext, Params, ID_PARAM};

use crate::factory::{LazyFactory, PluginFactory};
use crate::host::PluginHost;
use crate::support::FactorySupport;

/// A constructed plugin instance.
pub trait Plugin: Send + Sync + 'static {
    /// The embedded base carrying identity, context, and params.
    fn base(&self) -> &PluginBase;

    fn as_any(&self) -> &dyn Any;

    /// Stable identifier for the lifetime of the instance.
    fn id(&self) -> &str {
        self.base().id()
    }

    /// The current execution context, if one has been assigned.
    fn execution_context(&self) -> Option<ExecutionContext> {
        self.base().execution_context()
    }

    /// Assign the execution context.
    fn set_execution_context(&self, context: ExecutionContext) {
        self.base().set_execution_context(context);
    }

    /// The params this instance was constructed with, including any injected `id`.
    fn original_params(&self) -> &Params {
        self.base().params()
    }

    /// The factory for building inner plugins that share this plugin's context.
    ///
    /// Types with a native factory override this. Otherwise the default
    /// factory attached at registration is created on first access and
    /// cached for the lifetime of the instance.
    fn plugin_factory(&self) -> Option<&dyn PluginFactory> {
        self.base().plugin_factory()
    }
}

impl dyn Plugin {
    /// Downcast to a concrete plugin type.
    pub fn downcast_ref<T: Plugin>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin").field("id", &self.id()).finish()
    }
}

/// Everything a constructor needs to build a plugin.
pub struct PluginInit {
    class_name: String,
    params: Params,
    context: Option<ExecutionContext>,
    host: Option<Arc<PluginHost>>,
    factory_support: FactorySupport,
}

impl PluginInit {
    /// Init for a plugin built outside any host (no factory support).
    pub fn new(class_name: impl Into<String>, params: Params) -> Self {
        Self {
            class_name: class_name.into(),
            params,
            context: None,
            host: None,
            factory_support: FactorySupport::Unattached,
        }
    }

    pub(crate) fn for_host(
        class_name: &str,
        params: Params,
        context: Option<ExecutionContext>,
        host: &Arc<PluginHost>,
        factory_support: FactorySupport,
    ) -> Self {
        Self {
            class_name: class_name.to_string(),
            params,
            context,
            host: Some(Arc::clone(host)),
            factory_support,
        }
    }

    /// Provide the execution context up front.
    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The context available before the plugin's own initialization runs.
    ///
    /// Only set under pre-injection.
    pub fn execution_context(&self) -> Option<&ExecutionContext> {
        self.context.as_ref()
    }

    /// The host that instantiated this plugin, if any.
    pub fn host(&self) -> Option<&Arc<PluginHost>> {
        self.host.as_ref()
    }

    pub fn factory_support(&self) -> FactorySupport {
        self.factory_support
    }
}

/// Identity record shared between a plugin and the factory it owns.
pub struct PluginIdentity {
    id: String,
    context: ArcSwapOption<ExecutionContext>,
}

impl PluginIdentity {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Reads the current value; never cached by callers.
    pub fn execution_context(&self) -> Option<ExecutionContext> {
        self.context.load_full().map(|ctx| ExecutionContext::clone(&ctx))
    }

    fn set_execution_context(&self, context: ExecutionContext) {
        self.context.store(Some(Arc::new(context)));
    }
}

/// State every plugin embeds.
pub struct PluginBase {
    identity: Arc<PluginIdentity>,
    params: Params,
    factory: LazyFactory,
}

impl PluginBase {
    /// Build the base from a constructor's init.
    ///
    /// A plugin given no `id` param names itself `{class}_{uuid}`.
    pub fn new(init: PluginInit) -> Self {
        let PluginInit {
            class_name,
            params,
            context,
            host,
            factory_support,
        } = init;

        let id = match params.get(ID_PARAM) {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => format!("{class_name}_{}", uuid::Uuid::new_v4()),
        };

        let host = match factory_support {
            FactorySupport::DefaultAdapter => host,
            FactorySupport::Unattached | FactorySupport::Native => None,
        };

        Self {
            identity: Arc::new(PluginIdentity {
                id,
                context: ArcSwapOption::new(context.map(Arc::new)),
            }),
            params,
            factory: LazyFactory::new(host),
        }
    }

    pub fn id(&self) -> &str {
        self.identity.id()
    }

    pub fn identity(&self) -> &Arc<PluginIdentity> {
        &self.identity
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn execution_context(&self) -> Option<ExecutionContext> {
        self.identity.execution_context()
    }

    pub fn set_execution_context(&self, context: ExecutionContext) {
        self.identity.set_execution_context(context);
    }

    /// The lazily created default factory, if default support was attached.
    pub fn plugin_factory(&self) -> Option<&dyn PluginFactory> {
        self.factory
            .get_or_init(&self.identity)
            .map(|factory| factory as &dyn PluginFactory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{params, BarePlugin};

    #[test]
    fn explicit_string_id_is_used_verbatim() {
        let base = PluginBase::new(PluginInit::new("plain", params(&[("id", "my-codec")])));
        assert_eq!(base.id(), "my-codec");
    }

    #[test]
    fn missing_id_is_self_assigned_from_class_name() {
        let a = PluginBase::new(PluginInit::new("plain", Params::new()));
        let b = PluginBase::new(PluginInit::new("plain", Params::new()));
        assert!(a.id().starts_with("plain_"), "got {}", a.id());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn non_string_id_is_rendered_as_json() {
        let mut p = Params::new();
        p.insert("id".into(), Value::from(42));
        let base = PluginBase::new(PluginInit::new("plain", p));
        assert_eq!(base.id(), "42");
    }

    #[test]
    fn context_from_init_is_visible_immediately() {
        let ctx = ExecutionContext::new("main");
        let base = PluginBase::new(PluginInit::new("plain", Params::new()).with_context(ctx.clone()));
        assert!(base.execution_context().expect("context set").same_as(&ctx));
    }

    #[test]
    fn set_execution_context_replaces_current_value() {
        let plugin = BarePlugin::new(PluginInit::new("bare", Params::new()));
        assert!(plugin.execution_context().is_none());

        let first = ExecutionContext::new("one");
        let second = ExecutionContext::new("two");
        plugin.set_execution_context(first.clone());
        assert!(plugin.execution_context().unwrap().same_as(&first));
        plugin.set_execution_context(second.clone());
        assert!(plugin.execution_context().unwrap().same_as(&second));
    }

    #[test]
    fn plugin_outside_a_host_has_no_factory() {
        let plugin = BarePlugin::new(PluginInit::new("bare", Params::new()));
        assert!(plugin.plugin_factory().is_none());
    }

    #[test]
    fn original_params_are_retained() {
        let plugin = BarePlugin::new(PluginInit::new("bare", params(&[("format", "foo/bar")])));
        assert_eq!(plugin.original_params()["format"], "foo/bar");
    }

    #[test]
    fn downcast_to_concrete_type() {
        let plugin: Box<dyn Plugin> = Box::new(BarePlugin::new(PluginInit::new("bare", Params::new())));
        assert!(plugin.downcast_ref::<BarePlugin>().is_some());
    }
}
