// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal plugin and host fixtures for unit tests.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;
use weft_core::{InnerIdMode, Params, PluginCategory};

use crate::host::PluginHost;
use crate::plugin::{Plugin, PluginBase, PluginInit};
use crate::registry::PluginClass;

pub(crate) struct BarePlugin {
    base: PluginBase,
}

impl BarePlugin {
    pub(crate) fn new(init: PluginInit) -> Self {
        Self {
            base: PluginBase::new(init),
        }
    }
}

impl Plugin for BarePlugin {
    fn base(&self) -> &PluginBase {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) fn bare_class(category: PluginCategory, name: &str) -> PluginClass {
    PluginClass::new(category, name, |init| Ok(Box::new(BarePlugin::new(init))))
}

pub(crate) fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

/// Post-injection host with a `bare` class in every category.
pub(crate) fn test_host() -> Arc<PluginHost> {
    test_host_with(InnerIdMode::Sequence)
}

pub(crate) fn test_host_with(inner_ids: InnerIdMode) -> Arc<PluginHost> {
    PluginCategory::ALL
        .into_iter()
        .try_fold(PluginHost::builder().inner_ids(inner_ids), |builder, category| {
            builder.register(bare_class(category, "bare"))
        })
        .expect("bare classes register")
        .build()
}

pub(crate) fn outer_plugin(host: &Arc<PluginHost>, id: &str) -> Box<dyn Plugin> {
    host.instantiate(PluginCategory::Input, "bare", params(&[("id", id)]))
        .expect("outer plugin constructs")
}

pub(crate) fn outer_plugin_without_context(host: &Arc<PluginHost>, id: &str) -> Box<dyn Plugin> {
    let class = host.registry().resolve(PluginCategory::Input, "bare").unwrap();
    crate::registry::ResolvedClass::new(class, host)
        .instantiate(params(&[("id", id)]), None)
        .expect("outer plugin constructs")
}
