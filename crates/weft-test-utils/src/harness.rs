// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A ready-made host plus an outer plugin to build inner plugins from.

use std::sync::Arc;

use serde_json::Value;
use weft_core::{
    ContextualizerMode, ExecutionContext, InnerIdMode, Params, PluginCategory, WeftError,
};
use weft_plugin::{Plugin, PluginFactory, PluginHost};

use crate::mock_initializer::RecordingInitializer;
use crate::mock_plugins::{
    ConstructionCounter, FailingFilter, NativeFactoryInput, PlainCodec, StdinInput,
};

/// Build a params map from string pairs.
pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

/// Host with every mock registered and one outer `stdin` input.
pub struct TestHarness {
    pub host: Arc<PluginHost>,
    pub outer: Box<dyn Plugin>,
    /// Present when the harness was built with pre-injection.
    pub initializer: Option<Arc<RecordingInitializer>>,
    constructions: ConstructionCounter,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// The factory of the outer plugin.
    pub fn factory(&self) -> Result<&dyn PluginFactory, WeftError> {
        self.outer
            .plugin_factory()
            .ok_or_else(|| WeftError::Internal("outer plugin has no plugin factory".into()))
    }

    /// Constructor invocations so far across every registered mock class,
    /// including the outer plugin and failed attempts.
    pub fn constructions(&self) -> usize {
        self.constructions.get()
    }

    pub fn context(&self) -> Option<ExecutionContext> {
        self.outer.execution_context()
    }

    /// Build an outer plugin of another registered class.
    pub fn outer_of(
        &self,
        category: PluginCategory,
        name: &str,
        id: &str,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        self.host.instantiate(category, name, params(&[("id", id)]))
    }
}

pub struct TestHarnessBuilder {
    pre_injection: bool,
    inner_ids: InnerIdMode,
    outer_id: String,
    pipeline_id: String,
}

impl Default for TestHarnessBuilder {
    fn default() -> Self {
        Self {
            pre_injection: true,
            inner_ids: InnerIdMode::Sequence,
            outer_id: "stdin_0".to_string(),
            pipeline_id: "main".to_string(),
        }
    }
}

impl TestHarnessBuilder {
    /// Install a [`RecordingInitializer`] (true) or force post-injection (false).
    pub fn pre_injection(mut self, enabled: bool) -> Self {
        self.pre_injection = enabled;
        self
    }

    pub fn inner_ids(mut self, mode: InnerIdMode) -> Self {
        self.inner_ids = mode;
        self
    }

    pub fn outer_id(mut self, id: impl Into<String>) -> Self {
        self.outer_id = id.into();
        self
    }

    pub fn pipeline_id(mut self, id: impl Into<String>) -> Self {
        self.pipeline_id = id.into();
        self
    }

    pub fn build(self) -> Result<TestHarness, WeftError> {
        let constructions = ConstructionCounter::default();
        let mut builder = PluginHost::builder()
            .inner_ids(self.inner_ids)
            .pipeline_id(self.pipeline_id)
            .register(StdinInput::counted_class(&constructions))?
            .register(PlainCodec::counted_class(&constructions))?
            .register(FailingFilter::counted_class(&constructions))?
            .register(NativeFactoryInput::counted_class(&constructions))?;

        let initializer = if self.pre_injection {
            let initializer = Arc::new(RecordingInitializer::new());
            builder = builder.contextual_initializer(initializer.clone());
            Some(initializer)
        } else {
            builder = builder.contextualizer_mode(ContextualizerMode::PostInjection);
            None
        };

        let host = builder.build();
        let outer = host.instantiate(
            PluginCategory::Input,
            StdinInput::NAME,
            params(&[("id", self.outer_id.as_str())]),
        )?;
        tracing::debug!(outer = %outer.id(), "test harness ready");

        Ok(TestHarness {
            host,
            outer,
            initializer,
            constructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_plugin::ContextualizerKind;

    #[test]
    fn default_harness_uses_pre_injection() {
        let harness = TestHarness::builder().build().unwrap();
        assert_eq!(harness.host.contextualizer().kind(), ContextualizerKind::PreInjection);
        assert_eq!(harness.outer.id(), "stdin_0");
        assert!(harness.initializer.is_some());
        assert_eq!(harness.constructions(), 1);
    }

    #[test]
    fn post_injection_harness_has_no_initializer() {
        let harness = TestHarness::builder().pre_injection(false).build().unwrap();
        assert_eq!(harness.host.contextualizer().kind(), ContextualizerKind::PostInjection);
        assert!(harness.initializer.is_none());
        assert!(harness.context().is_some());
    }

    #[test]
    fn params_builds_string_values() {
        let p = params(&[("format", "foo/bar")]);
        assert_eq!(p.get("format").and_then(|v| v.as_str()), Some("foo/bar"));
    }
}
