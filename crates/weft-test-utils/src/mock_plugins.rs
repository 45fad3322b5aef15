// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin types.

use std::any::Any;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use weft_core::{ExecutionContext, PluginCategory, WeftError};
use weft_plugin::{
    Plugin, PluginBase, PluginClass, PluginClassProxy, PluginFactory, PluginHost,
    PluginIdentity, PluginInit,
};

/// Counts constructor invocations across every class it is given to.
#[derive(Debug, Clone, Default)]
pub struct ConstructionCounter(Arc<AtomicUsize>);

impl ConstructionCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A codec that records its `format` param and whether it saw a context
/// while it was being built.
pub struct PlainCodec {
    base: PluginBase,
    format: Option<String>,
    context_during_init: bool,
}

impl PlainCodec {
    pub const NAME: &'static str = "plain";

    pub fn new(init: PluginInit) -> Self {
        let context_during_init = init.execution_context().is_some();
        let base = PluginBase::new(init);
        let format = base
            .params()
            .get("format")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Self {
            base,
            format,
            context_during_init,
        }
    }

    pub fn class() -> PluginClass {
        Self::counted_class(&ConstructionCounter::default())
    }

    pub fn counted_class(counter: &ConstructionCounter) -> PluginClass {
        let counter = counter.clone();
        PluginClass::new(PluginCategory::Codec, Self::NAME, move |init| {
            counter.record();
            Ok(Box::new(PlainCodec::new(init)))
        })
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn context_during_init(&self) -> bool {
        self.context_during_init
    }
}

impl Plugin for PlainCodec {
    fn base(&self) -> &PluginBase {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A plain input, used as the outer plugin.
pub struct StdinInput {
    base: PluginBase,
}

impl StdinInput {
    pub const NAME: &'static str = "stdin";

    pub fn class() -> PluginClass {
        Self::counted_class(&ConstructionCounter::default())
    }

    pub fn counted_class(counter: &ConstructionCounter) -> PluginClass {
        let counter = counter.clone();
        PluginClass::new(PluginCategory::Input, Self::NAME, move |init| {
            counter.record();
            Ok(Box::new(StdinInput {
                base: PluginBase::new(init),
            }))
        })
    }
}

impl Plugin for StdinInput {
    fn base(&self) -> &PluginBase {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter whose constructor always fails.
pub struct FailingFilter;

impl FailingFilter {
    pub const NAME: &'static str = "broken";

    pub fn class() -> PluginClass {
        Self::counted_class(&ConstructionCounter::default())
    }

    pub fn counted_class(counter: &ConstructionCounter) -> PluginClass {
        let counter = counter.clone();
        PluginClass::new(PluginCategory::Filter, Self::NAME, move |init| {
            counter.record();
            Err(WeftError::construction(
                init.class_name(),
                "required setting `pattern` is missing",
            ))
        })
    }
}

/// An input whose type brings its own plugin factory.
///
/// Its sequence starts at 1000 so ids it generates are easy to tell apart
/// from the default factory's.
pub struct NativeFactoryInput {
    base: PluginBase,
    factory: Option<NativeFactory>,
}

impl NativeFactoryInput {
    pub const NAME: &'static str = "native";
    pub const SEQUENCE_START: u64 = 1000;

    pub fn class() -> PluginClass {
        Self::counted_class(&ConstructionCounter::default())
    }

    pub fn counted_class(counter: &ConstructionCounter) -> PluginClass {
        let counter = counter.clone();
        PluginClass::new(PluginCategory::Input, Self::NAME, move |init| {
            counter.record();
            let host = init.host().cloned();
            let base = PluginBase::new(init);
            let factory = host.map(|host| NativeFactory {
                outer: Arc::clone(base.identity()),
                host,
                sequence: AtomicU64::new(Self::SEQUENCE_START),
            });
            Ok(Box::new(NativeFactoryInput { base, factory }))
        })
        .with_native_factory()
    }

    /// The factory this type owns.
    pub fn native_factory(&self) -> Option<&dyn PluginFactory> {
        self.factory.as_ref().map(|f| f as &dyn PluginFactory)
    }
}

impl Plugin for NativeFactoryInput {
    fn base(&self) -> &PluginBase {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn plugin_factory(&self) -> Option<&dyn PluginFactory> {
        self.native_factory()
    }
}

struct NativeFactory {
    outer: Arc<PluginIdentity>,
    host: Arc<PluginHost>,
    sequence: AtomicU64,
}

impl PluginFactory for NativeFactory {
    fn execution_context(&self) -> Option<ExecutionContext> {
        self.outer.execution_context()
    }

    fn outer_plugin_id(&self) -> &str {
        self.outer.id()
    }

    fn next_sequence_id(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn plugin_class(&self, category: PluginCategory, name: &str) -> PluginClassProxy<'_> {
        PluginClassProxy::new(self, &self.host, category, name)
    }
}
