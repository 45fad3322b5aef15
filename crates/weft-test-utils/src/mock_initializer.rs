// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A pre-injection facility that records how often it was used.

use std::sync::atomic::{AtomicUsize, Ordering};

use weft_core::{ExecutionContext, Params, WeftError};
use weft_plugin::{ContextualInitializer, InitInjector, Plugin, ResolvedClass};

/// Delegates to [`InitInjector`] and counts calls.
#[derive(Debug, Default)]
pub struct RecordingInitializer {
    calls: AtomicUsize,
    calls_without_context: AtomicUsize,
}

impl RecordingInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_without_context(&self) -> usize {
        self.calls_without_context.load(Ordering::SeqCst)
    }
}

impl ContextualInitializer for RecordingInitializer {
    fn initialize_plugin(
        &self,
        context: Option<&ExecutionContext>,
        class: ResolvedClass<'_>,
        params: Params,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if context.is_none() {
            self.calls_without_context.fetch_add(1, Ordering::SeqCst);
        }
        tracing::trace!(class = %class.class().qualified_name(), "pre-injecting context");
        InitInjector.initialize_plugin(context, class, params)
    }
}
