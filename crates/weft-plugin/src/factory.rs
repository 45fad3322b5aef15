// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin factories and the per-instance lazy accessor.
//!
//! A [`PluginFactory`] hands out [`PluginClassProxy`] values for each plugin
//! category. Proxies build inner plugins that share the outer plugin's
//! execution context and carry ids derived from the outer plugin's id.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::debug;
use weft_core::{ExecutionContext, PluginCategory};

use crate::host::PluginHost;
use crate::plugin::PluginIdentity;
use crate::proxy::PluginClassProxy;

/// Builds inner plugins on behalf of one outer plugin.
pub trait PluginFactory: Send + Sync {
    /// The outer plugin's execution context, read at call time.
    fn execution_context(&self) -> Option<ExecutionContext>;

    /// The outer plugin's id.
    fn outer_plugin_id(&self) -> &str;

    /// Atomically issue the next sequence value. Values never repeat.
    fn next_sequence_id(&self) -> u64;

    /// A fresh proxy for the class registered under `(category, name)`.
    fn plugin_class(&self, category: PluginCategory, name: &str) -> PluginClassProxy<'_>;

    fn input(&self, name: &str) -> PluginClassProxy<'_> {
        self.plugin_class(PluginCategory::Input, name)
    }

    fn output(&self, name: &str) -> PluginClassProxy<'_> {
        self.plugin_class(PluginCategory::Output, name)
    }

    fn filter(&self, name: &str) -> PluginClassProxy<'_> {
        self.plugin_class(PluginCategory::Filter, name)
    }

    fn codec(&self, name: &str) -> PluginClassProxy<'_> {
        self.plugin_class(PluginCategory::Codec, name)
    }
}

/// The factory attached to classes whose type does not bring its own.
pub struct DefaultPluginFactory {
    outer: Arc<PluginIdentity>,
    host: Arc<PluginHost>,
    sequence: AtomicU64,
}

impl DefaultPluginFactory {
    /// Create a factory for `outer`, resolving classes through `host`.
    ///
    /// The sequence starts at zero; the first issued value is 1.
    pub fn new(outer: Arc<PluginIdentity>, host: Arc<PluginHost>) -> Self {
        Self {
            outer,
            host,
            sequence: AtomicU64::new(0),
        }
    }
}

impl PluginFactory for DefaultPluginFactory {
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

/// Write-once slot holding a plugin's default factory.
///
/// Reads after initialization take no lock. The first access on a miss
/// synchronizes, re-checks, and constructs; concurrent first callers all
/// observe the single winner.
pub(crate) struct LazyFactory {
    host: Option<Arc<PluginHost>>,
    cell: OnceLock<DefaultPluginFactory>,
}

impl LazyFactory {
    /// `None` means no default factory was attached to the plugin's class.
    pub(crate) fn new(host: Option<Arc<PluginHost>>) -> Self {
        Self {
            host,
            cell: OnceLock::new(),
        }
    }

    pub(crate) fn get_or_init(&self, outer: &Arc<PluginIdentity>) -> Option<&DefaultPluginFactory> {
        if let Some(factory) = self.cell.get() {
            return Some(factory);
        }

        let host = self.host.as_ref()?;
        Some(self.cell.get_or_init(|| {
            debug!(outer_plugin_id = outer.id(), "creating plugin factory");
            DefaultPluginFactory::new(Arc::clone(outer), Arc::clone(host))
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;
    use crate::testing::{outer_plugin, test_host};
    use crate::Plugin;

    fn factory_addr(factory: &dyn PluginFactory) -> *const () {
        std::ptr::from_ref(factory).cast::<()>()
    }

    #[test]
    fn sequence_starts_at_one_and_increments() {
        let host = test_host();
        let outer = outer_plugin(&host, "seq-outer");
        let factory = outer.plugin_factory().expect("default factory attached");

        assert_eq!(factory.next_sequence_id(), 1);
        assert_eq!(factory.next_sequence_id(), 2);
        assert_eq!(factory.next_sequence_id(), 3);
    }

    #[test]
    fn repeated_access_returns_same_factory() {
        let host = test_host();
        let outer = outer_plugin(&host, "same-outer");

        let first = factory_addr(outer.plugin_factory().unwrap());
        for _ in 0..10 {
            assert_eq!(first, factory_addr(outer.plugin_factory().unwrap()));
        }
    }

    #[test]
    fn concurrent_first_access_yields_one_factory() {
        let host = test_host();
        let outer = outer_plugin(&host, "racy-outer");

        let addrs: HashSet<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| factory_addr(outer.plugin_factory().unwrap()) as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(addrs.len(), 1);
    }

    #[test]
    fn concurrent_sequence_values_are_distinct() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 250;

        let host = test_host();
        let outer = outer_plugin(&host, "busy-outer");
        let factory = outer.plugin_factory().unwrap();

        let values: Vec<u64> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| (0..PER_THREAD).map(|_| factory.next_sequence_id()).collect::<Vec<_>>())
                })
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });

        let distinct: HashSet<u64> = values.iter().copied().collect();
        assert_eq!(values.len(), THREADS * PER_THREAD);
        assert_eq!(distinct.len(), values.len());
        assert_eq!(distinct.iter().max(), Some(&((THREADS * PER_THREAD) as u64)));
    }

    #[test]
    fn factory_reads_outer_context_at_call_time() {
        let host = test_host();
        let outer = outer_plugin(&host, "ctx-outer");
        let factory = outer.plugin_factory().unwrap();

        let replacement = ExecutionContext::new("replacement");
        outer.set_execution_context(replacement.clone());

        assert!(factory.execution_context().unwrap().same_as(&replacement));
        assert_eq!(factory.outer_plugin_id(), "ctx-outer");
    }

    #[test]
    fn category_accessors_bind_category_and_name() {
        let host = test_host();
        let outer = outer_plugin(&host, "cat-outer");
        let factory = outer.plugin_factory().unwrap();

        for (proxy, category) in [
            (factory.input("bare"), PluginCategory::Input),
            (factory.output("bare"), PluginCategory::Output),
            (factory.filter("bare"), PluginCategory::Filter),
            (factory.codec("bare"), PluginCategory::Codec),
        ] {
            assert_eq!(proxy.category(), category);
            assert_eq!(proxy.name(), "bare");
        }
    }

    #[test]
    fn sequence_is_per_factory() {
        let host = test_host();
        let a = outer_plugin(&host, "a");
        let b = outer_plugin(&host, "b");

        a.plugin_factory().unwrap().next_sequence_id();
        a.plugin_factory().unwrap().next_sequence_id();
        assert_eq!(b.plugin_factory().unwrap().next_sequence_id(), 1);
    }
}
