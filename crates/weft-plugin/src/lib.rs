// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contextualized plugin factory.
//!
//! An outer plugin asks for its [`PluginFactory`], picks a category and a
//! class name, and constructs inner plugins that share its execution context
//! and carry ids derived from its own:
//!
//! ```no_run
//! use weft_core::{Params, PluginCategory};
//! # fn demo(host: std::sync::Arc<weft_plugin::PluginHost>) -> Result<(), weft_core::WeftError> {
//! let outer = host.instantiate(PluginCategory::Input, "tcp", Params::new())?;
//! if let Some(factory) = outer.plugin_factory() {
//!     let codec = factory.codec("plain").construct(&Params::new())?;
//!     println!("{}", codec.id()); // e.g. tcp_…/inner-codec-plain@1
//! }
//! # Ok(())
//! # }
//! ```

pub mod contextualizer;
pub mod factory;
pub mod host;
pub mod plugin;
pub mod proxy;
pub mod registry;
pub mod support;

#[cfg(test)]
pub(crate) mod testing;

pub use contextualizer::{
    select_contextualizer, ContextualInitializer, Contextualizer, ContextualizerKind,
    InitInjector, PostInjection, PreInjection,
};
pub use factory::{DefaultPluginFactory, PluginFactory};
pub use host::{PluginHost, PluginHostBuilder};
pub use plugin::{Plugin, PluginBase, PluginIdentity, PluginInit};
pub use proxy::{inner_id, PluginClassProxy};
pub use registry::{Constructor, PluginClass, PluginRegistry, ResolvedClass};
pub use support::{include_factory_support, FactorySupport};
