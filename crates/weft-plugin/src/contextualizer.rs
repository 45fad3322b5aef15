// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contextualization strategies.
//!
//! A host either offers a context-aware initializer, which makes the execution
//! context available while the plugin is being built (pre-injection), or it
//! does not, in which case the plugin is built first and the context is
//! assigned before anyone else can see it (post-injection). The strategy is
//! chosen once, when the host is built.

use std::fmt;
use std::sync::Arc;

use weft_core::{ContextualizerMode, ExecutionContext, Params, WeftError};

use crate::plugin::Plugin;
use crate::registry::ResolvedClass;

/// Host facility that constructs plugins with their context pre-injected.
pub trait ContextualInitializer: Send + Sync {
    fn initialize_plugin(
        &self,
        context: Option<&ExecutionContext>,
        class: ResolvedClass<'_>,
        params: Params,
    ) -> Result<Box<dyn Plugin>, WeftError>;
}

/// Initializer that hands the context to the constructor through its init.
#[derive(Debug, Default, Clone, Copy)]
pub struct InitInjector;

impl ContextualInitializer for InitInjector {
    fn initialize_plugin(
        &self,
        context: Option<&ExecutionContext>,
        class: ResolvedClass<'_>,
        params: Params,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        class.instantiate(params, context.cloned())
    }
}

/// Which protocol a [`Contextualizer`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextualizerKind {
    PreInjection,
    PostInjection,
}

impl fmt::Display for ContextualizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextualizerKind::PreInjection => write!(f, "pre-injection"),
            ContextualizerKind::PostInjection => write!(f, "post-injection"),
        }
    }
}

/// Produces a plugin that carries the given execution context.
///
/// Neither implementation retries; constructor and initializer errors are
/// returned unchanged.
pub trait Contextualizer: Send + Sync {
    fn kind(&self) -> ContextualizerKind;

    fn initialize_contextualized(
        &self,
        class: ResolvedClass<'_>,
        params: Params,
        context: Option<ExecutionContext>,
    ) -> Result<Box<dyn Plugin>, WeftError>;
}

/// Delegates construction to the host's [`ContextualInitializer`].
pub struct PreInjection {
    initializer: Arc<dyn ContextualInitializer>,
}

impl PreInjection {
    pub fn new(initializer: Arc<dyn ContextualInitializer>) -> Self {
        Self { initializer }
    }
}

impl Contextualizer for PreInjection {
    fn kind(&self) -> ContextualizerKind {
        ContextualizerKind::PreInjection
    }

    fn initialize_contextualized(
        &self,
        class: ResolvedClass<'_>,
        params: Params,
        context: Option<ExecutionContext>,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        self.initializer
            .initialize_plugin(context.as_ref(), class, params)
    }
}

/// Constructs from params alone, then assigns the context.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostInjection;

impl Contextualizer for PostInjection {
    fn kind(&self) -> ContextualizerKind {
        ContextualizerKind::PostInjection
    }

    fn initialize_contextualized(
        &self,
        class: ResolvedClass<'_>,
        params: Params,
        context: Option<ExecutionContext>,
    ) -> Result<Box<dyn Plugin>, WeftError> {
        let plugin = class.instantiate(params, None)?;
        if let Some(context) = context {
            plugin.set_execution_context(context);
        }
        Ok(plugin)
    }
}

/// Pick the strategy for a host.
///
/// Pre-injection is used whenever the host offers an initializer, unless
/// `mode` forces post-injection.
pub fn select_contextualizer(
    mode: ContextualizerMode,
    initializer: Option<Arc<dyn ContextualInitializer>>,
) -> Box<dyn Contextualizer> {
    match (mode, initializer) {
        (ContextualizerMode::Auto, Some(initializer)) => Box::new(PreInjection::new(initializer)),
        (ContextualizerMode::Auto, None) | (ContextualizerMode::PostInjection, _) => {
            Box::new(PostInjection)
        }
    }
}
