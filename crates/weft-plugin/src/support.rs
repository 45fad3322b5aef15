// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Factory support negotiation.
//!
//! Before a class is registered with a host, [`include_factory_support`]
//! decides where its instances' [`Plugin::plugin_factory`](crate::Plugin::plugin_factory)
//! comes from. A type that already supplies a factory keeps it; any other
//! plugin type gets the default lazily-created factory.

use tracing::debug;
use weft_core::WeftError;

use crate::registry::PluginClass;

/// Where a class's plugin factory comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorySupport {
    /// Not negotiated; instances have no factory.
    Unattached,
    /// The type provides its own factory and it is left untouched.
    Native,
    /// The default factory is attached.
    DefaultAdapter,
}

/// Give `class` factory support unless it already has its own.
///
/// Fails with [`WeftError::Composition`] if the class is not a plugin type.
/// Calling this again on the same class changes nothing.
pub fn include_factory_support(class: &mut PluginClass) -> Result<FactorySupport, WeftError> {
    if class.category().is_none() {
        return Err(WeftError::Composition {
            type_name: class.name().to_string(),
            reason: "factory support requires an input, output, filter or codec plugin type"
                .into(),
        });
    }

    let support = if class.provides_plugin_factory() {
        FactorySupport::Native
    } else {
        FactorySupport::DefaultAdapter
    };

    if class.factory_support() != support {
        debug!(class = %class.qualified_name(), ?support, "negotiated plugin factory support");
        class.set_factory_support(support);
    }

    Ok(support)
}
