// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Weft plugin factory.
//!
//! Holds the error taxonomy and the small set of types that every other
//! Weft crate and every plugin implementation agree on.

pub mod error;
pub mod types;

pub use error::WeftError;
pub use types::{
    ContextualizerMode, ExecutionContext, InnerIdMode, Params, PluginCategory, ID_PARAM,
};
