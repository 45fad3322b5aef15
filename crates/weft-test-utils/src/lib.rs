// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Weft integration tests.
//!
//! # Components
//!
//! - [`mock_plugins`] - small plugin types covering every construction path
//! - [`RecordingInitializer`] - a pre-injection facility that counts its calls
//! - [`TestHarness`] - a host with all mocks registered and an outer plugin

pub mod harness;
pub mod mock_initializer;
pub mod mock_plugins;

pub use harness::{params, TestHarness};
pub use mock_initializer::RecordingInitializer;
pub use mock_plugins::{
    ConstructionCounter, FailingFilter, NativeFactoryInput, PlainCodec, StdinInput,
};
