//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Page builders producing positioned text runs
//! - Custom assertions over plans

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
