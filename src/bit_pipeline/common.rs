//! Common utilities module
//!
//! This module contains shared utilities used across the bit pipeline.

pub mod error;

pub use error::{MappingError, Result};
