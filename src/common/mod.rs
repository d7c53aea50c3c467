//! Utilities shared across the container and document layers.

pub mod binary;

pub use binary::{BinaryError, BinaryResult};
