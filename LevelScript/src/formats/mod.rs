//! File format support
//!
//! - Unity `.asset` documents (YAML dialect) - input
//! - Dialogue script stubs live in [`crate::script`] - output

pub mod asset;
