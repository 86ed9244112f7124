//! Forces dynamic linking of the `anm2-rs` workspace when the `dynamic_linking` feature is enabled.
//!
//! This crate should not be used directly.

#[allow(unused_imports)]
pub use anm2_internal::*;
