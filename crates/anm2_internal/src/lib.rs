//! This module is separated into its own crate to enable simple dynamic linking for `anm2-rs`, and should not be used directly.

/// `use anm2_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use anm2_engine;
pub use anm2_types;

// Re-export commonly used types at crate root
pub use anm2_engine::{EditError, ResourceLoadError, engine::Engine, session::EditorSession};
pub use anm2_types::{FormatError, model::Document};
