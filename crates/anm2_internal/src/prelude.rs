//! Prelude module for `anm2_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use anm2_internal::prelude::*;
//!
//! // An empty document still builds an engine with no animation selected
//! let mut engine = Engine::load(Document::default(), TextureCache::default(), RecordingScene::default());
//! engine.set_current_frame(10);
//! assert_eq!(engine.current_frame(), 0);
//! assert_eq!(engine.total_frames(), 0);
//! ```

// Re-export everything from both preludes
#[doc(inline)]
pub use anm2_engine::prelude::*;
#[doc(inline)]
pub use anm2_types::prelude::*;

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use anm2_engine;
#[doc(inline)]
pub use anm2_types;
