#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `anm2-rs` reads `anm2` sprite animation documents, plays them back into a
//! host scene and edits their keyframe timelines with undo and redo.
//!
pub use anm2_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use anm2_dylib;
