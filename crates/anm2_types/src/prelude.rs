//! Prelude module for `anm2_types`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```no_run
//! use anm2_types::prelude::*;
//!
//! let document = Document::open("character.anm2")?;
//! for name in document.animation_names() {
//!     println!("{name}");
//! }
//! # Ok::<(), FormatError>(())
//! ```

#[doc(inline)]
pub use crate::error::FormatError;

#[doc(inline)]
pub use crate::model::{
	Animation, Content, Document, Frame, FrameProperty, Info, IntegrityIssue, KeyframeLookup,
	KeyframePosition, Layer, LayerAnimation, Null, NullAnimation, SelectionId, SelectionTarget,
	Spritesheet, locate_keyframe,
};

#[doc(inline)]
pub use crate::parse::{NumericPolicy, ParseConfig, parse, parse_with_config};
