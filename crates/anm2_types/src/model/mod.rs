//! In-memory representation of an `anm2` document.
//!
//! The model is a plain tree of owned values. It is created wholesale by the
//! parser, mutated in place by the timeline and property editors, and cloned
//! wholesale for undo/redo snapshots.

mod animation;
mod content;
mod document;
mod frame;
mod info;
mod selection;
mod track;

pub use animation::{Animation, LayerAnimation, NullAnimation};
pub use content::{Content, Layer, Null, Spritesheet};
pub use document::{Document, IntegrityIssue};
pub use frame::{Frame, FrameProperty};
pub use info::{DEFAULT_FPS, Info};
pub use selection::{SelectionId, SelectionTarget};
pub use track::{KeyframeLookup, KeyframePosition, keyframe_positions, locate_keyframe, track_length};
