//! Prelude module for `anm2_engine`.
//!
//! # Examples
//!
//! ```no_run
//! use anm2_engine::prelude::*;
//!
//! let config = EngineConfig::load(None)?;
//! let session = EditorSession::open_file("character.anm2", RecordingScene::default(), config)?;
//! println!("{} frames", session.engine().total_frames());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[doc(inline)]
pub use crate::error::{ConfigError, EditError, ResourceLoadError};

#[doc(inline)]
pub use crate::{
	clock::{Clock, ManualClock, SystemClock},
	config::EngineConfig,
	engine::{Engine, LayerState},
	eval::{FrameSnapshot, TrackEvaluation, evaluate_animation, evaluate_track},
	history::{HistoryEntry, HistoryManager},
	notify::{Notice, NoticeKind, Notifier},
	scene::{MarkerStyle, MarkerUpdate, RecordingScene, Scene, SpriteUpdate, Transform2D},
	session::EditorSession,
	texture::{DirectoryLoader, MemoryLoader, SpriteTexture, TextureCache, TextureSource},
	timeline::{KeyframeMove, KeyframeMoves, move_keyframes},
};
