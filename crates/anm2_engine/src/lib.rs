//! Playback, evaluation and editing for `anm2` documents.
//!
//! # Overview
//!
//! - [`engine::Engine`]: evaluates the current frame of an animation and
//!   pushes sprite and marker updates into a host [`scene::Scene`]
//! - [`timeline`]: keyframe moves that rewrite whole tracks atomically
//! - [`history::HistoryManager`]: snapshot-based undo and redo
//! - [`session::EditorSession`]: the engine, history and a texture source
//!   wired together for an editor
//!
//! Recoverable problems are never returned as errors from playback calls.
//! They are logged and queued on the engine's [`notify::Notifier`].
//!
//! # Examples
//!
//! ```
//! use anm2_engine::prelude::*;
//! use anm2_types::prelude::*;
//!
//! let xml = r#"<AnimatedActor>
//!   <Info Fps="30"/>
//!   <Content><Layers><Layer Id="1" Name="body"/></Layers></Content>
//!   <Animations DefaultAnimation="idle">
//!     <Animation Name="idle" FrameNum="2" Loop="true">
//!       <RootAnimation><Frame/></RootAnimation>
//!       <LayerAnimations>
//!         <LayerAnimation LayerId="1" Visible="true">
//!           <Frame XPosition="0"/><Frame XPosition="50"/>
//!         </LayerAnimation>
//!       </LayerAnimations>
//!     </Animation>
//!   </Animations>
//! </AnimatedActor>"#;
//!
//! let document = Document::from_xml(xml)?;
//! let clock = ManualClock::default();
//! let mut session = EditorSession::open(
//! 	document,
//! 	MemoryLoader::default(),
//! 	RecordingScene::default(),
//! 	EngineConfig::default(),
//! )
//! .with_clock(clock.clone());
//!
//! session.engine_mut().play(None);
//! clock.advance_frames(1, 30);
//! assert!(session.engine_mut().tick());
//! assert_eq!(session.engine().current_frame(), 1);
//!
//! session.update_current_frame_property(SelectionId::Layer(1), FrameProperty::XPosition(80.0));
//! assert!(session.undo());
//! # Ok::<(), FormatError>(())
//! ```

mod error;

pub mod clock;
pub mod config;
pub mod engine;
pub mod eval;
pub mod history;
pub mod notify;
pub mod scene;
pub mod session;
pub mod texture;
pub mod timeline;

/// `use anm2_engine::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::{ConfigError, EditError, ResourceLoadError};
