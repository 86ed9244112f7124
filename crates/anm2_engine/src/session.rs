//! An editing session over one document.
//!
//! [`EditorSession`] combines an [`Engine`], a [`HistoryManager`] and a
//! [`TextureSource`]. Edits made through the session are recorded for undo.
//! Undo and redo rebuild the engine from the restored snapshot, reusing every
//! resident texture whose path did not change.

use std::path::Path;

use anm2_types::{
	FormatError,
	model::{Document, FrameProperty, SelectionId},
};

use crate::{
	clock::Clock,
	config::EngineConfig,
	engine::Engine,
	error::EditError,
	history::HistoryManager,
	notify::Notifier,
	scene::Scene,
	texture::{DirectoryLoader, TextureCache, TextureSource},
	timeline::KeyframeMoves,
};

/// Engine, history and texture source for one open document.
#[derive(Debug)]
pub struct EditorSession<S: Scene, T: TextureSource> {
	engine: Engine<S>,
	history: HistoryManager,
	source: T,
	config: EngineConfig,
}

impl<S: Scene> EditorSession<S, DirectoryLoader> {
	/// Parses the file at `path` and opens it with sprite-sheets resolved
	/// relative to the file's directory.
	pub fn open_file(path: impl AsRef<Path>, scene: S, config: EngineConfig) -> Result<Self, FormatError> {
		let path = path.as_ref();
		let document = Document::open(path)?;
		Ok(Self::open(document, DirectoryLoader::for_document(path), scene, config))
	}
}

impl<S: Scene, T: TextureSource> EditorSession<S, T> {
	/// Loads every sprite-sheet of `document` and builds an engine on the
	/// default animation.
	pub fn open(document: Document, source: T, scene: S, config: EngineConfig) -> Self {
		let mut notifier = Notifier::default();
		let mut textures = TextureCache::new(&config);
		textures.load_all(&document, &source, &mut notifier);

		let engine = Engine::load(document, textures, scene)
			.with_notifier(notifier)
			.with_config(&config);

		Self {
			engine,
			history: HistoryManager::new(config.history_capacity),
			source,
			config,
		}
	}

	/// Replaces the frame-pacing clock.
	pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
		self.engine.set_clock(clock);
		self
	}

	/// The engine.
	pub fn engine(&self) -> &Engine<S> {
		&self.engine
	}

	/// The engine, mutably.
	///
	/// Edits made directly on the engine are not recorded; call
	/// [`EditorSession::save_state`] first to make them undoable.
	pub fn engine_mut(&mut self) -> &mut Engine<S> {
		&mut self.engine
	}

	/// The undo/redo history.
	pub fn history(&self) -> &HistoryManager {
		&self.history
	}

	/// The texture source.
	pub fn source(&self) -> &T {
		&self.source
	}

	/// The configuration the session was opened with.
	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// The live document.
	pub fn document(&self) -> &Document {
		self.engine.document()
	}

	/// Replaces the open document.
	///
	/// The previous engine's scene nodes and textures are released before the
	/// new document's sprite-sheets are loaded. History is cleared.
	pub fn load_document(&mut self, document: Document) {
		let mut textures = self.engine.take_textures();
		self.engine.dispose();

		let notifier = self.engine.notifier_mut();
		notifier.reset_once();
		textures.load_all(&document, &self.source, notifier);

		self.engine.reload(document, textures);
		self.history.clear();
		log::info!("Document loaded, default animation \"{}\"", self.engine.default_animation_name());
	}

	/// Records the live document so the next edit can be undone.
	pub fn save_state(&mut self, description: Option<&str>) {
		self.history.save_state(self.engine.document(), description);
	}

	/// Moves keyframes on the current animation, recording the edit.
	///
	/// Returns `false` if the edit was rejected. Moves that match no keyframe
	/// succeed without recording anything.
	pub fn move_keyframes(&mut self, moves: &KeyframeMoves) -> bool {
		self.edit("Move keyframes", "Keyframe move", |engine| {
			engine.try_move_keyframes(moves).map(|changed| !changed.is_empty())
		})
	}

	/// Overwrites one field of the active keyframe of a track, recording the edit.
	pub fn update_current_frame_property(&mut self, selection: SelectionId, property: FrameProperty) -> bool {
		let description = format!("Update {property}");
		self.edit(&description, "Property update", |engine| {
			engine.try_update_current_frame_property(selection, property).map(|()| true)
		})
	}

	/// Sets the document frame rate, recording the edit.
	pub fn set_fps(&mut self, fps: u32) {
		self.save_state(Some("Update FPS"));
		self.engine.set_fps(fps);
	}

	/// Sets the document author, recording the edit.
	pub fn set_created_by(&mut self, created_by: impl Into<String>) {
		self.save_state(Some("Update author"));
		self.engine.set_created_by(created_by);
	}

	/// Runs `apply` and records the pre-edit document when it reports a change.
	fn edit(
		&mut self,
		description: &str,
		kind: &str,
		apply: impl FnOnce(&mut Engine<S>) -> Result<bool, EditError>,
	) -> bool {
		let before = self.engine.document().clone();
		match apply(&mut self.engine) {
			Ok(changed) => {
				if changed {
					self.history.record(before, Some(description.to_string()));
				}
				true
			}
			Err(error) => {
				self.engine.reject(kind, &error);
				false
			}
		}
	}

	/// Returns `true` if there is something to undo.
	pub fn can_undo(&self) -> bool {
		self.history.can_undo()
	}

	/// Returns `true` if there is something to redo.
	pub fn can_redo(&self) -> bool {
		self.history.can_redo()
	}

	/// Restores the previous snapshot. Returns `false` when there is none.
	pub fn undo(&mut self) -> bool {
		match self.history.undo(self.engine.document()) {
			Some(snapshot) => {
				self.restore(snapshot);
				true
			}
			None => false,
		}
	}

	/// Reapplies the last undone snapshot. Returns `false` when there is none.
	pub fn redo(&mut self) -> bool {
		match self.history.redo(self.engine.document()) {
			Some(snapshot) => {
				self.restore(snapshot);
				true
			}
			None => false,
		}
	}

	/// Rebuilds the engine from `snapshot`, keeping the current animation and
	/// frame when the snapshot still has that animation.
	fn restore(&mut self, snapshot: Document) {
		let animation = self.engine.current_animation_name().to_string();
		let frame = self.engine.current_frame();

		let mut textures = self.engine.take_textures();
		self.engine.dispose();
		textures.retain_document(&snapshot);
		textures.load_missing(&snapshot, &self.source, self.engine.notifier_mut());

		self.engine.reload(snapshot, textures);
		if animation != self.engine.current_animation_name() && self.engine.document().animation(&animation).is_some() {
			self.engine.set_animation(&animation);
		}
		if self.engine.current_animation_name() == animation {
			self.engine.set_current_frame(i64::from(frame));
		}
	}

	/// Releases the engine's scene nodes and textures.
	pub fn dispose(&mut self) {
		self.engine.dispose();
	}
}
