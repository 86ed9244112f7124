//! The playback and evaluation engine.
//!
//! An [`Engine`] owns a [`Document`], the resident sprite-sheet textures, a
//! host [`Scene`] and the playback state (current animation, current frame,
//! playing flag, speed). Every call that changes what should be on screen
//! re-evaluates the current frame and pushes the result into the scene.
//!
//! # Usage
//!
//! ```
//! use anm2_engine::{
//! 	engine::Engine,
//! 	scene::RecordingScene,
//! 	texture::TextureCache,
//! };
//! use anm2_types::model::Document;
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
//! let document = Document::from_xml(xml).unwrap();
//! let mut engine = Engine::load(document, TextureCache::default(), RecordingScene::default());
//!
//! engine.set_current_frame(1);
//! assert_eq!(engine.scene().sprite(1).unwrap().transform.x, 50.0);
//! ```

use std::{collections::HashSet, rc::Rc, time::Duration};

use anm2_types::model::{
	Animation, Document, Frame, FrameProperty, KeyframePosition, Layer, SelectionId, Spritesheet,
	keyframe_positions, locate_keyframe,
};
use serde::Serialize;

use crate::{
	clock::{Clock, SystemClock},
	config::EngineConfig,
	error::EditError,
	eval::{self, FrameSnapshot, TrackEvaluation},
	notify::{Notice, NoticeKind, Notifier},
	scene::{CropRect, MarkerStyle, MarkerUpdate, Scene, SpriteUpdate, TextureRegion, Transform2D},
	texture::TextureCache,
	timeline::{self, KeyframeMoves},
};

/// Summary of one track at the current frame.
///
/// Read by timeline and property panels; nothing here is interpolated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerState {
	/// Which track
	pub selection: SelectionId,
	/// Layer or null name, or `"Layer {id}"` / `"Null {id}"` when undeclared
	pub name: String,
	/// The track's own visibility flag
	pub visible: bool,
	/// Path of the layer's sprite-sheet; `None` for nulls and dangling references
	pub spritesheet_path: Option<String>,
	/// Number of keyframes in the track
	pub frame_count: usize,
	/// Index of the active keyframe
	pub keyframe_index: Option<usize>,
	/// The active keyframe as stored
	pub current_frame: Option<Frame>,
	/// Track visible and active keyframe visible
	pub currently_visible: bool,
}

impl LayerState {
	/// Returns `true` for null tracks.
	pub fn is_null(&self) -> bool {
		self.selection.is_null()
	}
}

/// Playback and evaluation engine over one document.
pub struct Engine<S: Scene> {
	document: Document,
	textures: TextureCache,
	scene: S,
	clock: Box<dyn Clock>,
	notifier: Notifier,
	marker_style: MarkerStyle,

	current_animation: String,
	current_frame: u32,
	playing: bool,
	speed: f32,
	/// Seconds accumulated toward the next frame advance
	frame_timer: f64,
	last_time: Duration,

	last_evaluation: Option<FrameSnapshot>,
	disposed: bool,
}

impl<S: Scene> std::fmt::Debug for Engine<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Engine")
			.field("current_animation", &self.current_animation)
			.field("current_frame", &self.current_frame)
			.field("playing", &self.playing)
			.field("speed", &self.speed)
			.field("textures", &self.textures.len())
			.field("disposed", &self.disposed)
			.finish_non_exhaustive()
	}
}

impl<S: Scene> Engine<S> {
	/// Builds an engine over `document`, creating one scene node per layer and null.
	///
	/// The default animation is selected at frame 0 and playback is stopped.
	pub fn load(document: Document, textures: TextureCache, scene: S) -> Self {
		let config = EngineConfig::default();
		let clock = SystemClock::default();
		let last_time = clock.now();

		let mut engine = Self {
			current_animation: document.default_animation.clone(),
			document,
			textures,
			scene,
			clock: Box::new(clock),
			notifier: Notifier::default(),
			marker_style: marker_style(&config),
			current_frame: 0,
			playing: false,
			speed: config.default_speed,
			frame_timer: 0.0,
			last_time,
			last_evaluation: None,
			disposed: false,
		};
		engine.install();
		engine
	}

	/// Applies the playback speed and crosshair style of `config`.
	pub fn with_config(mut self, config: &EngineConfig) -> Self {
		self.marker_style = marker_style(config);
		self.set_speed(config.default_speed);
		self.refresh();
		self
	}

	/// Replaces the frame-pacing clock.
	pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
		self.set_clock(clock);
		self
	}

	/// Replaces the notification queue, keeping anything already pending in it.
	///
	/// Notices raised by this engine so far are appended after the new queue's.
	pub fn with_notifier(mut self, notifier: Notifier) -> Self {
		let raised = std::mem::replace(&mut self.notifier, notifier);
		self.notifier.merge(raised);
		self
	}

	/// Replaces the frame-pacing clock in place.
	pub fn set_clock(&mut self, clock: impl Clock + 'static) {
		self.last_time = clock.now();
		self.clock = Box::new(clock);
	}

	fn install(&mut self) {
		for layer in &self.document.content.layers {
			self.scene.add_sprite(layer.id, &layer.name);
		}
		for null in &self.document.content.nulls {
			self.scene.add_marker(null.id, &null.name);
		}

		for issue in self.document.integrity_issues() {
			let message = issue.to_string();
			self.notifier.notify_once(message.clone(), NoticeKind::ReferenceIntegrity, message);
		}

		log::info!(
			"Engine loaded: {} layers, {} nulls, {} animations, {} textures",
			self.document.content.layers.len(),
			self.document.content.nulls.len(),
			self.document.animations.len(),
			self.textures.len()
		);
		self.refresh();
	}

	// --- Playback --------------------------------------------------------

	/// Switches to the named animation at frame 0.
	///
	/// Unknown names are logged and leave the engine untouched. Returns `true`
	/// on success.
	pub fn set_animation(&mut self, name: &str) -> bool {
		let Some(animation) = self.document.animation(name) else {
			log::warn!("Animation \"{name}\" not found");
			return false;
		};

		let single_frame = animation.effective_frame_num() == 1 && !animation.looping;
		self.current_animation = name.to_string();
		self.current_frame = 0;
		self.frame_timer = 0.0;
		if single_frame {
			self.playing = false;
		}

		log::debug!("Animation set to \"{name}\"");
		self.refresh();
		true
	}

	/// Starts playback, optionally switching animation first.
	pub fn play(&mut self, animation: Option<&str>) {
		if let Some(name) = animation
			&& name != self.current_animation
		{
			self.set_animation(name);
		}

		self.playing = true;
		self.last_time = self.clock.now();
		log::debug!("Play \"{}\" from frame {}", self.current_animation, self.current_frame);
	}

	/// Stops advancing, keeping the current frame.
	pub fn pause(&mut self) {
		self.playing = false;
		log::debug!("Pause at frame {}", self.current_frame);
	}

	/// Stops advancing and rewinds to frame 0.
	pub fn stop(&mut self) {
		self.playing = false;
		self.current_frame = 0;
		self.frame_timer = 0.0;
		log::debug!("Stop");
		self.refresh();
	}

	/// Sets the playback speed multiplier.
	///
	/// Non-positive and non-finite values are ignored.
	pub fn set_speed(&mut self, multiplier: f32) {
		if !(multiplier.is_finite() && multiplier > 0.0) {
			log::warn!("Ignoring playback speed {multiplier}");
			return;
		}
		self.speed = multiplier;
	}

	/// Jumps to `frame`, clamped into the current animation's frame range.
	pub fn set_current_frame(&mut self, frame: i64) {
		let Some(animation) = self.current_animation() else {
			return;
		};

		let last = i64::from(animation.effective_frame_num() - 1);
		self.current_frame = u32::try_from(frame.clamp(0, last)).unwrap_or(0);
		self.frame_timer = 0.0;
		self.refresh();
	}

	/// Advances playback by the time elapsed since the previous call.
	///
	/// At most one frame is advanced per call and the sub-frame timer is reset
	/// when that happens. Returns `true` if the frame changed.
	pub fn tick(&mut self) -> bool {
		if !self.playing || self.disposed {
			return false;
		}

		let now = self.clock.now();
		let elapsed = now.saturating_sub(self.last_time);
		self.last_time = now;

		let frame_duration = 1.0 / f64::from(self.document.info.effective_fps());
		self.frame_timer += elapsed.as_secs_f64() * f64::from(self.speed);
		if self.frame_timer < frame_duration {
			return false;
		}

		self.frame_timer = 0.0;
		self.advance_frame()
	}

	fn advance_frame(&mut self) -> bool {
		let Some(animation) = self.current_animation() else {
			return false;
		};
		let frame_num = animation.effective_frame_num();
		let looping = animation.looping;
		let previous = self.current_frame;

		let next = self.current_frame + 1;
		self.current_frame = if next < frame_num {
			next
		} else if looping {
			0
		} else {
			self.playing = false;
			frame_num - 1
		};

		self.refresh();
		self.current_frame != previous
	}

	// --- Accessors -------------------------------------------------------

	/// Current timeline frame.
	pub fn current_frame(&self) -> u32 {
		self.current_frame
	}

	/// Frame count of the current animation, or 0 when none is selected.
	pub fn total_frames(&self) -> u32 {
		self.current_animation().map_or(0, Animation::effective_frame_num)
	}

	/// Document frame rate.
	pub fn fps(&self) -> u32 {
		self.document.info.effective_fps()
	}

	/// Name of the current animation.
	pub fn current_animation_name(&self) -> &str {
		&self.current_animation
	}

	/// The current animation, if the name resolves.
	pub fn current_animation(&self) -> Option<&Animation> {
		self.document.animation(&self.current_animation)
	}

	/// Loop flag of the current animation.
	pub fn current_animation_loop(&self) -> bool {
		self.current_animation().is_some_and(|animation| animation.looping)
	}

	/// Whether playback is running.
	pub fn is_playing(&self) -> bool {
		self.playing
	}

	/// Playback speed multiplier.
	pub fn speed(&self) -> f32 {
		self.speed
	}

	/// Name of the document's default animation.
	pub fn default_animation_name(&self) -> &str {
		&self.document.default_animation
	}

	/// Animation names in document order.
	pub fn animation_names(&self) -> Vec<&str> {
		self.document.animation_names()
	}

	/// Declared layers.
	pub fn layers(&self) -> &[Layer] {
		&self.document.content.layers
	}

	/// Declared sprite-sheets.
	pub fn spritesheets(&self) -> &[Spritesheet] {
		&self.document.content.spritesheets
	}

	/// The live document.
	pub fn document(&self) -> &Document {
		&self.document
	}

	/// Resident textures.
	pub fn textures(&self) -> &TextureCache {
		&self.textures
	}

	/// Moves the resident textures out, leaving the engine with none.
	pub fn take_textures(&mut self) -> TextureCache {
		std::mem::take(&mut self.textures)
	}

	/// The host scene.
	pub fn scene(&self) -> &S {
		&self.scene
	}

	/// The host scene, mutably.
	pub fn scene_mut(&mut self) -> &mut S {
		&mut self.scene
	}

	/// The notification queue.
	pub fn notifier(&self) -> &Notifier {
		&self.notifier
	}

	/// The notification queue, mutably.
	pub fn notifier_mut(&mut self) -> &mut Notifier {
		&mut self.notifier
	}

	/// Removes and returns every pending notice.
	pub fn drain_notices(&mut self) -> Vec<Notice> {
		self.notifier.drain()
	}

	/// The most recent evaluation pushed into the scene.
	pub fn last_evaluation(&self) -> Option<&FrameSnapshot> {
		self.last_evaluation.as_ref()
	}

	/// Returns `true` once [`Engine::dispose`] has run.
	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Per-track summaries of the current animation, layers first then nulls.
	pub fn current_layer_states(&self) -> Vec<LayerState> {
		let Some(animation) = self.current_animation() else {
			return Vec::new();
		};
		let content = &self.document.content;

		animation
			.tracks()
			.map(|(selection, visible, frames)| {
				let lookup = locate_keyframe(frames, self.current_frame);
				let current_frame = lookup.map(|lookup| frames[lookup.index].clone());

				let (name, spritesheet_path) = match selection {
					SelectionId::Layer(id) => {
						let layer = content.layer(id);
						(
							layer.map_or_else(|| format!("Layer {id}"), |layer| layer.name.clone()),
							layer
								.and_then(|layer| content.spritesheet(layer.spritesheet_id))
								.map(|sheet| sheet.path.clone()),
						)
					}
					SelectionId::Null(id) => (
						content.null(id).map_or_else(|| format!("Null {id}"), |null| null.name.clone()),
						None,
					),
				};

				LayerState {
					selection,
					name,
					visible,
					spritesheet_path,
					frame_count: frames.len(),
					keyframe_index: lookup.map(|lookup| lookup.index),
					currently_visible: visible && current_frame.as_ref().is_some_and(|frame| frame.visible),
					current_frame,
				}
			})
			.collect()
	}

	/// Keyframes of one track of the current animation with absolute timeline positions.
	pub fn layer_keyframes(&self, selection: SelectionId) -> Vec<KeyframePosition> {
		self.current_animation()
			.and_then(|animation| animation.track_frames(selection))
			.map(keyframe_positions)
			.unwrap_or_default()
	}

	// --- Edits -----------------------------------------------------------

	/// Moves keyframes on the current animation.
	///
	/// Returns `false` and queues an [`NoticeKind::EditRejected`] notice when
	/// the edit is rejected; the document is then unchanged.
	pub fn move_keyframes(&mut self, moves: &KeyframeMoves) -> bool {
		match self.try_move_keyframes(moves) {
			Ok(_) => true,
			Err(error) => {
				self.reject("Keyframe move", &error);
				false
			}
		}
	}

	/// Moves keyframes on the current animation.
	///
	/// Returns the selections whose tracks were rewritten; moves that match
	/// no keyframe leave the list empty.
	pub fn try_move_keyframes(&mut self, moves: &KeyframeMoves) -> Result<Vec<SelectionId>, EditError> {
		if self.disposed {
			return Err(EditError::Disposed);
		}
		let animation = self
			.document
			.animation_mut(&self.current_animation)
			.ok_or(EditError::NoAnimation)?;
		let changed = timeline::move_keyframes(animation, moves)?;

		log::debug!("Moved keyframes on {} track(s)", changed.len());
		if !changed.is_empty() {
			self.refresh();
		}
		Ok(changed)
	}

	/// Overwrites one field of the active keyframe of a track.
	///
	/// Returns `false` and queues an [`NoticeKind::EditRejected`] notice when
	/// the track does not exist or has no keyframes.
	pub fn update_current_frame_property(&mut self, selection: SelectionId, property: FrameProperty) -> bool {
		match self.try_update_current_frame_property(selection, property) {
			Ok(()) => true,
			Err(error) => {
				self.reject("Property update", &error);
				false
			}
		}
	}

	/// Overwrites one field of the active keyframe of a track.
	pub fn try_update_current_frame_property(
		&mut self,
		selection: SelectionId,
		property: FrameProperty,
	) -> Result<(), EditError> {
		if self.disposed {
			return Err(EditError::Disposed);
		}
		let current_frame = self.current_frame;
		let frames = self
			.document
			.animation_mut(&self.current_animation)
			.ok_or(EditError::NoAnimation)?
			.track_frames_mut(selection)
			.ok_or(EditError::TrackNotFound(selection))?;
		let lookup = locate_keyframe(frames, current_frame).ok_or(EditError::EmptyTrack(selection))?;

		log::debug!("Set {property} on keyframe {} of {selection}", lookup.index);
		frames[lookup.index].set(property);
		self.refresh();
		Ok(())
	}

	/// Queues an [`NoticeKind::EditRejected`] notice for a failed edit.
	pub(crate) fn reject(&mut self, edit: &str, error: &EditError) {
		self.notifier.notify(NoticeKind::EditRejected, format!("{edit} rejected: {error}"));
	}

	/// Sets the document frame rate; values below 1 become 1.
	pub fn set_fps(&mut self, fps: u32) {
		self.document.info.fps = fps.max(1);
	}

	/// Sets the document author.
	pub fn set_created_by(&mut self, created_by: impl Into<String>) {
		self.document.info.created_by = created_by.into();
	}

	/// Replaces the document wholesale, keeping resident textures and playback state.
	///
	/// The current animation is kept when the new document has it, otherwise
	/// the new default animation is selected. The frame is clamped.
	pub fn set_document(&mut self, document: Document) {
		self.scene.clear();
		self.document = document;
		if self.current_animation().is_none() {
			self.current_animation = self.document.default_animation.clone();
		}
		self.current_frame = self.current_frame.min(self.total_frames().saturating_sub(1));
		self.install();
	}

	// --- Lifecycle -------------------------------------------------------

	/// Installs a new document and textures, resetting playback.
	///
	/// The previous scene nodes and textures are released first.
	pub fn reload(&mut self, document: Document, textures: TextureCache) {
		self.dispose();

		self.document = document;
		self.textures = textures;
		self.disposed = false;
		self.current_animation = self.document.default_animation.clone();
		self.current_frame = 0;
		self.playing = false;
		self.frame_timer = 0.0;
		self.last_time = self.clock.now();
		self.install();
	}

	/// Releases scene nodes and textures. Calling it again does nothing.
	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}

		self.scene.clear();
		self.textures.clear();
		self.playing = false;
		self.last_evaluation = None;
		self.disposed = true;
		log::debug!("Engine disposed");
	}

	// --- Evaluation ------------------------------------------------------

	/// Evaluates the current frame and pushes it into the scene.
	fn refresh(&mut self) {
		if self.disposed {
			return;
		}
		let Some(animation) = self.document.animation(&self.current_animation) else {
			self.last_evaluation = None;
			return;
		};

		let snapshot = eval::evaluate_animation(animation, self.current_frame);
		let mut driven_layers = HashSet::new();
		let mut driven_nulls = HashSet::new();

		for track in &snapshot.tracks {
			match track.selection {
				SelectionId::Layer(id) => {
					driven_layers.insert(id);
					self.apply_layer(id, track);
				}
				SelectionId::Null(id) => {
					driven_nulls.insert(id);
					self.apply_null(id, track);
				}
			}
		}

		for layer in &self.document.content.layers {
			if !driven_layers.contains(&layer.id) {
				self.scene.hide_sprite(layer.id);
			}
		}
		for null in &self.document.content.nulls {
			if !driven_nulls.contains(&null.id) {
				self.scene.hide_marker(null.id);
			}
		}

		self.last_evaluation = Some(snapshot);
	}

	fn apply_layer(&mut self, layer_id: i32, track: &TrackEvaluation) {
		let Some(spritesheet_id) = self.document.content.layer(layer_id).map(|layer| layer.spritesheet_id) else {
			return;
		};
		let Some(frame) = track.frame() else {
			self.scene.hide_sprite(layer_id);
			return;
		};
		self.check_finite(track.selection, frame);

		let region = match (self.textures.get(spritesheet_id), frame.crop()) {
			(Some(texture), Some((x, y, width, height))) => Some(TextureRegion {
				texture: Rc::clone(texture),
				crop: CropRect { x, y, width, height },
			}),
			(None, Some(_)) if self.document.content.spritesheet(spritesheet_id).is_some() => {
				self.notifier.notify_once(
					format!("texture:{spritesheet_id}"),
					NoticeKind::ResourceLoad,
					format!("No texture resident for spritesheet {spritesheet_id}"),
				);
				None
			}
			_ => None,
		};

		let update = SpriteUpdate {
			transform: Transform2D::from(frame),
			visible: frame.visible,
			alpha: alpha(frame),
			tint: frame.tint_rgb(),
			anchor: frame.anchor(),
			region,
		};
		self.scene.update_sprite(layer_id, &update);
	}

	fn apply_null(&mut self, null_id: i32, track: &TrackEvaluation) {
		if self.document.content.null(null_id).is_none() {
			return;
		}
		let Some(frame) = track.frame() else {
			self.scene.hide_marker(null_id);
			return;
		};
		self.check_finite(track.selection, frame);

		let update = MarkerUpdate {
			transform: Transform2D::from(frame),
			visible: frame.visible,
			alpha: alpha(frame),
			tint: frame.tint_rgb(),
			style: self.marker_style,
		};
		self.scene.update_marker(null_id, &update);
	}

	fn check_finite(&mut self, selection: SelectionId, frame: &Frame) {
		if frame.is_finite() {
			return;
		}
		self.notifier.notify_once(
			format!("non-finite:{}:{selection}", self.current_animation),
			NoticeKind::ReferenceIntegrity,
			format!(
				"Non-finite transform on {selection} in animation \"{}\"",
				self.current_animation
			),
		);
	}
}

fn alpha(frame: &Frame) -> f32 {
	frame.alpha_tint.clamp(0, 255) as f32 / 255.0
}

fn marker_style(config: &EngineConfig) -> MarkerStyle {
	MarkerStyle {
		size: config.crosshair_size,
		line_width: config.crosshair_line_width,
		color: config.crosshair_color,
	}
}
