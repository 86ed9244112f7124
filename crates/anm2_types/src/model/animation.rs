//! Animations and their per-layer / per-null keyframe tracks.

use serde::{Deserialize, Serialize};

use super::{frame::Frame, selection::SelectionId};

/// Keyframe track of one layer within one animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerAnimation {
	/// Layer the track drives (may be orphaned)
	pub layer_id: i32,
	/// Track visibility
	pub visible: bool,
	/// Keyframes in timeline order
	pub frames: Vec<Frame>,
}

/// Keyframe track of one null within one animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NullAnimation {
	/// Null the track drives (may be orphaned)
	pub null_id: i32,
	/// Track visibility
	pub visible: bool,
	/// Keyframes in timeline order
	pub frames: Vec<Frame>,
}

/// A named animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
	/// Name, unique within the document
	pub name: String,
	/// Total length in timeline frames
	pub frame_num: u32,
	/// Whether playback wraps around at the end
	#[serde(rename = "loop")]
	pub looping: bool,
	/// Aggregate transform of the whole actor
	pub root_animation: Frame,
	/// Layer tracks in document order
	pub layer_animations: Vec<LayerAnimation>,
	/// Null tracks in document order
	pub null_animations: Vec<NullAnimation>,
}

impl Animation {
	/// Creates an empty animation with a default root frame.
	pub fn new(name: impl Into<String>, frame_num: u32, looping: bool) -> Self {
		Self {
			name: name.into(),
			frame_num,
			looping,
			root_animation: Frame::default(),
			layer_animations: Vec::new(),
			null_animations: Vec::new(),
		}
	}

	/// Total frame count, never less than 1.
	pub fn effective_frame_num(&self) -> u32 {
		self.frame_num.max(1)
	}

	/// Returns the layer track for `layer_id`.
	pub fn layer_track(&self, layer_id: i32) -> Option<&LayerAnimation> {
		self.layer_animations.iter().find(|track| track.layer_id == layer_id)
	}

	/// Returns the null track for `null_id`.
	pub fn null_track(&self, null_id: i32) -> Option<&NullAnimation> {
		self.null_animations.iter().find(|track| track.null_id == null_id)
	}

	/// Returns the keyframes of the addressed track.
	pub fn track_frames(&self, selection: SelectionId) -> Option<&[Frame]> {
		match selection {
			SelectionId::Layer(id) => self.layer_track(id).map(|track| track.frames.as_slice()),
			SelectionId::Null(id) => self.null_track(id).map(|track| track.frames.as_slice()),
		}
	}

	/// Returns the keyframes of the addressed track for in-place editing.
	pub fn track_frames_mut(&mut self, selection: SelectionId) -> Option<&mut Vec<Frame>> {
		match selection {
			SelectionId::Layer(id) => self
				.layer_animations
				.iter_mut()
				.find(|track| track.layer_id == id)
				.map(|track| &mut track.frames),
			SelectionId::Null(id) => self
				.null_animations
				.iter_mut()
				.find(|track| track.null_id == id)
				.map(|track| &mut track.frames),
		}
	}

	/// Iterates over every track as `(selection, visible, frames)`, layers first.
	pub fn tracks(&self) -> impl Iterator<Item = (SelectionId, bool, &[Frame])> + '_ {
		let layers = self
			.layer_animations
			.iter()
			.map(|track| (SelectionId::Layer(track.layer_id), track.visible, track.frames.as_slice()));
		let nulls = self
			.null_animations
			.iter()
			.map(|track| (SelectionId::Null(track.null_id), track.visible, track.frames.as_slice()));
		layers.chain(nulls)
	}
}
