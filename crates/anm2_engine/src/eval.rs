//! Pure evaluation of an animation at a timeline frame.
//!
//! Nothing here touches the scene or the clock: the same animation and frame
//! always produce the same [`FrameSnapshot`].

use anm2_types::model::{Animation, Frame, SelectionId, locate_keyframe};
use serde::Serialize;

/// The keyframe state of one track at one timeline frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedKeyframe {
	/// Index of the active keyframe in the track
	pub index: usize,
	/// Progress through the active keyframe's delay, in `[0, 1]`
	pub progress: f32,
	/// The keyframe to render: the active keyframe itself, or its blend toward
	/// the next one when interpolation applies
	pub frame: Frame,
}

/// Evaluation result for one layer or null track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvaluation {
	/// Which track
	pub selection: SelectionId,
	/// Rendered state, or `None` when the track is hidden or has no keyframes
	pub keyframe: Option<EvaluatedKeyframe>,
}

impl TrackEvaluation {
	/// The rendered frame, if the track is shown.
	pub fn frame(&self) -> Option<&Frame> {
		self.keyframe.as_ref().map(|keyframe| &keyframe.frame)
	}
}

/// Evaluation of every track of an animation at one timeline frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
	/// Animation name
	pub animation: String,
	/// Timeline frame
	pub frame: u32,
	/// Layer tracks then null tracks, each in document order
	pub tracks: Vec<TrackEvaluation>,
}

impl FrameSnapshot {
	/// Looks up the evaluation of one track.
	pub fn track(&self, selection: SelectionId) -> Option<&TrackEvaluation> {
		self.tracks.iter().find(|track| track.selection == selection)
	}

	/// Shortcut for the rendered frame of one track.
	pub fn frame_of(&self, selection: SelectionId) -> Option<&Frame> {
		self.track(selection).and_then(TrackEvaluation::frame)
	}
}

/// Evaluates one track at `current_frame`.
///
/// Returns `None` when the track is invisible or empty. Otherwise the active
/// keyframe is located by cumulative delay; when it is interpolated, has a
/// successor and some progress has been made, the result is blended toward
/// the successor.
///
/// # Examples
///
/// ```
/// use anm2_engine::eval::evaluate_track;
/// use anm2_types::model::Frame;
///
/// let frames = vec![
///     Frame { delay: 10, interpolated: true, ..Frame::default() },
///     Frame { x_position: 100.0, ..Frame::default() },
/// ];
/// let keyframe = evaluate_track(&frames, true, 5).unwrap();
/// assert_eq!(keyframe.frame.x_position, 50.0);
/// ```
pub fn evaluate_track(frames: &[Frame], visible: bool, current_frame: u32) -> Option<EvaluatedKeyframe> {
	if !visible {
		return None;
	}

	let lookup = locate_keyframe(frames, current_frame)?;
	let current = &frames[lookup.index];
	let progress = lookup.progress(frames, current_frame);

	let frame = match lookup.next {
		Some(next) if current.interpolated && progress > 0.0 => {
			current.interpolate(&frames[next], progress)
		}
		_ => current.clone(),
	};

	Some(EvaluatedKeyframe {
		index: lookup.index,
		progress,
		frame,
	})
}

/// Evaluates every track of an animation at `current_frame`.
pub fn evaluate_animation(animation: &Animation, current_frame: u32) -> FrameSnapshot {
	let tracks = animation
		.tracks()
		.map(|(selection, visible, frames)| TrackEvaluation {
			selection,
			keyframe: evaluate_track(frames, visible, current_frame),
		})
		.collect();

	FrameSnapshot {
		animation: animation.name.clone(),
		frame: current_frame,
		tracks,
	}
}
