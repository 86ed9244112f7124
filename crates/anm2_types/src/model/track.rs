//! Keyframe lookup on a track's cumulative-delay timeline.
//!
//! A track is an ordered slice of [`Frame`]s. Keyframe `i` starts at the sum of
//! the delays of keyframes `0..i` and holds for its own delay. Frames past the
//! end of the track clamp to the last keyframe.

use serde::Serialize;

use super::frame::Frame;

/// Result of locating the active keyframe for a timeline frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyframeLookup {
	/// Index of the active keyframe
	pub index: usize,
	/// Timeline position where the active keyframe starts
	pub start: u32,
	/// Index of the following keyframe, if any
	pub next: Option<usize>,
}

impl KeyframeLookup {
	/// Progress through the active keyframe's delay, clamped to `[0, 1]`.
	pub fn progress(&self, frames: &[Frame], current_frame: u32) -> f32 {
		let delay = frames[self.index].delay;
		if delay == 0 {
			return 0.0;
		}
		let elapsed = current_frame.saturating_sub(self.start) as f32;
		(elapsed / delay as f32).clamp(0.0, 1.0)
	}
}

/// Finds the keyframe active at `current_frame`.
///
/// Returns `None` for an empty track. A single-keyframe track always resolves
/// to that keyframe.
///
/// # Examples
///
/// ```
/// use anm2_types::model::{Frame, locate_keyframe};
///
/// let frames = vec![
///     Frame { delay: 3, ..Frame::default() },
///     Frame { delay: 2, ..Frame::default() },
/// ];
/// let lookup = locate_keyframe(&frames, 4).unwrap();
/// assert_eq!(lookup.index, 1);
/// assert_eq!(lookup.start, 3);
/// assert_eq!(lookup.next, None);
/// ```
pub fn locate_keyframe(frames: &[Frame], current_frame: u32) -> Option<KeyframeLookup> {
	match frames.len() {
		0 => None,
		1 => Some(KeyframeLookup {
			index: 0,
			start: 0,
			next: None,
		}),
		len => {
			let mut start = 0u32;
			for (index, frame) in frames.iter().enumerate() {
				let end = start.saturating_add(frame.delay);
				if current_frame < end {
					return Some(KeyframeLookup {
						index,
						start,
						next: (index + 1 < len).then_some(index + 1),
					});
				}
				if index + 1 < len {
					start = end;
				}
			}

			Some(KeyframeLookup {
				index: len - 1,
				start,
				next: None,
			})
		}
	}
}

/// A keyframe together with its absolute timeline position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframePosition {
	/// Timeline position where the keyframe starts
	pub position: u32,
	/// The keyframe
	pub frame: Frame,
	/// Copy of the keyframe's delay
	pub delay: u32,
}

/// Expands a track into keyframes with absolute timeline positions.
pub fn keyframe_positions(frames: &[Frame]) -> Vec<KeyframePosition> {
	let mut position = 0u32;
	frames
		.iter()
		.map(|frame| {
			let entry = KeyframePosition {
				position,
				frame: frame.clone(),
				delay: frame.delay,
			};
			position = position.saturating_add(frame.delay);
			entry
		})
		.collect()
}

/// Total length of a track: the sum of its delays.
pub fn track_length(frames: &[Frame]) -> u32 {
	frames.iter().fold(0u32, |total, frame| total.saturating_add(frame.delay))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn track(delays: &[u32]) -> Vec<Frame> {
		delays
			.iter()
			.map(|&delay| Frame {
				delay,
				..Frame::default()
			})
			.collect()
	}

	#[test]
	fn test_empty_track() {
		assert_eq!(locate_keyframe(&[], 0), None);
	}

	#[test]
	fn test_single_keyframe_ignores_delay() {
		let frames = track(&[2]);
		let lookup = locate_keyframe(&frames, 50).unwrap();
		assert_eq!(lookup.index, 0);
		assert_eq!(lookup.start, 0);
		assert_eq!(lookup.next, None);
	}

	#[test]
	fn test_walks_cumulative_delays() {
		let frames = track(&[2, 3, 1]);

		let expected = [(0, 0), (0, 0), (1, 2), (1, 2), (1, 2), (2, 5)];
		for (current, (index, start)) in expected.into_iter().enumerate() {
			let lookup = locate_keyframe(&frames, current as u32).unwrap();
			assert_eq!((lookup.index, lookup.start), (index, start), "frame {current}");
		}

		assert_eq!(locate_keyframe(&frames, 0).unwrap().next, Some(1));
		assert_eq!(locate_keyframe(&frames, 5).unwrap().next, None);
	}

	#[test]
	fn test_clamps_past_end() {
		let frames = track(&[2, 3]);
		let lookup = locate_keyframe(&frames, 40).unwrap();
		assert_eq!(lookup.index, 1);
		assert_eq!(lookup.start, 2);
		assert_eq!(lookup.progress(&frames, 40), 1.0);
	}

	#[test]
	fn test_progress() {
		let frames = track(&[10, 1]);
		let lookup = locate_keyframe(&frames, 5).unwrap();
		assert_eq!(lookup.progress(&frames, 5), 0.5);
		assert_eq!(lookup.progress(&frames, 0), 0.0);
	}

	#[test]
	fn test_positions_and_length() {
		let frames = track(&[2, 3, 1]);
		let positions: Vec<u32> = keyframe_positions(&frames).iter().map(|k| k.position).collect();
		assert_eq!(positions, vec![0, 2, 5]);
		assert_eq!(track_length(&frames), 6);
	}
}
