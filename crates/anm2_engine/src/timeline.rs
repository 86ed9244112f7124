//! Structural keyframe edits.
//!
//! Moving keyframes rewrites whole tracks: keyframes are expanded to absolute
//! timeline positions, moved, re-sorted, de-duplicated, and their delays are
//! recomputed from the gaps between positions. A call either rewrites every
//! affected track or none of them.

use std::collections::BTreeMap;

use anm2_types::model::{Animation, Frame, SelectionId};

use crate::error::EditError;

/// One requested keyframe move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyframeMove {
	/// Track holding the keyframe
	pub selection: SelectionId,
	/// Timeline position the keyframe currently starts at
	pub from: u32,
	/// Timeline position to move it to
	pub to: u32,
}

/// An ordered set of keyframe moves, keyed by `(selection, from)`.
///
/// Insertion order is the tie-break when two moved keyframes land on the same
/// position: the earlier move wins. Re-inserting an existing key replaces its
/// destination without changing its place in the order.
///
/// # Examples
///
/// ```
/// use anm2_engine::timeline::KeyframeMoves;
/// use anm2_types::model::SelectionId;
///
/// let mut moves = KeyframeMoves::new();
/// moves.insert(SelectionId::Layer(0), 10, 20);
/// moves.insert(SelectionId::Layer(0), 10, 25);
/// assert_eq!(moves.len(), 1);
/// assert_eq!(moves.iter().next().unwrap().to, 25);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyframeMoves {
	moves: Vec<KeyframeMove>,
}

impl KeyframeMoves {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Requests moving the keyframe at `from` on `selection` to `to`.
	pub fn insert(&mut self, selection: SelectionId, from: u32, to: u32) {
		match self.moves.iter_mut().find(|entry| entry.selection == selection && entry.from == from) {
			Some(entry) => entry.to = to,
			None => self.moves.push(KeyframeMove {
				selection,
				from,
				to,
			}),
		}
	}

	/// Builder form of [`KeyframeMoves::insert`].
	pub fn with(mut self, selection: SelectionId, from: u32, to: u32) -> Self {
		self.insert(selection, from, to);
		self
	}

	/// Moves in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &KeyframeMove> {
		self.moves.iter()
	}

	/// Number of moves.
	pub fn len(&self) -> usize {
		self.moves.len()
	}

	/// Returns `true` if no move was requested.
	pub fn is_empty(&self) -> bool {
		self.moves.is_empty()
	}

	/// Moves grouped by track, each group in insertion order.
	fn by_track(&self) -> BTreeMap<SelectionId, Vec<(usize, &KeyframeMove)>> {
		let mut groups: BTreeMap<SelectionId, Vec<(usize, &KeyframeMove)>> = BTreeMap::new();
		for (order, entry) in self.moves.iter().enumerate() {
			groups.entry(entry.selection).or_default().push((order, entry));
		}
		groups
	}
}

impl FromIterator<(SelectionId, u32, u32)> for KeyframeMoves {
	fn from_iter<I: IntoIterator<Item = (SelectionId, u32, u32)>>(iter: I) -> Self {
		let mut moves = Self::new();
		for (selection, from, to) in iter {
			moves.insert(selection, from, to);
		}
		moves
	}
}

/// A keyframe on its way through a rewrite.
struct Placed {
	frame: Frame,
	original_position: u32,
	position: u32,
	/// Insertion order of the move that placed it, if any
	moved_by: Option<usize>,
}

/// Applies `moves` to the tracks of `animation`.
///
/// Tracks without a matching keyframe for any of their moves are left
/// untouched. Returns the selections whose tracks were rewritten.
///
/// # Errors
///
/// Returns [`EditError::TrackNotFound`] if a move addresses a track the
/// animation does not have, and [`EditError::EmptyTrack`] if it addresses a
/// track without keyframes. In both cases no track is modified.
pub fn move_keyframes(
	animation: &mut Animation,
	moves: &KeyframeMoves,
) -> Result<Vec<SelectionId>, EditError> {
	let mut rewrites = Vec::new();

	for (selection, group) in moves.by_track() {
		let frames =
			animation.track_frames(selection).ok_or(EditError::TrackNotFound(selection))?;
		if frames.is_empty() {
			return Err(EditError::EmptyTrack(selection));
		}
		if let Some(rewritten) = rewrite_track(frames, &group) {
			rewrites.push((selection, rewritten));
		}
	}

	let mut changed = Vec::with_capacity(rewrites.len());
	for (selection, rewritten) in rewrites {
		if let Some(frames) = animation.track_frames_mut(selection) {
			*frames = rewritten;
			changed.push(selection);
		}
	}
	Ok(changed)
}

/// Computes the rewritten keyframe sequence of one track.
///
/// Returns `None` if no move matched a keyframe position.
fn rewrite_track(frames: &[Frame], moves: &[(usize, &KeyframeMove)]) -> Option<Vec<Frame>> {
	let mut position = 0u32;
	let mut placed: Vec<Placed> = frames
		.iter()
		.map(|frame| {
			let start = position;
			position = position.saturating_add(frame.delay);
			Placed {
				frame: frame.clone(),
				original_position: start,
				position: start,
				moved_by: None,
			}
		})
		.collect();

	let mut matched = false;
	for &(order, entry) in moves {
		let target = placed
			.iter_mut()
			.find(|keyframe| keyframe.moved_by.is_none() && keyframe.original_position == entry.from);
		if let Some(keyframe) = target {
			keyframe.position = entry.to;
			keyframe.moved_by = Some(order);
			matched = true;
		}
	}
	if !matched {
		return None;
	}

	// Stable sort: at equal positions moved keyframes come first, earliest move first.
	placed.sort_by_key(|keyframe| (keyframe.position, keyframe.moved_by.is_none(), keyframe.moved_by));
	// Only a moved keyframe evicts others; stationary zero-delay neighbours stay.
	placed.dedup_by(|later, kept| later.position == kept.position && kept.moved_by.is_some());

	if let Some(first) = placed.first()
		&& first.position != 0
	{
		let backfill = Frame {
			visible: false,
			delay: first.position,
			..first.frame.clone()
		};
		placed.insert(
			0,
			Placed {
				frame: backfill,
				original_position: 0,
				position: 0,
				moved_by: None,
			},
		);
	}

	let positions: Vec<u32> = placed.iter().map(|keyframe| keyframe.position).collect();
	Some(
		placed
			.into_iter()
			.enumerate()
			.map(|(index, mut keyframe)| {
				if let Some(&next) = positions.get(index + 1) {
					keyframe.frame.delay = next - keyframe.position;
				}
				keyframe.frame.delay = keyframe.frame.delay.max(1);
				keyframe.frame
			})
			.collect(),
	)
}
