//! Unified addressing of layer and null tracks.
//!
//! Editors address layers and nulls through one "selection" value. Hosts that
//! need a single integer can use the raw form, where a layer keeps its id and
//! null `n` maps to `-(n + 1)`.

use serde::{Deserialize, Serialize};

use super::content::{Layer, Null};

/// Identifies a layer track or a null track.
///
/// # Examples
///
/// ```
/// use anm2_types::model::SelectionId;
///
/// let null = SelectionId::Null(0);
/// assert_eq!(null.to_raw(), Some(-1));
/// assert_eq!(SelectionId::from_raw(-1), null);
/// assert_eq!(SelectionId::from_raw(7), SelectionId::Layer(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum SelectionId {
	/// A layer track, by layer id
	Layer(i32),
	/// A null track, by null id
	Null(i32),
}

impl SelectionId {
	/// Decodes a raw selection integer: `raw >= 0` is a layer, `raw < 0` is null `-(raw + 1)`.
	pub fn from_raw(raw: i32) -> Self {
		if raw >= 0 {
			Self::Layer(raw)
		} else {
			Self::Null(-(raw + 1))
		}
	}

	/// Encodes to the raw selection integer.
	///
	/// Returns `None` for ids the raw form cannot represent without colliding:
	/// negative layer ids and negative null ids.
	pub fn to_raw(self) -> Option<i32> {
		match self {
			Self::Layer(id) if id >= 0 => Some(id),
			Self::Null(id) if id >= 0 => Some(-id - 1),
			_ => None,
		}
	}

	/// Returns `true` for null tracks.
	pub fn is_null(self) -> bool {
		matches!(self, Self::Null(_))
	}

	/// Returns the layer or null id without its namespace.
	pub fn id(self) -> i32 {
		match self {
			Self::Layer(id) | Self::Null(id) => id,
		}
	}
}

impl From<i32> for SelectionId {
	fn from(raw: i32) -> Self {
		Self::from_raw(raw)
	}
}

impl std::fmt::Display for SelectionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Layer(id) => write!(f, "layer {}", id),
			Self::Null(id) => write!(f, "null {}", id),
		}
	}
}

/// Content entry a [`SelectionId`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget<'a> {
	/// A layer
	Layer(&'a Layer),
	/// A null
	Null(&'a Null),
}

impl SelectionTarget<'_> {
	/// Display name of the resolved entry.
	pub fn name(&self) -> &str {
		match self {
			Self::Layer(layer) => &layer.name,
			Self::Null(null) => &null.name,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_null_bijection() {
		for n in [0, 1, 1000, i32::MAX] {
			let raw = SelectionId::Null(n).to_raw().unwrap();
			assert!(raw < 0);
			assert_eq!(-(raw + 1), n);
			assert_eq!(SelectionId::from_raw(raw), SelectionId::Null(n));
		}
	}

	#[test]
	fn test_layers_keep_their_id() {
		for id in [0, 1, 42] {
			assert_eq!(SelectionId::Layer(id).to_raw(), Some(id));
			assert_eq!(SelectionId::from(id), SelectionId::Layer(id));
		}
	}

	#[test]
	fn test_unrepresentable_ids() {
		assert_eq!(SelectionId::Layer(-3).to_raw(), None);
		assert_eq!(SelectionId::Null(-1).to_raw(), None);
	}

	#[test]
	fn test_min_raw_value() {
		assert_eq!(SelectionId::from_raw(i32::MIN), SelectionId::Null(i32::MAX));
	}
}
