//! Error types for the engine crate.

use std::path::PathBuf;

use anm2_types::model::SelectionId;
use thiserror::Error;

/// A sprite-sheet image could not be loaded.
///
/// These never abort a load batch: the affected sprite-sheet gets a
/// placeholder texture and the error is reported as a notice.
#[derive(Debug, Error)]
pub enum ResourceLoadError {
	/// The image file could not be read
	#[error("Failed to read {}: {source}", path.display())]
	Io {
		/// Resolved file path
		path: PathBuf,
		/// Underlying IO error
		#[source]
		source: std::io::Error,
	},

	/// The image bytes could not be decoded
	#[error("Failed to decode image: {0}")]
	Decode(#[from] image::ImageError),

	/// The texture source has nothing for this path
	#[error("No image data for {path}")]
	Missing {
		/// Sprite-sheet path as written in the document
		path: String,
	},
}

/// A timeline or property edit was rejected.
///
/// Rejected edits leave the document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// No animation is selected, or the selected name no longer exists
	#[error("No current animation")]
	NoAnimation,

	/// The current animation has no track for this selection
	#[error("No track for {0} in the current animation")]
	TrackNotFound(SelectionId),

	/// The addressed track has no keyframes
	#[error("Track for {0} has no keyframes")]
	EmptyTrack(SelectionId),

	/// The engine was disposed
	#[error("Engine is disposed")]
	Disposed,
}

/// Engine configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The configuration sources could not be read or deserialized
	#[error("Invalid engine configuration: {0}")]
	Source(#[from] config::ConfigError),
}
