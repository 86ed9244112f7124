//! Document information block.

use serde::{Deserialize, Serialize};

/// Default playback rate used when the `Fps` attribute is absent.
pub const DEFAULT_FPS: u32 = 30;

/// Document metadata from the `Info` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
	/// Author (`CreatedBy`)
	pub created_by: String,
	/// Creation date as written by the authoring tool (`CreatedOn`)
	pub created_on: String,
	/// Format version string (`Version`)
	pub version: String,
	/// Playback rate in frames per second (`Fps`)
	pub fps: u32,
}

impl Default for Info {
	fn default() -> Self {
		Self {
			created_by: String::new(),
			created_on: String::new(),
			version: String::new(),
			fps: DEFAULT_FPS,
		}
	}
}

impl Info {
	/// Returns the playback rate, never less than 1.
	pub fn effective_fps(&self) -> u32 {
		self.fps.max(1)
	}
}
