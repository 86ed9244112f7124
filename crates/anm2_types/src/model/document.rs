//! The complete `anm2` document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
	animation::Animation,
	content::{Content, Layer, Null, Spritesheet},
	info::Info,
	selection::{SelectionId, SelectionTarget},
};
use crate::{
	FormatError,
	parse::{self, ParseConfig},
};

/// A parsed `anm2` document.
///
/// # Examples
///
/// ## Loading from disk
///
/// ```no_run
/// use anm2_types::model::Document;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let document = Document::open("isaac.anm2")?;
/// println!("{} animations, {} fps", document.animations.len(), document.info.fps);
/// # Ok(())
/// # }
/// ```
///
/// ## Resolving a selection
///
/// ```
/// use anm2_types::model::{Document, Null, SelectionId};
///
/// let mut document = Document::default();
/// document.content.nulls.push(Null { id: 0, name: "Anchor".into() });
///
/// let target = document.resolve_selection(SelectionId::from_raw(-1)).unwrap();
/// assert_eq!(target.name(), "Anchor");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	/// The `Info` block
	pub info: Info,
	/// Sprite-sheets, layers and nulls
	pub content: Content,
	/// Animations in document order
	pub animations: Vec<Animation>,
	/// Name of the animation shown on load
	pub default_animation: String,
}

impl Document {
	/// Reads and parses a document from disk with the default parse configuration.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or is not a valid document.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, FormatError> {
		Self::open_with_config(path, &ParseConfig::default())
	}

	/// Reads and parses a document from disk.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or is not a valid document.
	pub fn open_with_config(
		path: impl AsRef<Path>,
		config: &ParseConfig,
	) -> Result<Self, FormatError> {
		let text = std::fs::read_to_string(path)?;
		parse::parse_with_config(&text, config)
	}

	/// Parses a document from XML text with the default parse configuration.
	///
	/// # Errors
	///
	/// See [`parse::parse`].
	pub fn from_xml(text: &str) -> Result<Self, FormatError> {
		parse::parse(text)
	}

	/// Parses a document from XML text.
	///
	/// # Errors
	///
	/// See [`parse::parse_with_config`].
	pub fn from_xml_with_config(text: &str, config: &ParseConfig) -> Result<Self, FormatError> {
		parse::parse_with_config(text, config)
	}

	/// Looks up an animation by name.
	pub fn animation(&self, name: &str) -> Option<&Animation> {
		self.animations.iter().find(|animation| animation.name == name)
	}

	/// Looks up an animation by name for editing.
	pub fn animation_mut(&mut self, name: &str) -> Option<&mut Animation> {
		self.animations.iter_mut().find(|animation| animation.name == name)
	}

	/// Names of all animations in document order.
	pub fn animation_names(&self) -> Vec<&str> {
		self.animations.iter().map(|animation| animation.name.as_str()).collect()
	}

	/// Looks up a layer by id.
	pub fn layer(&self, id: i32) -> Option<&Layer> {
		self.content.layer(id)
	}

	/// Looks up a null by id.
	pub fn null(&self, id: i32) -> Option<&Null> {
		self.content.null(id)
	}

	/// Looks up a sprite-sheet by id.
	pub fn spritesheet(&self, id: i32) -> Option<&Spritesheet> {
		self.content.spritesheet(id)
	}

	/// Resolves a selection to its layer or null entry.
	pub fn resolve_selection(&self, selection: SelectionId) -> Option<SelectionTarget<'_>> {
		match selection {
			SelectionId::Layer(id) => self.content.layer(id).map(SelectionTarget::Layer),
			SelectionId::Null(id) => self.content.null(id).map(SelectionTarget::Null),
		}
	}

	/// Returns every layer that crops from the given sprite-sheet.
	pub fn spritesheet_usage(&self, spritesheet_id: i32) -> Vec<&Layer> {
		self.content.spritesheet_usage(spritesheet_id)
	}

	/// Collects reference-integrity problems.
	///
	/// These are tolerated everywhere in the workspace; this method only reports them.
	pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
		let mut issues = Vec::new();

		if !self.default_animation.is_empty() && self.animation(&self.default_animation).is_none() {
			issues.push(IntegrityIssue::MissingDefaultAnimation {
				name: self.default_animation.clone(),
			});
		}

		for layer in &self.content.layers {
			if self.content.spritesheet(layer.spritesheet_id).is_none() {
				issues.push(IntegrityIssue::DanglingSpritesheet {
					layer_id: layer.id,
					spritesheet_id: layer.spritesheet_id,
				});
			}
		}

		for animation in &self.animations {
			for track in &animation.layer_animations {
				if self.content.layer(track.layer_id).is_none() {
					issues.push(IntegrityIssue::OrphanedTrack {
						animation: animation.name.clone(),
						selection: SelectionId::Layer(track.layer_id),
					});
				}
			}
			for track in &animation.null_animations {
				if self.content.null(track.null_id).is_none() {
					issues.push(IntegrityIssue::OrphanedTrack {
						animation: animation.name.clone(),
						selection: SelectionId::Null(track.null_id),
					});
				}
			}
		}

		issues
	}
}

/// A tolerated reference-integrity problem in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
	/// A track drives a layer or null that is not declared in `Content`
	OrphanedTrack {
		/// Animation owning the track
		animation: String,
		/// Track address
		selection: SelectionId,
	},
	/// A layer references a sprite-sheet id that is not declared
	DanglingSpritesheet {
		/// Layer id
		layer_id: i32,
		/// Missing sprite-sheet id
		spritesheet_id: i32,
	},
	/// `DefaultAnimation` names an animation that does not exist
	MissingDefaultAnimation {
		/// The dangling name
		name: String,
	},
}

impl std::fmt::Display for IntegrityIssue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::OrphanedTrack {
				animation,
				selection,
			} => write!(f, "animation \"{}\" has a track for undeclared {}", animation, selection),
			Self::DanglingSpritesheet {
				layer_id,
				spritesheet_id,
			} => write!(f, "layer {} references missing spritesheet {}", layer_id, spritesheet_id),
			Self::MissingDefaultAnimation {
				name,
			} => write!(f, "default animation \"{}\" does not exist", name),
		}
	}
}
