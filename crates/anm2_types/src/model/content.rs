//! Sprite-sheets, layers and nulls shared by every animation of a document.

use serde::{Deserialize, Serialize};

/// An image file that layers crop their sprites from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spritesheet {
	/// Identifier, unique within the document
	pub id: i32,
	/// Image path relative to the document
	pub path: String,
}

/// A visual layer drawing crops of one sprite-sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
	/// Identifier, unique among layers
	pub id: i32,
	/// Display name
	pub name: String,
	/// Sprite-sheet the layer crops from (may dangle)
	pub spritesheet_id: i32,
}

/// A non-visual anchor point.
///
/// Null ids live in their own namespace, disjoint from layer ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Null {
	/// Identifier, unique among nulls
	pub id: i32,
	/// Display name
	pub name: String,
}

/// The `Content` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
	/// Sprite-sheets in document order
	pub spritesheets: Vec<Spritesheet>,
	/// Layers in document order
	pub layers: Vec<Layer>,
	/// Nulls in document order
	pub nulls: Vec<Null>,
}

impl Content {
	/// Looks up a sprite-sheet by id.
	pub fn spritesheet(&self, id: i32) -> Option<&Spritesheet> {
		self.spritesheets.iter().find(|sheet| sheet.id == id)
	}

	/// Looks up a layer by id.
	pub fn layer(&self, id: i32) -> Option<&Layer> {
		self.layers.iter().find(|layer| layer.id == id)
	}

	/// Looks up a null by id.
	pub fn null(&self, id: i32) -> Option<&Null> {
		self.nulls.iter().find(|null| null.id == id)
	}

	/// Returns the sprite-sheet a layer draws from, if both exist.
	pub fn layer_spritesheet(&self, layer_id: i32) -> Option<&Spritesheet> {
		self.layer(layer_id).and_then(|layer| self.spritesheet(layer.spritesheet_id))
	}

	/// Returns every layer that crops from the given sprite-sheet.
	pub fn spritesheet_usage(&self, spritesheet_id: i32) -> Vec<&Layer> {
		self.layers.iter().filter(|layer| layer.spritesheet_id == spritesheet_id).collect()
	}
}
