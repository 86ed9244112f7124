//! The drawable scene the engine pushes evaluated transforms into.
//!
//! The engine never renders. It owns one sprite node per layer and one
//! crosshair marker per null in some host scene graph and sends them
//! [`SpriteUpdate`]s and [`MarkerUpdate`]s after every evaluation.
//! [`RecordingScene`] is an in-memory implementation for tests and headless
//! tools.

use std::{collections::BTreeMap, rc::Rc};

use anm2_types::model::Frame;
use serde::Serialize;

use crate::texture::SpriteTexture;

/// Position, scale and rotation of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform2D {
	/// Horizontal position in pixels
	pub x: f32,
	/// Vertical position in pixels
	pub y: f32,
	/// Horizontal scale factor (`1.0` is identity)
	pub scale_x: f32,
	/// Vertical scale factor (`1.0` is identity)
	pub scale_y: f32,
	/// Rotation in radians
	pub rotation: f32,
}

impl Default for Transform2D {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			scale_x: 1.0,
			scale_y: 1.0,
			rotation: 0.0,
		}
	}
}

impl From<&Frame> for Transform2D {
	fn from(frame: &Frame) -> Self {
		Self {
			x: frame.x_position,
			y: frame.y_position,
			scale_x: frame.x_scale / 100.0,
			scale_y: frame.y_scale / 100.0,
			rotation: frame.rotation.to_radians(),
		}
	}
}

/// A crop rectangle on a sprite-sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropRect {
	/// Left edge
	pub x: f32,
	/// Top edge
	pub y: f32,
	/// Width
	pub width: f32,
	/// Height
	pub height: f32,
}

/// A crop of a resident sprite-sheet texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRegion {
	/// The sprite-sheet texture
	pub texture: Rc<SpriteTexture>,
	/// Region of the texture to draw
	pub crop: CropRect,
}

/// New state for a layer's sprite node.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteUpdate {
	/// Node transform
	pub transform: Transform2D,
	/// Visibility
	pub visible: bool,
	/// Opacity in `[0, 1]`
	pub alpha: f32,
	/// Tint as `0xRRGGBB`
	pub tint: u32,
	/// Normalised anchor, when the keyframe defines one
	pub anchor: Option<(f32, f32)>,
	/// New texture region; `None` keeps the node's previous texture and crop
	pub region: Option<TextureRegion>,
}

/// Appearance of the null crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
	/// Half-length of each arm in pixels
	pub size: f32,
	/// Stroke width in pixels
	pub line_width: f32,
	/// Stroke color as `0xRRGGBB`
	pub color: u32,
}

/// New state for a null's crosshair marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerUpdate {
	/// Node transform
	pub transform: Transform2D,
	/// Visibility
	pub visible: bool,
	/// Opacity in `[0, 1]`
	pub alpha: f32,
	/// Tint as `0xRRGGBB`
	pub tint: u32,
	/// Crosshair appearance
	pub style: MarkerStyle,
}

/// A host scene graph.
///
/// Node ids are layer ids for sprites and null ids for markers; the two
/// namespaces are independent.
pub trait Scene {
	/// Creates the sprite node of a layer.
	fn add_sprite(&mut self, layer_id: i32, name: &str);

	/// Creates the crosshair marker of a null.
	fn add_marker(&mut self, null_id: i32, name: &str);

	/// Applies a new state to a sprite node.
	fn update_sprite(&mut self, layer_id: i32, update: &SpriteUpdate);

	/// Hides a sprite node.
	fn hide_sprite(&mut self, layer_id: i32);

	/// Applies a new state to a marker.
	fn update_marker(&mut self, null_id: i32, update: &MarkerUpdate);

	/// Hides a marker.
	fn hide_marker(&mut self, null_id: i32);

	/// Destroys every node.
	fn clear(&mut self);
}

/// Recorded state of a sprite node.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteNode {
	/// Layer name
	pub name: String,
	/// Last transform
	pub transform: Transform2D,
	/// Visibility
	pub visible: bool,
	/// Opacity
	pub alpha: f32,
	/// Tint
	pub tint: u32,
	/// Anchor, if one was ever set
	pub anchor: Option<(f32, f32)>,
	/// Current texture region, if one was ever set
	pub region: Option<TextureRegion>,
}

/// Recorded state of a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerNode {
	/// Null name
	pub name: String,
	/// Last transform
	pub transform: Transform2D,
	/// Visibility
	pub visible: bool,
	/// Opacity
	pub alpha: f32,
	/// Tint
	pub tint: u32,
	/// Crosshair appearance
	pub style: Option<MarkerStyle>,
}

/// A [`Scene`] that keeps node state in memory.
///
/// Like a real scene graph, a sprite update without a texture region keeps
/// the previous region and an update without an anchor keeps the previous
/// anchor. Updates for unknown nodes are ignored.
#[derive(Debug, Clone, Default)]
pub struct RecordingScene {
	sprites: BTreeMap<i32, SpriteNode>,
	markers: BTreeMap<i32, MarkerNode>,
	updates: usize,
}

impl RecordingScene {
	/// Looks up a sprite node.
	pub fn sprite(&self, layer_id: i32) -> Option<&SpriteNode> {
		self.sprites.get(&layer_id)
	}

	/// Looks up a marker.
	pub fn marker(&self, null_id: i32) -> Option<&MarkerNode> {
		self.markers.get(&null_id)
	}

	/// All sprite nodes by layer id.
	pub fn sprites(&self) -> &BTreeMap<i32, SpriteNode> {
		&self.sprites
	}

	/// All markers by null id.
	pub fn markers(&self) -> &BTreeMap<i32, MarkerNode> {
		&self.markers
	}

	/// Number of update and hide calls received.
	pub fn update_count(&self) -> usize {
		self.updates
	}

	/// Returns `true` when the scene holds no nodes.
	pub fn is_empty(&self) -> bool {
		self.sprites.is_empty() && self.markers.is_empty()
	}
}

impl Scene for RecordingScene {
	fn add_sprite(&mut self, layer_id: i32, name: &str) {
		self.sprites.insert(
			layer_id,
			SpriteNode {
				name: name.to_string(),
				transform: Transform2D::default(),
				visible: false,
				alpha: 1.0,
				tint: 0xFFFFFF,
				anchor: None,
				region: None,
			},
		);
	}

	fn add_marker(&mut self, null_id: i32, name: &str) {
		self.markers.insert(
			null_id,
			MarkerNode {
				name: name.to_string(),
				transform: Transform2D::default(),
				visible: false,
				alpha: 1.0,
				tint: 0xFFFFFF,
				style: None,
			},
		);
	}

	fn update_sprite(&mut self, layer_id: i32, update: &SpriteUpdate) {
		self.updates += 1;
		let Some(node) = self.sprites.get_mut(&layer_id) else {
			return;
		};

		node.transform = update.transform;
		node.visible = update.visible;
		node.alpha = update.alpha;
		node.tint = update.tint;
		if update.anchor.is_some() {
			node.anchor = update.anchor;
		}
		if update.region.is_some() {
			node.region.clone_from(&update.region);
		}
	}

	fn hide_sprite(&mut self, layer_id: i32) {
		self.updates += 1;
		if let Some(node) = self.sprites.get_mut(&layer_id) {
			node.visible = false;
		}
	}

	fn update_marker(&mut self, null_id: i32, update: &MarkerUpdate) {
		self.updates += 1;
		let Some(node) = self.markers.get_mut(&null_id) else {
			return;
		};

		node.transform = update.transform;
		node.visible = update.visible;
		node.alpha = update.alpha;
		node.tint = update.tint;
		node.style = Some(update.style);
	}

	fn hide_marker(&mut self, null_id: i32) {
		self.updates += 1;
		if let Some(node) = self.markers.get_mut(&null_id) {
			node.visible = false;
		}
	}

	fn clear(&mut self) {
		self.sprites.clear();
		self.markers.clear();
	}
}
