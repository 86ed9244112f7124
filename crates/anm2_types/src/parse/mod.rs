//! XML reader for `anm2` documents.
//!
//! Parsing is a pure function from a complete XML text to a [`Document`].
//! Structural elements (`AnimatedActor`, `Info`, `Content` and every
//! animation's `RootAnimation/Frame`) are required; everything else falls back
//! to the format defaults. An attribute with an empty value counts as absent
//! for defaulting purposes.
//!
//! Elements are located with descendant semantics: `Info` is the first `Info`
//! anywhere below `AnimatedActor`, the frames of a track are all `Frame`
//! elements below its `LayerAnimation`, and so on.
//!
//! # Examples
//!
//! ```
//! use anm2_types::parse::{ParseConfig, parse_with_config};
//!
//! let xml = r#"<AnimatedActor>
//!   <Info Fps="24"/>
//!   <Content>
//!     <Layers><Layer Id="3" Name="body" SpritesheetId="0"/></Layers>
//!   </Content>
//!   <Animations/>
//! </AnimatedActor>"#;
//!
//! let document = parse_with_config(xml, &ParseConfig::strict())?;
//! assert_eq!(document.info.fps, 24);
//! assert_eq!(document.content.layers[0].id, 3);
//! # Ok::<(), anm2_types::FormatError>(())
//! ```

mod config;
mod numeric;


use roxmltree::Node;

pub use config::{NumericPolicy, ParseConfig};

use crate::{
	FormatError,
	model::{
		Animation, Content, Document, Frame, Info, Layer, LayerAnimation, Null, NullAnimation,
		Spritesheet,
	},
};

/// Parses a document with the default (lenient) configuration.
///
/// # Errors
///
/// Returns [`FormatError`] when the text is not well-formed XML or a required
/// element is missing.
pub fn parse(text: &str) -> Result<Document, FormatError> {
	parse_with_config(text, &ParseConfig::default())
}

/// Parses a document.
///
/// # Errors
///
/// Returns [`FormatError`] when the text is not well-formed XML, a required
/// element is missing, or (strict numeric policy only) a numeric attribute is
/// malformed.
pub fn parse_with_config(text: &str, config: &ParseConfig) -> Result<Document, FormatError> {
	let mut options = roxmltree::ParsingOptions::default();
	options.nodes_limit = config.nodes_limit;
	let xml = roxmltree::Document::parse_with_options(text, options)?;

	let actor = xml
		.root()
		.descendants()
		.find(|node| node.has_tag_name("AnimatedActor"))
		.ok_or_else(|| FormatError::missing("AnimatedActor"))?;

	let reader = Reader {
		config,
	};

	let info = reader.info(actor)?;
	let content = reader.content(actor)?;
	let animations_node = first_descendant(actor, "Animations");
	let animations = match animations_node {
		Some(node) => reader.animations(node)?,
		None => Vec::new(),
	};
	let default_animation = animations_node
		.map(|node| text_attr(node, "DefaultAnimation"))
		.unwrap_or_default();

	log::debug!(
		"Parsed anm2 document: {} spritesheets, {} layers, {} nulls, {} animations",
		content.spritesheets.len(),
		content.layers.len(),
		content.nulls.len(),
		animations.len()
	);

	Ok(Document {
		info,
		content,
		animations,
		default_animation,
	})
}

struct Reader<'c> {
	config: &'c ParseConfig,
}

impl Reader<'_> {
	fn info(&self, actor: Node<'_, '_>) -> Result<Info, FormatError> {
		let node = first_descendant(actor, "Info").ok_or_else(|| FormatError::missing("Info"))?;

		Ok(Info {
			created_by: text_attr(node, "CreatedBy"),
			created_on: text_attr(node, "CreatedOn"),
			version: text_attr(node, "Version"),
			fps: to_u32(self.int(node, "Fps", i64::from(crate::model::DEFAULT_FPS))?),
		})
	}

	fn content(&self, actor: Node<'_, '_>) -> Result<Content, FormatError> {
		let node =
			first_descendant(actor, "Content").ok_or_else(|| FormatError::missing("Content"))?;

		let mut content = Content::default();

		if let Some(sheets) = first_descendant(node, "Spritesheets") {
			for sheet in descendants_named(sheets, "Spritesheet") {
				content.spritesheets.push(Spritesheet {
					id: to_i32(self.int(sheet, "Id", 0)?),
					path: text_attr(sheet, "Path"),
				});
			}
		}

		if let Some(layers) = first_descendant(node, "Layers") {
			for layer in descendants_named(layers, "Layer") {
				content.layers.push(Layer {
					id: to_i32(self.int(layer, "Id", 0)?),
					name: text_attr(layer, "Name"),
					spritesheet_id: to_i32(self.int(layer, "SpritesheetId", 0)?),
				});
			}
		}

		if let Some(nulls) = first_descendant(node, "Nulls") {
			for null in descendants_named(nulls, "Null") {
				content.nulls.push(Null {
					id: to_i32(self.int(null, "Id", 0)?),
					name: text_attr(null, "Name"),
				});
			}
		}

		Ok(content)
	}

	fn animations(&self, node: Node<'_, '_>) -> Result<Vec<Animation>, FormatError> {
		descendants_named(node, "Animation").map(|animation| self.animation(animation)).collect()
	}

	fn animation(&self, node: Node<'_, '_>) -> Result<Animation, FormatError> {
		let name = text_attr(node, "Name");

		let root_frame = node
			.descendants()
			.skip(1)
			.find(|child| {
				child.has_tag_name("Frame")
					&& child.ancestors().skip(1).any(|parent| parent.has_tag_name("RootAnimation"))
			})
			.ok_or_else(|| FormatError::MissingRootFrame {
				animation: name.clone(),
			})?;

		let mut animation = Animation::new(
			name,
			to_u32(self.int(node, "FrameNum", 1)?),
			flag_attr(node, "Loop", false),
		);
		animation.root_animation = self.frame(root_frame)?;

		if let Some(tracks) = first_descendant(node, "LayerAnimations") {
			for track in descendants_named(tracks, "LayerAnimation") {
				animation.layer_animations.push(LayerAnimation {
					layer_id: to_i32(self.int(track, "LayerId", 0)?),
					visible: flag_attr(track, "Visible", false),
					frames: self.frames(track)?,
				});
			}
		}

		if let Some(tracks) = first_descendant(node, "NullAnimations") {
			for track in descendants_named(tracks, "NullAnimation") {
				animation.null_animations.push(NullAnimation {
					null_id: to_i32(self.int(track, "NullId", 0)?),
					visible: flag_attr(track, "Visible", false),
					frames: self.frames(track)?,
				});
			}
		}

		Ok(animation)
	}

	fn frames(&self, track: Node<'_, '_>) -> Result<Vec<Frame>, FormatError> {
		descendants_named(track, "Frame").map(|frame| self.frame(frame)).collect()
	}

	fn frame(&self, node: Node<'_, '_>) -> Result<Frame, FormatError> {
		Ok(Frame {
			x_position: self.float(node, "XPosition", 0.0)?,
			y_position: self.float(node, "YPosition", 0.0)?,
			x_pivot: self.opt_float(node, "XPivot")?,
			y_pivot: self.opt_float(node, "YPivot")?,
			x_crop: self.opt_float(node, "XCrop")?,
			y_crop: self.opt_float(node, "YCrop")?,
			width: self.opt_float(node, "Width")?,
			height: self.opt_float(node, "Height")?,
			x_scale: self.float(node, "XScale", 100.0)?,
			y_scale: self.float(node, "YScale", 100.0)?,
			delay: to_u32(self.int(node, "Delay", 1)?),
			visible: flag_attr(node, "Visible", true),
			red_tint: to_i32(self.int(node, "RedTint", 255)?),
			green_tint: to_i32(self.int(node, "GreenTint", 255)?),
			blue_tint: to_i32(self.int(node, "BlueTint", 255)?),
			alpha_tint: to_i32(self.int(node, "AlphaTint", 255)?),
			red_offset: to_i32(self.int(node, "RedOffset", 0)?),
			green_offset: to_i32(self.int(node, "GreenOffset", 0)?),
			blue_offset: to_i32(self.int(node, "BlueOffset", 0)?),
			rotation: self.float(node, "Rotation", 0.0)?,
			interpolated: flag_attr(node, "Interpolated", false),
		})
	}

	/// Reads an integer attribute; absent or empty yields `default`.
	fn int(
		&self,
		node: Node<'_, '_>,
		attribute: &'static str,
		default: i64,
	) -> Result<i64, FormatError> {
		let Some(value) = non_empty_attr(node, attribute) else {
			return Ok(default);
		};

		if self.config.is_strict() {
			return value.trim().parse().map_err(|_| invalid_number(node, attribute, value));
		}

		Ok(numeric::int_prefix(value).unwrap_or_else(|| {
			log::warn!(
				"<{} {}=\"{}\"> is not a number, using 0",
				node.tag_name().name(),
				attribute,
				value
			);
			0
		}))
	}

	/// Reads a float attribute; absent or empty yields `default`.
	fn float(
		&self,
		node: Node<'_, '_>,
		attribute: &'static str,
		default: f32,
	) -> Result<f32, FormatError> {
		match non_empty_attr(node, attribute) {
			Some(value) => self.coerce_float(node, attribute, value),
			None => Ok(default),
		}
	}

	/// Reads an optional float attribute.
	///
	/// Present attributes are `Some` even when empty, in which case they read as `0`.
	fn opt_float(
		&self,
		node: Node<'_, '_>,
		attribute: &'static str,
	) -> Result<Option<f32>, FormatError> {
		match node.attribute(attribute) {
			None => Ok(None),
			Some("") => Ok(Some(0.0)),
			Some(value) => self.coerce_float(node, attribute, value).map(Some),
		}
	}

	fn coerce_float(
		&self,
		node: Node<'_, '_>,
		attribute: &'static str,
		value: &str,
	) -> Result<f32, FormatError> {
		if self.config.is_strict() {
			return value.trim().parse().map_err(|_| invalid_number(node, attribute, value));
		}

		Ok(match numeric::float_prefix(value) {
			Some(number) => number as f32,
			None => {
				log::warn!(
					"<{} {}=\"{}\"> is not a number, using NaN",
					node.tag_name().name(),
					attribute,
					value
				);
				f32::NAN
			}
		})
	}
}

fn first_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
	node.descendants().skip(1).find(|child| child.has_tag_name(name))
}

fn descendants_named<'a, 'input: 'a>(
	node: Node<'a, 'input>,
	name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
	node.descendants().skip(1).filter(move |child| child.has_tag_name(name))
}

fn non_empty_attr<'a>(node: Node<'a, '_>, attribute: &str) -> Option<&'a str> {
	node.attribute(attribute).filter(|value| !value.is_empty())
}

fn text_attr(node: Node<'_, '_>, attribute: &str) -> String {
	node.attribute(attribute).unwrap_or_default().to_string()
}

fn flag_attr(node: Node<'_, '_>, attribute: &str, default: bool) -> bool {
	non_empty_attr(node, attribute).map_or(default, |value| value == "true")
}

fn invalid_number(node: Node<'_, '_>, attribute: &'static str, value: &str) -> FormatError {
	FormatError::InvalidNumber {
		element: node.tag_name().name().to_string(),
		attribute,
		value: value.to_string(),
	}
}

fn to_u32(value: i64) -> u32 {
	value.clamp(0, i64::from(u32::MAX)) as u32
}

fn to_i32(value: i64) -> i32 {
	value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
