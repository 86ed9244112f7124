//! Benchmark helper utilities for anm2-rs
//!
//! This module generates synthetic `anm2` documents so the benchmarks do not
//! depend on asset files. Every generated track has the same shape: keyframes
//! with a delay of 4 alternating between interpolated and held, with crops on
//! layer tracks.

use std::fmt::Write;

/// Shape of a generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
	/// Number of layers (all on one sprite-sheet)
	pub layers: usize,
	/// Number of nulls
	pub nulls: usize,
	/// Number of animations
	pub animations: usize,
	/// Keyframes per track
	pub keyframes: usize,
}

impl Shape {
	/// Timeline length of every generated animation.
	pub fn frame_num(&self) -> usize {
		self.keyframes * KEYFRAME_DELAY
	}
}

/// Delay of every generated keyframe
pub const KEYFRAME_DELAY: usize = 4;

/// Generates the XML text of a document with the given shape.
///
/// Animations are named `anim0`, `anim1`, ... and `anim0` is the default.
pub fn generate_document_xml(shape: Shape) -> String {
	let mut xml = String::new();
	let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
	let _ = writeln!(xml, "<AnimatedActor>");
	let _ = writeln!(xml, r#"  <Info CreatedBy="bench" CreatedOn="" Version="1" Fps="30"/>"#);

	let _ = writeln!(xml, "  <Content>");
	let _ = writeln!(xml, r#"    <Spritesheets><Spritesheet Path="sheet.png" Id="0"/></Spritesheets>"#);
	let _ = writeln!(xml, "    <Layers>");
	for id in 0..shape.layers {
		let _ = writeln!(xml, r#"      <Layer Name="layer{id}" Id="{id}" SpritesheetId="0"/>"#);
	}
	let _ = writeln!(xml, "    </Layers>");
	let _ = writeln!(xml, "    <Nulls>");
	for id in 0..shape.nulls {
		let _ = writeln!(xml, r#"      <Null Name="null{id}" Id="{id}"/>"#);
	}
	let _ = writeln!(xml, "    </Nulls>");
	let _ = writeln!(xml, "  </Content>");

	let _ = writeln!(xml, r#"  <Animations DefaultAnimation="anim0">"#);
	for index in 0..shape.animations {
		let _ = writeln!(
			xml,
			r#"    <Animation Name="anim{index}" FrameNum="{}" Loop="true">"#,
			shape.frame_num()
		);
		let _ = writeln!(xml, r#"      <RootAnimation><Frame Delay="{}"/></RootAnimation>"#, shape.frame_num());

		let _ = writeln!(xml, "      <LayerAnimations>");
		for id in 0..shape.layers {
			let _ = writeln!(xml, r#"        <LayerAnimation LayerId="{id}" Visible="true">"#);
			write_frames(&mut xml, shape.keyframes, true);
			let _ = writeln!(xml, "        </LayerAnimation>");
		}
		let _ = writeln!(xml, "      </LayerAnimations>");

		let _ = writeln!(xml, "      <NullAnimations>");
		for id in 0..shape.nulls {
			let _ = writeln!(xml, r#"        <NullAnimation NullId="{id}" Visible="true">"#);
			write_frames(&mut xml, shape.keyframes, false);
			let _ = writeln!(xml, "        </NullAnimation>");
		}
		let _ = writeln!(xml, "      </NullAnimations>");
		let _ = writeln!(xml, "    </Animation>");
	}
	let _ = writeln!(xml, "  </Animations>");
	let _ = writeln!(xml, "</AnimatedActor>");
	xml
}

fn write_frames(xml: &mut String, count: usize, cropped: bool) {
	for index in 0..count {
		let crop = if cropped {
			format!(r#" XPivot="16" YPivot="16" XCrop="{}" YCrop="0" Width="32" Height="32""#, (index % 8) * 32)
		} else {
			String::new()
		};
		let _ = writeln!(
			xml,
			r#"          <Frame XPosition="{}" YPosition="{}" XScale="100" YScale="100" Rotation="{}" Delay="{KEYFRAME_DELAY}" Interpolated="{}"{crop}/>"#,
			index * 3,
			index * 2,
			index * 15,
			index % 2 == 0
		);
	}
}

/// Common document shapes for benchmarking
pub mod shapes {
	use super::Shape;

	/// A single sprite with a short loop
	pub const TINY: Shape = Shape {
		layers: 1,
		nulls: 0,
		animations: 1,
		keyframes: 4,
	};
	/// A typical character: a dozen layers, a few nulls, several animations
	pub const CHARACTER: Shape = Shape {
		layers: 12,
		nulls: 3,
		animations: 8,
		keyframes: 16,
	};
	/// A large boss document
	pub const LARGE: Shape = Shape {
		layers: 64,
		nulls: 16,
		animations: 24,
		keyframes: 64,
	};
}

#[cfg(test)]
mod tests {
	use anm2_types::model::Document;

	use super::*;

	#[test]
	fn test_generated_document_parses() {
		let document = Document::from_xml(&generate_document_xml(shapes::CHARACTER)).unwrap();

		assert_eq!(document.content.layers.len(), 12);
		assert_eq!(document.content.nulls.len(), 3);
		assert_eq!(document.animations.len(), 8);
		assert_eq!(document.default_animation, "anim0");

		let animation = document.animation("anim3").unwrap();
		assert_eq!(animation.frame_num, 64);
		assert_eq!(animation.layer_animations[0].frames.len(), 16);
		assert!(animation.layer_animations[0].frames[0].crop().is_some());
		assert!(animation.null_animations[0].frames[0].crop().is_none());
		assert!(document.integrity_issues().is_empty());
	}

	#[test]
	fn test_frame_num() {
		assert_eq!(shapes::TINY.frame_num(), 16);
	}
}
