//! Keyframe type and its settable properties.

use serde::{Deserialize, Serialize};

/// A single keyframe of a layer or null track.
///
/// Positions and pivots are in pixels, scales in percent (`100` is identity),
/// rotation in degrees. Crop geometry and pivots are optional: null tracks carry
/// none, and an absent pivot means "use the drawable's default anchor".
///
/// # Defaults
///
/// `Frame::default()` matches the attribute defaults of the file format:
///
/// ```
/// use anm2_types::model::Frame;
///
/// let frame = Frame::default();
/// assert_eq!(frame.x_scale, 100.0);
/// assert_eq!(frame.delay, 1);
/// assert!(frame.visible);
/// assert_eq!(frame.alpha_tint, 255);
/// assert_eq!(frame.red_offset, 0);
/// assert!(frame.width.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
	/// Horizontal position
	pub x_position: f32,
	/// Vertical position
	pub y_position: f32,
	/// Horizontal pivot inside the crop
	pub x_pivot: Option<f32>,
	/// Vertical pivot inside the crop
	pub y_pivot: Option<f32>,
	/// Left edge of the crop rectangle on the sprite-sheet
	pub x_crop: Option<f32>,
	/// Top edge of the crop rectangle on the sprite-sheet
	pub y_crop: Option<f32>,
	/// Crop width
	pub width: Option<f32>,
	/// Crop height
	pub height: Option<f32>,
	/// Horizontal scale in percent
	pub x_scale: f32,
	/// Vertical scale in percent
	pub y_scale: f32,
	/// Number of timeline frames this keyframe holds
	pub delay: u32,
	/// Visibility
	pub visible: bool,
	/// Red tint multiplier (0-255)
	pub red_tint: i32,
	/// Green tint multiplier (0-255)
	pub green_tint: i32,
	/// Blue tint multiplier (0-255)
	pub blue_tint: i32,
	/// Alpha multiplier (0-255)
	pub alpha_tint: i32,
	/// Additive red offset (0-255)
	pub red_offset: i32,
	/// Additive green offset (0-255)
	pub green_offset: i32,
	/// Additive blue offset (0-255)
	pub blue_offset: i32,
	/// Rotation in degrees
	pub rotation: f32,
	/// Blend linearly toward the next keyframe over this keyframe's delay
	pub interpolated: bool,
}

impl Default for Frame {
	fn default() -> Self {
		Self {
			x_position: 0.0,
			y_position: 0.0,
			x_pivot: None,
			y_pivot: None,
			x_crop: None,
			y_crop: None,
			width: None,
			height: None,
			x_scale: 100.0,
			y_scale: 100.0,
			delay: 1,
			visible: true,
			red_tint: 255,
			green_tint: 255,
			blue_tint: 255,
			alpha_tint: 255,
			red_offset: 0,
			green_offset: 0,
			blue_offset: 0,
			rotation: 0.0,
			interpolated: false,
		}
	}
}

impl Frame {
	/// Returns the crop rectangle `(x, y, width, height)` when all four parts are present.
	pub fn crop(&self) -> Option<(f32, f32, f32, f32)> {
		Some((self.x_crop?, self.y_crop?, self.width?, self.height?))
	}

	/// Returns the normalised anchor `(x_pivot / width, y_pivot / height)`.
	///
	/// `None` unless both pivots and both dimensions are present.
	pub fn anchor(&self) -> Option<(f32, f32)> {
		Some((self.x_pivot? / self.width?, self.y_pivot? / self.height?))
	}

	/// Packs the RGB tint into `0xRRGGBB`, clamping each channel to 0-255.
	pub fn tint_rgb(&self) -> u32 {
		let channel = |value: i32| value.clamp(0, 255) as u32;
		(channel(self.red_tint) << 16) | (channel(self.green_tint) << 8) | channel(self.blue_tint)
	}

	/// Returns `true` when every numeric transform field is finite.
	pub fn is_finite(&self) -> bool {
		[self.x_position, self.y_position, self.x_scale, self.y_scale, self.rotation]
			.iter()
			.chain(
				[self.x_pivot, self.y_pivot, self.x_crop, self.y_crop, self.width, self.height]
					.iter()
					.flatten(),
			)
			.all(|value| value.is_finite())
	}

	/// Blends this keyframe toward `next` at parameter `t` in `[0, 1]`.
	///
	/// Position, scale, rotation and every color channel are interpolated
	/// linearly; color channels are rounded to the nearest integer. Crop, pivot,
	/// size, visibility, delay and the interpolation flag are carried from
	/// `self` unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use anm2_types::model::Frame;
	///
	/// let a = Frame::default();
	/// let b = Frame { x_position: 100.0, alpha_tint: 0, ..Frame::default() };
	/// let mid = a.interpolate(&b, 0.5);
	/// assert_eq!(mid.x_position, 50.0);
	/// assert_eq!(mid.alpha_tint, 128);
	/// ```
	pub fn interpolate(&self, next: &Frame, t: f32) -> Frame {
		let lerp = |a: f32, b: f32| a + (b - a) * t;
		let lerp_channel = |a: i32, b: i32| lerp(a as f32, b as f32).round() as i32;

		Frame {
			x_position: lerp(self.x_position, next.x_position),
			y_position: lerp(self.y_position, next.y_position),
			x_scale: lerp(self.x_scale, next.x_scale),
			y_scale: lerp(self.y_scale, next.y_scale),
			rotation: lerp(self.rotation, next.rotation),
			red_tint: lerp_channel(self.red_tint, next.red_tint),
			green_tint: lerp_channel(self.green_tint, next.green_tint),
			blue_tint: lerp_channel(self.blue_tint, next.blue_tint),
			alpha_tint: lerp_channel(self.alpha_tint, next.alpha_tint),
			red_offset: lerp_channel(self.red_offset, next.red_offset),
			green_offset: lerp_channel(self.green_offset, next.green_offset),
			blue_offset: lerp_channel(self.blue_offset, next.blue_offset),
			..self.clone()
		}
	}

	/// Overwrites exactly one field.
	///
	/// A delay below 1 is raised to 1.
	pub fn set(&mut self, property: FrameProperty) {
		match property {
			FrameProperty::XPosition(value) => self.x_position = value,
			FrameProperty::YPosition(value) => self.y_position = value,
			FrameProperty::XPivot(value) => self.x_pivot = value,
			FrameProperty::YPivot(value) => self.y_pivot = value,
			FrameProperty::XCrop(value) => self.x_crop = value,
			FrameProperty::YCrop(value) => self.y_crop = value,
			FrameProperty::Width(value) => self.width = value,
			FrameProperty::Height(value) => self.height = value,
			FrameProperty::XScale(value) => self.x_scale = value,
			FrameProperty::YScale(value) => self.y_scale = value,
			FrameProperty::Delay(value) => self.delay = value.max(1),
			FrameProperty::Visible(value) => self.visible = value,
			FrameProperty::RedTint(value) => self.red_tint = value,
			FrameProperty::GreenTint(value) => self.green_tint = value,
			FrameProperty::BlueTint(value) => self.blue_tint = value,
			FrameProperty::AlphaTint(value) => self.alpha_tint = value,
			FrameProperty::RedOffset(value) => self.red_offset = value,
			FrameProperty::GreenOffset(value) => self.green_offset = value,
			FrameProperty::BlueOffset(value) => self.blue_offset = value,
			FrameProperty::Rotation(value) => self.rotation = value,
			FrameProperty::Interpolated(value) => self.interpolated = value,
		}
	}
}

/// One settable keyframe field together with its new value.
///
/// Used by property editors to update the active keyframe of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum FrameProperty {
	/// `xPosition`
	XPosition(f32),
	/// `yPosition`
	YPosition(f32),
	/// `xPivot`
	XPivot(Option<f32>),
	/// `yPivot`
	YPivot(Option<f32>),
	/// `xCrop`
	XCrop(Option<f32>),
	/// `yCrop`
	YCrop(Option<f32>),
	/// `width`
	Width(Option<f32>),
	/// `height`
	Height(Option<f32>),
	/// `xScale`
	XScale(f32),
	/// `yScale`
	YScale(f32),
	/// `delay`
	Delay(u32),
	/// `visible`
	Visible(bool),
	/// `redTint`
	RedTint(i32),
	/// `greenTint`
	GreenTint(i32),
	/// `blueTint`
	BlueTint(i32),
	/// `alphaTint`
	AlphaTint(i32),
	/// `redOffset`
	RedOffset(i32),
	/// `greenOffset`
	GreenOffset(i32),
	/// `blueOffset`
	BlueOffset(i32),
	/// `rotation`
	Rotation(f32),
	/// `interpolated`
	Interpolated(bool),
}

impl FrameProperty {
	/// Returns the attribute name used by the file format.
	pub fn attribute_name(&self) -> &'static str {
		match self {
			Self::XPosition(_) => "XPosition",
			Self::YPosition(_) => "YPosition",
			Self::XPivot(_) => "XPivot",
			Self::YPivot(_) => "YPivot",
			Self::XCrop(_) => "XCrop",
			Self::YCrop(_) => "YCrop",
			Self::Width(_) => "Width",
			Self::Height(_) => "Height",
			Self::XScale(_) => "XScale",
			Self::YScale(_) => "YScale",
			Self::Delay(_) => "Delay",
			Self::Visible(_) => "Visible",
			Self::RedTint(_) => "RedTint",
			Self::GreenTint(_) => "GreenTint",
			Self::BlueTint(_) => "BlueTint",
			Self::AlphaTint(_) => "AlphaTint",
			Self::RedOffset(_) => "RedOffset",
			Self::GreenOffset(_) => "GreenOffset",
			Self::BlueOffset(_) => "BlueOffset",
			Self::Rotation(_) => "Rotation",
			Self::Interpolated(_) => "Interpolated",
		}
	}
}

impl std::fmt::Display for FrameProperty {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.attribute_name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_interpolate_carries_crop_and_flags() {
		let current = Frame {
			x_crop: Some(8.0),
			width: Some(16.0),
			delay: 4,
			interpolated: true,
			..Frame::default()
		};
		let next = Frame {
			x_crop: Some(32.0),
			width: Some(64.0),
			visible: false,
			delay: 9,
			..Frame::default()
		};

		let blended = current.interpolate(&next, 0.75);
		assert_eq!(blended.x_crop, Some(8.0));
		assert_eq!(blended.width, Some(16.0));
		assert_eq!(blended.delay, 4);
		assert!(blended.visible);
		assert!(blended.interpolated);
	}

	#[test]
	fn test_interpolate_rounds_color_channels() {
		let current = Frame {
			red_tint: 0,
			blue_offset: 10,
			..Frame::default()
		};
		let next = Frame {
			red_tint: 3,
			blue_offset: 0,
			..Frame::default()
		};

		let blended = current.interpolate(&next, 0.5);
		assert_eq!(blended.red_tint, 2);
		assert_eq!(blended.blue_offset, 5);
		assert_eq!(blended.green_tint, 255);
	}

	#[test]
	fn test_tint_packing() {
		let frame = Frame {
			red_tint: 0x12,
			green_tint: 0x34,
			blue_tint: 0x56,
			..Frame::default()
		};
		assert_eq!(frame.tint_rgb(), 0x123456);

		let out_of_range = Frame {
			red_tint: 300,
			green_tint: -4,
			..Frame::default()
		};
		assert_eq!(out_of_range.tint_rgb(), 0xFF00FF);
	}

	#[test]
	fn test_anchor_requires_pivot_and_size() {
		let mut frame = Frame {
			x_pivot: Some(8.0),
			y_pivot: Some(4.0),
			width: Some(16.0),
			..Frame::default()
		};
		assert_eq!(frame.anchor(), None);

		frame.height = Some(16.0);
		assert_eq!(frame.anchor(), Some((0.5, 0.25)));
	}

	#[test]
	fn test_set_overwrites_one_field() {
		let mut frame = Frame::default();
		frame.set(FrameProperty::Rotation(90.0));
		assert_eq!(frame.rotation, 90.0);
		assert_eq!(
			frame,
			Frame {
				rotation: 90.0,
				..Frame::default()
			}
		);

		frame.set(FrameProperty::Delay(0));
		assert_eq!(frame.delay, 1);
	}

	#[test]
	fn test_finite_check() {
		let mut frame = Frame::default();
		assert!(frame.is_finite());

		frame.x_pivot = Some(f32::NAN);
		assert!(!frame.is_finite());
	}

	#[test]
	fn test_property_serde_shape() {
		let json = serde_json::to_string(&FrameProperty::XScale(50.0)).unwrap();
		assert_eq!(json, r#"{"property":"xScale","value":50.0}"#);
	}
}
