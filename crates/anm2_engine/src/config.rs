//! Engine configuration.
//!
//! Every field has a default, so an empty configuration is valid. Values can
//! be supplied from a TOML file and overridden with `ANM2_*` environment
//! variables, e.g. `ANM2_HISTORY_CAPACITY=100`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix of the environment variables read by [`EngineConfig::load`].
pub const ENV_PREFIX: &str = "ANM2";

/// Tunables for playback, history and the editing aids drawn into the scene.
///
/// # Examples
///
/// ```
/// use anm2_engine::config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("history_capacity = 10").unwrap();
/// assert_eq!(config.history_capacity, 10);
/// assert_eq!(config.crosshair_size, 15.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Maximum number of undo (and redo) entries
	pub history_capacity: usize,
	/// Playback speed multiplier applied when an engine is created
	pub default_speed: f32,
	/// Half-length of the null crosshair arms in pixels
	pub crosshair_size: f32,
	/// Stroke width of the null crosshair in pixels
	pub crosshair_line_width: f32,
	/// Crosshair color as `0xRRGGBB`
	pub crosshair_color: u32,
	/// Edge length of one checkerboard tile in the placeholder texture
	pub placeholder_tile: u32,
	/// Edge length of the placeholder texture
	pub placeholder_size: u32,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			history_capacity: 50,
			default_speed: 1.0,
			crosshair_size: 15.0,
			crosshair_line_width: 2.0,
			crosshair_color: 0xFF0000,
			placeholder_tile: 16,
			placeholder_size: 64,
		}
	}
}

impl EngineConfig {
	/// Loads configuration from an optional TOML file plus `ANM2_*` environment variables.
	///
	/// A missing file is not an error; environment variables take precedence.
	///
	/// # Errors
	///
	/// Returns [`ConfigError`] if the file is malformed or a value has the wrong type.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let mut builder = config::Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(
				config::File::from(path).format(config::FileFormat::Toml).required(false),
			);
		}
		let settings =
			builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)).build()?;

		let config: Self = settings.try_deserialize()?;
		log::debug!("Engine configuration: {:?}", config);
		Ok(config)
	}

	/// Parses configuration from TOML text, ignoring the environment.
	///
	/// # Errors
	///
	/// Returns [`ConfigError`] if the text is malformed or a value has the wrong type.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let settings = config::Config::builder()
			.add_source(config::File::from_str(text, config::FileFormat::Toml))
			.build()?;
		Ok(settings.try_deserialize()?)
	}
}
