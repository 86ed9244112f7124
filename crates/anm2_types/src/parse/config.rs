//! Parse configuration for `anm2` documents.
//!
//! This module provides options controlling numeric coercion and input size
//! limits when reading `anm2` XML.

/// How malformed numeric attribute text is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
	/// Coerce like the authoring tool does: integers take their leading digits
	/// (or `0`), floats take their leading number (or `NaN`)
	#[default]
	Lenient,
	/// Reject any numeric attribute that is not a complete number with
	/// [`FormatError::InvalidNumber`](crate::FormatError::InvalidNumber)
	Strict,
}

/// Configuration for parsing `anm2` documents.
///
/// # Presets
///
/// Three presets are available for common use cases:
/// - `default()`: Lenient numbers, no node limit
/// - `lenient()`: Same as default, spelled out for call sites that want to be explicit
/// - `strict()`: Strict numbers, at most 1 000 000 XML nodes
///
/// # Examples
///
/// ```
/// use anm2_types::parse::{NumericPolicy, ParseConfig};
///
/// // Use default configuration
/// let config = ParseConfig::default();
/// assert_eq!(config.numeric, NumericPolicy::Lenient);
///
/// // Reject malformed numbers
/// let config = ParseConfig::strict();
///
/// // Create custom configuration
/// let config = ParseConfig::new(NumericPolicy::Strict, 50_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
	/// Numeric attribute coercion policy
	pub numeric: NumericPolicy,
	/// Maximum number of XML nodes accepted before the document is rejected
	pub nodes_limit: u32,
}

impl Default for ParseConfig {
	fn default() -> Self {
		Self {
			numeric: NumericPolicy::Lenient,
			nodes_limit: u32::MAX,
		}
	}
}

impl ParseConfig {
	/// Create a new parse configuration.
	///
	/// # Arguments
	/// * `numeric` - Numeric coercion policy
	/// * `nodes_limit` - XML node limit
	pub fn new(numeric: NumericPolicy, nodes_limit: u32) -> Self {
		Self {
			numeric,
			nodes_limit,
		}
	}

	/// Create a lenient configuration.
	///
	/// - `numeric`: [`NumericPolicy::Lenient`]
	/// - `nodes_limit`: unlimited
	pub fn lenient() -> Self {
		Self::default()
	}

	/// Create a strict configuration.
	///
	/// Suitable for validating files before they are shipped.
	/// - `numeric`: [`NumericPolicy::Strict`]
	/// - `nodes_limit`: 1 000 000
	pub fn strict() -> Self {
		Self {
			numeric: NumericPolicy::Strict,
			nodes_limit: 1_000_000,
		}
	}

	/// Returns `true` when malformed numbers are rejected.
	pub fn is_strict(&self) -> bool {
		self.numeric == NumericPolicy::Strict
	}
}
