//! Error types for document parsing.

use thiserror::Error;

/// Errors that can occur when turning `anm2` XML into a [`Document`](crate::model::Document).
///
/// All of these are fatal to the parse call: no partial document is returned.
#[derive(Debug, Error)]
pub enum FormatError {
	/// The text is not well-formed XML
	#[error("Malformed XML: {0}")]
	Xml(#[from] roxmltree::Error),

	/// A required element is absent
	#[error("Missing required element <{element}>")]
	MissingElement {
		/// Name of the element that was expected
		element: &'static str,
	},

	/// An animation has no `RootAnimation/Frame`
	#[error("Animation \"{animation}\" has no RootAnimation frame")]
	MissingRootFrame {
		/// Name of the offending animation
		animation: String,
	},

	/// A numeric attribute could not be parsed (strict numeric policy only)
	#[error("Invalid number in <{element} {attribute}=\"{value}\">")]
	InvalidNumber {
		/// Element carrying the attribute
		element: String,
		/// Attribute name
		attribute: &'static str,
		/// Raw attribute text
		value: String,
	},

	/// IO error while reading a document from disk
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl FormatError {
	/// Creates a `MissingElement` error.
	pub fn missing(element: &'static str) -> Self {
		Self::MissingElement {
			element,
		}
	}
}
