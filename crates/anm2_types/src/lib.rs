//! This crate provides the document model and parser for the `anm2` animation format.
//!
//! # Document structure
//!
//! An `anm2` file is an XML tree rooted at `AnimatedActor`:
//!
//! - **Info**: author, creation date, format version and playback FPS
//! - **Content**: sprite-sheets, layers (sprites cropped from a sheet) and nulls (anchors)
//! - **Animations**: named animations, each holding one keyframe track per layer and per null
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use anm2_types::prelude::*;
//!
//! let xml = r#"<AnimatedActor>
//!   <Info Fps="30"/>
//!   <Content/>
//!   <Animations DefaultAnimation="Idle">
//!     <Animation Name="Idle" FrameNum="1">
//!       <RootAnimation><Frame/></RootAnimation>
//!     </Animation>
//!   </Animations>
//! </AnimatedActor>"#;
//!
//! let document = Document::from_xml(xml)?;
//! assert_eq!(document.info.fps, 30);
//! assert_eq!(document.animation_names(), vec!["Idle"]);
//! # Ok::<(), FormatError>(())
//! ```

mod error;

pub mod model;
pub mod parse;

/// `use anm2_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::FormatError;
