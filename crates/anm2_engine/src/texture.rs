//! Sprite-sheet textures.
//!
//! Textures are loaded as a synchronous batch before an engine is built. A
//! sprite-sheet that fails to load never fails the batch: it gets a
//! checkerboard placeholder and a [`NoticeKind::ResourceLoad`] notice instead.

use std::{
	collections::HashMap,
	path::{Path, PathBuf},
	rc::Rc,
};

use anm2_types::model::{Document, Spritesheet};
use image::{Rgba, RgbaImage};

use crate::{
	config::EngineConfig,
	error::ResourceLoadError,
	notify::{NoticeKind, Notifier},
};

/// Light checkerboard tile color.
pub const PLACEHOLDER_LIGHT: [u8; 4] = [0xCC, 0xCC, 0xCC, 0xFF];
/// Dark checkerboard tile color.
pub const PLACEHOLDER_DARK: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// A decoded sprite-sheet image.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteTexture {
	/// Sprite-sheet id the texture was loaded for
	pub spritesheet_id: i32,
	/// Sprite-sheet path as written in the document
	pub path: String,
	/// RGBA pixels
	pub image: RgbaImage,
	/// `true` when this is a stand-in for an image that failed to load
	pub placeholder: bool,
}

impl SpriteTexture {
	/// Image width in pixels.
	pub fn width(&self) -> u32 {
		self.image.width()
	}

	/// Image height in pixels.
	pub fn height(&self) -> u32 {
		self.image.height()
	}
}

/// Supplies encoded sprite-sheet images.
pub trait TextureSource {
	/// Loads and decodes the image for a sprite-sheet.
	///
	/// # Errors
	///
	/// Returns [`ResourceLoadError`] when the image cannot be found, read or decoded.
	fn load(&self, spritesheet: &Spritesheet) -> Result<RgbaImage, ResourceLoadError>;
}

/// Loads sprite-sheets from disk relative to a document directory.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
	root: PathBuf,
}

impl DirectoryLoader {
	/// Creates a loader resolving paths against `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
		}
	}

	/// Creates a loader for the directory containing a document file.
	pub fn for_document(document_path: impl AsRef<Path>) -> Self {
		let root = document_path.as_ref().parent().map(Path::to_path_buf).unwrap_or_default();
		Self::new(root)
	}

	/// Resolves a sprite-sheet path to a file path.
	pub fn resolve(&self, path: &str) -> PathBuf {
		self.root.join(normalize_path(path))
	}
}

impl TextureSource for DirectoryLoader {
	fn load(&self, spritesheet: &Spritesheet) -> Result<RgbaImage, ResourceLoadError> {
		let path = self.resolve(&spritesheet.path);
		let bytes = std::fs::read(&path).map_err(|source| ResourceLoadError::Io {
			path,
			source,
		})?;
		decode(&bytes)
	}
}

/// Serves encoded images supplied by the host, keyed by sprite-sheet path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
	images: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
	/// Registers encoded image bytes for a sprite-sheet path.
	pub fn insert(&mut self, path: &str, bytes: Vec<u8>) {
		self.images.insert(normalize_path(path), bytes);
	}

	/// Builder form of [`MemoryLoader::insert`].
	pub fn with(mut self, path: &str, bytes: Vec<u8>) -> Self {
		self.insert(path, bytes);
		self
	}
}

impl TextureSource for MemoryLoader {
	fn load(&self, spritesheet: &Spritesheet) -> Result<RgbaImage, ResourceLoadError> {
		let bytes = self.images.get(&normalize_path(&spritesheet.path)).ok_or_else(|| {
			ResourceLoadError::Missing {
				path: spritesheet.path.clone(),
			}
		})?;
		decode(bytes)
	}
}

/// Converts Windows separators to `/`.
///
/// Documents authored on Windows store paths like `gfx\body.png`.
pub fn normalize_path(path: &str) -> String {
	path.replace('\\', "/")
}

/// Decodes encoded image bytes into RGBA pixels.
///
/// # Errors
///
/// Returns [`ResourceLoadError::Decode`] for unsupported or corrupt data.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, ResourceLoadError> {
	Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Builds a square checkerboard of `size` pixels with `tile`-pixel tiles.
///
/// The top-left tile is [`PLACEHOLDER_LIGHT`].
pub fn placeholder(size: u32, tile: u32) -> RgbaImage {
	let tile = tile.max(1);
	RgbaImage::from_fn(size.max(1), size.max(1), |x, y| {
		if (x / tile + y / tile) % 2 == 0 {
			Rgba(PLACEHOLDER_LIGHT)
		} else {
			Rgba(PLACEHOLDER_DARK)
		}
	})
}

/// Counts from a load batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
	/// Sprite-sheets decoded successfully
	pub loaded: usize,
	/// Sprite-sheets replaced by a placeholder
	pub placeholders: usize,
	/// Sprite-sheets already resident and skipped
	pub reused: usize,
}

/// Resident sprite-sheet textures keyed by sprite-sheet id.
#[derive(Debug, Clone)]
pub struct TextureCache {
	textures: HashMap<i32, Rc<SpriteTexture>>,
	placeholder_size: u32,
	placeholder_tile: u32,
}

impl Default for TextureCache {
	fn default() -> Self {
		Self::new(&EngineConfig::default())
	}
}

impl TextureCache {
	/// Creates an empty cache using the placeholder settings of `config`.
	pub fn new(config: &EngineConfig) -> Self {
		Self {
			textures: HashMap::new(),
			placeholder_size: config.placeholder_size,
			placeholder_tile: config.placeholder_tile,
		}
	}

	/// Loads every sprite-sheet of `document`, replacing anything resident.
	pub fn load_all(
		&mut self,
		document: &Document,
		source: &dyn TextureSource,
		notifier: &mut Notifier,
	) -> LoadSummary {
		self.textures.clear();
		self.load_missing(document, source, notifier)
	}

	/// Loads the sprite-sheets of `document` that are not already resident.
	///
	/// A resident texture is reused only if it was loaded for the same path.
	pub fn load_missing(
		&mut self,
		document: &Document,
		source: &dyn TextureSource,
		notifier: &mut Notifier,
	) -> LoadSummary {
		let mut summary = LoadSummary::default();

		for sheet in &document.content.spritesheets {
			if self.textures.get(&sheet.id).is_some_and(|texture| texture.path == sheet.path) {
				summary.reused += 1;
				continue;
			}

			let texture = match source.load(sheet) {
				Ok(image) => {
					summary.loaded += 1;
					SpriteTexture {
						spritesheet_id: sheet.id,
						path: sheet.path.clone(),
						image,
						placeholder: false,
					}
				}
				Err(error) => {
					summary.placeholders += 1;
					notifier.notify_once(
						format!("spritesheet-load:{}", sheet.path),
						NoticeKind::ResourceLoad,
						format!("Failed to load spritesheet {}: {}", sheet.path, error),
					);
					SpriteTexture {
						spritesheet_id: sheet.id,
						path: sheet.path.clone(),
						image: placeholder(self.placeholder_size, self.placeholder_tile),
						placeholder: true,
					}
				}
			};
			self.textures.insert(sheet.id, Rc::new(texture));
		}

		log::debug!(
			"Spritesheets: {} loaded, {} placeholders, {} reused",
			summary.loaded,
			summary.placeholders,
			summary.reused
		);
		summary
	}

	/// Drops textures whose sprite-sheet is not in `document` with the same path.
	pub fn retain_document(&mut self, document: &Document) {
		self.textures.retain(|id, texture| {
			document.content.spritesheet(*id).is_some_and(|sheet| sheet.path == texture.path)
		});
	}

	/// Makes a texture resident, replacing any previous one for its id.
	pub fn insert(&mut self, texture: SpriteTexture) {
		self.textures.insert(texture.spritesheet_id, Rc::new(texture));
	}

	/// Looks up the texture for a sprite-sheet id.
	pub fn get(&self, spritesheet_id: i32) -> Option<&Rc<SpriteTexture>> {
		self.textures.get(&spritesheet_id)
	}

	/// Returns `true` if a texture is resident for the id.
	pub fn contains(&self, spritesheet_id: i32) -> bool {
		self.textures.contains_key(&spritesheet_id)
	}

	/// Number of resident textures.
	pub fn len(&self) -> usize {
		self.textures.len()
	}

	/// Returns `true` if nothing is resident.
	pub fn is_empty(&self) -> bool {
		self.textures.is_empty()
	}

	/// Releases every texture.
	pub fn clear(&mut self) {
		self.textures.clear();
	}
}
