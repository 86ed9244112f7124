//! Snapshot-based undo/redo history.
//!
//! Every recorded edit pushes a deep copy of the whole [`Document`] as it was
//! *before* the edit. Undo and redo swap the live document with the top of
//! the opposite stack; the caller installs the returned snapshot.
//!
//! # Usage
//!
//! ```
//! use anm2_engine::history::HistoryManager;
//! use anm2_types::model::Document;
//!
//! let mut document = Document::default();
//! let mut history = HistoryManager::new(50);
//!
//! history.save_state(&document, Some("Update FPS"));
//! document.info.fps = 60;
//!
//! let previous = history.undo(&document).unwrap();
//! assert_eq!(previous.info.fps, 30);
//! assert!(history.can_redo());
//! ```

use std::collections::VecDeque;

use anm2_types::model::Document;
use chrono::{DateTime, Utc};

/// Default number of entries kept on each stack.
pub const DEFAULT_CAPACITY: usize = 50;

/// A single entry in the undo/redo history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
	/// Human-readable description of the edit (e.g., "Move keyframes")
	pub description: Option<String>,
	/// The document snapshot at this point in history
	pub snapshot: Document,
	/// When the entry was created
	pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
	fn new(snapshot: Document, description: Option<String>) -> Self {
		Self {
			description,
			snapshot,
			timestamp: Utc::now(),
		}
	}
}

/// Bounded undo and redo stacks of document snapshots.
///
/// - Recording a new entry clears the redo stack (new timeline branch)
/// - When a stack exceeds its capacity, its oldest entry is dropped
#[derive(Debug, Clone)]
pub struct HistoryManager {
	undo_stack: VecDeque<HistoryEntry>,
	redo_stack: VecDeque<HistoryEntry>,
	capacity: usize,
}

impl Default for HistoryManager {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

impl HistoryManager {
	/// Creates a history keeping at most `capacity` entries per stack.
	pub fn new(capacity: usize) -> Self {
		Self {
			undo_stack: VecDeque::new(),
			redo_stack: VecDeque::new(),
			capacity,
		}
	}

	/// Pushes a copy of `current` onto the undo stack and clears the redo stack.
	///
	/// Call this *before* mutating the document.
	pub fn save_state(&mut self, current: &Document, description: Option<&str>) {
		self.record(current.clone(), description.map(str::to_string));
	}

	/// Pushes an already captured snapshot onto the undo stack and clears the redo stack.
	pub fn record(&mut self, snapshot: Document, description: Option<String>) {
		self.redo_stack.clear();
		log::debug!(
			"History entry pushed: {} (undo depth {})",
			description.as_deref().unwrap_or("<unnamed>"),
			self.undo_stack.len() + 1
		);
		push_bounded(&mut self.undo_stack, HistoryEntry::new(snapshot, description), self.capacity);
	}

	/// Steps back one entry.
	///
	/// `current` is pushed onto the redo stack and the previous snapshot is
	/// returned for the caller to install. Returns `None` (and changes
	/// nothing) when there is nothing to undo.
	pub fn undo(&mut self, current: &Document) -> Option<Document> {
		let entry = self.undo_stack.pop_back()?;
		log::debug!(
			"Undo: {} ({} remaining)",
			entry.description.as_deref().unwrap_or("<unnamed>"),
			self.undo_stack.len()
		);

		push_bounded(
			&mut self.redo_stack,
			HistoryEntry::new(current.clone(), entry.description.clone()),
			self.capacity,
		);
		Some(entry.snapshot)
	}

	/// Steps forward one entry.
	///
	/// `current` is pushed onto the undo stack and the next snapshot is
	/// returned for the caller to install. Returns `None` (and changes
	/// nothing) when there is nothing to redo.
	pub fn redo(&mut self, current: &Document) -> Option<Document> {
		let entry = self.redo_stack.pop_back()?;
		log::debug!(
			"Redo: {} ({} remaining)",
			entry.description.as_deref().unwrap_or("<unnamed>"),
			self.redo_stack.len()
		);

		push_bounded(
			&mut self.undo_stack,
			HistoryEntry::new(current.clone(), entry.description.clone()),
			self.capacity,
		);
		Some(entry.snapshot)
	}

	/// Returns `true` if [`HistoryManager::undo`] would do something.
	pub fn can_undo(&self) -> bool {
		!self.undo_stack.is_empty()
	}

	/// Returns `true` if [`HistoryManager::redo`] would do something.
	pub fn can_redo(&self) -> bool {
		!self.redo_stack.is_empty()
	}

	/// Number of undo entries.
	pub fn undo_len(&self) -> usize {
		self.undo_stack.len()
	}

	/// Number of redo entries.
	pub fn redo_len(&self) -> usize {
		self.redo_stack.len()
	}

	/// Description of the edit [`HistoryManager::undo`] would revert.
	pub fn undo_description(&self) -> Option<&str> {
		self.undo_stack.back().and_then(|entry| entry.description.as_deref())
	}

	/// Description of the edit [`HistoryManager::redo`] would reapply.
	pub fn redo_description(&self) -> Option<&str> {
		self.redo_stack.back().and_then(|entry| entry.description.as_deref())
	}

	/// Undo entries, oldest first.
	pub fn undo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
		self.undo_stack.iter()
	}

	/// Maximum entries per stack.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Drops every entry.
	pub fn clear(&mut self) {
		self.undo_stack.clear();
		self.redo_stack.clear();
	}
}

fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, capacity: usize) {
	stack.push_back(entry);
	while stack.len() > capacity {
		stack.pop_front();
	}
}
