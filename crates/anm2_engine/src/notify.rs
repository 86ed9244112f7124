//! Non-blocking user notifications.
//!
//! Every recoverable problem the engine meets (a sprite-sheet that failed to
//! load, a dangling reference, a rejected edit) is queued here as a [`Notice`]
//! and logged. The host drains the queue whenever it suits it.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

/// Category of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
	/// A sprite-sheet image failed to load
	ResourceLoad,
	/// A track or layer references something that does not exist, or a
	/// non-finite value reached a rendered transform
	ReferenceIntegrity,
	/// A timeline or property edit was rejected
	EditRejected,
}

/// A single user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	/// Category
	pub kind: NoticeKind,
	/// Human readable text
	pub message: String,
}

impl std::fmt::Display for Notice {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{:?}] {}", self.kind, self.message)
	}
}

/// Queue of pending notices with once-only reporting.
///
/// # Examples
///
/// ```
/// use anm2_engine::notify::{NoticeKind, Notifier};
///
/// let mut notifier = Notifier::default();
/// assert!(notifier.notify_once("sheet-3", NoticeKind::ResourceLoad, "sheet 3 failed"));
/// assert!(!notifier.notify_once("sheet-3", NoticeKind::ResourceLoad, "sheet 3 failed"));
///
/// let notices = notifier.drain();
/// assert_eq!(notices.len(), 1);
/// assert!(notifier.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Notifier {
	pending: VecDeque<Notice>,
	reported: HashSet<String>,
}

impl Notifier {
	/// Queues a notice and logs it.
	pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
		let notice = Notice {
			kind,
			message: message.into(),
		};

		match kind {
			NoticeKind::ResourceLoad | NoticeKind::ReferenceIntegrity => {
				log::warn!("{}", notice.message);
			}
			NoticeKind::EditRejected => log::info!("{}", notice.message),
		}

		self.pending.push_back(notice);
	}

	/// Queues a notice unless one with the same key was already reported.
	///
	/// Returns `true` if the notice was queued.
	pub fn notify_once(
		&mut self,
		key: impl Into<String>,
		kind: NoticeKind,
		message: impl Into<String>,
	) -> bool {
		if !self.reported.insert(key.into()) {
			return false;
		}
		self.notify(kind, message);
		true
	}

	/// Removes and returns every pending notice, oldest first.
	pub fn drain(&mut self) -> Vec<Notice> {
		self.pending.drain(..).collect()
	}

	/// Pending notices, oldest first.
	pub fn pending(&self) -> impl Iterator<Item = &Notice> {
		self.pending.iter()
	}

	/// Number of pending notices.
	pub fn len(&self) -> usize {
		self.pending.len()
	}

	/// Returns `true` when nothing is pending.
	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}

	/// Moves every pending notice and once-only key of `other` into this queue.
	///
	/// `other`'s notices were already logged and are not logged again.
	pub fn merge(&mut self, other: Notifier) {
		self.pending.extend(other.pending);
		self.reported.extend(other.reported);
	}

	/// Forgets which once-only keys were reported.
	///
	/// Called when a new document is installed so its problems are reported afresh.
	pub fn reset_once(&mut self) {
		self.reported.clear();
	}
}
