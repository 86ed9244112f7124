//! Undo and redo through the editor session

use anm2_rs::prelude::*;

use crate::{document, single_track};

fn session() -> EditorSession<RecordingScene, MemoryLoader> {
	let xml = single_track(20, true, r#"<Frame Delay="10"/><Frame XPosition="5" Delay="10"/>"#);
	EditorSession::open(document(&xml), MemoryLoader::default(), RecordingScene::default(), EngineConfig::default())
}

#[test_log::test]
fn undo_redo_stack_discipline() {
	let mut session = session();
	let mut states = vec![session.document().clone()];

	for fps in [24, 12, 60] {
		session.set_fps(fps);
		states.push(session.document().clone());
	}

	assert!(session.undo());
	assert!(session.can_redo());
	assert_eq!(session.document(), &states[2]);

	assert!(session.redo());
	assert_eq!(session.document(), &states[3]);
	assert!(!session.can_redo());

	assert!(session.undo());
	session.set_created_by("editor");
	assert!(!session.can_redo());
	assert!(!session.redo());
}

#[test_log::test]
fn undo_restores_timeline_edit() {
	let mut session = session();
	let original = session.document().clone();

	let moves = KeyframeMoves::new().with(SelectionId::Layer(0), 10, 4);
	assert!(session.move_keyframes(&moves));
	assert_ne!(session.document(), &original);

	assert!(session.undo());
	assert_eq!(session.document(), &original);
	assert!(!session.undo());
}

#[test_log::test]
fn missing_spritesheet_gets_placeholder() {
	let mut session = session();

	let texture = session.engine().textures().get(0).cloned();
	assert!(texture.is_some_and(|texture| texture.placeholder));

	let notices = session.engine_mut().drain_notices();
	assert!(notices.iter().any(|notice| notice.kind == NoticeKind::ResourceLoad));
}

#[test_log::test]
fn history_capacity_is_configurable() {
	let xml = single_track(2, true, "<Frame/>");
	let config = EngineConfig {
		history_capacity: 2,
		..EngineConfig::default()
	};
	let mut session = EditorSession::open(document(&xml), MemoryLoader::default(), RecordingScene::default(), config);

	for fps in 1..=5 {
		session.set_fps(fps);
	}
	assert_eq!(session.history().undo_len(), 2);
	assert!(session.undo());
	assert!(session.undo());
	assert!(!session.undo());
	assert_eq!(session.engine().fps(), 3);
}
