//! Keyframe moves, property edits and selection ids

use anm2_rs::prelude::*;

use crate::{engine, single_track};

fn positions(engine: &Engine<RecordingScene>) -> Vec<(u32, u32, bool)> {
	engine
		.layer_keyframes(SelectionId::Layer(0))
		.into_iter()
		.map(|keyframe| (keyframe.position, keyframe.delay, keyframe.frame.visible))
		.collect()
}

#[test_log::test]
fn keyframe_move_collision() {
	let xml = single_track(
		30,
		true,
		r#"<Frame XPosition="0" Delay="10"/><Frame XPosition="10" Delay="10"/><Frame XPosition="20" Delay="10"/>"#,
	);
	let (mut engine, _) = engine(&xml);

	let moves = KeyframeMoves::new().with(SelectionId::Layer(0), 10, 20);
	assert!(engine.move_keyframes(&moves));

	let keyframes = engine.layer_keyframes(SelectionId::Layer(0));
	assert_eq!(keyframes.len(), 2);
	let at_20: Vec<f32> =
		keyframes.iter().filter(|keyframe| keyframe.position == 20).map(|keyframe| keyframe.frame.x_position).collect();
	assert_eq!(at_20, vec![10.0]);
}

#[test_log::test]
fn zero_displacement_backfill() {
	let xml = single_track(
		20,
		true,
		r#"<Frame XPosition="7" RedTint="12" Rotation="30" Delay="5"/><Frame XPosition="9" Delay="5"/>"#,
	);
	let (mut engine, _) = engine(&xml);
	let original = engine.layer_keyframes(SelectionId::Layer(0))[0].frame.clone();

	let moves = KeyframeMoves::new().with(SelectionId::Layer(0), 0, 3);
	assert!(engine.move_keyframes(&moves));

	assert_eq!(positions(&engine), vec![(0, 3, false), (3, 2, true), (5, 5, true)]);
	let backfill = engine.layer_keyframes(SelectionId::Layer(0))[0].frame.clone();
	assert_eq!(
		backfill,
		Frame {
			visible: false,
			delay: 3,
			..original
		}
	);
}

#[test_log::test]
fn move_is_atomic_across_tracks() {
	let xml = single_track(10, true, r#"<Frame Delay="5"/><Frame Delay="5"/>"#);
	let (mut engine, _) = engine(&xml);
	let before = engine.document().clone();

	let moves = KeyframeMoves::new()
		.with(SelectionId::Layer(0), 5, 8)
		.with(SelectionId::Null(4), 0, 2);
	assert!(!engine.move_keyframes(&moves));
	assert_eq!(engine.document(), &before);

	let notices = engine.drain_notices();
	assert_eq!(notices.len(), 1);
	assert_eq!(notices[0].kind, NoticeKind::EditRejected);
}

#[test_log::test]
fn property_update_targets_active_keyframe() {
	let xml = single_track(10, true, r#"<Frame Delay="5"/><Frame Delay="5"/>"#);
	let (mut engine, _) = engine(&xml);
	engine.set_current_frame(6);

	assert!(engine.update_current_frame_property(SelectionId::Layer(0), FrameProperty::Rotation(90.0)));
	let rotations: Vec<f32> = engine
		.layer_keyframes(SelectionId::Layer(0))
		.iter()
		.map(|keyframe| keyframe.frame.rotation)
		.collect();
	assert_eq!(rotations, vec![0.0, 90.0]);

	let rotation = engine.scene().sprite(0).map_or(0.0, |sprite| sprite.transform.rotation);
	assert!((rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

	assert!(!engine.update_current_frame_property(SelectionId::Layer(5), FrameProperty::Rotation(1.0)));
}

#[test_log::test]
fn selection_id_bijection() {
	for null_id in [0, 1, 1000] {
		let raw = SelectionId::Null(null_id).to_raw();
		assert_eq!(raw, Some(-(null_id + 1)));
		assert_eq!(raw.map(SelectionId::from_raw), Some(SelectionId::Null(null_id)));
	}
	assert_eq!(SelectionId::from_raw(4), SelectionId::Layer(4));
}

#[test_log::test]
fn layer_states_summarise_tracks() {
	let xml = single_track(10, true, r#"<Frame Delay="5"/><Frame Visible="false" Delay="5"/>"#);
	let (mut engine, _) = engine(&xml);
	engine.set_current_frame(7);

	let states = engine.current_layer_states();
	let summary: Vec<(SelectionId, &str, Option<usize>, bool)> = states
		.iter()
		.map(|state| (state.selection, state.name.as_str(), state.keyframe_index, state.currently_visible))
		.collect();
	assert_eq!(
		summary,
		vec![(SelectionId::Layer(0), "body", Some(1), false), (SelectionId::Null(0), "hand", Some(0), true)]
	);
	assert_eq!(states[0].spritesheet_path.as_deref(), Some("body.png"));
}
