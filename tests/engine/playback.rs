//! Frame clamping, looping and pacing

use anm2_rs::prelude::*;

use crate::{engine, single_track};

fn four_frames(looping: bool) -> String {
	single_track(4, looping, r#"<Frame Delay="4"/>"#)
}

#[test_log::test]
fn frame_clamp() {
	let (mut engine, _) = engine(&four_frames(true));

	for (requested, expected) in [(-100, 0), (-1, 0), (0, 0), (2, 2), (3, 3), (4, 3), (i64::MAX, 3)] {
		engine.set_current_frame(requested);
		assert_eq!(engine.current_frame(), expected, "requested {requested}");
	}
}

#[test_log::test]
fn loop_wrap() {
	let (mut engine, clock) = engine(&four_frames(true));
	engine.set_current_frame(3);
	engine.play(None);

	clock.advance_frames(1, 30);
	assert!(engine.tick());
	assert_eq!(engine.current_frame(), 0);
	assert!(engine.is_playing());
}

#[test_log::test]
fn non_loop_clamp() {
	let (mut engine, clock) = engine(&four_frames(false));
	engine.set_current_frame(3);
	engine.play(None);

	clock.advance_frames(1, 30);
	engine.tick();
	assert_eq!(engine.current_frame(), 3);
	assert!(!engine.is_playing());
}

#[test_log::test]
fn single_frame_animation() {
	for looping in [false, true] {
		let (mut engine, clock) = engine(&single_track(1, looping, "<Frame/>"));
		engine.play(None);
		for _ in 0..5 {
			clock.advance_frames(1, 30);
			engine.tick();
			assert_eq!(engine.current_frame(), 0);
		}
	}
}

#[test_log::test]
fn at_most_one_frame_per_tick() {
	let (mut engine, clock) = engine(&four_frames(true));
	engine.play(None);

	clock.advance_frames(3, 30);
	assert!(engine.tick());
	assert_eq!(engine.current_frame(), 1);

	// the remainder is dropped, not carried into the next tick
	assert!(!engine.tick());
	assert_eq!(engine.current_frame(), 1);
}

#[test_log::test]
fn double_speed() {
	let (mut engine, clock) = engine(&four_frames(true));
	engine.set_speed(2.0);
	engine.play(None);

	let mut advanced = 0;
	for _ in 0..4 {
		clock.advance_frames(1, 60);
		if engine.tick() {
			advanced += 1;
		}
	}
	assert_eq!(advanced, 4);
	assert_eq!(engine.current_frame(), 0);
}

#[test_log::test]
fn pause_keeps_frame_and_play_resets_clock() {
	let (mut engine, clock) = engine(&four_frames(true));
	engine.set_current_frame(2);
	engine.play(None);
	engine.pause();

	clock.advance_frames(10, 30);
	assert!(!engine.tick());
	assert_eq!(engine.current_frame(), 2);

	// time spent paused does not count once playback resumes
	engine.play(None);
	assert!(!engine.tick());
	clock.advance_frames(1, 30);
	assert!(engine.tick());
	assert_eq!(engine.current_frame(), 3);
}

#[test_log::test]
fn evaluation_is_deterministic() {
	let xml = single_track(
		10,
		true,
		r#"<Frame XPosition="0" RedTint="0" Delay="5" Interpolated="true"/><Frame XPosition="10" RedTint="255" Delay="5"/>"#,
	);
	let (mut engine, _) = engine(&xml);

	engine.set_current_frame(3);
	let first = engine.last_evaluation().cloned();
	engine.set_current_frame(7);
	engine.set_current_frame(3);
	assert_eq!(engine.last_evaluation().cloned(), first);

	let frame = engine.last_evaluation().and_then(|snapshot| snapshot.frame_of(SelectionId::Layer(0))).cloned();
	let frame = frame.unwrap_or_default();
	assert!((frame.x_position - 6.0).abs() < 1e-5);
	assert_eq!(frame.red_tint, 153);
}

#[test_log::test]
fn interpolation_midpoint() {
	let xml = single_track(
		11,
		false,
		r#"<Frame XPosition="0" Delay="10" Interpolated="true"/><Frame XPosition="100"/>"#,
	);
	let (mut engine, _) = engine(&xml);

	engine.set_current_frame(0);
	assert_eq!(engine.scene().sprite(0).map(|sprite| sprite.transform.x), Some(0.0));

	engine.set_current_frame(5);
	let x = engine.scene().sprite(0).map_or(f32::NAN, |sprite| sprite.transform.x);
	assert!((x - 50.0).abs() < f32::EPSILON);
}

#[test_log::test]
fn null_crosshair_follows_track() {
	let (engine, _) = engine(&four_frames(true));
	let marker = engine.scene().marker(0).cloned();
	let marker = marker.map(|marker| (marker.visible, marker.transform.x, marker.style));

	assert_eq!(
		marker,
		Some((
			true,
			3.0,
			Some(MarkerStyle {
				size: 15.0,
				line_width: 2.0,
				color: 0xFF0000,
			})
		))
	);
}
