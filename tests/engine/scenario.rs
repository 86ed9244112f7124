//! End-to-end scenario on a minimal document

use anm2_rs::prelude::*;

use crate::document;

const IDLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AnimatedActor>
  <Info CreatedBy="scenario" CreatedOn="" Version="1" Fps="30"/>
  <Content>
    <Spritesheets><Spritesheet Path="sheet.png" Id="1"/></Spritesheets>
    <Layers><Layer Name="body" Id="1" SpritesheetId="1"/></Layers>
    <Nulls/>
  </Content>
  <Animations DefaultAnimation="idle">
    <Animation Name="idle" FrameNum="2" Loop="true">
      <RootAnimation><Frame XPosition="0" YPosition="0" Delay="1"/></RootAnimation>
      <LayerAnimations>
        <LayerAnimation LayerId="1" Visible="true">
          <Frame XPosition="0" Delay="1" Interpolated="false"/>
          <Frame XPosition="50" Delay="1" Interpolated="false"/>
        </LayerAnimation>
      </LayerAnimations>
      <NullAnimations/>
    </Animation>
  </Animations>
</AnimatedActor>"#;

#[test_log::test]
fn idle_scenario() {
	let mut engine = Engine::load(document(IDLE), TextureCache::default(), RecordingScene::default());
	assert!(engine.set_animation("idle"));
	engine.set_current_frame(1);

	let evaluated = engine
		.last_evaluation()
		.and_then(|snapshot| snapshot.frame_of(SelectionId::Layer(1)))
		.map(|frame| frame.x_position);
	assert_eq!(evaluated, Some(50.0));
	assert_eq!(engine.scene().sprite(1).map(|sprite| sprite.transform.x), Some(50.0));
	assert!(engine.drain_notices().is_empty());
}

#[test_log::test]
fn document_round_trips_through_json() {
	let document = document(IDLE);
	let json = serde_json::to_string(&document).unwrap_or_default();
	let restored: Document = serde_json::from_str(&json).unwrap_or_default();
	assert_eq!(restored, document);
}

#[test_log::test]
fn dispose_then_reload() {
	let mut engine = Engine::load(document(IDLE), TextureCache::default(), RecordingScene::default());
	engine.dispose();
	engine.dispose();
	assert!(engine.scene().is_empty());

	engine.reload(document(IDLE), TextureCache::default());
	engine.set_current_frame(1);
	assert_eq!(engine.scene().sprite(1).map(|sprite| sprite.transform.x), Some(50.0));
}
