//! Integration tests for `anm2-rs`: parsing, playback, timeline edits and history

mod history;
mod playback;
mod scenario;
mod timeline;

use anm2_rs::prelude::*;

/// Parses `xml`, panicking with the parse error on failure.
pub(crate) fn document(xml: &str) -> Document {
	match Document::from_xml(xml) {
		Ok(document) => document,
		Err(err) => panic!("test document failed to parse: {err}"),
	}
}

/// Builds an engine with a manual clock over `xml`, with no textures resident.
pub(crate) fn engine(xml: &str) -> (Engine<RecordingScene>, ManualClock) {
	let clock = ManualClock::default();
	let engine =
		Engine::load(document(xml), TextureCache::default(), RecordingScene::default()).with_clock(clock.clone());
	(engine, clock)
}

/// One layer track holding `frames`, in an animation of `frame_num` frames.
pub(crate) fn single_track(frame_num: u32, looping: bool, frames: &str) -> String {
	format!(
		r#"<AnimatedActor>
  <Info Fps="30"/>
  <Content>
    <Spritesheets><Spritesheet Path="body.png" Id="0"/></Spritesheets>
    <Layers><Layer Name="body" Id="0" SpritesheetId="0"/></Layers>
    <Nulls><Null Name="hand" Id="0"/></Nulls>
  </Content>
  <Animations DefaultAnimation="test">
    <Animation Name="test" FrameNum="{frame_num}" Loop="{looping}">
      <RootAnimation><Frame/></RootAnimation>
      <LayerAnimations>
        <LayerAnimation LayerId="0" Visible="true">{frames}</LayerAnimation>
      </LayerAnimations>
      <NullAnimations>
        <NullAnimation NullId="0" Visible="true"><Frame XPosition="3" Delay="{frame_num}"/></NullAnimation>
      </NullAnimations>
    </Animation>
  </Animations>
</AnimatedActor>"#
	)
}
