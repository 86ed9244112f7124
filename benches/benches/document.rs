//! Benchmark suite for document parsing, evaluation and editing
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use anm2_benches::{Shape, generate_document_xml, shapes};
use anm2_engine::{
	clock::ManualClock,
	engine::Engine,
	eval::evaluate_animation,
	scene::RecordingScene,
	texture::TextureCache,
	timeline::{KeyframeMoves, move_keyframes},
};
use anm2_types::model::{Document, SelectionId};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const SHAPES: [(&str, Shape); 3] = [("tiny", shapes::TINY), ("character", shapes::CHARACTER), ("large", shapes::LARGE)];

/// Benchmark XML parsing into the document model
fn bench_parse(c: &mut Criterion) {
	let mut group = c.benchmark_group("parse");

	for (name, shape) in SHAPES {
		let xml = generate_document_xml(shape);
		group.throughput(Throughput::Bytes(xml.len() as u64));
		group.bench_with_input(BenchmarkId::new("from_xml", name), &xml, |b, xml| {
			b.iter(|| black_box(Document::from_xml(black_box(xml))));
		});
	}

	group.finish();
}

/// Benchmark pure evaluation of every frame of one animation
fn bench_evaluate(c: &mut Criterion) {
	let mut group = c.benchmark_group("evaluate");

	for (name, shape) in SHAPES {
		let Ok(document) = Document::from_xml(&generate_document_xml(shape)) else {
			eprintln!("Warning: could not parse generated document {name}");
			continue;
		};
		let Some(animation) = document.animation("anim0") else {
			continue;
		};

		let frames = animation.effective_frame_num();
		group.throughput(Throughput::Elements(u64::from(frames)));
		group.bench_with_input(BenchmarkId::new("all_frames", name), animation, |b, animation| {
			b.iter(|| {
				for frame in 0..frames {
					black_box(evaluate_animation(animation, black_box(frame)));
				}
			});
		});
	}

	group.finish();
}

/// Benchmark playback through the engine, including scene updates
fn bench_playback(c: &mut Criterion) {
	let mut group = c.benchmark_group("playback");

	for (name, shape) in SHAPES {
		let Ok(document) = Document::from_xml(&generate_document_xml(shape)) else {
			continue;
		};
		let clock = ManualClock::default();
		let mut engine =
			Engine::load(document, TextureCache::default(), RecordingScene::default()).with_clock(clock.clone());
		engine.play(None);

		group.bench_function(BenchmarkId::new("tick", name), |b| {
			b.iter(|| {
				clock.advance_frames(1, 30);
				black_box(engine.tick())
			});
		});
	}

	group.finish();
}

/// Benchmark keyframe moves on every layer track of one animation
fn bench_move_keyframes(c: &mut Criterion) {
	let mut group = c.benchmark_group("move_keyframes");

	for (name, shape) in SHAPES {
		let Ok(document) = Document::from_xml(&generate_document_xml(shape)) else {
			continue;
		};
		let Some(animation) = document.animation("anim0") else {
			continue;
		};

		let moves: KeyframeMoves = (0..shape.layers)
			.map(|id| (SelectionId::Layer(id as i32), 4, 6))
			.collect();

		group.bench_with_input(BenchmarkId::new("shift_second", name), animation, |b, animation| {
			b.iter_batched(
				|| animation.clone(),
				|mut animation| black_box(move_keyframes(&mut animation, &moves)),
				criterion::BatchSize::SmallInput,
			);
		});
	}

	group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_playback, bench_move_keyframes);

criterion_main!(benches);
