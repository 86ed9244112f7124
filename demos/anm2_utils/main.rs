//! `anm2` inspection utility.
//!
//! Provides four subcommands:
//! - `inspect`: print the info, content and animations of one document.
//! - `eval`: evaluate one frame of an animation and print it as JSON.
//! - `play`: step playback with a manual clock and print each frame.
//! - `validate`: scan a directory for `.anm2` files and report parse failures
//!   and reference-integrity warnings.

use std::{
	ffi::OsStr,
	path::{Path, PathBuf},
};

use anm2_rs::prelude::*;
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use walkdir::WalkDir;

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	match cli.command {
		Command::Inspect(opts) => run_inspect(opts),
		Command::Eval(opts) => run_eval(opts),
		Command::Play(opts) => run_play(opts),
		Command::Validate(opts) => run_validate(opts),
	}
}

#[derive(Parser)]
#[command(name = "anm2_utils")]
#[command(author = "anm2-rs project")]
#[command(version)]
#[command(about = "Inspect, evaluate and validate anm2 animation documents", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print the structure of a single document
	Inspect(InspectArgs),
	/// Evaluate one frame and print the result as JSON
	Eval(EvalArgs),
	/// Step playback frame by frame
	Play(PlayArgs),
	/// Validate every .anm2 file under a directory
	Validate(ValidateArgs),
}

#[derive(Args)]
struct DocumentArgs {
	/// Path to a single .anm2 file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Engine configuration file (TOML); `ANM2_*` environment variables override it
	#[arg(short, long, value_name = "CONFIG", env = "ANM2_CONFIG")]
	config: Option<PathBuf>,

	/// Animation to select instead of the default one
	#[arg(short, long, value_name = "NAME")]
	animation: Option<String>,
}

#[derive(Args)]
struct InspectArgs {
	#[command(flatten)]
	document: DocumentArgs,

	/// Dump the whole document model as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct EvalArgs {
	#[command(flatten)]
	document: DocumentArgs,

	/// Timeline frame to evaluate (clamped into the animation)
	#[arg(short, long, value_name = "FRAME", default_value_t = 0, allow_negative_numbers = true)]
	frame: i64,
}

#[derive(Args)]
struct PlayArgs {
	#[command(flatten)]
	document: DocumentArgs,

	/// Number of frame periods to step
	#[arg(short = 'n', long, value_name = "COUNT", default_value_t = 10)]
	frames: u32,

	/// Playback speed multiplier
	#[arg(short, long, value_name = "SPEED", default_value_t = 1.0)]
	speed: f32,
}

#[derive(Args)]
struct ValidateArgs {
	/// Directory containing .anm2 files
	#[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
	root: PathBuf,

	/// Recurse into sub-directories while scanning
	#[arg(short, long, default_value_t = false)]
	recursive: bool,

	/// Reject malformed numeric attributes instead of coercing them
	#[arg(long, default_value_t = false)]
	strict: bool,

	/// Exit with an error when warnings are encountered
	#[arg(long, default_value_t = false)]
	fail_on_warning: bool,
}

fn open_session(args: &DocumentArgs) -> Result<EditorSession<RecordingScene, DirectoryLoader>> {
	let config = EngineConfig::load(args.config.as_deref()).context("Failed to load engine configuration")?;
	let mut session = EditorSession::open_file(&args.file, RecordingScene::default(), config)
		.with_context(|| format!("Failed to open {}", args.file.display()))?;

	if let Some(name) = &args.animation
		&& !session.engine_mut().set_animation(name)
	{
		bail!(
			"Animation \"{}\" not found (available: {})",
			name,
			session.engine().animation_names().join(", ")
		);
	}
	Ok(session)
}

fn print_notices(engine: &mut Engine<RecordingScene>) {
	for notice in engine.drain_notices() {
		eprintln!("{notice}");
	}
}

fn run_inspect(args: InspectArgs) -> Result<()> {
	let document = Document::open(&args.document.file)
		.with_context(|| format!("Failed to open {}", args.document.file.display()))?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&document)?);
		return Ok(());
	}

	let info = &document.info;
	println!("File: {}", args.document.file.display());
	println!(
		"Info: created by \"{}\" on \"{}\", version \"{}\", {} fps",
		info.created_by, info.created_on, info.version, info.fps
	);

	println!("\nSpritesheets ({}):", document.content.spritesheets.len());
	for sheet in &document.content.spritesheets {
		println!("  [{:>3}] {} (used by {} layers)", sheet.id, sheet.path, document.spritesheet_usage(sheet.id).len());
	}
	println!("Layers ({}):", document.content.layers.len());
	for layer in &document.content.layers {
		println!("  [{:>3}] {} -> spritesheet {}", layer.id, layer.name, layer.spritesheet_id);
	}
	println!("Nulls ({}):", document.content.nulls.len());
	for null in &document.content.nulls {
		println!("  [{:>3}] {}", null.id, null.name);
	}

	println!("\nAnimations ({}), default \"{}\":", document.animations.len(), document.default_animation);
	for animation in &document.animations {
		if args.document.animation.as_deref().is_some_and(|name| name != animation.name) {
			continue;
		}
		println!(
			"  {} - {} frames{}, {} layer tracks, {} null tracks",
			animation.name,
			animation.frame_num,
			if animation.looping { ", loop" } else { "" },
			animation.layer_animations.len(),
			animation.null_animations.len()
		);
		for (selection, visible, frames) in animation.tracks() {
			let name = document
				.resolve_selection(selection)
				.map_or_else(|| "<undeclared>".to_string(), |target| target.name().to_string());
			println!(
				"    {selection} ({name}): {} keyframes, {} frames long{}",
				frames.len(),
				frames.iter().map(|frame| frame.delay).sum::<u32>(),
				if visible { "" } else { ", hidden" }
			);
		}
	}

	let issues = document.integrity_issues();
	if !issues.is_empty() {
		println!("\nIntegrity warnings:");
		for issue in issues {
			println!("  ⚠️  {issue}");
		}
	}

	Ok(())
}

fn run_eval(args: EvalArgs) -> Result<()> {
	let mut session = open_session(&args.document)?;
	let engine = session.engine_mut();
	engine.set_current_frame(args.frame);
	print_notices(engine);

	let Some(snapshot) = engine.last_evaluation() else {
		bail!("No animation selected");
	};

	let output = json!({
		"animation": engine.current_animation_name(),
		"frame": engine.current_frame(),
		"totalFrames": engine.total_frames(),
		"tracks": snapshot.tracks,
		"layers": engine.current_layer_states(),
	});
	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}

fn run_play(args: PlayArgs) -> Result<()> {
	let clock = ManualClock::default();
	let mut session = open_session(&args.document)?.with_clock(clock.clone());
	let engine = session.engine_mut();
	let fps = engine.fps();

	engine.set_speed(args.speed);
	engine.play(None);
	println!(
		"Playing \"{}\" ({} frames{}) at {} fps x{}",
		engine.current_animation_name(),
		engine.total_frames(),
		if engine.current_animation_loop() { ", loop" } else { "" },
		fps,
		engine.speed()
	);

	for step in 0..args.frames {
		clock.advance_frames(1, fps);
		let advanced = engine.tick();

		let visible: Vec<String> = engine
			.current_layer_states()
			.into_iter()
			.filter(|state| state.currently_visible)
			.map(|state| state.name)
			.collect();
		println!(
			"step {:>4}: frame {:>4}{} [{}]",
			step,
			engine.current_frame(),
			if advanced { "" } else { " (held)" },
			visible.join(", ")
		);

		if !engine.is_playing() {
			println!("Playback stopped at frame {}", engine.current_frame());
			break;
		}
	}

	print_notices(engine);
	Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
	if !args.root.exists() {
		bail!("Root directory {} does not exist", args.root.display());
	}
	if !args.root.is_dir() {
		bail!("{} is not a directory", args.root.display());
	}

	let config = if args.strict {
		ParseConfig::strict()
	} else {
		ParseConfig::lenient()
	};
	let files = collect_anm2_files(&args.root, args.recursive)?;
	if files.is_empty() {
		println!("No .anm2 files found under {}", args.root.display());
		return Ok(());
	}

	let mut totals = ScanTotals::default();
	for path in files {
		match Document::open_with_config(&path, &config) {
			Ok(document) => {
				let issues = document.integrity_issues();
				if issues.is_empty() {
					totals.files_ok += 1;
					println!("✅ {} - {} animations", path.display(), document.animations.len());
				} else {
					totals.files_warning += 1;
					println!("⚠️  {} - {} warnings", path.display(), issues.len());
					for issue in issues {
						println!("    {issue}");
					}
				}
			}
			Err(err) => {
				totals.files_error += 1;
				println!("❌ {} - {}", path.display(), err);
			}
		}
	}

	println!(
		"\nSummary: files={} | ok={} warn={} err={}",
		totals.files_ok + totals.files_warning + totals.files_error,
		totals.files_ok,
		totals.files_warning,
		totals.files_error
	);

	if totals.files_error > 0 {
		bail!("Validation finished with errors (see summary)");
	}
	if args.fail_on_warning && totals.files_warning > 0 {
		bail!("Validation finished with warnings (see summary)");
	}
	Ok(())
}

fn collect_anm2_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
	let max_depth = if recursive {
		usize::MAX
	} else {
		1
	};
	let mut files = Vec::new();

	for entry in WalkDir::new(root).max_depth(max_depth).follow_links(false) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				println!("{err}");
				continue;
			}
		};

		let is_anm2 = entry
			.path()
			.extension()
			.and_then(OsStr::to_str)
			.is_some_and(|extension| extension.eq_ignore_ascii_case("anm2"));
		if entry.file_type().is_file() && is_anm2 {
			files.push(entry.into_path());
		}
	}

	files.sort();
	Ok(files)
}

#[derive(Default)]
struct ScanTotals {
	files_ok: usize,
	files_warning: usize,
	files_error: usize,
}
