use std::path::Path;
use std::process;

use clap::Parser;
use hugoize_cli::HugoizeCli;
use hugoize_cli::OutputFormat;
use hugoize_core::FileOutcome;
use hugoize_core::FileStatus;
use hugoize_core::HugoizeConfig;
use hugoize_core::HugoizeResult;
use hugoize_core::ScanOptions;
use hugoize_core::collect_files;
use hugoize_core::ensure_directory;
use hugoize_core::process_file;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HugoizeCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let Some(root) = args.directory.as_deref() else {
		eprintln!("Usage: hugoize <directory>");
		process::exit(1);
	};

	if let Err(e) = run(&args, root) {
		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(1);
	}
}

/// Log to stderr. `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

/// Everything fatal happens before the first file is touched.
fn run(args: &HugoizeCli, root: &Path) -> HugoizeResult<()> {
	ensure_directory(root)?;
	let config = HugoizeConfig::load_or_default(root)?;
	tracing::debug!(
		config = ?HugoizeConfig::resolve_path(root),
		extensions = ?config.extensions,
		"resolved configuration"
	);
	let files = collect_files(root, &ScanOptions::from_config(&config))?;

	let mut summary = Summary::default();
	let mut entries = Vec::new();

	if matches!(args.format, OutputFormat::Text) {
		println!("Found {} markdown files", files.len());
	}

	for path in &files {
		let result = process_file(path, &config.front_matter, args.dry_run);
		summary.record(&result);

		match args.format {
			OutputFormat::Text => print_result(args, root, path, &result),
			OutputFormat::Json => entries.push(json_entry(root, path, &result)),
		}
	}

	match args.format {
		OutputFormat::Text => {
			println!();
			println!(
				"{}",
				colored!(summary.describe(files.len(), args.dry_run), bold)
			);
		}
		OutputFormat::Json => {
			let output = serde_json::json!({
				"root": root.display().to_string(),
				"dry_run": args.dry_run,
				"found": files.len(),
				"converted": summary.converted,
				"unchanged": summary.unchanged,
				"failed": summary.failed,
				"files": entries,
			});
			println!("{output}");
		}
	}

	Ok(())
}

#[derive(Debug, Default)]
struct Summary {
	converted: usize,
	unchanged: usize,
	failed: usize,
}

impl Summary {
	fn record(&mut self, result: &HugoizeResult<FileOutcome>) {
		match result {
			Ok(outcome) if outcome.status == FileStatus::Converted => self.converted += 1,
			Ok(_) => self.unchanged += 1,
			Err(_) => self.failed += 1,
		}
	}

	fn describe(&self, total: usize, dry_run: bool) -> String {
		let converted = if dry_run {
			format!("{} would be converted", self.converted)
		} else {
			format!("{} converted", self.converted)
		};

		format!(
			"Done! Processed {total} files ({converted}, {} unchanged, {} failed)",
			self.unchanged, self.failed
		)
	}
}

fn print_result(
	args: &HugoizeCli,
	root: &Path,
	path: &Path,
	result: &HugoizeResult<FileOutcome>,
) {
	let rel = make_relative(path, root);

	match result {
		Ok(outcome) => {
			let label = match outcome.status {
				FileStatus::Converted if args.dry_run => "Would convert",
				FileStatus::Converted => "Converted",
				FileStatus::Unchanged => "Unchanged",
			};
			println!("{} {label}: {rel}", colored!("✓", green));

			if args.diff && outcome.status == FileStatus::Converted {
				print_diff(&outcome.original, &outcome.conversion.content);
			}
		}
		Err(e) => {
			eprintln!("{} Error processing {rel}: {e}", colored!("✗", red));
		}
	}
}

fn json_entry(
	root: &Path,
	path: &Path,
	result: &HugoizeResult<FileOutcome>,
) -> serde_json::Value {
	let rel = make_relative(path, root);

	match result {
		Ok(outcome) => {
			serde_json::json!({
				"path": rel,
				"status": outcome.status,
				"warnings": outcome.conversion.warnings,
			})
		}
		Err(e) => {
			serde_json::json!({
				"path": rel,
				"status": "failed",
				"error": e.to_string(),
			})
		}
	}
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
