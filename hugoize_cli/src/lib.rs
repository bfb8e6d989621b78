use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Migrate static site content to flattened front matter and named-closing shortcodes.",
	long_about = "hugoize rewrites every markdown file below a directory in place.\n\nFront \
	              matter: the `[extra]` section header inside `+++` front matter is removed and \
	              its keys are outdented to the top level.\n\nShortcodes: `{% name(a=1) %}` \
	              becomes `{{< name a=\"1\" >}}` and each `{% end %}` becomes `{{< /name >}}` for \
	              the most recently opened shortcode.\n\nOptional settings are read from \
	              `hugoize.toml` in the converted directory."
)]
pub struct HugoizeCli {
	/// Content directory to convert. Every matching file below it is
	/// rewritten in place.
	pub directory: Option<PathBuf>,

	/// Preview changes without writing files. Prints which files would be
	/// converted.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Show a line diff for each converted file.
	#[arg(long, default_value_t = false)]
	pub diff: bool,

	/// Output format for the run report. Use `text` for one line per file or
	/// `json` for a single report object.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with one line per file.
	Text,
	/// JSON output for programmatic consumption. Includes per-file status,
	/// errors and warnings.
	Json,
}
