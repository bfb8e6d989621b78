use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::FrontMatterConfig;
use crate::HugoizeError;
use crate::HugoizeResult;
use crate::front_matter::normalize_front_matter;
use crate::shortcode::convert_shortcodes;

/// A structural problem the conversion noticed but did not fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ConversionWarning {
	/// A `{% end %}` tag with no open tag before it. `line` is 1-indexed in
	/// the converted output.
	UnmatchedClose { line: usize },
	/// A tag that was opened but never closed by `{% end %}`.
	UnclosedTag { name: String },
}

impl fmt::Display for ConversionWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnmatchedClose { line } => {
				write!(f, "line {line}: `{{% end %}}` has no open tag and was left as is")
			}
			Self::UnclosedTag { name } => write!(f, "shortcode `{name}` is never closed"),
		}
	}
}

/// The converted form of a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
	pub content: String,
	/// Whether `content` differs from the input.
	pub changed: bool,
	pub warnings: Vec<ConversionWarning>,
}

/// Convert the full text of one document: flatten the front matter, then
/// convert its shortcodes.
pub fn convert_document(content: &str, config: &FrontMatterConfig) -> Conversion {
	let normalized = normalize_front_matter(content, config);
	let scan = convert_shortcodes(&normalized);

	let mut warnings: Vec<ConversionWarning> = scan
		.unmatched
		.iter()
		.map(|line| ConversionWarning::UnmatchedClose { line: *line })
		.collect();
	warnings.extend(
		scan.stack
			.iter()
			.map(|name| ConversionWarning::UnclosedTag { name: name.clone() }),
	);

	Conversion {
		changed: scan.content != content,
		content: scan.content,
		warnings,
	}
}

/// Whether a processed file was (or would be) rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
	Converted,
	Unchanged,
}

/// The outcome of processing one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
	pub path: PathBuf,
	pub status: FileStatus,
	/// The file content before conversion.
	pub original: String,
	pub conversion: Conversion,
}

/// Read, convert and (unless `dry_run` is set) rewrite one file in place.
///
/// Files whose converted content is identical to the original are never
/// written.
pub fn process_file(
	path: &Path,
	config: &FrontMatterConfig,
	dry_run: bool,
) -> HugoizeResult<FileOutcome> {
	let original = read_document(path)?;
	let conversion = convert_document(&original, config);

	for warning in &conversion.warnings {
		tracing::warn!(path = %path.display(), "{warning}");
	}

	let status = if conversion.changed {
		FileStatus::Converted
	} else {
		FileStatus::Unchanged
	};

	if conversion.changed && !dry_run {
		write_atomic(path, &conversion.content)?;
		tracing::debug!(path = %path.display(), "wrote converted file");
	}

	Ok(FileOutcome {
		path: path.to_path_buf(),
		status,
		original,
		conversion,
	})
}

/// Read a file as UTF-8 text.
pub fn read_document(path: &Path) -> HugoizeResult<String> {
	let bytes = std::fs::read(path).map_err(|e| HugoizeError::Read {
		path: path.display().to_string(),
		reason: e.to_string(),
	})?;

	String::from_utf8(bytes).map_err(|e| HugoizeError::InvalidUtf8 {
		path: path.display().to_string(),
		reason: e.utf8_error().to_string(),
	})
}

/// Replace the file at `path` with `content` by writing a sibling temporary
/// file and renaming it over the original. The original permissions are
/// kept.
///
/// Symlinks are resolved first, so the link stays in place and its target
/// receives the new content.
pub fn write_atomic(path: &Path, content: &str) -> HugoizeResult<()> {
	let write_error = |e: std::io::Error| HugoizeError::Write {
		path: path.display().to_string(),
		reason: e.to_string(),
	};

	let target = std::fs::canonicalize(path).map_err(write_error)?;
	let temp_path = temp_path_for(&target);
	if let Err(e) = std::fs::write(&temp_path, content) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(write_error(e));
	}

	let result = std::fs::metadata(&target)
		.and_then(|metadata| std::fs::set_permissions(&temp_path, metadata.permissions()))
		.and_then(|()| std::fs::rename(&temp_path, &target));

	if let Err(e) = result {
		let _ = std::fs::remove_file(&temp_path);
		return Err(write_error(e));
	}

	Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
	let file_name = path
		.file_name()
		.map_or_else(String::new, |name| name.to_string_lossy().into_owned());
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_or(0, |duration| duration.as_nanos());

	path.with_file_name(format!(
		".{file_name}.hugoize-{}-{nanos}.tmp",
		std::process::id()
	))
}
