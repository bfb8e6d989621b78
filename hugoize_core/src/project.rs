use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::HugoizeConfig;
use crate::HugoizeError;
use crate::HugoizeResult;

/// Options for controlling which files are discovered for conversion.
///
/// Use [`ScanOptions::default()`] for the defaults (every `.md` file) or
/// [`ScanOptions::from_config`] to construct from a [`HugoizeConfig`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// File extensions to convert, without the leading dot.
	pub extensions: Vec<String>,
	/// Gitignore-style patterns to exclude from conversion.
	pub exclude_patterns: Vec<String>,
	/// Whether to skip `.gitignore` integration.
	pub disable_gitignore: bool,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self::from_config(&HugoizeConfig::default())
	}
}

impl ScanOptions {
	pub fn from_config(config: &HugoizeConfig) -> Self {
		Self {
			extensions: config.extensions.clone(),
			exclude_patterns: config.exclude.patterns.clone(),
			disable_gitignore: config.disable_gitignore,
		}
	}
}

/// Fail unless `root` exists.
pub fn ensure_directory(root: &Path) -> HugoizeResult<()> {
	if root.exists() {
		Ok(())
	} else {
		Err(HugoizeError::MissingDirectory(root.display().to_string()))
	}
}

/// Collect every file below `root` whose extension is one of
/// `options.extensions`, sorted for deterministic ordering.
///
/// `.git` directories are never entered. Exclude patterns follow gitignore
/// syntax and are always applied; the root `.gitignore` is honored only when
/// `disable_gitignore` is false.
///
/// A directory reachable through more than one path (a symlink alias) is
/// walked once, under the path that sorts first. A symlink pointing back to
/// one of its own ancestors is a [`HugoizeError::SymlinkCycle`].
pub fn collect_files(root: &Path, options: &ScanOptions) -> HugoizeResult<Vec<PathBuf>> {
	ensure_directory(root)?;

	let mut files = Vec::new();
	let mut visited = Visited::default();

	let gitignore = if options.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let custom_exclude = build_exclude_matcher(root, &options.exclude_patterns)?;

	let walker = Walker {
		extensions: &options.extensions,
		gitignore: &gitignore,
		custom_exclude: &custom_exclude,
	};
	walker.walk_dir(root, &mut files, &mut visited)?;

	files.sort();
	tracing::debug!(count = files.len(), root = %root.display(), "collected files");
	Ok(files)
}

/// Build a `Gitignore` matcher from `[exclude]` patterns.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> HugoizeResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			HugoizeError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| HugoizeError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the root `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

/// Canonical directories seen so far, and the ones on the current
/// recursion path.
#[derive(Default)]
struct Visited {
	seen: HashSet<PathBuf>,
	ancestors: Vec<PathBuf>,
}

struct Walker<'a> {
	extensions: &'a [String],
	gitignore: &'a Gitignore,
	custom_exclude: &'a Gitignore,
}

impl Walker<'_> {
	fn walk_dir(
		&self,
		dir: &Path,
		files: &mut Vec<PathBuf>,
		visited: &mut Visited,
	) -> HugoizeResult<()> {
		if !dir.is_dir() {
			return Ok(());
		}

		let canonical = dir.canonicalize()?;
		if visited.ancestors.contains(&canonical) {
			return Err(HugoizeError::SymlinkCycle {
				path: dir.display().to_string(),
			});
		}
		if !visited.seen.insert(canonical.clone()) {
			tracing::debug!(path = %dir.display(), "skipping directory already walked");
			return Ok(());
		}

		let mut entries = std::fs::read_dir(dir)?
			.map(|entry| entry.map(|e| e.path()))
			.collect::<Result<Vec<_>, _>>()?;
		entries.sort();

		visited.ancestors.push(canonical);

		for path in entries {
			let is_dir = path.is_dir();

			if is_dir && path.file_name().is_some_and(|name| name == ".git") {
				continue;
			}

			if self.gitignore.matched(&path, is_dir).is_ignore()
				|| self.custom_exclude.matched(&path, is_dir).is_ignore()
			{
				continue;
			}

			if is_dir {
				self.walk_dir(&path, files, visited)?;
			} else if self.has_extension(&path) {
				files.push(path);
			}
		}

		visited.ancestors.pop();
		Ok(())
	}

	fn has_extension(&self, path: &Path) -> bool {
		let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
			return false;
		};

		self.extensions.iter().any(|candidate| candidate == ext)
	}
}
