use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::HugoizeError;
use crate::HugoizeResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"hugoize.toml",
	".hugoize.toml",
	".config/hugoize.toml",
];

/// Front matter delimiter line for TOML front matter.
pub const FRONT_MATTER_DELIMITER: &str = "+++";

/// Default name of the nested front matter section that gets flattened.
pub const DEFAULT_SECTION: &str = "extra";

/// Default number of columns removed from each line of the flattened section.
pub const DEFAULT_INDENT: usize = 2;

/// Configuration loaded from a `hugoize.toml` file.
///
/// ```toml
/// extensions = ["md"]
/// disable_gitignore = true
///
/// [exclude]
/// patterns = ["drafts/", "*.draft.md"]
///
/// [front_matter]
/// section = "extra"
/// indent = 2
/// ```
#[derive(Debug, Deserialize)]
pub struct HugoizeConfig {
	/// File extensions (without the leading dot) that are converted.
	#[serde(default = "default_extensions")]
	pub extensions: Vec<String>,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Front matter flattening configuration.
	#[serde(default)]
	pub front_matter: FrontMatterConfig,
	/// When true (the default), `.gitignore` files are not used for
	/// filtering and every matching file below the directory is converted.
	/// Set to `false` to skip files that git would ignore.
	#[serde(default = "default_disable_gitignore")]
	pub disable_gitignore: bool,
}

impl Default for HugoizeConfig {
	fn default() -> Self {
		Self {
			extensions: default_extensions(),
			exclude: ExcludeConfig::default(),
			front_matter: FrontMatterConfig::default(),
			disable_gitignore: default_disable_gitignore(),
		}
	}
}

/// Configuration for excluding files and directories from conversion.
///
/// Patterns follow gitignore syntax and are relative to the converted
/// directory. Supports negation (`!pattern`) and directory markers (trailing
/// `/`).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Controls which front matter section is flattened and by how much.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FrontMatterConfig {
	/// Section header (without brackets) whose keys are lifted to the top
	/// level.
	#[serde(default = "default_section")]
	pub section: String,
	/// Columns removed from the start of each line inside the section.
	#[serde(default = "default_indent")]
	pub indent: usize,
}

impl Default for FrontMatterConfig {
	fn default() -> Self {
		Self {
			section: default_section(),
			indent: default_indent(),
		}
	}
}

fn default_extensions() -> Vec<String> {
	vec!["md".to_string()]
}

fn default_disable_gitignore() -> bool {
	true
}

fn default_section() -> String {
	DEFAULT_SECTION.to_string()
}

fn default_indent() -> usize {
	DEFAULT_INDENT
}

impl HugoizeConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> HugoizeResult<Option<HugoizeConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: HugoizeConfig =
			toml::from_str(&content).map_err(|e| HugoizeError::ConfigParse(e.to_string()))?;
		config.validate()?;

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to defaults when none exists.
	pub fn load_or_default(root: &Path) -> HugoizeResult<HugoizeConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	fn validate(&self) -> HugoizeResult<()> {
		if self.front_matter.indent == 0 {
			return Err(HugoizeError::InvalidIndent(self.front_matter.indent));
		}

		Ok(())
	}
}
