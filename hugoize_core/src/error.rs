use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HugoizeError {
	#[error(transparent)]
	#[diagnostic(code(hugoize::io_error))]
	Io(#[from] std::io::Error),

	#[error("directory `{0}` does not exist")]
	#[diagnostic(
		code(hugoize::missing_directory),
		help("pass the path to the content directory you want to convert")
	)]
	MissingDirectory(String),

	#[error("failed to read `{path}`: {reason}")]
	#[diagnostic(code(hugoize::read))]
	Read { path: String, reason: String },

	#[error("`{path}` is not valid UTF-8: {reason}")]
	#[diagnostic(
		code(hugoize::invalid_utf8),
		help("only UTF-8 encoded content files can be converted")
	)]
	InvalidUtf8 { path: String, reason: String },

	#[error("failed to write `{path}`: {reason}")]
	#[diagnostic(code(hugoize::write))]
	Write { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(hugoize::config_parse),
		help(
			"check that hugoize.toml is valid TOML with optional [exclude] and [front_matter] \
			 sections"
		)
	)]
	ConfigParse(String),

	#[error("invalid front matter indent step: {0}")]
	#[diagnostic(
		code(hugoize::invalid_indent),
		help("`front_matter.indent` must be at least 1")
	)]
	InvalidIndent(usize),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(hugoize::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type HugoizeResult<T> = Result<T, HugoizeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
