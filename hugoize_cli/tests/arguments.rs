mod common;

use clap::Parser;
use hugoize_cli::HugoizeCli;
use hugoize_cli::OutputFormat;
use hugoize_core::AnyEmptyResult;

#[test]
fn missing_directory_argument_exits_with_usage() {
	common::hugoize_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Usage: hugoize <directory>"));
}

#[test]
fn nonexistent_directory_exits_with_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let missing = tmp.path().join("content");

	common::hugoize_cmd()
		.arg(&missing)
		.assert()
		.code(1)
		.stderr(predicates::str::contains("does not exist"));

	Ok(())
}

#[test]
fn empty_directory_reports_zero_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::hugoize_cmd()
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Found 0 markdown files"))
		.stdout(predicates::str::contains("Done! Processed 0 files"));

	Ok(())
}

#[test]
fn parses_flags() {
	let args = HugoizeCli::parse_from([
		"hugoize",
		"content",
		"--dry-run",
		"--diff",
		"--format",
		"json",
		"-v",
		"--no-color",
	]);

	assert_eq!(
		args.directory.as_deref(),
		Some(std::path::Path::new("content"))
	);
	assert!(args.dry_run);
	assert!(args.diff);
	assert!(matches!(args.format, OutputFormat::Json));
	assert!(args.verbose);
	assert!(args.no_color);
}

#[test]
fn directory_is_optional_for_parsing() {
	let args = HugoizeCli::parse_from(["hugoize"]);
	assert!(args.directory.is_none());
	assert!(matches!(args.format, OutputFormat::Text));
	assert!(!args.dry_run);
}
