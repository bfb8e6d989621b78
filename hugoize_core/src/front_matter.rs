use crate::config::FRONT_MATTER_DELIMITER;
use crate::config::FrontMatterConfig;

/// Flatten the configured nested section (`[extra]` by default) of a `+++`
/// delimited front matter block.
///
/// The section header is removed and every line inside the section that is
/// indented by at least `base + indent` spaces loses its first `indent`
/// columns. The section ends at the next line that starts in column 0 and
/// contains a `[`, or at the closing delimiter.
///
/// Content without an opening delimiter on the first line, or without a
/// closing delimiter, is returned unchanged. Lines outside the front matter
/// are never touched.
pub fn normalize_front_matter(content: &str, config: &FrontMatterConfig) -> String {
	let lines: Vec<&str> = content.split('\n').collect();

	let Some(first) = lines.first() else {
		return content.to_string();
	};

	if first.trim() != FRONT_MATTER_DELIMITER {
		return content.to_string();
	}

	let Some(end) = find_closing_delimiter(&lines) else {
		tracing::debug!("front matter has no closing delimiter, leaving content unchanged");
		return content.to_string();
	};

	let marker = format!("[{}]", config.section);
	let mut output = Vec::with_capacity(lines.len());
	let mut in_section = false;
	let mut base_indent = 0;

	output.push(*first);

	for &line in &lines[1..end] {
		if line.trim() == marker {
			in_section = true;
			base_indent = leading_whitespace(line);
			continue;
		}

		if in_section && starts_top_level_section(line) {
			in_section = false;
		}

		if in_section && has_space_indent(line, base_indent + config.indent) {
			output.push(&line[config.indent..]);
		} else {
			output.push(line);
		}
	}

	output.extend_from_slice(&lines[end..]);
	output.join("\n")
}

/// Index of the first line after the opening delimiter that closes the block.
fn find_closing_delimiter(lines: &[&str]) -> Option<usize> {
	lines
		.iter()
		.enumerate()
		.skip(1)
		.find(|(_, line)| line.trim() == FRONT_MATTER_DELIMITER)
		.map(|(index, _)| index)
}

fn leading_whitespace(line: &str) -> usize {
	line.chars().take_while(|c| c.is_whitespace()).count()
}

fn starts_top_level_section(line: &str) -> bool {
	line.chars().next().is_some_and(|c| !c.is_whitespace()) && line.contains('[')
}

// Only spaces count, so slicing off `width` bytes never splits a character.
fn has_space_indent(line: &str, width: usize) -> bool {
	line.bytes().take_while(|b| *b == b' ').count() >= width
}
