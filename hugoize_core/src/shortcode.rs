use std::sync::LazyLock;

use derive_more::Deref;
use derive_more::DerefMut;
use regex::Captures;
use regex::Regex;

use crate::params::rewrite_params;

/// Source opening tag: `{% name(params) %}`.
static SOURCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{%\s*(\w+)\((.*?)\)\s*%\}").expect("source opening tag pattern is valid")
});

/// Destination opening tag: `{{< name ...`.
static DESTINATION_OPEN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{\{<\s*(\w+)").expect("destination opening tag pattern is valid")
});

/// Generic source closing tag `{% end %}`, or an already converted
/// destination closing tag `{{< /name >}}` (capture 1).
static CLOSE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{%\s*end\s*%\}|\{\{<\s*/\s*(\w+)\s*>\}\}")
		.expect("closing tag pattern is valid")
});

/// Names of opened shortcodes that have not been closed yet, innermost last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct TagStack(Vec<String>);

impl TagStack {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<S: Into<String>> FromIterator<S> for TagStack {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

/// The result of resolving generic closing tags in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingScan {
	/// The document with every resolvable closing tag rewritten.
	pub content: String,
	/// Tags still open at the end of the document.
	pub stack: TagStack,
	/// 1-indexed lines holding a closing tag that had nothing to close. One
	/// entry per tag, so a line can appear more than once.
	pub unmatched: Vec<usize>,
}

impl ClosingScan {
	/// True when every closing tag was matched and nothing was left open.
	pub fn is_balanced(&self) -> bool {
		self.stack.is_empty() && self.unmatched.is_empty()
	}
}

/// Convert every shortcode in `content` to the destination syntax.
///
/// Opening tags are rewritten first, then closing tags are resolved against
/// the rewritten text.
pub fn convert_shortcodes(content: &str) -> ClosingScan {
	let opened = rewrite_opening_tags(content);
	resolve_closing_tags(&opened)
}

/// Rewrite `{% name(params) %}` tags into `{{< name params >}}`.
///
/// An empty parameter list produces `{{< name >}}`. Generic closing tags and
/// any other templating constructs are left untouched.
pub fn rewrite_opening_tags(content: &str) -> String {
	SOURCE_OPEN
		.replace_all(content, |captures: &Captures<'_>| {
			let name = &captures[1];
			let params = rewrite_params(&captures[2]);

			if params.is_empty() {
				format!("{{{{< {name} >}}}}")
			} else {
				format!("{{{{< {name} {params} >}}}}")
			}
		})
		.into_owned()
}

/// Resolve each generic `{% end %}` tag to the most recently opened
/// destination tag.
///
/// Lines are scanned top to bottom. Every opening tag on a line is pushed
/// before any closing tag on that line pops, so tags opened and closed on a
/// single line pair up in textual order. A closing tag found while the stack
/// is empty is left as it is and reported in [`ClosingScan::unmatched`].
///
/// Destination closing tags already present in the text close their own
/// name, which keeps a second conversion of converted output a no-op.
pub fn resolve_closing_tags(content: &str) -> ClosingScan {
	resolve_closing_tags_with(content, TagStack::new())
}

/// Like [`resolve_closing_tags`] but starting from an existing stack.
pub fn resolve_closing_tags_with(content: &str, mut stack: TagStack) -> ClosingScan {
	let mut unmatched = Vec::new();
	let lines: Vec<String> = content
		.split('\n')
		.enumerate()
		.map(|(index, line)| resolve_line(line, index + 1, &mut stack, &mut unmatched))
		.collect();

	ClosingScan {
		content: lines.join("\n"),
		stack,
		unmatched,
	}
}

fn resolve_line(
	line: &str,
	line_number: usize,
	stack: &mut TagStack,
	unmatched: &mut Vec<usize>,
) -> String {
	for captures in DESTINATION_OPEN.captures_iter(line) {
		stack.push(captures[1].to_string());
	}

	if !CLOSE.is_match(line) {
		return line.to_string();
	}

	CLOSE
		.replace_all(line, |captures: &Captures<'_>| {
			if let Some(name) = captures.get(1) {
				close_named(stack, name.as_str());
				captures[0].to_string()
			} else if let Some(name) = stack.pop() {
				format!("{{{{< /{name} >}}}}")
			} else {
				tracing::debug!(line = line_number, "closing tag has no open tag to match");
				unmatched.push(line_number);
				captures[0].to_string()
			}
		})
		.into_owned()
}

/// Remove the innermost open tag called `name`, if any.
fn close_named(stack: &mut TagStack, name: &str) {
	if let Some(index) = stack.iter().rposition(|open| open == name) {
		stack.remove(index);
	}
}
