/// Rewrite a shortcode argument list into the space separated form used by
/// the destination syntax.
///
/// `count=3, autoplay=true, caption="hi"` becomes
/// `count="3" autoplay="true" caption="hi"`. Booleans and number literals are
/// quoted, quoted strings and any other value are kept verbatim.
pub fn rewrite_params(params: &str) -> String {
	split_params(params)
		.into_iter()
		.map(rewrite_param)
		.filter(|param| !param.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
}

/// Split an argument list on commas that are not nested inside quotes or
/// brackets.
pub fn split_params(params: &str) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut quote: Option<char> = None;
	let mut escaped = false;
	let mut depth = 0_usize;
	let mut start = 0;

	for (index, ch) in params.char_indices() {
		if let Some(open) = quote {
			if escaped {
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if ch == open {
				quote = None;
			}
			continue;
		}

		match ch {
			'"' | '\'' | '`' => quote = Some(ch),
			'[' | '{' | '(' => depth += 1,
			']' | '}' | ')' => depth = depth.saturating_sub(1),
			',' if depth == 0 => {
				parts.push(&params[start..index]);
				start = index + 1;
			}
			_ => {}
		}
	}

	parts.push(&params[start..]);
	parts
}

fn rewrite_param(param: &str) -> String {
	let param = param.trim();

	let Some((key, value)) = param.split_once('=') else {
		return param.to_string();
	};

	let key = key.trim();
	if !is_param_key(key) {
		return param.to_string();
	}

	let value = value.trim();
	if is_bare_literal(value) {
		format!("{key}=\"{value}\"")
	} else {
		format!("{key}={value}")
	}
}

fn is_param_key(key: &str) -> bool {
	!key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Booleans and unsigned, negative or decimal number literals.
pub fn is_bare_literal(value: &str) -> bool {
	matches!(value, "true" | "false") || is_number(value)
}

fn is_number(value: &str) -> bool {
	let unsigned = value.strip_prefix('-').unwrap_or(value);
	let mut parts = unsigned.splitn(2, '.');
	let whole = parts.next().unwrap_or_default();

	is_digits(whole) && parts.next().is_none_or(is_digits)
}

fn is_digits(value: &str) -> bool {
	!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
