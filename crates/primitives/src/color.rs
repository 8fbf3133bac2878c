/// Section sign used by the host's legacy formatting.
pub const SECTION: char = '\u{a7}';

const CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Translates `&`-prefixed colour and format codes into `§` codes.
///
/// Only a recognised code character is translated, so a literal `&` in text
/// such as `"Salt & Pepper"` survives unchanged.
pub fn colorize(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut chars = text.chars().peekable();
	while let Some(c) = chars.next() {
		match chars.peek() {
			Some(&next) if c == '&' && CODES.contains(next) => {
				out.push(SECTION);
				out.push(next.to_ascii_lowercase());
				chars.next();
			}
			_ => out.push(c),
		}
	}
	out
}

/// Removes `§` codes, for plain-text output.
pub fn strip_colors(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut chars = text.chars();
	while let Some(c) = chars.next() {
		if c == SECTION {
			chars.next();
		} else {
			out.push(c);
		}
	}
	out
}
