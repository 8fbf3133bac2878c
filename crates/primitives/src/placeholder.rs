/// An ordered set of `placeholder -> replacement` pairs.
///
/// Substitution is simultaneous: at each position the earliest occurring
/// placeholder wins (ties go to the earlier pair) and substituted text is not
/// scanned again, so a replacement may safely contain another placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
	pairs: Vec<(String, String)>,
}

impl Placeholders {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style push of one pair. Empty placeholders are ignored.
	pub fn with(mut self, placeholder: impl Into<String>, replacement: impl Into<String>) -> Self {
		self.push(placeholder, replacement);
		self
	}

	pub fn push(&mut self, placeholder: impl Into<String>, replacement: impl Into<String>) {
		let placeholder = placeholder.into();
		if !placeholder.is_empty() {
			self.pairs.push((placeholder, replacement.into()));
		}
	}

	/// Appends all pairs of `other` after the pairs of `self`.
	pub fn extend(&mut self, other: &Placeholders) {
		self.pairs.extend(other.pairs.iter().cloned());
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Applies every pair to `text`.
	pub fn apply(&self, text: &str) -> String {
		if self.pairs.is_empty() {
			return text.to_string();
		}

		let mut out = String::with_capacity(text.len());
		let mut rest = text;
		loop {
			let next = self
				.pairs
				.iter()
				.filter_map(|(from, to)| rest.find(from.as_str()).map(|at| (at, from.len(), to)))
				.min_by_key(|(at, _, _)| *at);

			let Some((at, len, to)) = next else {
				out.push_str(rest);
				return out;
			};
			out.push_str(&rest[..at]);
			out.push_str(to);
			rest = &rest[at + len..];
		}
	}

	/// Applies every pair to each line.
	pub fn apply_lines(&self, lines: &[String]) -> Vec<String> {
		lines.iter().map(|line| self.apply(line)).collect()
	}
}
