use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed argument value.
///
/// Element attributes and the argument maps threaded through GUI opens and
/// clicks are heterogeneous (numbers, flags, names, lore lines), so they are
/// carried as `ArgValue` and read back through the lenient accessors on
/// [`Args`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	List(Vec<ArgValue>),
}

impl ArgValue {
	/// Returns the value as a boolean. Text `"true"`/`"false"` is accepted.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			Self::Text(s) => s.trim().parse().ok(),
			_ => None,
		}
	}

	/// Returns the value as an integer. Numeric text is parsed; floats are not truncated.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(i) => Some(*i),
			Self::Text(s) => s.trim().parse().ok(),
			_ => None,
		}
	}

	/// Returns the value as a float. Integers widen and numeric text is parsed.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(f) => Some(*f),
			Self::Int(i) => Some(*i as f64),
			Self::Text(s) => s.trim().parse().ok(),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[ArgValue]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}
}

impl fmt::Display for ArgValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(b) => write!(f, "{b}"),
			Self::Int(i) => write!(f, "{i}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Text(s) => f.write_str(s),
			Self::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
		}
	}
}

impl From<bool> for ArgValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for ArgValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for ArgValue {
	fn from(value: i32) -> Self {
		Self::Int(value.into())
	}
}

impl From<u32> for ArgValue {
	fn from(value: u32) -> Self {
		Self::Int(value.into())
	}
}

impl From<f64> for ArgValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for ArgValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for ArgValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Vec<String>> for ArgValue {
	fn from(value: Vec<String>) -> Self {
		Self::List(value.into_iter().map(Self::Text).collect())
	}
}

/// String-keyed argument map with "read or default" accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
	inner: BTreeMap<String, ArgValue>,
}

impl Args {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Option<ArgValue> {
		self.inner.insert(key.into(), value.into())
	}

	pub fn get(&self, key: &str) -> Option<&ArgValue> {
		self.inner.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
		self.inner.remove(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
		self.inner.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Inserts every entry of `other`, overwriting existing keys.
	pub fn extend(&mut self, other: Args) {
		self.inner.extend(other.inner);
	}

	pub fn bool_or(&self, key: &str, default: bool) -> bool {
		self.get(key).and_then(ArgValue::as_bool).unwrap_or(default)
	}

	pub fn int_or(&self, key: &str, default: i64) -> i64 {
		self.get(key).and_then(ArgValue::as_int).unwrap_or(default)
	}

	pub fn float_or(&self, key: &str, default: f64) -> f64 {
		self.get(key).and_then(ArgValue::as_float).unwrap_or(default)
	}

	pub fn text(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(ArgValue::as_text)
	}

	pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
		self.text(key).unwrap_or(default)
	}

	/// Reads a list of strings. A single text value is returned as a one-line list.
	pub fn text_list(&self, key: &str) -> Vec<String> {
		match self.get(key) {
			Some(ArgValue::List(items)) => items.iter().filter_map(|v| v.as_text().map(str::to_string)).collect(),
			Some(ArgValue::Text(s)) => vec![s.clone()],
			_ => Vec::new(),
		}
	}
}

impl FromIterator<(String, ArgValue)> for Args {
	fn from_iter<I: IntoIterator<Item = (String, ArgValue)>>(iter: I) -> Self {
		Self {
			inner: iter.into_iter().collect(),
		}
	}
}
