//! Small per-domain key/value persistence.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::StoreError;

/// A TOML document addressed by dotted keys (`balances.alex`).
///
/// Nothing touches the filesystem until [`KvStore::load`] or [`KvStore::save`];
/// both create the parent directory and the file when they are missing.
#[derive(Debug, Clone, Default)]
pub struct KvStore {
	path: PathBuf,
	doc: Table,
}

impl KvStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			doc: Table::new(),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Replaces the in-memory document with the file's contents.
	pub fn load(&mut self) -> Result<(), StoreError> {
		self.ensure_file()?;
		let content = std::fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
		self.doc = toml::from_str(&content).map_err(|source| StoreError::Decode {
			path: self.path.clone(),
			source,
		})?;
		Ok(())
	}

	pub fn save(&self) -> Result<(), StoreError> {
		self.ensure_dir()?;
		let content = toml::to_string(&self.doc)?;
		std::fs::write(&self.path, content).map_err(|source| self.io(source))
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		let (sections, leaf) = split(key);
		let mut table = &self.doc;
		for section in sections {
			table = table.get(section)?.as_table()?;
		}
		table.get(leaf)
	}

	pub fn get_f64(&self, key: &str) -> Option<f64> {
		match self.get(key)? {
			Value::Float(f) => Some(*f),
			Value::Integer(n) => Some(*n as f64),
			_ => None,
		}
	}

	pub fn get_i64(&self, key: &str) -> Option<i64> {
		self.get(key)?.as_integer()
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key)?.as_str()
	}

	/// Sets `key`, creating intermediate tables and replacing non-table values in the way.
	pub fn set(&mut self, key: &str, value: impl Into<Value>) {
		let (sections, leaf) = split(key);
		let mut table = &mut self.doc;
		for section in sections {
			let entry = table.entry(section.to_string()).or_insert(Value::Table(Table::new()));
			if !entry.is_table() {
				*entry = Value::Table(Table::new());
			}
			let Value::Table(next) = entry else {
				return;
			};
			table = next;
		}
		table.insert(leaf.to_string(), value.into());
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		let (sections, leaf) = split(key);
		let mut table = &mut self.doc;
		for section in sections {
			table = table.get_mut(section)?.as_table_mut()?;
		}
		table.remove(leaf)
	}

	/// Direct keys of `section` (`""` for the root), in document order.
	pub fn keys(&self, section: &str) -> Vec<String> {
		let table = if section.is_empty() {
			Some(&self.doc)
		} else {
			self.get(section).and_then(Value::as_table)
		};
		table.map(|t| t.keys().cloned().collect()).unwrap_or_default()
	}

	fn ensure_dir(&self) -> Result<(), StoreError> {
		match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent).map_err(|source| self.io(source)),
			_ => Ok(()),
		}
	}

	fn ensure_file(&self) -> Result<(), StoreError> {
		if self.path.exists() {
			return Ok(());
		}
		self.ensure_dir()?;
		std::fs::write(&self.path, "").map_err(|source| self.io(source))
	}

	fn io(&self, source: std::io::Error) -> StoreError {
		StoreError::Io {
			path: self.path.clone(),
			source,
		}
	}
}

fn split(key: &str) -> (Vec<&str>, &str) {
	let mut parts: Vec<&str> = key.split('.').collect();
	let leaf = parts.pop().unwrap_or_default();
	(parts, leaf)
}
