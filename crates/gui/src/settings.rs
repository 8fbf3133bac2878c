//! Framework settings (`tessera.toml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tessera_primitives::colorize;

use crate::error::SettingsError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Root of the GUI resource tree; each domain loads `<gui_dir>/<domain>` by default.
	pub gui_dir: PathBuf,
	/// Where per-domain key/value stores live.
	pub data_dir: PathBuf,
	pub messages: Messages,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			gui_dir: PathBuf::from("guis"),
			data_dir: PathBuf::from("data"),
			messages: Messages::default(),
		}
	}
}

impl Settings {
	/// Reads `path`, falling back to defaults when the file does not exist.
	///
	/// Relative directories are resolved against the file's parent directory.
	pub fn load(path: &Path) -> Result<Self, SettingsError> {
		if !path.exists() {
			return Ok(Self::default().relative_to(path.parent().unwrap_or(Path::new(""))));
		}
		let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let settings: Self = toml::from_str(&content).map_err(|source| SettingsError::Decode {
			path: path.to_path_buf(),
			source,
		})?;
		Ok(settings.relative_to(path.parent().unwrap_or(Path::new(""))))
	}

	/// Settings rooted at `base` (`base/guis`, `base/data`).
	pub fn rooted(base: &Path) -> Self {
		Self::default().relative_to(base)
	}

	pub fn relative_to(mut self, base: &Path) -> Self {
		if self.gui_dir.is_relative() {
			self.gui_dir = base.join(&self.gui_dir);
		}
		if self.data_dir.is_relative() {
			self.data_dir = base.join(&self.data_dir);
		}
		self
	}

	/// Store file of a domain.
	pub fn data_file(&self, domain: &str) -> PathBuf {
		self.data_dir.join(format!("{domain}.toml"))
	}
}

/// Configurable user-facing replies. `&` colour codes are translated on use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Messages {
	/// `{name}` is the requested GUI, `{suggestion}` the closest known name or empty.
	pub gui_not_found: String,
	pub reload_done: String,
	pub no_permission: String,
}

impl Default for Messages {
	fn default() -> Self {
		Self {
			gui_not_found: "&cGUI not found: {name}{suggestion}".to_string(),
			reload_done: "Reloaded plugin.".to_string(),
			no_permission: "No permission.".to_string(),
		}
	}
}

impl Messages {
	pub fn gui_not_found(&self, name: &str, suggestion: Option<&str>) -> String {
		let suggestion = suggestion.map(|s| format!(" (did you mean {s}?)")).unwrap_or_default();
		colorize(&self.gui_not_found.replace("{name}", name).replace("{suggestion}", &suggestion))
	}

	pub fn reload_done(&self) -> String {
		colorize(&self.reload_done)
	}

	pub fn no_permission(&self) -> String {
		colorize(&self.no_permission)
	}
}
