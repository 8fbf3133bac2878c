//! Error types, one per concern.

use std::path::PathBuf;

/// A GUI resource file could not be turned into a template at all.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid TOML in {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
	#[error("no `gui` table in {path}")]
	MissingGui { path: PathBuf },
}

/// An element factory rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
	#[error("{kind}: missing argument `{name}`")]
	MissingArgument { kind: String, name: &'static str },
	#[error("{kind}: invalid argument {value:?}: {reason}")]
	InvalidArgument { kind: String, value: String, reason: &'static str },
	#[error("{kind} requires a visible item")]
	MissingItem { kind: String },
}

/// An open request could not be honoured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpenError {
	#[error("GUI not found: {name}{}", suggestion.as_ref().map(|s| format!(" (did you mean `{s}`?)")).unwrap_or_default())]
	NotFound { name: String, suggestion: Option<String> },
	#[error("page {page} out of range ({count} pages)")]
	PageOutOfRange { page: usize, count: usize },
}

/// Persistence failures, surfaced only to the caller of the failing operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("store I/O on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("corrupt store {path}: {source}")]
	Decode {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
	#[error("cannot encode store: {0}")]
	Encode(#[from] toml::ser::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("failed to read settings {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid settings {path}: {source}")]
	Decode {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

/// Outcome of inserting into a keyed table that keeps one entry per key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Key was new.
	InsertedNew,
	/// Key existed; the existing entry was kept.
	KeptExisting,
	/// Key existed; the new entry replaced it.
	ReplacedExisting,
}
