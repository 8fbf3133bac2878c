//! Resource directory loading.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::{CompileWarning, GuiResource, compile};
use crate::domain::GuiDomain;
use crate::error::LoadError;
use crate::registry::ElementRegistry;
use crate::template::Template;

/// Aggregate result of loading one or more resource directories.
#[derive(Debug, Default)]
pub struct LoadReport {
	/// Compiled templates in load order.
	pub templates: Vec<Rc<Template>>,
	/// Non-fatal compile warnings keyed by source file path.
	pub warnings: Vec<(PathBuf, CompileWarning)>,
	/// Files that produced no template, keyed by path.
	pub errors: Vec<(PathBuf, String)>,
}

impl LoadReport {
	pub fn merge(&mut self, other: LoadReport) {
		self.templates.extend(other.templates);
		self.warnings.extend(other.warnings);
		self.errors.extend(other.errors);
	}

	pub fn template_names(&self) -> impl Iterator<Item = &str> {
		self.templates.iter().map(|t| t.name.as_str())
	}
}

/// Loads one resource file. The template name is the lower-cased file stem.
pub fn load_file(path: &Path, registry: &ElementRegistry, domain: &dyn GuiDomain) -> Result<(Template, Vec<CompileWarning>), LoadError> {
	let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let resource = GuiResource::parse(path, &content)?;
	let name = path.file_stem().map(|s| s.to_string_lossy().to_lowercase()).unwrap_or_default();
	Ok(compile(&name, resource, registry, domain))
}

/// Recursively loads every `.toml` file under `dir` in path order.
///
/// A missing directory loads nothing. Unreadable files and directories are
/// reported and skipped; loading always continues.
pub fn load_dir(dir: &Path, registry: &ElementRegistry, domain: &dyn GuiDomain) -> LoadReport {
	let mut report = LoadReport::default();
	if !dir.exists() {
		debug!(domain = domain.name(), dir = %dir.display(), "resource directory missing");
		return report;
	}
	walk(dir, registry, domain, &mut report);
	info!(domain = domain.name(), templates = report.templates.len(), warnings = report.warnings.len(), "GUIs loaded");
	report
}

fn walk(dir: &Path, registry: &ElementRegistry, domain: &dyn GuiDomain, report: &mut LoadReport) {
	let entries = match std::fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(error) => {
			warn!(dir = %dir.display(), error = %error, "unreadable resource directory");
			report.errors.push((dir.to_path_buf(), error.to_string()));
			return;
		}
	};
	let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
	paths.sort();

	for path in paths {
		if path.is_dir() {
			walk(&path, registry, domain, report);
			continue;
		}
		if !path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml")) {
			continue;
		}
		match load_file(&path, registry, domain) {
			Ok((template, warnings)) => {
				debug!(gui = %template.name, pages = template.page_count(), "loaded GUI");
				for warning in warnings {
					warn!(path = %path.display(), warning = %warning, "GUI compiled with problems");
					report.warnings.push((path.clone(), warning));
				}
				report.templates.push(Rc::new(template));
			}
			Err(error) => {
				warn!(path = %path.display(), error = %error, "GUI failed to load");
				report.errors.push((path, error.to_string()));
			}
		}
	}
}
