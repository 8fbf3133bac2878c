//! Domain plugins: owners of a resource directory, element kinds and hooks.

use std::path::PathBuf;
use std::rc::Rc;

use crate::element::{Element, ElementSpec};
use crate::error::StoreError;
use crate::registry::ElementKind;
use crate::settings::Settings;
use crate::template::Template;

/// A set of templates plus the element kinds and hooks that give them meaning.
///
/// Domains are registered once on the [`crate::SessionManager`] builder and
/// kept for its whole life; reload re-runs their load step. Methods take
/// `&self`, domains keep mutable state behind interior mutability.
pub trait GuiDomain {
	/// Short unique name, also the default resource subdirectory.
	fn name(&self) -> &str;

	/// Directory walked for this domain's `.toml` resources.
	fn resource_dir(&self, settings: &Settings) -> PathBuf {
		settings.gui_dir.join(self.name())
	}

	/// Element kinds registered after the built-ins.
	fn element_kinds(&self) -> Vec<ElementKind> {
		Vec::new()
	}

	/// Resets derived state before this domain's templates are rebuilt.
	fn on_reload(&self) {}

	/// Observes or replaces every element built for this domain's templates.
	fn enhance_element(&self, _special_type: Option<&str>, _spec: &ElementSpec, element: Rc<dyn Element>) -> Rc<dyn Element> {
		element
	}

	/// Last word on a compiled template: sharing, layout, behaviour.
	fn specify_template(&self, _template: &mut Template) {}

	fn load_information(&self) -> Result<(), StoreError> {
		Ok(())
	}

	fn save_information(&self) -> Result<(), StoreError> {
		Ok(())
	}
}

/// A domain with no element kinds and no hooks, for plain declarative GUIs.
#[derive(Debug, Clone)]
pub struct BasicDomain {
	name: String,
	dir: Option<PathBuf>,
}

impl BasicDomain {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), dir: None }
	}

	/// Loads from `dir` instead of `<gui_dir>/<name>`.
	pub fn at(mut self, dir: impl Into<PathBuf>) -> Self {
		self.dir = Some(dir.into());
		self
	}
}

impl GuiDomain for BasicDomain {
	fn name(&self) -> &str {
		&self.name
	}

	fn resource_dir(&self, settings: &Settings) -> PathBuf {
		self.dir.clone().unwrap_or_else(|| settings.gui_dir.join(&self.name))
	}
}
