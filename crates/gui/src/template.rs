//! Compiled, immutable GUI definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tessera_primitives::color::SECTION;

use crate::behavior::BehaviorFactory;
use crate::element::Element;

/// Slot index → element for one page.
pub type SlotMap = BTreeMap<usize, Rc<dyn Element>>;

/// How many instances a template has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sharing {
	/// One instance observed and mutated by every viewer.
	#[default]
	Shared,
	/// A fresh instance per open.
	PerViewer,
}

/// How an instance derives its pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
	/// Pages are exactly the compiled pages.
	#[default]
	Static,
	/// Pages are re-derived on every refresh from the page-0 skeleton and the
	/// behaviour's overflow items.
	DynamicOverflow,
}

impl Layout {
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
			"static" => Some(Self::Static),
			"dynamic_overflow" | "dynamic" => Some(Self::DynamicOverflow),
			_ => None,
		}
	}
}

/// A named GUI definition. Shared by reference between the catalog and every instance.
pub struct Template {
	/// Lower-cased catalog key.
	pub name: String,
	pub title: String,
	pub size: usize,
	pub sharing: Sharing,
	pub layout: Layout,
	/// Domain-specific special type, upper-cased.
	pub kind: Option<String>,
	/// Name of the domain that loaded this template.
	pub domain: String,
	/// Dense pages `0..n`, default-page elements already merged in. Never empty.
	pub pages: Vec<SlotMap>,
	/// Per-instance domain state, selected by the domain for this template.
	pub behavior: Option<BehaviorFactory>,
}

impl Template {
	/// An empty single-page shared template.
	pub fn new(name: impl Into<String>, title: impl Into<String>, size: usize) -> Self {
		Self {
			name: name.into().to_lowercase(),
			title: title.into(),
			size,
			sharing: Sharing::Shared,
			layout: Layout::Static,
			kind: None,
			domain: String::new(),
			pages: vec![SlotMap::new()],
			behavior: None,
		}
	}

	pub fn with_sharing(mut self, sharing: Sharing) -> Self {
		self.sharing = sharing;
		self
	}

	pub fn with_layout(mut self, layout: Layout) -> Self {
		self.layout = layout;
		self
	}

	pub fn with_pages(mut self, pages: Vec<SlotMap>) -> Self {
		self.pages = if pages.is_empty() { vec![SlotMap::new()] } else { pages };
		self
	}

	pub fn with_behavior(mut self, behavior: BehaviorFactory) -> Self {
		self.behavior = Some(behavior);
		self
	}

	pub fn is_shared(&self) -> bool {
		self.sharing == Sharing::Shared
	}

	/// Case-insensitive match against the special type.
	pub fn is_kind(&self, kind: &str) -> bool {
		self.kind.as_deref().is_some_and(|k| k.eq_ignore_ascii_case(kind))
	}

	pub fn page_count(&self) -> usize {
		self.pages.len()
	}

	pub fn element_at(&self, page: usize, slot: usize) -> Option<&Rc<dyn Element>> {
		self.pages.get(page)?.get(&slot)
	}

	/// Title of `page` when the GUI has `count` pages.
	pub fn title_for(&self, page: usize, count: usize) -> String {
		if count <= 1 {
			return self.title.clone();
		}
		format!("{}{SECTION}7 ({}/{count})", self.title, page + 1)
	}
}

impl fmt::Debug for Template {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Template")
			.field("name", &self.name)
			.field("title", &self.title)
			.field("size", &self.size)
			.field("sharing", &self.sharing)
			.field("layout", &self.layout)
			.field("kind", &self.kind)
			.field("domain", &self.domain)
			.field("pages", &self.pages.len())
			.field("behavior", &self.behavior.is_some())
			.finish()
	}
}
