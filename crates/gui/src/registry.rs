//! Identifier → factory table for element kinds.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::element::{Element, ElementInput};
use crate::error::{ElementError, InsertAction};

/// Builds an element from its declarative input. Domain factories capture their own state.
pub type ElementFactory = Rc<dyn Fn(&ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError>>;

/// One registrable element kind.
#[derive(Clone)]
pub struct ElementKind {
	pub id: String,
	pub factory: ElementFactory,
}

impl ElementKind {
	pub fn new<F>(id: impl Into<String>, factory: F) -> Self
	where
		F: Fn(&ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> + 'static,
	{
		Self {
			id: id.into(),
			factory: Rc::new(factory),
		}
	}
}

impl fmt::Debug for ElementKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementKind").field("id", &self.id).finish_non_exhaustive()
	}
}

/// Result of [`ElementRegistry::build`].
pub enum BuildOutcome {
	Built(Rc<dyn Element>),
	/// No kind is registered under the identifier.
	NotFound,
	/// The kind exists but its factory rejected the input.
	Failed(ElementError),
}

impl fmt::Debug for BuildOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Built(e) => f.debug_tuple("Built").field(&e.kind()).finish(),
			Self::NotFound => f.write_str("NotFound"),
			Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
		}
	}
}

/// Read-only table of element kinds, assembled once by [`ElementRegistry::discover`].
#[derive(Default, Clone)]
pub struct ElementRegistry {
	kinds: FxHashMap<String, ElementKind>,
	order: Vec<String>,
}

impl ElementRegistry {
	/// Builds the table from an explicit list of kinds.
	///
	/// Identifiers are upper-cased. Blank identifiers are skipped and duplicates
	/// keep the first registration; both are logged and never abort discovery.
	pub fn discover(kinds: impl IntoIterator<Item = ElementKind>) -> Self {
		let mut registry = Self::default();
		for kind in kinds {
			registry.register(kind);
		}
		debug!(count = registry.len(), "element kinds registered");
		registry
	}

	pub fn register(&mut self, mut kind: ElementKind) -> Option<InsertAction> {
		let id = kind.id.trim().to_ascii_uppercase();
		if id.is_empty() {
			warn!("skipping element kind with a blank identifier");
			return None;
		}
		if self.kinds.contains_key(&id) {
			warn!(kind = %id, "duplicate element kind, keeping the first registration");
			return Some(InsertAction::KeptExisting);
		}
		kind.id = id.clone();
		self.order.push(id.clone());
		self.kinds.insert(id, kind);
		Some(InsertAction::InsertedNew)
	}

	pub fn build(&self, input: &ElementInput<'_>) -> BuildOutcome {
		let Some(kind) = self.kinds.get(&input.kind.to_ascii_uppercase()) else {
			return BuildOutcome::NotFound;
		};
		match (kind.factory)(input) {
			Ok(element) => BuildOutcome::Built(element),
			Err(e) => BuildOutcome::Failed(e),
		}
	}

	pub fn contains(&self, id: &str) -> bool {
		self.kinds.contains_key(&id.to_ascii_uppercase())
	}

	/// Registered identifiers in registration order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.order.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.kinds.len()
	}

	pub fn is_empty(&self) -> bool {
		self.kinds.is_empty()
	}
}

impl fmt::Debug for ElementRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.ids()).finish()
	}
}
