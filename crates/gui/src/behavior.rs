//! Per-instance domain state attached to a template.
//!
//! A template's sharing mode and layout are plain tags; anything a domain
//! wants to vary per instance (extra placeholders, click arguments, the items a
//! dynamic layout pages through, slot decoration) goes through [`Behavior`].

use std::any::Any;
use std::rc::Rc;

use tessera_primitives::{ActorId, Args, ItemView, Placeholders};

use crate::element::Element;
use crate::template::Template;

/// What a behaviour factory sees when an instance is created.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorSeed<'a> {
	pub template: &'a Template,
	pub viewer: Option<ActorId>,
	/// The instance-scoped arguments the instance was opened with.
	pub args: &'a Args,
}

/// Creates the behaviour for a new instance.
pub type BehaviorFactory = Rc<dyn Fn(&BehaviorSeed<'_>) -> Box<dyn Behavior>>;

pub trait Behavior: Any {
	/// Substitutions applied to every rendered element, after the instance's own.
	fn placeholders(&self, _args: &Args) -> Placeholders {
		Placeholders::new()
	}

	/// Adds per-click transient arguments before the element reacts.
	fn augment_click_args(&self, _args: &mut Args) {}

	/// Items a dynamic-overflow layout distributes over the skeleton's empty slots.
	fn overflow_items(&mut self, _args: &Args) -> Vec<Rc<dyn Element>> {
		Vec::new()
	}

	fn before_refresh(&mut self, _args: &Args) {}

	/// Runs after every page has been rendered.
	fn after_refresh(&mut self, _args: &Args, _pages: usize) {}

	/// Final say over what a slot shows.
	fn decorate(&self, _page: usize, _slot: usize, _element: &dyn Element, rendered: Option<ItemView>) -> Option<ItemView> {
		rendered
	}

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}
