//! Live, renderable realizations of templates.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tessera_primitives::{ActorId, Args, Placeholders, SurfaceId};
use tracing::{debug, trace, warn};

use crate::behavior::{Behavior, BehaviorSeed};
use crate::element::{ClickContext, ClickEffects, Element, GuiTarget};
use crate::error::OpenError;
use crate::host::{ClickKind, CloseReason, Host};
use crate::pager;
use crate::template::{Layout, SlotMap, Template};

/// Instances are single-threaded shared state: a shared template's singleton
/// is held by the catalog and by every viewer's session at once.
pub type InstanceRef = Rc<RefCell<Instance>>;

/// Result of routing a click into an instance.
#[derive(Debug)]
pub enum ClickOutcome {
	/// The surface does not belong to this instance.
	Stale,
	/// Nothing occupies the slot.
	Empty,
	/// The element's permission gate refused the actor.
	Denied,
	Handled(ClickEffects),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
	/// A programmatic view change or a foreign surface; the session stays.
	Ignored,
	/// The actor's session should be retired.
	Retire,
}

/// One viewing context of a template: its own page→slot map, one render
/// surface per page and an instance-scoped argument map. Elements are shared
/// with the template, never cloned.
pub struct Instance {
	template: Rc<Template>,
	viewer: Option<ActorId>,
	back: Option<GuiTarget>,
	args: Args,
	pages: Vec<SlotMap>,
	skeleton: SlotMap,
	surfaces: Vec<SurfaceId>,
	behavior: Option<Box<dyn Behavior>>,
	placeholders: Placeholders,
}

impl Instance {
	/// Creates the instance, its surfaces and renders every page once.
	pub fn create(host: &mut dyn Host, template: Rc<Template>, viewer: Option<ActorId>, back: Option<GuiTarget>, args: Args) -> InstanceRef {
		let behavior = template.behavior.as_ref().map(|factory| {
			factory(&BehaviorSeed {
				template: &template,
				viewer,
				args: &args,
			})
		});
		let pages = if template.pages.is_empty() { vec![SlotMap::new()] } else { template.pages.clone() };
		let skeleton = pages.first().cloned().unwrap_or_default();

		let mut instance = Self {
			template,
			viewer,
			back,
			args,
			pages,
			skeleton,
			surfaces: Vec::new(),
			behavior,
			placeholders: Placeholders::new(),
		};
		instance.sync_surfaces(host);
		instance.refresh(host);
		trace!(gui = %instance.template.name, viewer = ?viewer, "instance created");
		Rc::new(RefCell::new(instance))
	}

	pub fn template(&self) -> &Rc<Template> {
		&self.template
	}

	pub fn is_shared(&self) -> bool {
		self.template.is_shared()
	}

	pub fn viewer(&self) -> Option<ActorId> {
		self.viewer
	}

	pub fn back(&self) -> Option<&GuiTarget> {
		self.back.as_ref()
	}

	pub fn set_back(&mut self, back: Option<GuiTarget>) -> Option<GuiTarget> {
		std::mem::replace(&mut self.back, back)
	}

	/// Instance-scoped arguments seeded at open time.
	pub fn args(&self) -> &Args {
		&self.args
	}

	pub fn args_mut(&mut self) -> &mut Args {
		&mut self.args
	}

	/// Instance-level substitutions applied to every element on refresh.
	pub fn set_placeholders(&mut self, placeholders: Placeholders) {
		self.placeholders = placeholders;
	}

	pub fn pages(&self) -> &[SlotMap] {
		&self.pages
	}

	pub fn page_count(&self) -> usize {
		self.pages.len()
	}

	pub fn element_at(&self, page: usize, slot: usize) -> Option<&Rc<dyn Element>> {
		self.pages.get(page)?.get(&slot)
	}

	pub fn surfaces(&self) -> &[SurfaceId] {
		&self.surfaces
	}

	pub fn surface(&self, page: usize) -> Option<SurfaceId> {
		self.surfaces.get(page).copied()
	}

	pub fn page_of(&self, surface: SurfaceId) -> Option<usize> {
		self.surfaces.iter().position(|s| *s == surface)
	}

	pub fn title_for(&self, page: usize) -> String {
		self.template.title_for(page, self.pages.len())
	}

	pub fn behavior<T: Behavior>(&self) -> Option<&T> {
		self.behavior.as_deref()?.as_any().downcast_ref()
	}

	pub fn behavior_mut<T: Behavior>(&mut self) -> Option<&mut T> {
		self.behavior.as_deref_mut()?.as_any_mut().downcast_mut()
	}

	/// Installs `page`'s surface as the actor's view.
	pub fn open(&mut self, host: &mut dyn Host, actor: ActorId, page: usize) -> Result<(), OpenError> {
		let Some(surface) = self.surface(page) else {
			return Err(OpenError::PageOutOfRange {
				page,
				count: self.page_count(),
			});
		};
		host.set_title(surface, &self.title_for(page));
		host.show(actor, surface);
		Ok(())
	}

	/// Routes a click to the element at `slot` of the page behind `surface`.
	///
	/// `this` must be the handle this instance is borrowed from; elements get it
	/// as their back-reference and must not borrow it.
	#[allow(clippy::too_many_arguments)]
	pub fn handle_click(
		&mut self, this: &InstanceRef, host: &mut dyn Host, actor: ActorId, surface: SurfaceId, slot: usize, kind: ClickKind, mut args: Args,
	) -> ClickOutcome {
		let Some(page) = self.page_of(surface) else {
			return ClickOutcome::Stale;
		};
		let Some(element) = self.element_at(page, slot).cloned() else {
			return ClickOutcome::Empty;
		};
		if !element.can_click(actor, host) {
			debug!(gui = %self.template.name, actor = %actor, slot, "click denied");
			return ClickOutcome::Denied;
		}
		if let Some(behavior) = &self.behavior {
			behavior.augment_click_args(&mut args);
		}

		let mut cx = ClickContext {
			instance: self,
			current: this,
			host,
			actor,
			kind,
			page,
			slot,
			args: &args,
		};
		ClickOutcome::Handled(element.on_click(&mut cx))
	}

	pub fn handle_close(&self, surface: SurfaceId, reason: CloseReason) -> CloseOutcome {
		if self.page_of(surface).is_none() || reason == CloseReason::OpenNew {
			return CloseOutcome::Ignored;
		}
		CloseOutcome::Retire
	}

	/// Re-renders every page, re-deriving pages first for dynamic layouts.
	pub fn refresh(&mut self, host: &mut dyn Host) {
		if let Some(behavior) = self.behavior.as_deref_mut() {
			behavior.before_refresh(&self.args);
		}
		if self.template.layout == Layout::DynamicOverflow {
			self.relayout(host);
		}
		self.render(host);
		if let Some(behavior) = self.behavior.as_deref_mut() {
			behavior.after_refresh(&self.args, self.pages.len());
		}
	}

	/// Page navigation for `MOVE_PAGE`.
	///
	/// Moving back from page 0 or forward from the last page lands on page 0.
	/// Moving back from page 0 while the back-reference is shared returns that
	/// back-reference instead, for the caller to open.
	pub fn move_page(&mut self, host: &mut dyn Host, actor: ActorId, from: usize, forward: bool) -> Option<GuiTarget> {
		if !forward && from == 0 {
			if let Some(back) = self.back.as_ref().filter(|b| target_is_shared(b)) {
				return Some(back.clone());
			}
		}

		let count = self.page_count();
		let target = match forward {
			true if from + 1 < count => from + 1,
			false if from > 0 && from < count => from - 1,
			_ => 0,
		};
		if let Err(e) = self.open(host, actor, target) {
			warn!(gui = %self.template.name, error = %e, "page change failed");
		}
		None
	}

	/// Closes the view of every actor looking at any page of this instance.
	pub fn force_close(&self, host: &mut dyn Host) {
		for surface in &self.surfaces {
			for viewer in host.viewers_of(*surface) {
				host.close_view(viewer);
			}
		}
	}

	/// Hands every surface back to the host. The instance is unusable afterwards.
	pub fn release(&mut self, host: &mut dyn Host) {
		for surface in self.surfaces.drain(..) {
			host.release_surface(surface);
		}
	}

	fn relayout(&mut self, host: &mut dyn Host) {
		let items = match self.behavior.as_deref_mut() {
			Some(behavior) => behavior.overflow_items(&self.args),
			None => Vec::new(),
		};
		self.pages = pager::paginate(&self.skeleton, self.template.size, &items);
		self.sync_surfaces(host);
	}

	/// Matches surfaces to pages: creates missing ones, moves viewers off
	/// vanished pages onto the last page, and re-titles everything.
	fn sync_surfaces(&mut self, host: &mut dyn Host) {
		let count = self.pages.len().max(1);
		while self.surfaces.len() < count {
			let surface = host.create_surface(self.template.size, &self.template.title);
			self.surfaces.push(surface);
		}
		if self.surfaces.len() > count {
			let last = self.surfaces[count - 1];
			let vanished: Vec<_> = self.surfaces.drain(count..).collect();
			for surface in vanished {
				for viewer in host.viewers_of(surface) {
					host.show(viewer, last);
				}
				host.release_surface(surface);
			}
		}
		for (page, surface) in self.surfaces.iter().enumerate() {
			host.set_title(*surface, &self.template.title_for(page, count));
		}
	}

	fn render(&self, host: &mut dyn Host) {
		let mut placeholders = self.placeholders.clone();
		if let Some(behavior) = &self.behavior {
			placeholders.extend(&behavior.placeholders(&self.args));
		}

		for (page, (slots, surface)) in self.pages.iter().zip(&self.surfaces).enumerate() {
			host.clear(*surface);
			for (slot, element) in slots.range(..self.template.size) {
				let mut item = element.render(&placeholders);
				if let Some(behavior) = &self.behavior {
					item = behavior.decorate(page, *slot, element.as_ref(), item);
				}
				if item.is_some() {
					host.set_slot(*surface, *slot, item);
				}
			}
		}
	}
}

fn target_is_shared(target: &GuiTarget) -> bool {
	match target {
		GuiTarget::Template(t) => t.is_shared(),
		GuiTarget::Instance(i) => i.try_borrow().is_ok_and(|i| i.is_shared()),
		GuiTarget::Named(_) => false,
	}
}

impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance")
			.field("template", &self.template.name)
			.field("viewer", &self.viewer)
			.field("back", &self.back)
			.field("args", &self.args)
			.field("pages", &self.pages.len())
			.field("surfaces", &self.surfaces)
			.finish_non_exhaustive()
	}
}
