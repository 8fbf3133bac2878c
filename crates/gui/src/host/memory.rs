use std::collections::{BTreeMap, VecDeque};

use rustc_hash::{FxHashMap, FxHashSet};
use tessera_primitives::{ActorId, ItemView, SurfaceId};

use super::{ClickKind, CloseReason, Host, HostEvent};

/// A render surface kept by [`MemoryHost`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
	pub capacity: usize,
	pub title: String,
	pub slots: Vec<Option<ItemView>>,
	pub released: bool,
}

#[derive(Debug, Default)]
struct MemoryActor {
	name: String,
	online: bool,
	permissions: FxHashSet<String>,
	messages: Vec<String>,
}

/// In-process [`Host`] that records everything the framework asks of it.
///
/// Replacing or closing a view queues the matching [`HostEvent::Close`], the
/// way a real host reports it back on its next tick. Drain the queue with
/// [`MemoryHost::drain_events`] and feed it to the dispatcher.
#[derive(Debug, Default)]
pub struct MemoryHost {
	next_surface: u64,
	next_actor: u128,
	surfaces: FxHashMap<SurfaceId, MemorySurface>,
	views: FxHashMap<ActorId, SurfaceId>,
	actors: BTreeMap<ActorId, MemoryActor>,
	commands: Vec<String>,
	events: VecDeque<HostEvent>,
}

impl MemoryHost {
	pub fn new() -> Self {
		Self::default()
	}

	/// Connects a new actor with a deterministic identity.
	pub fn add_actor(&mut self, name: impl Into<String>) -> ActorId {
		self.next_actor += 1;
		let id = ActorId::from_u128(self.next_actor);
		self.actors.insert(
			id,
			MemoryActor {
				name: name.into(),
				online: true,
				..Default::default()
			},
		);
		id
	}

	pub fn find_actor(&self, name: &str) -> Option<ActorId> {
		self.actors.iter().find(|(_, a)| a.name == name).map(|(id, _)| *id)
	}

	pub fn grant(&mut self, actor: ActorId, permission: impl Into<String>) {
		if let Some(a) = self.actors.get_mut(&actor) {
			a.permissions.insert(permission.into());
		}
	}

	pub fn revoke(&mut self, actor: ActorId, permission: &str) {
		if let Some(a) = self.actors.get_mut(&actor) {
			a.permissions.remove(permission);
		}
	}

	/// Marks the actor offline, drops its view and returns the disconnect event.
	pub fn disconnect(&mut self, actor: ActorId) -> HostEvent {
		if let Some(a) = self.actors.get_mut(&actor) {
			a.online = false;
		}
		self.views.remove(&actor);
		HostEvent::Disconnect { actor }
	}

	/// Builds a click on the actor's current view, if it has one.
	pub fn click(&self, actor: ActorId, slot: usize, kind: ClickKind) -> Option<HostEvent> {
		let surface = self.current_surface(actor)?;
		Some(HostEvent::Click {
			actor,
			surface,
			slot,
			kind,
		})
	}

	/// Closes the actor's view as if the actor pressed escape.
	pub fn close_by_actor(&mut self, actor: ActorId) -> Option<HostEvent> {
		let surface = self.views.remove(&actor)?;
		Some(HostEvent::Close {
			actor,
			surface,
			reason: CloseReason::Actor,
		})
	}

	pub fn drain_events(&mut self) -> Vec<HostEvent> {
		self.events.drain(..).collect()
	}

	pub fn surface(&self, id: SurfaceId) -> Option<&MemorySurface> {
		self.surfaces.get(&id)
	}

	/// The surface the actor is looking at, if any.
	pub fn view(&self, actor: ActorId) -> Option<&MemorySurface> {
		self.surfaces.get(self.views.get(&actor)?)
	}

	/// Item shown at `slot` of the actor's current view.
	pub fn slot_of_view(&self, actor: ActorId, slot: usize) -> Option<&ItemView> {
		self.view(actor)?.slots.get(slot)?.as_ref()
	}

	pub fn messages(&self, actor: ActorId) -> &[String] {
		self.actors.get(&actor).map(|a| a.messages.as_slice()).unwrap_or_default()
	}

	pub fn take_messages(&mut self, actor: ActorId) -> Vec<String> {
		self.actors.get_mut(&actor).map(|a| std::mem::take(&mut a.messages)).unwrap_or_default()
	}

	pub fn commands(&self) -> &[String] {
		&self.commands
	}

	/// Number of surfaces not yet released.
	pub fn live_surfaces(&self) -> usize {
		self.surfaces.values().filter(|s| !s.released).count()
	}
}

impl Host for MemoryHost {
	fn create_surface(&mut self, capacity: usize, title: &str) -> SurfaceId {
		self.next_surface += 1;
		let id = SurfaceId(self.next_surface);
		self.surfaces.insert(
			id,
			MemorySurface {
				capacity,
				title: title.to_string(),
				slots: vec![None; capacity],
				released: false,
			},
		);
		id
	}

	fn release_surface(&mut self, surface: SurfaceId) {
		if let Some(s) = self.surfaces.get_mut(&surface) {
			s.released = true;
		}
	}

	fn set_slot(&mut self, surface: SurfaceId, slot: usize, item: Option<ItemView>) {
		if let Some(cell) = self.surfaces.get_mut(&surface).and_then(|s| s.slots.get_mut(slot)) {
			*cell = item;
		}
	}

	fn clear(&mut self, surface: SurfaceId) {
		if let Some(s) = self.surfaces.get_mut(&surface) {
			s.slots.iter_mut().for_each(|cell| *cell = None);
		}
	}

	fn set_title(&mut self, surface: SurfaceId, title: &str) {
		if let Some(s) = self.surfaces.get_mut(&surface) {
			s.title = title.to_string();
		}
	}

	fn viewers_of(&self, surface: SurfaceId) -> Vec<ActorId> {
		let mut viewers: Vec<_> = self.views.iter().filter(|(_, s)| **s == surface).map(|(a, _)| *a).collect();
		viewers.sort();
		viewers
	}

	fn show(&mut self, actor: ActorId, surface: SurfaceId) {
		if let Some(previous) = self.views.insert(actor, surface) {
			self.events.push_back(HostEvent::Close {
				actor,
				surface: previous,
				reason: CloseReason::OpenNew,
			});
		}
	}

	fn close_view(&mut self, actor: ActorId) {
		if let Some(surface) = self.views.remove(&actor) {
			self.events.push_back(HostEvent::Close {
				actor,
				surface,
				reason: CloseReason::Plugin,
			});
		}
	}

	fn current_surface(&self, actor: ActorId) -> Option<SurfaceId> {
		self.views.get(&actor).copied()
	}

	fn has_permission(&self, actor: ActorId, permission: &str) -> bool {
		self.actors.get(&actor).is_some_and(|a| a.permissions.contains(permission))
	}

	fn send(&mut self, actor: ActorId, message: &str) {
		if let Some(a) = self.actors.get_mut(&actor) {
			a.messages.push(message.to_string());
		}
	}

	fn actor_name(&self, actor: ActorId) -> Option<String> {
		self.actors.get(&actor).map(|a| a.name.clone())
	}

	fn online_actors(&self) -> Vec<ActorId> {
		self.actors.iter().filter(|(_, a)| a.online).map(|(id, _)| *id).collect()
	}

	fn dispatch_command(&mut self, command: &str) {
		self.commands.push(command.to_string());
	}
}
