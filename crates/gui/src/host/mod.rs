//! The boundary between the framework and the embedding application.
//!
//! The host owns the real render widgets and actor connections. The framework
//! only talks to it through [`Host`] and only hears from it through
//! [`HostEvent`]s handed to [`crate::dispatch::dispatch`].

pub mod memory;

pub use memory::MemoryHost;
use tessera_primitives::{ActorId, ItemView, SurfaceId};

/// Rendering surfaces, actor views and actor services supplied by the host.
///
/// All calls happen on the host's event thread; implementations never block.
pub trait Host {
	/// Creates a fixed-capacity render surface.
	fn create_surface(&mut self, capacity: usize, title: &str) -> SurfaceId;
	/// Releases a surface the framework no longer uses. Viewers are not closed.
	fn release_surface(&mut self, surface: SurfaceId);
	/// Shows `item` at `slot`, or empties the slot for `None`.
	fn set_slot(&mut self, surface: SurfaceId, slot: usize, item: Option<ItemView>);
	fn clear(&mut self, surface: SurfaceId);
	fn set_title(&mut self, surface: SurfaceId, title: &str);
	fn viewers_of(&self, surface: SurfaceId) -> Vec<ActorId>;
	/// Installs `surface` as the actor's active view, replacing any previous view.
	fn show(&mut self, actor: ActorId, surface: SurfaceId);
	/// Closes whatever the actor is currently viewing.
	fn close_view(&mut self, actor: ActorId);
	fn current_surface(&self, actor: ActorId) -> Option<SurfaceId>;

	fn has_permission(&self, actor: ActorId, permission: &str) -> bool;
	fn send(&mut self, actor: ActorId, message: &str);
	fn actor_name(&self, actor: ActorId) -> Option<String>;
	fn online_actors(&self) -> Vec<ActorId>;
	/// Runs a command with console authority.
	fn dispatch_command(&mut self, command: &str);
}

/// Mouse/keyboard gesture behind a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickKind {
	#[default]
	Left,
	Right,
	ShiftLeft,
	ShiftRight,
	Middle,
	Other,
}

impl ClickKind {
	pub fn is_left(self) -> bool {
		matches!(self, Self::Left | Self::ShiftLeft)
	}
}

/// Why a surface stopped being an actor's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
	/// The view is being replaced by another surface (page turn or GUI change).
	OpenNew,
	/// The actor closed it.
	Actor,
	/// Closed programmatically.
	Plugin,
	/// The actor's connection went away.
	Disconnect,
}

/// A raw interaction delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
	Click {
		actor: ActorId,
		surface: SurfaceId,
		slot: usize,
		kind: ClickKind,
	},
	Close {
		actor: ActorId,
		surface: SurfaceId,
		reason: CloseReason,
	},
	Disconnect {
		actor: ActorId,
	},
	Drag {
		actor: ActorId,
		surface: SurfaceId,
	},
	CreativeEdit {
		actor: ActorId,
		surface: SurfaceId,
	},
}

impl HostEvent {
	pub fn actor(&self) -> ActorId {
		match self {
			Self::Click { actor, .. }
			| Self::Close { actor, .. }
			| Self::Disconnect { actor }
			| Self::Drag { actor, .. }
			| Self::CreativeEdit { actor, .. } => *actor,
		}
	}
}
