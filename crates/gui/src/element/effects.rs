//! Effect-based click results.
//!
//! An element reacting to a click may mutate its own instance directly, but
//! anything that touches the session table (opening another GUI, closing the
//! session, refreshing other instances) is returned as an [`Effect`] and
//! applied in order by [`crate::SessionManager::apply_effects`] once the
//! clicked instance is no longer borrowed.

use std::rc::Rc;

use tessera_primitives::Args;

use crate::instance::InstanceRef;
use crate::template::Template;

/// Something a GUI can be opened from.
#[derive(Clone)]
pub enum GuiTarget {
	/// A compiled template: shared templates resolve to their singleton,
	/// per-viewer templates mint a fresh instance.
	Template(Rc<Template>),
	/// A live instance, typically a back-reference.
	Instance(InstanceRef),
	/// A template name, resolved against the catalog when the effect is applied.
	Named(String),
}

impl GuiTarget {
	/// Name of the template behind this target.
	pub fn name(&self) -> String {
		match self {
			Self::Template(t) => t.name.clone(),
			Self::Instance(i) => i.borrow().template().name.clone(),
			Self::Named(name) => name.clone(),
		}
	}
}

impl std::fmt::Debug for GuiTarget {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Template(t) => f.debug_tuple("Template").field(&t.name).finish(),
			Self::Instance(i) => match i.try_borrow() {
				Ok(i) => f.debug_tuple("Instance").field(&i.template().name).finish(),
				Err(_) => f.write_str("Instance(<borrowed>)"),
			},
			Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
		}
	}
}

/// A primitive session-level operation requested by a click.
#[derive(Debug, Clone)]
pub enum Effect {
	/// Open `target` for the clicking actor.
	Open {
		target: GuiTarget,
		back: Option<GuiTarget>,
		args: Option<Args>,
	},
	/// Open the template registered under `name`, reporting "not found" to the actor.
	OpenNamed {
		name: String,
		back: Option<GuiTarget>,
		args: Option<Args>,
	},
	/// Reopen the back-reference of the actor's session with its own
	/// back-reference, or close the session when there is none.
	OpenBack,
	/// Close the actor's view and session.
	Close,
	/// Send a chat message to the clicking actor.
	Message(String),
	/// Run a console command.
	Command(String),
	/// Refresh every open instance whose template kind is listed.
	RefreshKinds(Vec<String>),
}

/// An ordered collection of effects to apply after a click.
#[derive(Debug, Clone, Default)]
pub struct ClickEffects {
	effects: Vec<Effect>,
}

impl ClickEffects {
	/// Creates an empty effect set.
	#[inline]
	pub fn ok() -> Self {
		Self::default()
	}

	#[inline]
	pub fn new() -> Self {
		Self::default()
	}

	#[inline]
	pub fn from_effect(effect: Effect) -> Self {
		Self { effects: vec![effect] }
	}

	/// Adds an effect, returning self for chaining.
	#[inline]
	pub fn with(mut self, effect: impl Into<Effect>) -> Self {
		self.effects.push(effect.into());
		self
	}

	#[inline]
	pub fn push(&mut self, effect: impl Into<Effect>) {
		self.effects.push(effect.into());
	}

	#[inline]
	pub fn as_slice(&self) -> &[Effect] {
		&self.effects
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.effects.is_empty()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.effects.len()
	}

	/// Opens `target` with an optional back-reference.
	#[inline]
	pub fn open(target: GuiTarget, back: Option<GuiTarget>, args: Option<Args>) -> Self {
		Self::from_effect(Effect::Open { target, back, args })
	}

	/// Opens a template by name.
	#[inline]
	pub fn open_named(name: impl Into<String>, back: Option<GuiTarget>, args: Option<Args>) -> Self {
		Self::from_effect(Effect::OpenNamed {
			name: name.into(),
			back,
			args,
		})
	}

	#[inline]
	pub fn back() -> Self {
		Self::from_effect(Effect::OpenBack)
	}

	#[inline]
	pub fn close() -> Self {
		Self::from_effect(Effect::Close)
	}

	#[inline]
	pub fn message(msg: impl Into<String>) -> Self {
		Self::from_effect(Effect::Message(msg.into()))
	}

	#[inline]
	pub fn command(cmd: impl Into<String>) -> Self {
		Self::from_effect(Effect::Command(cmd.into()))
	}
}

impl From<Effect> for ClickEffects {
	fn from(effect: Effect) -> Self {
		Self::from_effect(effect)
	}
}

impl IntoIterator for ClickEffects {
	type Item = Effect;
	type IntoIter = std::vec::IntoIter<Effect>;

	fn into_iter(self) -> Self::IntoIter {
		self.effects.into_iter()
	}
}
