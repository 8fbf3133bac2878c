//! Runtime slot occupants.
//!
//! Every element kind implements [`Element`]. Shared behaviour (the resolved
//! item, permission gate, argument tokens and attribute map) lives in
//! [`ElementBase`], which kinds embed and expose through [`Element::base`].
//! Elements are built once per declarative entry and shared by reference
//! between every instance of a template.

use std::any::Any;
use std::collections::BTreeSet;

use tessera_primitives::{ActorId, Args, ItemView, Placeholders};

use crate::host::{ClickKind, Host};
use crate::instance::{Instance, InstanceRef};

pub mod builtins;
pub mod effects;

pub use effects::{ClickEffects, Effect, GuiTarget};

/// A declarative element entry after parsing, before an [`Element`] is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSpec {
	/// Key of the entry inside the resource's `elements` table.
	pub key: String,
	/// Upper-cased action identifier; empty when the entry has no action.
	pub action: String,
	/// Whitespace-separated tokens following the identifier.
	pub args: Vec<String>,
	/// Resolved representation; `None` renders nothing but stays addressable.
	pub item: Option<ItemView>,
	/// Every key of the entry, passed through verbatim.
	pub attributes: Args,
	pub permission: String,
	pub permission_message: String,
	/// Concrete page, or `None` for the default page.
	pub page: Option<usize>,
	pub slots: BTreeSet<usize>,
}

impl ElementSpec {
	pub fn input(&self) -> ElementInput<'_> {
		ElementInput {
			kind: &self.action,
			item: self.item.as_ref(),
			args: &self.args,
			attributes: &self.attributes,
			permission: &self.permission,
			permission_message: &self.permission_message,
		}
	}
}

/// What a factory gets to build an element from.
#[derive(Debug, Clone, Copy)]
pub struct ElementInput<'a> {
	pub kind: &'a str,
	pub item: Option<&'a ItemView>,
	pub args: &'a [String],
	pub attributes: &'a Args,
	pub permission: &'a str,
	pub permission_message: &'a str,
}

/// Fields and default behaviour common to every element kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementBase {
	item: Option<ItemView>,
	args: Vec<String>,
	attributes: Args,
	permission: String,
	permission_message: String,
}

impl ElementBase {
	/// An unrestricted element showing `item`.
	pub fn new(item: Option<ItemView>) -> Self {
		Self {
			item,
			..Default::default()
		}
	}

	pub fn from_input(input: &ElementInput<'_>) -> Self {
		Self {
			item: input.item.cloned(),
			args: input.args.to_vec(),
			attributes: input.attributes.clone(),
			permission: input.permission.to_string(),
			permission_message: input.permission_message.to_string(),
		}
	}

	pub fn with_permission(mut self, permission: impl Into<String>, message: impl Into<String>) -> Self {
		self.permission = permission.into();
		self.permission_message = message.into();
		self
	}

	/// Replaces the stored item, e.g. after resolving construction-time placeholders.
	pub fn set_item(&mut self, item: Option<ItemView>) {
		self.item = item;
	}

	pub fn item(&self) -> Option<&ItemView> {
		self.item.as_ref()
	}

	pub fn args(&self) -> &[String] {
		&self.args
	}

	pub fn arg(&self, index: usize) -> Option<&str> {
		self.args.get(index).map(String::as_str)
	}

	pub fn attributes(&self) -> &Args {
		&self.attributes
	}

	pub fn permission(&self) -> &str {
		&self.permission
	}

	/// Clones the item with `placeholders` applied to its name and lore.
	pub fn render(&self, placeholders: &Placeholders) -> Option<ItemView> {
		let item = self.item.as_ref()?;
		Some(if placeholders.is_empty() {
			item.clone()
		} else {
			item.replaced(placeholders)
		})
	}

	/// Permission gate. Sends the configured message on denial.
	pub fn authorize(&self, actor: ActorId, host: &mut dyn Host) -> bool {
		if self.permission.trim().is_empty() || host.has_permission(actor, &self.permission) {
			return true;
		}
		if !self.permission_message.trim().is_empty() {
			host.send(actor, &self.permission_message);
		}
		false
	}
}

/// Everything an element may touch while reacting to a click.
pub struct ClickContext<'a> {
	/// The clicked instance, mutably borrowed for the duration of the click.
	pub instance: &'a mut Instance,
	/// Handle to the same instance, for use as a back-reference in effects.
	pub current: &'a InstanceRef,
	pub host: &'a mut dyn Host,
	pub actor: ActorId,
	pub kind: ClickKind,
	pub page: usize,
	pub slot: usize,
	/// Transient per-click arguments supplied by the dispatcher or the instance's behaviour.
	pub args: &'a Args,
}

impl ClickContext<'_> {
	/// The clicked instance as an open/back target.
	pub fn current(&self) -> GuiTarget {
		GuiTarget::Instance(self.current.clone())
	}
}

/// A slot occupant: render, authorize, react.
pub trait Element: Any {
	/// Upper-cased identifier of the kind that built this element.
	fn kind(&self) -> &str;

	fn base(&self) -> &ElementBase;

	/// Renderable representation, `None` when invisible.
	fn render(&self, placeholders: &Placeholders) -> Option<ItemView> {
		self.base().render(placeholders)
	}

	/// Whether `actor` may activate this element.
	fn can_click(&self, actor: ActorId, host: &mut dyn Host) -> bool {
		self.base().authorize(actor, host)
	}

	fn on_click(&self, _cx: &mut ClickContext<'_>) -> ClickEffects {
		ClickEffects::ok()
	}

	fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Element").field("kind", &self.kind()).field("item", &self.base().item()).finish()
	}
}
