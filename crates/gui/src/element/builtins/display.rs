use std::any::Any;
use std::rc::Rc;

use tessera_primitives::{ItemView, Placeholders};

use super::{FILLER, LABEL, REPLACEABLE};
use crate::element::{Element, ElementBase, ElementInput};
use crate::error::ElementError;

/// Inert element; also the fallback for unknown action identifiers.
#[derive(Debug, Clone)]
pub struct Label {
	base: ElementBase,
}

impl Label {
	pub fn new(base: ElementBase) -> Self {
		Self { base }
	}

	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self::new(ElementBase::from_input(input))))
	}
}

impl Element for Label {
	fn kind(&self) -> &str {
		LABEL
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Background element with its tooltip hidden. Placeholders never apply.
#[derive(Debug, Clone)]
pub struct Filler {
	base: ElementBase,
}

impl Filler {
	pub fn new(item: Option<ItemView>) -> Self {
		let item = item.map(|mut item| {
			item.hide_tooltip = true;
			item
		});
		Self {
			base: ElementBase::new(item),
		}
	}

	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self::new(input.item.cloned())))
	}
}

impl Element for Filler {
	fn kind(&self) -> &str {
		FILLER
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn render(&self, _placeholders: &Placeholders) -> Option<ItemView> {
		self.base.item().cloned()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Inert, placeholder-aware display element.
#[derive(Debug, Clone)]
pub struct Replaceable {
	base: ElementBase,
}

impl Replaceable {
	pub fn new(base: ElementBase) -> Self {
		Self { base }
	}

	/// A replaceable showing `item` renamed and with new lore.
	pub fn simple(item: &ItemView, name: impl Into<String>, lore: Vec<String>) -> Self {
		Self::new(ElementBase::new(Some(item.clone().named(name).with_lore(lore))))
	}

	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self::new(ElementBase::from_input(input))))
	}

	pub fn lore(&self) -> &[String] {
		self.base.item().map(|i| i.lore.as_slice()).unwrap_or_default()
	}
}

impl Element for Replaceable {
	fn kind(&self) -> &str {
		REPLACEABLE
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
