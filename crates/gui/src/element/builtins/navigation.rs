use std::any::Any;
use std::rc::Rc;

use super::{BACK, MOVE_PAGE, OPEN_GUI};
use crate::element::{ClickContext, ClickEffects, Element, ElementBase, ElementInput, GuiTarget};
use crate::error::ElementError;

/// Reopens the session's back-reference, or closes the session when there is none.
#[derive(Debug, Clone)]
pub struct Back {
	base: ElementBase,
}

impl Back {
	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self {
			base: ElementBase::from_input(input),
		}))
	}
}

impl Element for Back {
	fn kind(&self) -> &str {
		BACK
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, _cx: &mut ClickContext<'_>) -> ClickEffects {
		ClickEffects::back()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// `MOVE_PAGE forward|back`.
#[derive(Debug, Clone)]
pub struct MovePage {
	base: ElementBase,
	forward: bool,
}

impl MovePage {
	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self {
			base: ElementBase::from_input(input),
			forward: input.args.first().is_some_and(|a| a.eq_ignore_ascii_case("forward")),
		}))
	}

	pub fn is_forward(&self) -> bool {
		self.forward
	}
}

impl Element for MovePage {
	fn kind(&self) -> &str {
		MOVE_PAGE
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, cx: &mut ClickContext<'_>) -> ClickEffects {
		match cx.instance.move_page(cx.host, cx.actor, cx.page, self.forward) {
			Some(redirect) => ClickEffects::open(redirect, Some(cx.current()), None),
			None => ClickEffects::ok(),
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// `OPEN_GUI <name> [backName]`: the back-reference is the named template, else the clicked instance.
#[derive(Debug, Clone)]
pub struct OpenGui {
	base: ElementBase,
	gui: String,
	back: Option<String>,
}

impl OpenGui {
	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self {
			base: ElementBase::from_input(input),
			gui: input.args.first().cloned().unwrap_or_else(|| "NULL".to_string()),
			back: input.args.get(1).cloned(),
		}))
	}

	pub fn gui(&self) -> &str {
		&self.gui
	}
}

impl Element for OpenGui {
	fn kind(&self) -> &str {
		OPEN_GUI
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, cx: &mut ClickContext<'_>) -> ClickEffects {
		let back = match &self.back {
			Some(name) => GuiTarget::Named(name.clone()),
			None => cx.current(),
		};
		ClickEffects::open_named(self.gui.clone(), Some(back), None)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
