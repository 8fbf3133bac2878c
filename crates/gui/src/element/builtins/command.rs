use std::any::Any;
use std::rc::Rc;

use super::EXECUTE_COMMAND;
use crate::element::{ClickContext, ClickEffects, Element, ElementBase, ElementInput};
use crate::error::ElementError;

/// Runs its argument tokens as a console command, `{player}` replaced by the clicker's name.
#[derive(Debug, Clone)]
pub struct ExecuteCommand {
	base: ElementBase,
	command: String,
}

impl ExecuteCommand {
	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self {
			base: ElementBase::from_input(input),
			command: input.args.join(" "),
		}))
	}

	pub fn command(&self) -> &str {
		&self.command
	}
}

impl Element for ExecuteCommand {
	fn kind(&self) -> &str {
		EXECUTE_COMMAND
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, cx: &mut ClickContext<'_>) -> ClickEffects {
		if self.command.trim().is_empty() {
			return ClickEffects::ok();
		}
		let name = cx.host.actor_name(cx.actor).unwrap_or_default();
		ClickEffects::command(self.command.replace("{player}", &name))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
