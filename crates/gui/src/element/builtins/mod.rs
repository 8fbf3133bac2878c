//! Generic element kinds every session manager registers before any domain kinds.

mod command;
mod display;
mod navigation;

pub use command::ExecuteCommand;
pub use display::{Filler, Label, Replaceable};
pub use navigation::{Back, MovePage, OpenGui};

use crate::registry::ElementKind;

pub const LABEL: &str = "LABEL";
pub const FILLER: &str = "FILLER";
pub const REPLACEABLE: &str = "REPLACEABLE";
pub const BACK: &str = "BACK";
pub const MOVE_PAGE: &str = "MOVE_PAGE";
pub const OPEN_GUI: &str = "OPEN_GUI";
pub const EXECUTE_COMMAND: &str = "EXECUTE_COMMAND";

/// The built-in registration table.
pub fn builtin_kinds() -> Vec<ElementKind> {
	vec![
		ElementKind::new(LABEL, Label::build),
		ElementKind::new(FILLER, Filler::build),
		ElementKind::new(REPLACEABLE, Replaceable::build),
		ElementKind::new(BACK, Back::build),
		ElementKind::new(MOVE_PAGE, MovePage::build),
		ElementKind::new(OPEN_GUI, OpenGui::build),
		ElementKind::new(EXECUTE_COMMAND, ExecuteCommand::build),
	]
}
