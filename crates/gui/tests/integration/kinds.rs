use std::any::Any;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tessera_gui::{ClickContext, ClickEffects, ClickKind, Host, Effect, Element, ElementBase, ElementKind};
use tessera_primitives::Placeholders;

use crate::common::Harness;

const TALLY: &str = "TALLY";

/// Counts clicks on its instance and shows the count to every viewer.
struct Tally {
	base: ElementBase,
}

impl Element for Tally {
	fn kind(&self) -> &str {
		TALLY
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, cx: &mut ClickContext<'_>) -> ClickEffects {
		if cx.kind == ClickKind::Right {
			return ClickEffects::close();
		}
		let clicks = cx.instance.args().int_or("clicks", 0) + 1;
		cx.instance.args_mut().insert("clicks", clicks);
		cx.instance.set_placeholders(Placeholders::new().with("{clicks}", clicks.to_string()));
		ClickEffects::message(format!("Tally is now {clicks}")).with(Effect::RefreshKinds(vec![TALLY.to_string()]))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

fn tally_kind() -> ElementKind {
	ElementKind::new(TALLY, |input| {
		Ok(Rc::new(Tally {
			base: ElementBase::from_input(input),
		}) as Rc<dyn Element>)
	})
}

const BOARD: &str = r#"
[gui]
title = "Board"
size = 9
special_type = "tally"
[gui.elements.counter]
slot = 4
material = "PAPER"
name = "Clicks: {clicks}"
action = "TALLY"
"#;

fn harness() -> Harness {
	Harness::with_kinds(&[("board", BOARD)], vec![tally_kind()])
}

fn name_at(h: &Harness, actor: tessera_primitives::ActorId, slot: usize) -> Option<String> {
	h.host.slot_of_view(actor, slot).and_then(|item| item.name.clone())
}

#[test]
fn builder_kind_is_used_by_resources() {
	let h = harness();
	let template = h.sessions.template("board").unwrap();
	assert_eq!(template.element_at(0, 4).unwrap().kind(), TALLY);
}

#[test]
fn click_on_shared_instance_reaches_every_viewer() {
	let mut h = harness();
	let (alex, sam) = (h.actor("alex"), h.actor("sam"));
	h.open(alex, "board");
	h.open(sam, "board");

	h.click(alex, 4);
	h.click(alex, 4);

	assert_eq!(name_at(&h, sam, 4).as_deref(), Some("Clicks: 2"));
	assert_eq!(name_at(&h, alex, 4).as_deref(), Some("Clicks: 2"));
	assert_eq!(h.host.messages(alex), ["Tally is now 1", "Tally is now 2"]);
	assert!(h.host.messages(sam).is_empty());
}

#[test]
fn close_effect_ends_only_the_clicking_session() {
	let mut h = harness();
	let (alex, sam) = (h.actor("alex"), h.actor("sam"));
	h.open(alex, "board");
	h.open(sam, "board");

	h.click_kind(alex, 4, ClickKind::Right);

	assert!(h.sessions.session(alex).is_none());
	assert_eq!(h.host.current_surface(alex), None);
	assert_eq!(h.current(sam).as_deref(), Some("board"));
}
