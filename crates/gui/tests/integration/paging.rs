use std::any::Any;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tessera_gui::element::builtins::Label;
use tessera_gui::{
	BasicDomain, Behavior, BehaviorSeed, Element, ElementBase, GuiDomain, Layout, MemoryHost, SessionManager, Settings, Sharing, Template,
};
use tessera_primitives::{ActorId, Args, ItemView};

use crate::common::{Harness, write_gui};

/// Lists `count` numbered papers on a dynamic-overflow page.
struct Listing;

impl Behavior for Listing {
	fn overflow_items(&mut self, args: &Args) -> Vec<Rc<dyn Element>> {
		(0..args.int_or("count", 0))
			.map(|n| Rc::new(Label::new(ElementBase::new(Some(ItemView::new("PAPER").named(format!("#{n}")))))) as Rc<dyn Element>)
			.collect()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

struct ListingDomain(BasicDomain);

impl GuiDomain for ListingDomain {
	fn name(&self) -> &str {
		self.0.name()
	}

	fn specify_template(&self, template: &mut Template) {
		if template.is_kind("LISTING") {
			template.sharing = Sharing::PerViewer;
			template.layout = Layout::DynamicOverflow;
			template.behavior = Some(Rc::new(|_: &BehaviorSeed<'_>| Box::new(Listing) as Box<dyn Behavior>));
		}
	}
}

const LIST: &str = r#"
[gui]
title = "List"
size = 9
specialType = "listing"
[gui.elements.fill]
slots = "0,4-8"
action = "FILLER"
material = "GRAY_STAINED_GLASS_PANE"
[gui.elements.prev]
slot = 4
action = "MOVE_PAGE back"
[gui.elements.next]
slot = 8
action = "MOVE_PAGE forward"
"#;

fn listing() -> (tempfile::TempDir, SessionManager, MemoryHost, ActorId) {
	let dir = tempfile::tempdir().unwrap();
	write_gui(dir.path(), "list", LIST);
	let mut sessions = SessionManager::builder()
		.settings(Settings::rooted(dir.path()))
		.domain(Rc::new(ListingDomain(BasicDomain::new("core"))))
		.build();
	sessions.load();
	let mut host = MemoryHost::new();
	let alex = host.add_actor("alex");
	(dir, sessions, host, alex)
}

fn names_on_view(host: &MemoryHost, actor: ActorId) -> Vec<String> {
	(0..9).filter_map(|slot| host.slot_of_view(actor, slot)?.name.clone()).filter(|n| n.starts_with('#')).collect()
}

#[test]
fn overflow_items_fill_empty_slots_in_order() {
	let (_dir, mut sessions, mut host, alex) = listing();
	let instance = sessions
		.open_gui(&mut host, alex, "list", None, Some(Args::new().with("count", 7)))
		.unwrap();

	// Slots 1-3 are the only free ones: 7 items need 3 pages.
	assert_eq!(instance.borrow().page_count(), 3);
	assert_eq!(names_on_view(&host, alex), vec!["#0", "#1", "#2"]);
	assert_eq!(host.view(alex).unwrap().title, "List\u{a7}7 (1/3)");

	let pages: Vec<Vec<usize>> = instance.borrow().pages().iter().map(|p| p.keys().copied().collect()).collect();
	assert_eq!(pages[2], vec![0, 1, 4, 5, 6, 7, 8]);
}

#[test]
fn navigation_reaches_every_overflow_page() {
	let (_dir, mut sessions, mut host, alex) = listing();
	sessions.open_gui(&mut host, alex, "list", None, Some(Args::new().with("count", 7))).unwrap();

	let mut seen = Vec::new();
	for _ in 0..3 {
		seen.extend(names_on_view(&host, alex));
		let event = host.click(alex, 8, Default::default()).unwrap();
		tessera_gui::dispatch(&mut sessions, &mut host, event);
		for event in host.drain_events() {
			tessera_gui::dispatch(&mut sessions, &mut host, event);
		}
	}
	assert_eq!(seen, (0..7).map(|n| format!("#{n}")).collect::<Vec<_>>());
	assert_eq!(names_on_view(&host, alex), vec!["#0", "#1", "#2"]);
}

#[test]
fn no_overflow_items_leaves_skeleton_page() {
	let (_dir, mut sessions, mut host, alex) = listing();
	let instance = sessions.open_gui(&mut host, alex, "list", None, None).unwrap();
	assert_eq!(instance.borrow().page_count(), 1);
	assert!(names_on_view(&host, alex).is_empty());
	assert_eq!(host.view(alex).unwrap().title, "List");
}

#[test]
fn static_pages_title_and_navigate() {
	let mut h = Harness::new(&[(
		"book",
		r#"
[gui]
title = "Book"
size = 9
[gui.elements.next]
slot = 8
action = "MOVE_PAGE forward"
[gui.elements.one]
slot = 0
page = 0
material = "PAPER"
[gui.elements.two]
slot = 0
page = 1
material = "BOOK"
"#,
	)]);
	let alex = h.actor("alex");
	h.open(alex, "book");
	assert_eq!(h.material_at(alex, 0).as_deref(), Some("PAPER"));
	assert_eq!(h.host.view(alex).unwrap().title, "Book\u{a7}7 (1/2)");

	h.click(alex, 8);
	assert_eq!(h.current_page(alex), Some(1));
	assert_eq!(h.material_at(alex, 0).as_deref(), Some("BOOK"));
	assert_eq!(h.material_at(alex, 8).as_deref(), Some("STONE"));
}
