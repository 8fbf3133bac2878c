use pretty_assertions::assert_eq;
use tessera_gui::{ClickKind, CloseReason, Disposition, Host, HostEvent, dispatch};
use tessera_primitives::SurfaceId;

use crate::common::Harness;

const GRID: &str = r#"
[gui]
title = "Grid"
size = 9
per_player = true
[gui.elements.cmd]
slot = 0
action = "EXECUTE_COMMAND say {player} clicked"
"#;

#[test]
fn events_without_session_pass() {
	let mut h = Harness::new(&[("grid", GRID)]);
	let alex = h.actor("alex");
	let surface = SurfaceId(42);

	let events = [
		HostEvent::Click {
			actor: alex,
			surface,
			slot: 0,
			kind: ClickKind::Left,
		},
		HostEvent::Drag { actor: alex, surface },
		HostEvent::Close {
			actor: alex,
			surface,
			reason: CloseReason::Actor,
		},
	];
	for event in events {
		assert_eq!(dispatch(&mut h.sessions, &mut h.host, event), Disposition::Pass);
	}
	assert!(h.host.commands().is_empty());
}

#[test]
fn drags_and_creative_edits_are_cancelled() {
	let mut h = Harness::new(&[("grid", GRID)]);
	let alex = h.actor("alex");
	h.open(alex, "grid");
	let surface = h.host.current_surface(alex).unwrap();

	let drag = HostEvent::Drag { actor: alex, surface };
	let edit = HostEvent::CreativeEdit { actor: alex, surface };
	assert_eq!(dispatch(&mut h.sessions, &mut h.host, drag), Disposition::Cancelled);
	assert_eq!(dispatch(&mut h.sessions, &mut h.host, edit), Disposition::Cancelled);
	assert_eq!(h.current(alex).as_deref(), Some("grid"));
}

#[test]
fn every_click_kind_reaches_the_element() {
	let mut h = Harness::new(&[("grid", GRID)]);
	let alex = h.actor("alex");
	h.open(alex, "grid");
	for kind in [ClickKind::Left, ClickKind::Right, ClickKind::ShiftLeft, ClickKind::Middle] {
		assert_eq!(h.click_kind(alex, 0, kind), Disposition::Cancelled);
	}
	assert_eq!(h.host.commands().len(), 4);
	assert!(h.host.commands().iter().all(|c| c == "say alex clicked"));
}

#[test]
fn stale_click_closes_the_view() {
	let mut h = Harness::new(&[("grid", GRID)]);
	let alex = h.actor("alex");
	h.open(alex, "grid");

	let stale = HostEvent::Click {
		actor: alex,
		surface: SurfaceId(9_999),
		slot: 0,
		kind: ClickKind::Left,
	};
	assert_eq!(dispatch(&mut h.sessions, &mut h.host, stale), Disposition::Cancelled);
	h.pump();
	assert_eq!(h.current(alex), None);
	assert_eq!(h.host.current_surface(alex), None);
	assert!(h.host.commands().is_empty());
}

#[test]
fn disconnect_retires_the_session() {
	let mut h = Harness::new(&[("grid", GRID)]);
	let (alex, sam) = (h.actor("alex"), h.actor("sam"));
	h.open(alex, "grid");
	h.open(sam, "grid");
	assert_eq!(h.host.live_surfaces(), 2);

	let event = h.host.disconnect(alex);
	assert_eq!(dispatch(&mut h.sessions, &mut h.host, event), Disposition::Pass);
	assert_eq!(h.current(alex), None);
	assert_eq!(h.current(sam).as_deref(), Some("grid"));
	assert_eq!(h.host.live_surfaces(), 1);
	assert_eq!(h.host.online_actors().len(), 1);
}

#[test]
fn close_while_switching_guis_keeps_new_session() {
	let mut h = Harness::new(&[("grid", GRID), ("other", "[gui]\nsize = 9\n[gui.elements.a]\nslot = 0\n")]);
	let alex = h.actor("alex");
	h.open(alex, "grid");
	let old_surface = h.host.current_surface(alex).unwrap();
	h.open(alex, "other");

	// A late actor close for the old surface is foreign to the new session.
	let late = HostEvent::Close {
		actor: alex,
		surface: old_surface,
		reason: CloseReason::Actor,
	};
	dispatch(&mut h.sessions, &mut h.host, late);
	assert_eq!(h.current(alex).as_deref(), Some("other"));
}
