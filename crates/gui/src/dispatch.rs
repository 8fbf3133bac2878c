//! Routes raw host events to sessions and elements.

use tessera_primitives::Args;
use tracing::trace;

use crate::host::{Host, HostEvent};
use crate::instance::{ClickOutcome, CloseOutcome};
use crate::session::SessionManager;

/// What the host should do with the event's default effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
	/// Not ours; let the host handle it.
	Pass,
	/// Suppress the host's default handling.
	Cancelled,
}

/// Handles one host event to completion.
///
/// Events of actors without a session pass through untouched. Drags and
/// creative edits against a managed view are always cancelled so slot
/// semantics cannot be bypassed.
pub fn dispatch(sessions: &mut SessionManager, host: &mut dyn Host, event: HostEvent) -> Disposition {
	trace!(event = ?event, "dispatch");
	if let HostEvent::Disconnect { actor } = event {
		sessions.close_session(host, actor);
		return Disposition::Pass;
	}

	let Some(instance) = sessions.session(event.actor()) else {
		return Disposition::Pass;
	};

	match event {
		HostEvent::Click {
			actor,
			surface,
			slot,
			kind,
		} => {
			let outcome = instance.borrow_mut().handle_click(&instance, host, actor, surface, slot, kind, Args::new());
			match outcome {
				ClickOutcome::Stale => {
					sessions.close_session(host, actor);
					host.close_view(actor);
				}
				ClickOutcome::Handled(effects) => sessions.apply_effects(host, actor, effects),
				ClickOutcome::Empty | ClickOutcome::Denied => {}
			}
			Disposition::Cancelled
		}
		HostEvent::Close { actor, surface, reason } => {
			let outcome = instance.borrow().handle_close(surface, reason);
			if outcome == CloseOutcome::Retire {
				sessions.close_session(host, actor);
			}
			Disposition::Pass
		}
		HostEvent::Drag { .. } | HostEvent::CreativeEdit { .. } => Disposition::Cancelled,
		HostEvent::Disconnect { .. } => Disposition::Pass,
	}
}
