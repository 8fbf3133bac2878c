//! Command entry points a host wires to its command system.

use tessera_primitives::ActorId;
use tracing::info;

use crate::compiler::LoadReport;
use crate::error::OpenError;
use crate::host::Host;
use crate::instance::InstanceRef;
use crate::session::SessionManager;

pub const RELOAD_PERMISSION: &str = "tessera.reload";

/// Who issued a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
	Console,
	Actor(ActorId),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
	#[error("only actors can run this command")]
	ActorOnly,
	#[error("missing permission `{0}`")]
	Denied(String),
	#[error(transparent)]
	Open(#[from] OpenError),
}

/// Checks `permission` for actors (the console may do anything), replying on denial.
pub fn require(sessions: &SessionManager, host: &mut dyn Host, sender: Sender, permission: &str) -> Result<(), CommandError> {
	match sender {
		Sender::Console => Ok(()),
		Sender::Actor(actor) if host.has_permission(actor, permission) => Ok(()),
		Sender::Actor(actor) => {
			host.send(actor, &sessions.settings().messages.no_permission());
			Err(CommandError::Denied(permission.to_string()))
		}
	}
}

/// Resolves the sender to an actor, replying to the console otherwise.
pub fn actor_only(sender: Sender) -> Result<ActorId, CommandError> {
	match sender {
		Sender::Actor(actor) => Ok(actor),
		Sender::Console => {
			info!("only actors can run this command");
			Err(CommandError::ActorOnly)
		}
	}
}

/// Opens the GUI registered as `name` for the sending actor.
pub fn open(sessions: &mut SessionManager, host: &mut dyn Host, sender: Sender, name: &str) -> Result<InstanceRef, CommandError> {
	let actor = actor_only(sender)?;
	Ok(sessions.open_gui(host, actor, name, None, None)?)
}

/// Reloads every GUI. Actors need [`RELOAD_PERMISSION`].
pub fn reload(sessions: &mut SessionManager, host: &mut dyn Host, sender: Sender) -> Result<LoadReport, CommandError> {
	require(sessions, host, sender, RELOAD_PERMISSION)?;
	let report = sessions.reload(host);
	let reply = sessions.settings().messages.reload_done();
	match sender {
		Sender::Actor(actor) => host.send(actor, &reply),
		Sender::Console => info!(templates = report.templates.len(), "{reply}"),
	}
	Ok(report)
}
