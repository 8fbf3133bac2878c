//! Interaction scripts for `tessera replay`.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! grant alex tessera.reload
//! open alex hub
//! click alex 13 right
//! show alex
//! close alex
//! reload
//! quit alex
//! ```
//!
//! Shop steps `give <actor> <material> <amount>`, `shop <actor>` and
//! `sellall <actor>` drive the bundled shop domain. Actors connect on first
//! mention. Queued host events are dispatched after every step, and every
//! message an actor received is printed as `[name] text`.

use std::io::Write;

use tessera_gui::commands::{self, Sender};
use tessera_gui::{ClickKind, Host, dispatch};
use tessera_primitives::strip_colors;
use tessera_shop::Inventories;
use tracing::debug;

use crate::app::{Workspace, write_view};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
	Open { actor: String, gui: String },
	Click { actor: String, slot: usize, kind: ClickKind },
	Close { actor: String },
	Quit { actor: String },
	Reload,
	Show { actor: String },
	Grant { actor: String, permission: String },
	Give { actor: String, material: String, amount: u32 },
	Shop { actor: String },
	SellAll { actor: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
	#[error("line {line}: unknown step `{word}`")]
	UnknownStep { line: usize, word: String },
	#[error("line {line}: usage: {usage}")]
	Usage { line: usize, usage: &'static str },
	#[error("line {line}: invalid {what} `{value}`")]
	Invalid { line: usize, what: &'static str, value: String },
}

/// Parses a whole script into numbered steps. Fails on the first bad line.
pub fn parse(source: &str) -> Result<Vec<(usize, Step)>, ScriptError> {
	let mut steps = Vec::new();
	for (index, raw) in source.lines().enumerate() {
		let line = index + 1;
		let text = raw.split('#').next().unwrap_or_default().trim();
		if text.is_empty() {
			continue;
		}
		steps.push((line, parse_step(line, text)?));
	}
	Ok(steps)
}

fn parse_step(line: usize, text: &str) -> Result<Step, ScriptError> {
	let words: Vec<&str> = text.split_whitespace().collect();
	let usage = |usage| ScriptError::Usage { line, usage };
	let step = match words.as_slice() {
		["open", actor, gui] => Step::Open {
			actor: actor.to_string(),
			gui: gui.to_string(),
		},
		["open", ..] => return Err(usage("open <actor> <gui>")),
		["click", actor, slot, rest @ ..] if rest.len() <= 1 => Step::Click {
			actor: actor.to_string(),
			slot: number(line, "slot", slot)?,
			kind: match rest.first() {
				Some(kind) => click_kind(kind).ok_or_else(|| ScriptError::Invalid {
					line,
					what: "click kind",
					value: kind.to_string(),
				})?,
				None => ClickKind::Left,
			},
		},
		["click", ..] => return Err(usage("click <actor> <slot> [left|right|shift-left|shift-right|middle]")),
		["close", actor] => Step::Close { actor: actor.to_string() },
		["close", ..] => return Err(usage("close <actor>")),
		["quit", actor] => Step::Quit { actor: actor.to_string() },
		["quit", ..] => return Err(usage("quit <actor>")),
		["reload"] => Step::Reload,
		["reload", ..] => return Err(usage("reload")),
		["show", actor] => Step::Show { actor: actor.to_string() },
		["show", ..] => return Err(usage("show <actor>")),
		["grant", actor, permission] => Step::Grant {
			actor: actor.to_string(),
			permission: permission.to_string(),
		},
		["grant", ..] => return Err(usage("grant <actor> <permission>")),
		["give", actor, material, amount] => Step::Give {
			actor: actor.to_string(),
			material: material.to_ascii_uppercase(),
			amount: number(line, "amount", amount)?,
		},
		["give", ..] => return Err(usage("give <actor> <material> <amount>")),
		["shop", actor] => Step::Shop { actor: actor.to_string() },
		["shop", ..] => return Err(usage("shop <actor>")),
		["sellall", actor] => Step::SellAll { actor: actor.to_string() },
		["sellall", ..] => return Err(usage("sellall <actor>")),
		_ => {
			return Err(ScriptError::UnknownStep {
				line,
				word: words.first().copied().unwrap_or_default().to_string(),
			});
		}
	};
	Ok(step)
}

fn number<T: std::str::FromStr>(line: usize, what: &'static str, value: &str) -> Result<T, ScriptError> {
	value.parse().map_err(|_| ScriptError::Invalid {
		line,
		what,
		value: value.to_string(),
	})
}

fn click_kind(word: &str) -> Option<ClickKind> {
	match word.to_ascii_lowercase().replace('_', "-").as_str() {
		"left" => Some(ClickKind::Left),
		"right" => Some(ClickKind::Right),
		"shift-left" => Some(ClickKind::ShiftLeft),
		"shift-right" => Some(ClickKind::ShiftRight),
		"middle" => Some(ClickKind::Middle),
		"other" => Some(ClickKind::Other),
		_ => None,
	}
}

/// Parses and runs `source`. Step failures are printed with a `!` prefix and do not stop the replay.
pub fn replay(workspace: &mut Workspace, source: &str, out: &mut dyn Write) -> anyhow::Result<()> {
	let steps = parse(source)?;
	let mut commands_seen = workspace.host.commands().len();
	for (line, step) in steps {
		debug!(line, step = ?step, "replay");
		run(workspace, &step, out)?;
		workspace.pump();

		for actor in workspace.host.online_actors() {
			let name = workspace.host.actor_name(actor).unwrap_or_else(|| actor.to_string());
			for message in workspace.host.take_messages(actor) {
				writeln!(out, "[{name}] {}", strip_colors(&message))?;
			}
		}
		for command in &workspace.host.commands()[commands_seen..] {
			writeln!(out, "> {command}")?;
		}
		commands_seen = workspace.host.commands().len();
	}
	Ok(())
}

fn run(workspace: &mut Workspace, step: &Step, out: &mut dyn Write) -> anyhow::Result<()> {
	match step {
		Step::Open { actor, gui } => {
			let actor = workspace.actor(actor);
			if let Err(e) = commands::open(&mut workspace.sessions, &mut workspace.host, Sender::Actor(actor), gui) {
				writeln!(out, "! {e}")?;
			}
		}
		Step::Click { actor, slot, kind } => {
			let id = workspace.actor(actor);
			match workspace.host.click(id, *slot, *kind) {
				Some(event) => {
					dispatch(&mut workspace.sessions, &mut workspace.host, event);
				}
				None => writeln!(out, "! {actor} has no view")?,
			}
		}
		Step::Close { actor } => {
			let id = workspace.actor(actor);
			match workspace.host.close_by_actor(id) {
				Some(event) => {
					dispatch(&mut workspace.sessions, &mut workspace.host, event);
				}
				None => writeln!(out, "! {actor} has no view")?,
			}
		}
		Step::Quit { actor } => {
			let id = workspace.actor(actor);
			let event = workspace.host.disconnect(id);
			dispatch(&mut workspace.sessions, &mut workspace.host, event);
		}
		Step::Reload => match commands::reload(&mut workspace.sessions, &mut workspace.host, Sender::Console) {
			Ok(report) => {
				writeln!(out, "reloaded {} template(s), {} error(s)", report.templates.len(), report.errors.len())?;
				workspace.replace_report(report);
			}
			Err(e) => writeln!(out, "! {e}")?,
		},
		Step::Show { actor } => {
			let id = workspace.actor(actor);
			write_view(out, &workspace.host, id)?;
		}
		Step::Grant { actor, permission } => {
			let id = workspace.actor(actor);
			workspace.host.grant(id, permission.as_str());
		}
		Step::Give { actor, material, amount } => {
			let id = workspace.actor(actor);
			let overflow = workspace.inventories.give(id, material, *amount);
			if overflow > 0 {
				writeln!(out, "! {actor}'s inventory is full, {overflow} {material} dropped")?;
			}
		}
		Step::Shop { actor } => {
			let id = workspace.actor(actor);
			if let Err(e) = tessera_shop::commands::open_shop(&mut workspace.sessions, &mut workspace.host, Sender::Actor(id), &workspace.shop) {
				writeln!(out, "! {e}")?;
			}
		}
		Step::SellAll { actor } => {
			let id = workspace.actor(actor);
			if let Err(e) = tessera_shop::commands::sell_all(&mut workspace.sessions, &mut workspace.host, Sender::Actor(id), &workspace.shop) {
				writeln!(out, "! {e}")?;
			}
		}
	}
	Ok(())
}
