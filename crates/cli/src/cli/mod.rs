//! CLI schema for the tessera binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(about = "Declarative slot-grid GUIs: validate, render and replay")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Settings file; `guis/` and `data/` are resolved next to it
	#[arg(short, long, value_name = "PATH", default_value = "tessera.toml")]
	pub config: PathBuf,

	/// Debug logging (overridden by TESSERA_LOG)
	#[arg(short, long)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
	/// Load every resource and report templates, warnings and errors
	Check,
	/// Open a GUI for a synthetic viewer and print its slot grid
	Render {
		/// Template name (file stem)
		gui: String,
		/// Page to show, starting at 0
		#[arg(short, long, default_value_t = 0)]
		page: usize,
	},
	/// Replay an interaction script
	Replay {
		/// Script with one step per line
		script: PathBuf,
	},
}
