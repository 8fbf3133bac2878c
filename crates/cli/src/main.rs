//! `tessera`: load, render and exercise GUI resources against an in-memory host.

mod app;
mod cli;
mod script;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, warn};

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let mut workspace = app::Workspace::open(&cli.config)?;
	let mut out = std::io::stdout().lock();

	let ok = match &cli.command {
		Command::Check => workspace.check(&mut out)?,
		Command::Render { gui, page } => {
			workspace.render(&mut out, gui, *page)?;
			true
		}
		Command::Replay { script } => {
			let source = std::fs::read_to_string(script).with_context(|| format!("failed to read {}", script.display()))?;
			script::replay(&mut workspace, &source, &mut out)?;
			true
		}
	};
	out.flush()?;

	for (domain, error) in workspace.save() {
		warn!(domain = %domain, error = %error, "data not saved");
	}
	info!("done");
	Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("TESSERA_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("tessera_gui=debug,tessera_shop=debug,tessera=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}
