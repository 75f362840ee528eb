use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use log::info;

use potato_core::{ErrorKind, Knowledge, Result};

mod cli;
mod logging;

use cli::{Cli, Command, RunArgs};
use logging::LogConfig;

fn main() -> ExitCode {
	let cli = Cli::parse();
	LogConfig::from_flags(cli.verbose, cli.quiet).init();

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("error: {e}");
			ExitCode::from(exit_code(e.kind()))
		}
	}
}

fn exit_code(kind: ErrorKind) -> u8 {
	match kind {
		ErrorKind::Configuration => 2,
		ErrorKind::Input => 3,
		ErrorKind::Persistence => 4,
		ErrorKind::Output => 5,
	}
}

fn run(cli: Cli) -> Result<()> {
	match cli.command {
		Command::Init { pattern, order } => {
			let knowledge = Knowledge::new(&pattern, order as usize)?;
			info!("Init knowledge file: {}", cli.knowledge.display());
			knowledge.save(&cli.knowledge)
		}
		Command::Learn(RunArgs { input, reset_cursor }) => {
			let mut knowledge = Knowledge::load(&cli.knowledge)?;
			if reset_cursor {
				knowledge.chain_mut().reset_cursor();
			}
			knowledge.learn_from_file(&input)?;
			knowledge.save(&cli.knowledge)
		}
		Command::Tag(RunArgs { input, reset_cursor }) => {
			let mut knowledge = Knowledge::load(&cli.knowledge)?;
			if reset_cursor {
				knowledge.chain_mut().reset_cursor();
			}
			let stdout = io::stdout();
			let mut out = BufWriter::new(stdout.lock());
			knowledge.tag_file(&input, &mut out)?;
			Ok(())
		}
	}
}
