//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default knowledge file, relative to the working directory.
pub const DEFAULT_KNOWLEDGE: &str = "potato.kb";

#[derive(Parser, Debug)]
#[command(name = "potato")]
#[command(version)]
#[command(about = "Log tagging through Artificial Ignorance", long_about = None)]
pub struct Cli {
	/// Print debug output (repeat for token-level traces)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Only print errors
	#[arg(short, long, global = true, conflicts_with = "verbose")]
	pub quiet: bool,

	/// File used to store knowledge
	#[arg(
		short,
		long,
		value_name = "FILE",
		env = "POTATO_KNOWLEDGE",
		default_value = DEFAULT_KNOWLEDGE,
		global = true
	)]
	pub knowledge: PathBuf,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Create a blank knowledge file
	Init {
		/// Regular expression to extract data from the input file
		pattern: String,

		/// Markov chain order
		#[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
		order: u32,
	},

	/// Learn from a training file and save the updated knowledge
	Learn(RunArgs),

	/// Tag every line of a file with its severity
	Tag(RunArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
	/// Input file
	pub input: PathBuf,

	/// Start from the empty state instead of the stored cursor
	#[arg(long)]
	pub reset_cursor: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn definition_is_consistent() {
		Cli::command().debug_assert();
	}

	#[test]
	fn init_defaults_to_order_one() {
		let cli = Cli::try_parse_from(["potato", "init", r"(\w+)"]).unwrap();
		match cli.command {
			Command::Init { pattern, order } => {
				assert_eq!(pattern, r"(\w+)");
				assert_eq!(order, 1);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn order_zero_is_refused() {
		assert!(Cli::try_parse_from(["potato", "init", r"(\w+)", "--order", "0"]).is_err());
	}

	#[test]
	fn global_flags_work_after_the_subcommand() {
		let cli = Cli::try_parse_from(["potato", "tag", "app.log", "-k", "app.kb", "-vv", "--reset-cursor"]).unwrap();
		assert_eq!(cli.knowledge, PathBuf::from("app.kb"));
		assert_eq!(cli.verbose, 2);
		match cli.command {
			Command::Tag(run) => {
				assert_eq!(run.input, PathBuf::from("app.log"));
				assert!(run.reset_cursor);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}
}
