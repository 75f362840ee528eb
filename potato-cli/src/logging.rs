//! Logger setup.

use log::LevelFilter;

/// How chatty the run should be, decided once from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogConfig {
	pub level: LevelFilter,
}

impl LogConfig {
	/// Maps `-q` / `-v` / `-vv` to a level. Warnings are shown by default.
	pub fn from_flags(verbose: u8, quiet: bool) -> Self {
		let level = match (quiet, verbose) {
			(true, _) => LevelFilter::Error,
			(false, 0) => LevelFilter::Warn,
			(false, 1) => LevelFilter::Debug,
			(false, _) => LevelFilter::Trace,
		};
		Self { level }
	}

	/// Installs the logger on stderr. `RUST_LOG` overrides the level.
	///
	/// Called once, at the start of `main`.
	pub fn init(self) {
		env_logger::Builder::new()
			.filter_level(self.level)
			.parse_default_env()
			.target(env_logger::Target::Stderr)
			.init();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_map_to_levels() {
		assert_eq!(LogConfig::from_flags(0, false).level, LevelFilter::Warn);
		assert_eq!(LogConfig::from_flags(1, false).level, LevelFilter::Debug);
		assert_eq!(LogConfig::from_flags(3, false).level, LevelFilter::Trace);
		assert_eq!(LogConfig::from_flags(0, true).level, LevelFilter::Error);
	}
}
