//! Error type shared by every part of the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for potato operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad family an [`Error`] belongs to.
///
/// None of them is transient: every operation is local and deterministic,
/// so callers report the error and stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Invalid pattern or order, detected before any model exists.
	Configuration,
	/// Input source missing or unreadable.
	Input,
	/// Knowledge file unreadable, unwritable or inconsistent.
	Persistence,
	/// Tagged output could not be written.
	Output,
}

/// Errors raised while building, training, scoring or persisting a model.
#[derive(Debug, Error)]
pub enum Error {
	/// The extraction pattern does not compile.
	#[error("invalid pattern `{pattern}`: {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	/// The extraction pattern compiles but can never yield a token.
	#[error("pattern `{0}` has no capture group, no line could ever be tokenized")]
	NoCaptureGroup(String),

	/// The chain order must be at least 1.
	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// The input file could not be read.
	#[error("cannot read input `{}`: {source}", .path.display())]
	Input {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The knowledge file could not be read.
	#[error("cannot read knowledge file `{}`: {source}", .path.display())]
	KnowledgeRead {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The knowledge file could not be written.
	#[error("cannot write knowledge file `{}`: {source}", .path.display())]
	KnowledgeWrite {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The knowledge artifact was written by an unknown schema version.
	#[error("unsupported knowledge version {found} (this build reads version {expected})")]
	UnsupportedVersion { expected: u16, found: u16 },

	/// The knowledge artifact is damaged or structurally inconsistent.
	#[error("corrupt knowledge: {0}")]
	Corrupt(String),

	/// The model could not be encoded.
	#[error("cannot encode knowledge: {0}")]
	Encode(#[source] postcard::Error),

	/// Writing a tagged line failed.
	#[error("cannot write output: {0}")]
	Output(#[source] io::Error),
}

impl Error {
	/// Returns the family of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::InvalidPattern { .. } | Error::NoCaptureGroup(_) | Error::InvalidOrder(_) => {
				ErrorKind::Configuration
			}
			Error::Input { .. } => ErrorKind::Input,
			Error::KnowledgeRead { .. }
			| Error::KnowledgeWrite { .. }
			| Error::UnsupportedVersion { .. }
			| Error::Corrupt(_)
			| Error::Encode(_) => ErrorKind::Persistence,
			Error::Output(_) => ErrorKind::Output,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kinds_follow_the_error_families() {
		assert_eq!(Error::InvalidOrder(0).kind(), ErrorKind::Configuration);
		assert_eq!(Error::NoCaptureGroup("x".into()).kind(), ErrorKind::Configuration);
		let input = Error::Input { path: "missing.log".into(), source: io::ErrorKind::NotFound.into() };
		assert_eq!(input.kind(), ErrorKind::Input);
		assert_eq!(Error::Corrupt("bad".into()).kind(), ErrorKind::Persistence);
		assert_eq!(Error::UnsupportedVersion { expected: 1, found: 9 }.kind(), ErrorKind::Persistence);
		assert_eq!(Error::Output(io::ErrorKind::BrokenPipe.into()).kind(), ErrorKind::Output);
	}

	#[test]
	fn messages_name_the_offending_path() {
		let err = Error::Input { path: "logs/app.log".into(), source: io::ErrorKind::NotFound.into() };
		assert!(err.to_string().contains("logs/app.log"));
	}
}
