use log::trace;
use regex::Regex;

use super::state::Tokens;
use crate::error::{Error, Result};

/// Turns one raw line into the token tuple fed to the chain.
///
/// Returns `None` when the line carries nothing the model should see.
pub trait Extract {
	fn extract(&self, line: &str) -> Option<Tokens>;
}

/// Extracts the capture groups of a regular expression matched at the
/// start of the line.
///
/// The match must begin at the first byte of the line; where it ends is
/// free. Each capture group yields one token, `None` for a group that did
/// not participate.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
	regex: Regex,
}

impl RegexTokenizer {
	/// Compiles `pattern`.
	///
	/// # Errors
	/// - [`Error::InvalidPattern`] if the pattern does not compile
	/// - [`Error::NoCaptureGroup`] if it has no capture group
	pub fn new(pattern: &str) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
			pattern: pattern.to_owned(),
			source,
		})?;
		// Group 0 is the whole match.
		if regex.captures_len() < 2 {
			return Err(Error::NoCaptureGroup(pattern.to_owned()));
		}
		trace!("New tokenizer, pattern {pattern:?}");
		Ok(Self { regex })
	}

	/// Source text of the pattern.
	pub fn pattern(&self) -> &str {
		self.regex.as_str()
	}

	/// Number of tokens each extracted tuple holds.
	pub fn arity(&self) -> usize {
		self.regex.captures_len() - 1
	}
}

impl Extract for RegexTokenizer {
	fn extract(&self, line: &str) -> Option<Tokens> {
		let captures = self.regex.captures(line).filter(|c| c.get(0).is_some_and(|m| m.start() == 0));
		let tokens = captures.map(|c| {
			c.iter()
				.skip(1)
				.map(|group| group.map(|m| m.as_str().to_owned()))
				.collect::<Tokens>()
		});
		trace!("Tokens: {tokens:?} - Input: {line}");
		tokens
	}
}
