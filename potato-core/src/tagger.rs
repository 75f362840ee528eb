//! Drives lines through a tokenizer and a Markov chain.
//!
//! Learning feeds every tokenized line into the chain's counts. Tagging
//! scores every tokenized line and writes it back with its severity,
//! strictly in input order, one output line per input line. Lines that do
//! not tokenize are skipped by the chain and tagged `SKIP`.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::model::markov_chain::MarkovChain;
use crate::model::severity::Severity;
use crate::model::tokenizer::Extract;

/// Tag written for lines that produced no tokens.
pub const SKIP_TAG: &str = "SKIP";

/// Verdict for a single line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
	/// The line produced no tokens and left the chain untouched.
	Skipped,
	/// The line was scored.
	Scored { severity: Severity, likelihood: f64 },
}

/// One input line together with its verdict.
///
/// Displays as `<line> [<TAG>][<likelihood>]`, or `<line> [SKIP][-]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedLine<'a> {
	pub line: &'a str,
	pub verdict: Verdict,
}

impl fmt::Display for TaggedLine<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.verdict {
			Verdict::Skipped => write!(f, "{} [{SKIP_TAG}][-]", self.line),
			Verdict::Scored { severity, likelihood } => write!(f, "{} [{severity}][{likelihood:?}]", self.line),
		}
	}
}

/// Outcome of a learning pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LearnSummary {
	pub lines: usize,
	pub learned: usize,
	pub skipped: usize,
}

/// Outcome of a tagging pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSummary {
	pub lines: usize,
	pub skipped: usize,
	pub by_severity: BTreeMap<Severity, usize>,
}

impl TagSummary {
	fn record(&mut self, verdict: &Verdict) {
		self.lines += 1;
		match verdict {
			Verdict::Skipped => self.skipped += 1,
			Verdict::Scored { severity, .. } => *self.by_severity.entry(*severity).or_insert(0) += 1,
		}
	}

	/// Number of lines tagged with `severity`.
	pub fn count(&self, severity: Severity) -> usize {
		self.by_severity.get(&severity).copied().unwrap_or(0)
	}
}

/// Couples an extractor with the chain it feeds.
pub struct Tagger<'a, E: Extract + ?Sized> {
	extractor: &'a E,
	chain: &'a mut MarkovChain,
}

impl<'a, E: Extract + ?Sized> Tagger<'a, E> {
	pub fn new(extractor: &'a E, chain: &'a mut MarkovChain) -> Self {
		Self { extractor, chain }
	}

	/// Learns from one line. Returns `false` if the line produced no tokens.
	pub fn learn_line(&mut self, line: &str) -> bool {
		match self.extractor.extract(line) {
			Some(tokens) => {
				self.chain.observe_for_training(&tokens);
				true
			}
			None => false,
		}
	}

	/// Learns from every line, in order.
	pub fn learn_lines<I, S>(&mut self, lines: I) -> LearnSummary
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut summary = LearnSummary::default();
		for line in lines {
			summary.lines += 1;
			if self.learn_line(line.as_ref()) {
				summary.learned += 1;
			} else {
				summary.skipped += 1;
			}
		}
		info!(
			"Learned {} of {} lines ({} skipped), chain holds {} states",
			summary.learned,
			summary.lines,
			summary.skipped,
			self.chain.state_count()
		);
		summary
	}

	/// Scores one line. A line without tokens does not move the cursor.
	pub fn tag_line<'l>(&mut self, line: &'l str) -> TaggedLine<'l> {
		let verdict = match self.extractor.extract(line) {
			Some(tokens) => {
				let likelihood = self.chain.score_and_advance(&tokens);
				Verdict::Scored { severity: Severity::classify(likelihood), likelihood }
			}
			None => Verdict::Skipped,
		};
		TaggedLine { line, verdict }
	}

	/// Scores every line and writes it to `out` as soon as it is tagged.
	///
	/// # Errors
	/// Returns [`Error::Output`] if writing fails. Lines written before the
	/// failure stay written.
	pub fn tag_lines<I, S, W>(&mut self, lines: I, out: &mut W) -> Result<TagSummary>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
		W: Write + ?Sized,
	{
		self.tag_results(lines.into_iter().map(Ok), out)
	}

	/// Like [`Tagger::tag_lines`], for a source that can fail while being read.
	///
	/// Each line is read, scored and written before the next one is pulled.
	/// The first read error stops the run; lines already written stay written.
	pub fn tag_results<I, S, W>(&mut self, lines: I, out: &mut W) -> Result<TagSummary>
	where
		I: IntoIterator<Item = Result<S>>,
		S: AsRef<str>,
		W: Write + ?Sized,
	{
		let mut summary = TagSummary::default();
		for line in lines {
			let line = match line {
				Ok(line) => line,
				Err(e) => {
					// Keep what was already tagged visible.
					out.flush().map_err(Error::Output)?;
					return Err(e);
				}
			};
			let tagged = self.tag_line(line.as_ref());
			writeln!(out, "{tagged}").map_err(Error::Output)?;
			summary.record(&tagged.verdict);
		}
		out.flush().map_err(Error::Output)?;

		for severity in Severity::ALL {
			debug!("{severity}: {}", summary.count(severity));
		}
		info!("Tagged {} lines ({} skipped)", summary.lines, summary.skipped);
		Ok(summary)
	}
}
