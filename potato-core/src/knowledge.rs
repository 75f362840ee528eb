//! Knowledge: a tokenizer and the chain it feeds, persisted together.
//!
//! A knowledge file is a `postcard` encoding of a fixed header followed by
//! a versioned body:
//!
//! ```text
//! Header { magic: b"PTKB", version: u16 }
//! BodyV1 { pattern, order, cursor, entries: [Entry { source, total, counts }] }
//! ```
//!
//! Entries and their counts are sorted by state, so saving the same model
//! twice yields the same bytes. Loading checks every structural invariant
//! of the chain and refuses anything inconsistent rather than returning an
//! empty or partial model.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::{open_lines, read_lines, write_replace};
use crate::model::markov_chain::MarkovChain;
use crate::model::record::TransitionRecord;
use crate::model::state::State;
use crate::model::tokenizer::RegexTokenizer;
use crate::tagger::{LearnSummary, TagSummary, Tagger};

/// Leading bytes of every knowledge file.
pub const MAGIC: [u8; 4] = *b"PTKB";

/// Schema version written by this build.
pub const VERSION: u16 = 1;

#[derive(Serialize, Deserialize)]
struct Header {
	magic: [u8; 4],
	version: u16,
}

#[derive(Serialize, Deserialize)]
struct BodyV1 {
	pattern: String,
	order: u64,
	cursor: State,
	entries: Vec<EntryV1>,
}

#[derive(Serialize, Deserialize)]
struct EntryV1 {
	source: State,
	total: u64,
	counts: Vec<(State, u64)>,
}

/// Everything needed to tag a log: how lines are tokenized and what was
/// learned from previous ones.
#[derive(Clone, Debug)]
pub struct Knowledge {
	tokenizer: RegexTokenizer,
	chain: MarkovChain,
}

impl Knowledge {
	/// Creates a blank knowledge base.
	///
	/// # Errors
	/// Returns a configuration error if `pattern` is unusable or `order < 1`.
	pub fn new(pattern: &str, order: usize) -> Result<Self> {
		let tokenizer = RegexTokenizer::new(pattern)?;
		let chain = MarkovChain::new(order)?;
		info!("New knowledge, pattern {pattern:?}, order {order}");
		Ok(Self { tokenizer, chain })
	}

	pub fn tokenizer(&self) -> &RegexTokenizer {
		&self.tokenizer
	}

	pub fn chain(&self) -> &MarkovChain {
		&self.chain
	}

	pub fn chain_mut(&mut self) -> &mut MarkovChain {
		&mut self.chain
	}

	/// Borrows the tokenizer and chain as an orchestrator.
	pub fn tagger(&mut self) -> Tagger<'_, RegexTokenizer> {
		Tagger::new(&self.tokenizer, &mut self.chain)
	}

	/// Learns from every line of `path`.
	///
	/// The whole file is read before the chain is touched, so an unreadable
	/// input leaves the model exactly as it was.
	///
	/// # Errors
	/// Returns [`Error::Input`] if the file cannot be read.
	pub fn learn_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LearnSummary> {
		let path = path.as_ref();
		info!("Learn from file: {}", path.display());
		let lines = read_lines(path).map_err(|source| Error::Input { path: path.to_owned(), source })?;
		Ok(self.tagger().learn_lines(lines))
	}

	/// Tags every line of `path` into `out`.
	///
	/// Lines are streamed: each one is scored and written before the next
	/// is read, so a read failure partway keeps the output of earlier lines.
	///
	/// # Errors
	/// Returns [`Error::Input`] if the file cannot be opened or read, or
	/// [`Error::Output`] if `out` fails.
	pub fn tag_file<P, W>(&mut self, path: P, out: &mut W) -> Result<TagSummary>
	where
		P: AsRef<Path>,
		W: Write + ?Sized,
	{
		let path = path.as_ref();
		info!("Process file: {}", path.display());
		let input_error = |source: std::io::Error| Error::Input { path: path.to_owned(), source };
		let lines = open_lines(path).map_err(input_error)?;
		self.tagger().tag_results(lines.map(|line| line.map_err(input_error)), out)
	}

	/// Encodes the knowledge base.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut entries: Vec<EntryV1> = self
			.chain
			.records()
			.map(|(source, record)| {
				let mut counts: Vec<(State, u64)> =
					record.destinations().map(|(state, count)| (state.clone(), count)).collect();
				counts.sort();
				EntryV1 { source: source.clone(), total: record.total(), counts }
			})
			.collect();
		entries.sort_by(|a, b| a.source.cmp(&b.source));

		let body = BodyV1 {
			pattern: self.tokenizer.pattern().to_owned(),
			order: self.chain.order() as u64,
			cursor: self.chain.cursor().clone(),
			entries,
		};

		let mut bytes = postcard::to_stdvec(&Header { magic: MAGIC, version: VERSION }).map_err(Error::Encode)?;
		bytes.extend(postcard::to_stdvec(&body).map_err(Error::Encode)?);
		Ok(bytes)
	}

	/// Decodes a knowledge base produced by [`Knowledge::to_bytes`].
	///
	/// # Errors
	/// - [`Error::Corrupt`] if the bytes are not a consistent knowledge base
	/// - [`Error::UnsupportedVersion`] if they were written by another schema
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let (header, rest): (Header, &[u8]) = postcard::take_from_bytes(bytes)
			.map_err(|e| Error::Corrupt(format!("unreadable header: {e}")))?;
		if header.magic != MAGIC {
			return Err(Error::Corrupt("not a knowledge file (bad magic)".to_owned()));
		}
		if header.version != VERSION {
			return Err(Error::UnsupportedVersion { expected: VERSION, found: header.version });
		}

		let (body, rest): (BodyV1, &[u8]) =
			postcard::take_from_bytes(rest).map_err(|e| Error::Corrupt(format!("unreadable body: {e}")))?;
		if !rest.is_empty() {
			return Err(Error::Corrupt(format!("{} unexpected trailing bytes", rest.len())));
		}

		Self::from_body(body)
	}

	fn from_body(body: BodyV1) -> Result<Self> {
		let tokenizer = RegexTokenizer::new(&body.pattern)
			.map_err(|e| Error::Corrupt(format!("stored pattern is unusable: {e}")))?;
		let order = usize::try_from(body.order)
			.map_err(|_| Error::Corrupt(format!("order {} does not fit this platform", body.order)))?;

		let mut table = HashMap::with_capacity(body.entries.len());
		for entry in body.entries {
			let mut counts = HashMap::with_capacity(entry.counts.len());
			for (destination, count) in entry.counts {
				if counts.insert(destination, count).is_some() {
					return Err(Error::Corrupt(format!("duplicate destination from {}", entry.source)));
				}
			}
			let record = TransitionRecord::from_parts(entry.total, counts);
			if table.insert(entry.source.clone(), record).is_some() {
				return Err(Error::Corrupt(format!("duplicate entry for {}", entry.source)));
			}
		}

		let chain = MarkovChain::from_parts(order, body.cursor, table)?;
		Ok(Self { tokenizer, chain })
	}

	/// Writes the knowledge base to `path`, replacing any previous content.
	///
	/// # Errors
	/// Returns [`Error::KnowledgeWrite`] if the file cannot be written.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let path = path.as_ref();
		let bytes = self.to_bytes()?;
		write_replace(path, &bytes).map_err(|source| Error::KnowledgeWrite { path: path.to_owned(), source })?;
		info!(
			"Saved knowledge file: {} ({} states, {} transitions, {} bytes)",
			path.display(),
			self.chain.state_count(),
			self.chain.transition_mass(),
			bytes.len()
		);
		Ok(())
	}

	/// Reads a knowledge base from `path`.
	///
	/// # Errors
	/// Returns [`Error::KnowledgeRead`] if the file cannot be read, or any
	/// error of [`Knowledge::from_bytes`].
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		debug!("Loading knowledge file: {}", path.display());
		let bytes = std::fs::read(path).map_err(|source| Error::KnowledgeRead { path: path.to_owned(), source })?;
		let knowledge = Self::from_bytes(&bytes)?;
		info!(
			"Loaded knowledge file: {} (pattern {:?} with {} fields, order {}, {} states)",
			path.display(),
			knowledge.tokenizer.pattern(),
			knowledge.tokenizer.arity(),
			knowledge.chain.order(),
			knowledge.chain.state_count()
		);
		Ok(knowledge)
	}
}
