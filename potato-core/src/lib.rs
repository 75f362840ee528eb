//! Log tagging through Artificial Ignorance.
//!
//! This crate rates every line of a log by how predictable it is:
//! - A configured pattern extracts a token tuple from each line
//! - A fixed-order Markov chain learns which tuples usually follow which
//! - Scoring a line yields the empirical likelihood of its transition,
//!   mapped to a severity tag (`POTATO` for the most surprising lines)
//! - The tokenizer and the chain are persisted together as "knowledge"

/// Sequence model, severity classification and tokenization.
pub mod model;

/// Line-by-line learning and tagging.
pub mod tagger;

/// Persisted knowledge (tokenizer + chain) and its file format.
pub mod knowledge;

/// Error type and result alias.
pub mod error;

/// I/O utilities (line reading, atomic file replacement).
///
/// Not exposed
pub(crate) mod io;

pub use error::{Error, ErrorKind, Result};
pub use knowledge::Knowledge;
pub use model::markov_chain::MarkovChain;
pub use model::severity::Severity;
pub use model::state::{State, Tokens};
pub use model::tokenizer::{Extract, RegexTokenizer};
pub use tagger::{LearnSummary, TagSummary, TaggedLine, Tagger, Verdict};
