//! Sequence model used to rate log lines.
//!
//! This module provides:
//! - Windows of recent token tuples (`State`)
//! - Per-state transition counts (`TransitionRecord`)
//! - The fixed-order chain that learns and scores them (`MarkovChain`)
//! - Likelihood to severity classification (`Severity`)
//! - Line tokenization (`Extract`, `RegexTokenizer`)

/// Fixed-order Markov chain over token tuples.
///
/// Handles transition counting while learning and likelihood
/// computation while scoring.
pub mod markov_chain;

/// Outgoing transition counts of a single source state.
pub mod record;

/// Order-length window of recent token tuples.
pub mod state;

/// Likelihood thresholds and severity tags.
pub mod severity;

/// Extraction of token tuples from raw lines.
pub mod tokenizer;
