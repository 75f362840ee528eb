use std::collections::HashMap;

use log::debug;

use super::record::TransitionRecord;
use super::state::{State, Tokens};
use crate::error::{Error, Result};

/// Fixed-order Markov chain over extracted token tuples.
///
/// The `MarkovChain` keeps one live cursor (the current state) and a table
/// of transition counts indexed by source state.
///
/// # Responsibilities
/// - Learn a new observation: count the transition and advance the cursor
/// - Score a new observation: report the empirical transition probability
///   and advance the cursor, leaving the counts untouched
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - Every state (cursor, table keys, destinations) holds `order` slots
/// - The table always contains the initial state and only ever grows
/// - Every destination ever counted also has its own (possibly empty) record
///
/// The chain is not meant to be shared between concurrent callers: both
/// operations read then write the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkovChain {
	/// Number of past observations kept in a state.
	order: usize,

	/// State the next observation transitions from.
	cursor: State,

	/// Source state => outgoing transitions.
	table: HashMap<State, TransitionRecord>,
}

impl MarkovChain {
	/// Creates a new chain of the given order, its cursor on the empty state.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(Error::InvalidOrder(order));
		}
		debug!("New Markov chain, order {order}");

		let cursor = State::empty(order);
		let mut table = HashMap::new();
		table.insert(cursor.clone(), TransitionRecord::new());
		Ok(Self { order, cursor, table })
	}

	/// Rebuilds a chain from stored parts, checking every structural invariant.
	///
	/// # Errors
	/// Returns [`Error::Corrupt`] naming the first violated invariant.
	pub(crate) fn from_parts(order: usize, cursor: State, table: HashMap<State, TransitionRecord>) -> Result<Self> {
		if order < 1 {
			return Err(Error::Corrupt(format!("order must be >= 1, got {order}")));
		}
		if cursor.order() != order {
			return Err(Error::Corrupt(format!(
				"cursor holds {} slots, order is {order}",
				cursor.order()
			)));
		}
		if !table.contains_key(&State::empty(order)) {
			return Err(Error::Corrupt("initial state is missing from the transition table".to_owned()));
		}

		for (source, record) in &table {
			if source.order() != order {
				return Err(Error::Corrupt(format!("state {source} holds {} slots, order is {order}", source.order())));
			}
			if !record.is_consistent() {
				return Err(Error::Corrupt(format!("transition counts from {source} do not add up to their total")));
			}
			for (destination, _) in record.destinations() {
				if !source.leads_to(destination) {
					return Err(Error::Corrupt(format!("{source} -> {destination} is not a valid transition")));
				}
				if !table.contains_key(destination) {
					return Err(Error::Corrupt(format!("destination {destination} has no table entry")));
				}
			}
		}

		Ok(Self { order, cursor, table })
	}

	/// Order of the chain.
	pub fn order(&self) -> usize {
		self.order
	}

	/// State the next observation will transition from.
	pub fn cursor(&self) -> &State {
		&self.cursor
	}

	/// Moves the cursor back to the empty state. Counts are untouched.
	pub fn reset_cursor(&mut self) {
		self.cursor = State::empty(self.order);
	}

	/// Outgoing transitions recorded for `state`, if it was ever reached.
	pub fn record(&self, state: &State) -> Option<&TransitionRecord> {
		self.table.get(state)
	}

	/// Iterates over every `(source, record)` pair of the table.
	pub fn records(&self) -> impl Iterator<Item = (&State, &TransitionRecord)> {
		self.table.iter()
	}

	/// Number of states in the table.
	pub fn state_count(&self) -> usize {
		self.table.len()
	}

	/// Total number of transitions learned so far.
	pub fn transition_mass(&self) -> u64 {
		self.table.values().map(TransitionRecord::total).sum()
	}

	/// Learns one observation.
	///
	/// Counts the transition from the cursor to the state reached by
	/// `tokens`, then moves the cursor there. The reached state gets an
	/// empty record if it is new, so it can be a source later on.
	///
	/// # Notes
	/// - Token arity is not validated: a tuple of another shape simply
	///   produces a distinct state.
	pub fn observe_for_training(&mut self, tokens: &Tokens) {
		let next = self.cursor.advance(tokens);
		debug!("New transition: {} -> {}", self.cursor, next);

		self.table
			.entry(self.cursor.clone())
			.or_default()
			.add_transition(next.clone());
		self.table.entry(next.clone()).or_default();
		self.cursor = next;
	}

	/// Scores one observation and advances the cursor.
	///
	/// Returns the relative frequency of the transition from the cursor to
	/// the state reached by `tokens`, or `0.0` when that transition was
	/// never learned (including when the cursor itself is unknown).
	///
	/// The cursor always moves to the reached state so that a single miss
	/// does not strand the following lines. The table is never modified.
	pub fn score_and_advance(&mut self, tokens: &Tokens) -> f64 {
		let next = self.cursor.advance(tokens);
		debug!("Transition: {} -> {}", self.cursor, next);

		let likelihood = match self.table.get(&self.cursor) {
			Some(record) => record.likelihood(&next).unwrap_or(0.0),
			None => {
				debug!("Source state {} was never learned", self.cursor);
				0.0
			}
		};

		self.cursor = next;
		debug!("Likelihood: {likelihood}");
		likelihood
	}
}
