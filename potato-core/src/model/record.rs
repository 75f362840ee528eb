use std::collections::HashMap;

use super::state::State;

/// Outgoing transitions observed from one source state.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning
/// - Report the empirical probability of a given destination
///
/// ## Invariants
/// - `total` equals the sum of all `counts`
/// - Each destination count is strictly positive
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionRecord {
	/// Number of transitions ever taken out of the source state.
	total: u64,
	/// Destination state => number of times that transition was taken.
	counts: HashMap<State, u64>,
}

impl TransitionRecord {
	/// Creates a record with no transitions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuilds a record from stored parts. Consistency is checked by the caller.
	pub(crate) fn from_parts(total: u64, counts: HashMap<State, u64>) -> Self {
		Self { total, counts }
	}

	/// Records one occurrence of a transition toward `next`.
	///
	/// The destination count and the total move together, so the record is
	/// never partially updated.
	pub fn add_transition(&mut self, next: State) {
		*self.counts.entry(next).or_insert(0) += 1;
		self.total += 1;
	}

	/// Number of transitions taken out of the source state.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// How many times the transition toward `next` was taken.
	pub fn count(&self, next: &State) -> u64 {
		self.counts.get(next).copied().unwrap_or(0)
	}

	/// Iterates over `(destination, count)` pairs.
	pub fn destinations(&self) -> impl Iterator<Item = (&State, u64)> {
		self.counts.iter().map(|(state, count)| (state, *count))
	}

	/// Relative frequency of the transition toward `next`.
	///
	/// Returns `None` when that transition was never observed. A present
	/// destination implies `total >= 1`, so the division is always defined.
	pub fn likelihood(&self, next: &State) -> Option<f64> {
		let count = *self.counts.get(next)?;
		Some(count as f64 / self.total as f64)
	}

	/// Checks `total == sum(counts)` and that no count is zero.
	pub fn is_consistent(&self) -> bool {
		let sum: u64 = self.counts.values().sum();
		sum == self.total && self.counts.values().all(|count| *count > 0)
	}
}
