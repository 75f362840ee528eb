use serde::{Deserialize, Serialize};

/// Ordered fields extracted from one line, one entry per capture group.
///
/// An optional group that did not take part in the match is `None`,
/// which keeps it distinct from a group that matched an empty string.
pub type Tokens = Vec<Option<String>>;

/// Memory of a Markov chain: the `order` most recent token tuples.
///
/// Slots are ordered oldest first. A `None` slot is the "empty" sentinel
/// used before enough observations have been seen to fill the window.
///
/// ## Invariants
/// - The number of slots is fixed at creation and never changes
/// - Equality, hashing and ordering are structural (slot by slot)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State(Vec<Option<Tokens>>);

impl State {
	/// Creates the initial state: `order` sentinel slots.
	pub fn empty(order: usize) -> Self {
		Self(vec![None; order])
	}

	/// Builds a state from explicit slots, oldest first.
	#[cfg(test)]
	pub(crate) fn from_slots(slots: Vec<Option<Tokens>>) -> Self {
		Self(slots)
	}

	/// Returns the state reached by observing `tokens` from this one.
	///
	/// The oldest slot is dropped and `tokens` is appended as the newest.
	/// An order-0 window stays empty.
	pub fn advance(&self, tokens: &Tokens) -> Self {
		let mut slots = Vec::with_capacity(self.0.len());
		if let Some((_, kept)) = self.0.split_first() {
			slots.extend_from_slice(kept);
			slots.push(Some(tokens.clone()));
		}
		Self(slots)
	}

	/// Number of slots in the window.
	pub fn order(&self) -> usize {
		self.0.len()
	}

	/// Slots of the window, oldest first.
	pub fn slots(&self) -> &[Option<Tokens>] {
		&self.0
	}

	/// True if observing a single token tuple from `self` can yield `next`.
	///
	/// `next` must keep every slot of `self` but the oldest, in order, and
	/// end with a real observation.
	pub fn leads_to(&self, next: &State) -> bool {
		match (self.0.split_first(), next.0.split_last()) {
			(Some((_, kept)), Some((Some(_), shifted))) => kept == shifted,
			_ => false,
		}
	}

	/// True while every slot still holds the sentinel.
	pub fn is_empty(&self) -> bool {
		self.0.iter().all(Option::is_none)
	}
}

impl std::fmt::Display for State {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("(")?;
		for (i, slot) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			match slot {
				None => f.write_str("_")?,
				Some(tokens) => {
					f.write_str("(")?;
					for (j, token) in tokens.iter().enumerate() {
						if j > 0 {
							f.write_str(", ")?;
						}
						match token {
							Some(t) => write!(f, "{t:?}")?,
							None => f.write_str("None")?,
						}
					}
					f.write_str(")")?;
				}
			}
		}
		f.write_str(")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(values: &[&str]) -> Tokens {
		values.iter().map(|v| Some(v.to_string())).collect()
	}

	#[test]
	fn empty_state_holds_only_sentinels() {
		let state = State::empty(3);
		assert_eq!(state.order(), 3);
		assert!(state.is_empty());
		assert!(state.slots().iter().all(Option::is_none));
	}

	#[test]
	fn advance_drops_oldest_and_appends_newest() {
		let a = tokens(&["a"]);
		let b = tokens(&["b"]);
		let c = tokens(&["c"]);

		let state = State::empty(2).advance(&a);
		assert_eq!(state.slots(), &[None, Some(a.clone())]);

		let state = state.advance(&b).advance(&c);
		assert_eq!(state.slots(), &[Some(b), Some(c)]);
		assert!(!state.is_empty());
	}

	#[test]
	fn advance_leaves_the_source_untouched() {
		let start = State::empty(1);
		let next = start.advance(&tokens(&["INFO"]));
		assert!(start.is_empty());
		assert_ne!(start, next);
	}

	#[test]
	fn leads_to_accepts_only_one_step_moves() {
		let a = tokens(&["a"]);
		let b = tokens(&["b"]);
		let start = State::empty(2);
		let one = start.advance(&a);
		let two = one.advance(&b);

		assert!(start.leads_to(&one));
		assert!(one.leads_to(&two));
		assert!(!start.leads_to(&two));
		assert!(!one.leads_to(&start));
	}

	#[test]
	fn missing_group_differs_from_empty_match() {
		let absent = State::empty(1).advance(&vec![None]);
		let blank = State::empty(1).advance(&vec![Some(String::new())]);
		assert_ne!(absent, blank);
	}

	#[test]
	fn display_is_readable() {
		let state = State::empty(2).advance(&vec![Some("INFO".to_owned()), None]);
		assert_eq!(state.to_string(), r#"(_, ("INFO", None))"#);
	}
}
