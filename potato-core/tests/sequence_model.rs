//! Behavioural tests of the sequence model through the public API.

use potato_core::{Extract, Knowledge, MarkovChain, RegexTokenizer, Severity, State, Tokens};
use proptest::prelude::*;

fn tokens(value: &str) -> Tokens {
	vec![Some(value.to_owned())]
}

/// order 1, one field: train INFO, INFO, ERROR then score from a reset cursor.
#[test]
fn level_sequence_scenario() {
	let tokenizer = RegexTokenizer::new(r"(?P<level>[A-Z]+) ").unwrap();
	let mut chain = MarkovChain::new(1).unwrap();

	for line in ["INFO started", "INFO running", "ERROR disk full"] {
		let extracted = tokenizer.extract(line).unwrap();
		chain.observe_for_training(&extracted);
	}

	let info_state = State::empty(1).advance(&tokens("INFO"));
	let from_info = chain.record(&info_state).unwrap();
	assert_eq!(from_info.total(), 2);
	assert_eq!(from_info.count(&info_state), 1);

	// Reach the trained INFO state, then score INFO -> INFO.
	chain.reset_cursor();
	chain.score_and_advance(&tokens("INFO"));
	let likelihood = chain.score_and_advance(&tokens("INFO"));
	assert_eq!(likelihood, 0.5);
	assert_eq!(Severity::classify(likelihood), Severity::Unusual);

	// ERROR was never observed right after the empty state.
	chain.reset_cursor();
	let likelihood = chain.score_and_advance(&tokens("ERROR"));
	assert_eq!(likelihood, 0.0);
	assert_eq!(Severity::classify(likelihood), Severity::Potato);
}

#[test]
fn learning_spans_several_sources() {
	let dir = tempfile::tempdir().unwrap();
	let first = dir.path().join("monday.log");
	let second = dir.path().join("tuesday.log");
	std::fs::write(&first, "a x\nb x\n").unwrap();
	std::fs::write(&second, "a x\n").unwrap();

	let mut knowledge = Knowledge::new(r"(\w) ", 1).unwrap();
	knowledge.learn_from_file(&first).unwrap();
	knowledge.learn_from_file(&second).unwrap();

	// The cursor carried over: b -> a was learned across the file boundary.
	let b = State::empty(1).advance(&tokens("b"));
	let a = State::empty(1).advance(&tokens("a"));
	assert_eq!(knowledge.chain().record(&b).unwrap().count(&a), 1);
	assert_eq!(knowledge.chain().transition_mass(), 3);
}

fn observations() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[a-d]", 0..60)
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn prop_totals_match_counts_and_calls(order in 1usize..4, values in observations()) {
		let mut chain = MarkovChain::new(order).unwrap();
		let mut calls_from = std::collections::HashMap::<State, u64>::new();

		for value in &values {
			*calls_from.entry(chain.cursor().clone()).or_insert(0) += 1;
			chain.observe_for_training(&tokens(value));
		}

		prop_assert_eq!(chain.transition_mass(), values.len() as u64);
		for (source, record) in chain.records() {
			let sum: u64 = record.destinations().map(|(_, count)| count).sum();
			prop_assert_eq!(sum, record.total());
			prop_assert_eq!(record.total(), calls_from.get(source).copied().unwrap_or(0));
		}
	}

	#[test]
	fn prop_scoring_never_touches_counts(order in 1usize..4, trained in observations(), scored in observations()) {
		let mut chain = MarkovChain::new(order).unwrap();
		for value in &trained {
			chain.observe_for_training(&tokens(value));
		}
		let snapshot = chain.clone();

		let mut expected_cursor = chain.cursor().clone();
		for value in &scored {
			let likelihood = chain.score_and_advance(&tokens(value));
			prop_assert!((0.0..=1.0).contains(&likelihood));
			expected_cursor = expected_cursor.advance(&tokens(value));
		}

		prop_assert_eq!(chain.cursor(), &expected_cursor);
		prop_assert_eq!(chain.state_count(), snapshot.state_count());
		for (source, record) in snapshot.records() {
			prop_assert_eq!(chain.record(source), Some(record));
		}
	}

	#[test]
	fn prop_round_trip_scores_bit_identically(order in 1usize..4, trained in observations(), scored in observations()) {
		let mut original = Knowledge::new(r"(\w)", order).unwrap();
		for value in &trained {
			original.chain_mut().observe_for_training(&tokens(value));
		}
		let mut restored = Knowledge::from_bytes(&original.to_bytes().unwrap()).unwrap();

		for value in &scored {
			let a = original.chain_mut().score_and_advance(&tokens(value));
			let b = restored.chain_mut().score_and_advance(&tokens(value));
			prop_assert_eq!(a.to_bits(), b.to_bits());
			prop_assert_eq!(Severity::classify(a), Severity::classify(b));
		}
	}
}
