use std::fmt;

/// Highest likelihood still tagged [`Severity::Potato`].
pub const POTATO_MAX: f64 = 0.05;
/// Highest likelihood still tagged [`Severity::Warning`].
pub const WARNING_MAX: f64 = 0.25;
/// Highest likelihood still tagged [`Severity::Unusual`].
pub const UNUSUAL_MAX: f64 = 0.5;
/// Highest likelihood still tagged [`Severity::Common`].
pub const COMMON_MAX: f64 = 0.75;

/// How surprising a scored line is, most anomalous first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
	Potato,
	Warning,
	Unusual,
	Common,
	Expected,
}

impl Severity {
	/// Every severity, most anomalous first.
	pub const ALL: [Severity; 5] = [
		Severity::Potato,
		Severity::Warning,
		Severity::Unusual,
		Severity::Common,
		Severity::Expected,
	];

	/// Maps a likelihood to its severity band.
	///
	/// Each band includes its upper bound, so a boundary value lands in
	/// the more anomalous band (`0.25` is a warning, not unusual).
	/// Negative values and NaN are potatoes, anything above `0.75` is expected.
	pub fn classify(likelihood: f64) -> Self {
		if likelihood.is_nan() || likelihood <= POTATO_MAX {
			Severity::Potato
		} else if likelihood <= WARNING_MAX {
			Severity::Warning
		} else if likelihood <= UNUSUAL_MAX {
			Severity::Unusual
		} else if likelihood <= COMMON_MAX {
			Severity::Common
		} else {
			Severity::Expected
		}
	}

	/// Upper-case tag written next to a scored line.
	pub fn as_str(self) -> &'static str {
		match self {
			Severity::Potato => "POTATO",
			Severity::Warning => "WARNING",
			Severity::Unusual => "UNUSUAL",
			Severity::Common => "COMMON",
			Severity::Expected => "EXPECTED",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn boundaries_belong_to_the_lower_band() {
		let cases = [
			(0.0, Severity::Potato),
			(0.05, Severity::Potato),
			(0.050001, Severity::Warning),
			(0.25, Severity::Warning),
			(0.5, Severity::Unusual),
			(0.75, Severity::Common),
			(0.750001, Severity::Expected),
			(1.0, Severity::Expected),
		];
		for (likelihood, expected) in cases {
			assert_eq!(Severity::classify(likelihood), expected, "likelihood {likelihood}");
		}
	}

	#[test]
	fn out_of_range_values_are_defined() {
		assert_eq!(Severity::classify(f64::NAN), Severity::Potato);
		assert_eq!(Severity::classify(-1.0), Severity::Potato);
		assert_eq!(Severity::classify(f64::NEG_INFINITY), Severity::Potato);
		assert_eq!(Severity::classify(1.5), Severity::Expected);
		assert_eq!(Severity::classify(f64::INFINITY), Severity::Expected);
	}

	#[test]
	fn ordering_runs_from_most_anomalous() {
		assert!(Severity::Potato < Severity::Warning);
		assert!(Severity::Common < Severity::Expected);
		let mut sorted = Severity::ALL;
		sorted.sort();
		assert_eq!(sorted, Severity::ALL);
	}

	#[test]
	fn display_uses_tag_names() {
		let names: Vec<String> = Severity::ALL.iter().map(ToString::to_string).collect();
		assert_eq!(names, ["POTATO", "WARNING", "UNUSUAL", "COMMON", "EXPECTED"]);
	}
}
