//! Korean numeral-phrase arithmetic for price expressions.
//!
//! A price phrase such as `백이십만원` mixes bare digits, word-numerals
//! (일–구) and magnitude characters (십/백/천/만). The surrounding pattern
//! captures up to four positional groups; this module turns those captures
//! into a won amount. The phrase always denotes units of 만원, so the summed
//! group value is scaled by [`WON_BASE`] at the end.

/// The phrase-wide base multiplier: amounts are expressed in units of 만원.
pub const WON_BASE: u64 = 10_000;

/// One positional group captured from the price-expression pattern.
///
/// All three parts are optional; an entirely empty group contributes zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhraseGroup<'a> {
	/// A bare digit run, e.g. `120`.
	pub digits: Option<&'a str>,
	/// A word-numeral run drawn from 일이삼사오육칠팔구.
	pub word: Option<&'a str>,
	/// A magnitude run drawn from 십백천만, possibly a compound like 백십.
	pub magnitudes: Option<&'a str>,
}

/// Evaluates a full four-group phrase into a won amount.
///
/// Only ever called on groups captured by a successful pattern match; the
/// caller must skip straight to "no price intent" when the pattern does not
/// match rather than hand partial captures here.
pub fn parse_amount(groups: &[PhraseGroup<'_>]) -> u64 {
	groups.iter().map(group_value).sum::<u64>() * WON_BASE
}

fn group_value(group: &PhraseGroup<'_>) -> u64 {
	let digits = group.digits.filter(|raw| !raw.is_empty());
	let words: Vec<u64> = group
		.word
		.map(|raw| raw.chars().filter_map(word_digit).collect())
		.unwrap_or_default();
	let magnitudes: Vec<u64> = group
		.magnitudes
		.map(|raw| raw.chars().filter_map(magnitude).collect())
		.unwrap_or_default();

	if digits.is_none() && words.is_empty() && magnitudes.is_empty() {
		return 0;
	}

	// Unparseable digit runs collapse the group to zero instead of raising;
	// the pipeline must stay total.
	let mut value = match digits {
		Some(raw) => raw.parse::<u64>().unwrap_or(0),
		None => 1,
	};

	for word in words {
		value *= word;
	}

	if let Some((first, rest)) = magnitudes.split_first() {
		value *= first;

		if let Some((second, tail)) = rest.split_first() {
			// Compound magnitudes compose multiplicatively only while the
			// running value still leads with 1 (십만 = x10 then x10000);
			// otherwise the remaining magnitudes are additive (이백십 = 210).
			if leading_digit(value) == 1 {
				value *= second;
			} else {
				value += second;

				if let Some(third) = tail.first() {
					value += third;
				}
			}
		}
	}

	value
}

fn word_digit(ch: char) -> Option<u64> {
	match ch {
		'일' => Some(1),
		'이' => Some(2),
		'삼' => Some(3),
		'사' => Some(4),
		'오' => Some(5),
		'육' => Some(6),
		'칠' => Some(7),
		'팔' => Some(8),
		'구' => Some(9),
		_ => None,
	}
}

fn magnitude(ch: char) -> Option<u64> {
	match ch {
		'십' => Some(10),
		'백' => Some(100),
		'천' => Some(1_000),
		'만' => Some(10_000),
		_ => None,
	}
}

fn leading_digit(value: u64) -> u64 {
	let mut value = value;

	while value >= 10 {
		value /= 10;
	}

	value
}
