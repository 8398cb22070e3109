use std::sync::LazyLock;

use regex::{Match, Regex};
use serde_json::{Map, Number, Value};

use plaza_domain::{
	intent::{Intent, SERVICE_CATEGORIES},
	numeral::{PhraseGroup, parse_amount},
};

/// One numeral group: a digit run, a word-numeral run, a magnitude run.
const NUMERAL_GROUP: &str = r"(\d*)([일이삼사오육칠팔구]*)([십백천만]*)";
const PHRASE_GROUPS: usize = 4;

static PRICE_GTE: LazyLock<Regex> = LazyLock::new(|| price_pattern(r"만원\s*(?:이상|부터|초과)"));
static PRICE_LTE: LazyLock<Regex> = LazyLock::new(|| price_pattern(r"만원\s*(?:이하|까지)"));
static PRICE_RANGE: LazyLock<Regex> = LazyLock::new(|| price_pattern(r"만원\s*대"));

fn price_pattern(suffix: &str) -> Regex {
	let mut pattern = String::new();

	for _ in 0..PHRASE_GROUPS {
		pattern.push_str(NUMERAL_GROUP);
	}
	pattern.push_str(suffix);

	Regex::new(&pattern).expect("Price pattern must compile.")
}

/// The retriever-side field a sub-filter targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
	DiscountSalePrice,
	CategoryLarge,
	CategoryMid,
	ReviewScore,
}
impl FilterField {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::DiscountSalePrice => "DSCNT_SALE_PRC",
			Self::CategoryLarge => "LGRP_NM",
			Self::CategoryMid => "MGRP_NM",
			Self::ReviewScore => "GDAS_SCR_SUM",
		}
	}
}

/// Inclusive/inclusive/exclusive numeric bounds. Never emitted empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeFilter {
	pub gte: Option<Number>,
	pub lte: Option<Number>,
	pub lt: Option<Number>,
}
impl RangeFilter {
	fn is_empty(&self) -> bool {
		self.gte.is_none() && self.lte.is_none() && self.lt.is_none()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldFilter {
	Range(RangeFilter),
	OneOf(Vec<String>),
}

/// A structured, retriever-agnostic filter request. Built once per request
/// and handed to the retrieval collaborator; never evaluated locally.
#[derive(Clone, Debug, Default)]
pub struct FilterPredicate {
	entries: Vec<(FilterField, FieldFilter)>,
}
impl FilterPredicate {
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[(FilterField, FieldFilter)] {
		self.entries.as_slice()
	}

	/// Serializes to the retriever's `$gte`-operator wire shape. Only
	/// operators that were actually populated appear; an empty predicate
	/// serializes to `{}`, which the retriever reads as "match all".
	pub fn to_wire(&self) -> Value {
		let mut out = Map::new();

		for (field, filter) in &self.entries {
			let value = match filter {
				FieldFilter::Range(range) => {
					let mut ops = Map::new();

					if let Some(gte) = &range.gte {
						ops.insert("$gte".to_string(), Value::Number(gte.clone()));
					}
					if let Some(lte) = &range.lte {
						ops.insert("$lte".to_string(), Value::Number(lte.clone()));
					}
					if let Some(lt) = &range.lt {
						ops.insert("$lt".to_string(), Value::Number(lt.clone()));
					}

					Value::Object(ops)
				},
				FieldFilter::OneOf(values) => {
					let values = values.iter().cloned().map(Value::String).collect();

					serde_json::json!({ "$in": Value::Array(values) })
				},
			};

			out.insert(field.as_str().to_string(), value);
		}

		Value::Object(out)
	}

	fn push(&mut self, field: FilterField, filter: FieldFilter) {
		self.entries.push((field, filter));
	}
}

/// Compiles the raw query text and the extracted intent into one predicate.
/// Sub-rules are built independently and merged by key; the fields they
/// target are disjoint, so the merge is a plain union.
pub fn compile_filter(query: &str, intent: &Intent) -> FilterPredicate {
	let mut predicate = FilterPredicate::default();

	if let Some(range) = price_filter(query, intent) {
		predicate.push(FilterField::DiscountSalePrice, FieldFilter::Range(range));
	}

	let categories = if intent.is_service_request {
		SERVICE_CATEGORIES.iter().map(|category| category.to_string()).collect()
	} else {
		intent.categories.clone()
	};

	if !categories.is_empty() {
		predicate.push(FilterField::CategoryLarge, FieldFilter::OneOf(categories));
	}
	if !intent.is_service_request && !intent.mid_categories.is_empty() {
		predicate.push(FilterField::CategoryMid, FieldFilter::OneOf(intent.mid_categories.clone()));
	}
	if let Some(range) = review_filter(intent) {
		predicate.push(FilterField::ReviewScore, FieldFilter::Range(range));
	}

	predicate
}

/// Phrase-derived bounds win over intent-derived bounds; the intent path
/// only applies when none of the three phrase forms matched.
fn price_filter(query: &str, intent: &Intent) -> Option<RangeFilter> {
	let mut range = RangeFilter::default();

	if let Some(amount) = phrase_amount(&PRICE_GTE, query) {
		range.gte = Some(amount.into());
	}
	if let Some(amount) = phrase_amount(&PRICE_LTE, query) {
		range.lte = Some(amount.into());
	}
	if let Some(amount) = phrase_amount(&PRICE_RANGE, query) {
		// "N만원대" spans from the amount up to one step of its leading
		// decimal digit: 240만원대 covers 2,400,000 to just under 3,400,000.
		range.gte = Some(amount.into());
		range.lt = Some((amount + order_step(amount)).into());
	}

	if range.is_empty() {
		if intent.price_min > 0 {
			range.gte = Some(intent.price_min.into());
		}
		if intent.price_max > 0 {
			range.lte = Some(intent.price_max.into());
		}
	}

	(!range.is_empty()).then_some(range)
}

fn review_filter(intent: &Intent) -> Option<RangeFilter> {
	let mut range = RangeFilter::default();

	if intent.review_min > 0.0 {
		range.gte = Number::from_f64(intent.review_min);
	}
	if intent.review_max > 0.0 {
		range.lte = Number::from_f64(intent.review_max);
	}

	(!range.is_empty()).then_some(range)
}

/// Runs one phrase pattern and evaluates its captures. The numeral parser
/// is only ever reached through a successful match here, and zero amounts
/// are treated as no recognition at all.
fn phrase_amount(pattern: &Regex, query: &str) -> Option<u64> {
	let caps = pattern.captures(query)?;
	let mut groups = [PhraseGroup::default(); PHRASE_GROUPS];

	for (idx, group) in groups.iter_mut().enumerate() {
		group.digits = nonempty(caps.get(idx * 3 + 1));
		group.word = nonempty(caps.get(idx * 3 + 2));
		group.magnitudes = nonempty(caps.get(idx * 3 + 3));
	}

	let amount = parse_amount(&groups);

	(amount > 0).then_some(amount)
}

fn nonempty(capture: Option<Match<'_>>) -> Option<&str> {
	capture.map(|capture| capture.as_str()).filter(|raw| !raw.is_empty())
}

/// One order of magnitude at the amount's leading digit: 10^(digits - 1).
fn order_step(amount: u64) -> u64 {
	10_u64.pow(amount.ilog10())
}
