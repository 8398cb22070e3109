use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Categories substituted when the shopper is asking for a service visit
/// rather than a product.
pub const SERVICE_CATEGORIES: [&str; 2] = ["안심케어", "방문컨설팅"];

const MOBILE_CATEGORY: &str = "휴대폰·스마트워치";
const MOBILE_CARRIERS: [&str; 4] = ["자급제", "SKT", "KT", "LG"];

static FEATURE_SIZE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?:램|용량|하드)\s*(\d+)\s*(?:기가|GB)").expect("Feature size pattern must compile.")
});

/// Structured interpretation of a free-text query, produced by the intent
/// collaborator and consumed read-only by the pipeline.
///
/// Numeric fields use zero as "unset" and boolean fields use false; every
/// downstream component must treat those as the absence of a signal, never
/// as a literal bound.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Intent {
	pub refined_query: String,
	pub price_min: i64,
	pub price_max: i64,
	pub brand: String,
	pub article: String,
	pub categories: Vec<String>,
	pub mid_categories: Vec<String>,
	pub features: Vec<String>,
	pub discount_cards: Vec<String>,
	pub review_min: f64,
	pub review_max: f64,
	pub is_service_request: bool,
}
impl Intent {
	/// Post-extraction cleanup: normalizes feature size phrasing and narrows
	/// the mobile category to the carrier named in the raw query.
	pub fn refined(mut self, query: &str) -> Self {
		self.features = self
			.features
			.iter()
			.map(|feature| normalize_feature_size(feature))
			.collect();

		if self.categories.iter().any(|category| category == MOBILE_CATEGORY)
			&& let Some(carrier) = MOBILE_CARRIERS.iter().find(|carrier| query.contains(*carrier))
		{
			self.categories = vec![MOBILE_CATEGORY.to_string()];
			self.mid_categories = vec![(*carrier).to_string()];
		}

		self
	}
}

/// Rewrites capacity phrasings like `램 16 기가` to the catalog's `16GB`
/// form so feature matching lines up with product text.
pub fn normalize_feature_size(feature: &str) -> String {
	let compact: String = feature.chars().filter(|ch| !ch.is_whitespace()).collect();

	FEATURE_SIZE.replace_all(&compact, "${1}GB").into_owned()
}

#[cfg(test)]
mod tests {
	use super::{Intent, normalize_feature_size};

	#[test]
	fn feature_size_normalizes_to_gb() {
		assert_eq!(normalize_feature_size("램 16 기가"), "16GB");
		assert_eq!(normalize_feature_size("용량512기가"), "512GB");
		assert_eq!(normalize_feature_size("하드 1000 GB"), "1000GB");
	}

	#[test]
	fn feature_without_size_phrase_is_left_alone() {
		assert_eq!(normalize_feature_size("무선"), "무선");
	}

	#[test]
	fn refinement_is_idempotent_on_clean_intents() {
		let intent = Intent {
			features: vec!["16GB".to_string(), "무선".to_string()],
			categories: vec!["컴퓨터·노트북".to_string()],
			..Default::default()
		};
		let refined = intent.clone().refined("노트북 추천");

		assert_eq!(refined.features, intent.features);
		assert_eq!(refined.categories, intent.categories);
		assert!(refined.mid_categories.is_empty());
	}

	#[test]
	fn mobile_category_narrows_to_carrier_in_query() {
		let intent = Intent {
			categories: vec!["휴대폰·스마트워치".to_string(), "태블릿·이북리더기".to_string()],
			..Default::default()
		};
		let refined = intent.refined("SKT 갤럭시 S24");

		assert_eq!(refined.categories, vec!["휴대폰·스마트워치".to_string()]);
		assert_eq!(refined.mid_categories, vec!["SKT".to_string()]);
	}

	#[test]
	fn mobile_category_without_carrier_keeps_categories() {
		let intent = Intent {
			categories: vec!["휴대폰·스마트워치".to_string()],
			..Default::default()
		};
		let refined = intent.refined("갤럭시 S24 추천");

		assert_eq!(refined.categories, vec!["휴대폰·스마트워치".to_string()]);
		assert!(refined.mid_categories.is_empty());
	}
}
