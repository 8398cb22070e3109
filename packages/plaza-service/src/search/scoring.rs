use plaza_domain::{goods::Goods, intent::Intent};

const RANK_TOP_SCORE: f32 = 3.0;
const FLAGSHIP_BRANDS: [&str; 4] = ["삼성전자", "LG전자", "Apple", "PLUX"];
const PRIVATE_LABEL_BRAND: &str = "PLUX";
/// Catalog qualifier stripped before article and category matching, so
/// `일반세탁기` still matches a 세탁기 intent.
const GENERIC_QUALIFIER: &str = "일반";
const CATEGORY_SEPARATOR: char = '·';
const KEYWORD_SEPARATOR: char = '#';

/// Brands boosted when the shopper asked for an article without naming a
/// brand.
fn flagship_brands_for(article: &str) -> &'static [&'static str] {
	match article {
		"커피머신" => &["네스프레소", "카누"],
		"선풍기" => &["신일", "루메나"],
		_ => &[],
	}
}

/// Product lines so strongly associated with an article that carrying the
/// line name in the product name is a relevance signal of its own. The
/// trailing space on 비스포크/휘센 keeps sub-brand names like 비스포크AI
/// from matching.
fn flagship_products_for(article: &str) -> &'static [&'static str] {
	match article {
		"이어폰" => &["갤럭시", "에어팟"],
		"냉장고" => &["비스포크 ", "오브제컬렉션"],
		"에어컨" => &["휘센 ", "무풍클래식"],
		_ => &[],
	}
}

/// The six named subscores of one candidate, in signal order, plus their
/// sum. Created once per candidate per request and immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBreakdown {
	pub rank: f32,
	pub brand: f32,
	pub article: f32,
	pub hashtag: f32,
	pub feature: f32,
	pub card: f32,
}
impl ScoreBreakdown {
	pub fn entries(&self) -> [(&'static str, f32); 6] {
		[
			("rank", self.rank),
			("brand", self.brand),
			("artc", self.article),
			("hashtag", self.hashtag),
			("feature", self.feature),
			("card", self.card),
		]
	}

	/// The composite relevance weight: the exact sum of the six subscores.
	pub fn weight(&self) -> f32 {
		self.entries().iter().map(|(_, score)| score).sum()
	}

	pub fn analysis(&self) -> String {
		let mut out = String::new();

		for (name, score) in self.entries() {
			out.push_str(&format!("{name}:{score:.2} "));
		}
		out.push_str(&format!("weight:{:.2}", self.weight()));

		out
	}
}

/// Scores one candidate against the intent and writes the resulting weight
/// and its breakdown back onto the candidate for observability. The intent
/// is never touched.
pub fn score_goods(goods: &mut Goods, intent: &Intent, top_k: u32) -> ScoreBreakdown {
	let breakdown = ScoreBreakdown {
		rank: rank_score(goods.similarity_rank, top_k),
		brand: brand_score(goods, &intent.brand, &intent.article),
		article: article_score(goods, &intent.article),
		hashtag: hashtag_score(goods, &intent.article, &intent.features),
		feature: feature_score(goods, &intent.features),
		card: card_score(goods, &intent.discount_cards),
	};

	goods.weight = breakdown.weight();
	goods.weight_analysis = breakdown.analysis();

	breakdown
}

/// Linear decay over the retrieval rank, max 3.0 for rank 1, truncated
/// (not rounded) to one decimal place.
fn rank_score(rank: u32, top_k: u32) -> f32 {
	if rank == 0 || top_k == 0 || rank > top_k {
		return 0.0;
	}

	let score = (top_k - rank + 1) as f32 * RANK_TOP_SCORE / top_k as f32;

	(score * 10.0).floor() / 10.0
}

/// Max 5.0 with a named brand, 4.0 in flagship bonuses without one.
fn brand_score(goods: &Goods, brand: &str, article: &str) -> f32 {
	let mut score = 0.0;

	if brand.is_empty() {
		if FLAGSHIP_BRANDS.contains(&goods.brand_name.as_str()) {
			score += 2.0;
		}
		if goods.brand_name == PRIVATE_LABEL_BRAND {
			score += 1.0;
		}
		if flagship_brands_for(article)
			.iter()
			.any(|flagship| goods.brand_name.contains(flagship))
		{
			score += 1.0;
		}

		return score;
	}

	// Brand-field and product-name matches are mutually exclusive; the
	// brand field wins.
	if goods.brand_name.contains(brand) {
		score += 5.0;
	} else if goods.goods_name.contains(brand) {
		score += 2.0;
	}

	score
}

/// Up to 5.0 when the flagship-name, article-field and category signals
/// all fire. Service listings never score on article.
fn article_score(goods: &Goods, article: &str) -> f32 {
	let mut score = 0.0;

	if article.is_empty() || goods.is_service {
		return score;
	}

	if flagship_products_for(article)
		.iter()
		.any(|flagship| goods.goods_name.contains(flagship))
	{
		score += 1.0;
	}
	if goods.article_name.replace(GENERIC_QUALIFIER, "").contains(article) {
		score += 2.0;
	}

	// Most specific category level wins; no stacking across levels.
	if category_contains(&goods.category_small, article) {
		score += 2.0;
	} else if category_contains(&goods.category_mid, article) {
		score += 1.5;
	} else if category_contains(&goods.category_large, article) {
		score += 1.0;
	}

	score
}

fn category_contains(category: &str, article: &str) -> bool {
	category
		.replace(GENERIC_QUALIFIER, "")
		.split(CATEGORY_SEPARATOR)
		.any(|token| token == article)
}

/// 1.5 per feature found verbatim among the '#'-separated keyword tokens.
fn hashtag_score(goods: &Goods, article: &str, features: &[String]) -> f32 {
	if article.is_empty() && features.is_empty() {
		return 0.0;
	}

	let matched = features
		.iter()
		.filter(|feature| !feature.is_empty())
		.filter(|feature| {
			goods
				.search_keywords
				.split(KEYWORD_SEPARATOR)
				.any(|keyword| keyword == feature.as_str())
		})
		.count();

	matched as f32 * 1.5
}

/// 2.5 per feature found in the feature text or, failing that, in the
/// product name; each feature counts at most once.
fn feature_score(goods: &Goods, features: &[String]) -> f32 {
	let matched = features
		.iter()
		.filter(|feature| !feature.is_empty())
		.filter(|feature| {
			goods.features.contains(feature.as_str()) || goods.goods_name.contains(feature.as_str())
		})
		.count();

	matched as f32 * 2.5
}

/// 10.0 per requested discount card carried by the listing.
fn card_score(goods: &Goods, discount_cards: &[String]) -> f32 {
	let matched = discount_cards
		.iter()
		.filter(|card| !card.is_empty())
		.filter(|card| goods.card_discount_names.contains(card.as_str()))
		.count();

	matched as f32 * 10.0
}
