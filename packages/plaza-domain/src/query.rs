use std::sync::LazyLock;

use regex::Regex;

/// Particles, endings and request words that rarely appear in bare keyword
/// queries.
const STOPWORDS: [&str; 20] = [
	"은", "는", "이", "가", "을", "를", "에", "에서", "와", "과", "로", "으로", "도", "만", "좀",
	"요", "입니다", "있나요", "해주세요", "추천해주세요",
];

static SENTENCE_ENDING: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(주세요|해줘|추천|있나|있나요|떤가|떤가요|을까|을까요|뭐야|뭘까|뭔가요)\s*$")
		.expect("Sentence ending pattern must compile.")
});
static BRAND_MODEL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(삼성|LG|애플|다이슨)\s+.*(TV|냉장고|폰|청소기|세탁기|에어컨)")
		.expect("Brand model pattern must compile.")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
	NaturalLanguage,
	Keyword,
}
impl QueryKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::NaturalLanguage => "natural_language",
			Self::Keyword => "keyword",
		}
	}
}

/// Rule-based guess at whether a query is conversational or a bare keyword
/// combination. Longer queries, particle-carrying queries and request-form
/// endings read as natural language; short brand-plus-model combinations
/// read as keywords.
pub fn classify_query(query: &str) -> QueryKind {
	let query = query.trim();
	let word_count = query.split_whitespace().count();

	if word_count > 5 {
		return QueryKind::NaturalLanguage;
	}
	if word_count > 2 && STOPWORDS.iter().any(|stopword| query.contains(stopword)) {
		return QueryKind::NaturalLanguage;
	}
	if SENTENCE_ENDING.is_match(query) {
		return QueryKind::NaturalLanguage;
	}
	if word_count <= 4 && BRAND_MODEL.is_match(query) {
		return QueryKind::Keyword;
	}

	QueryKind::Keyword
}
