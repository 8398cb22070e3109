mod filter;
mod paging;
mod scoring;
mod sort;

pub use filter::{FieldFilter, FilterField, FilterPredicate, RangeFilter, compile_filter};
pub use paging::{Page, paginate};
pub use scoring::{ScoreBreakdown, score_goods};
pub use sort::{attach_ranks, sort_goods};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, PlazaService, Result};
use plaza_domain::{
	goods::Goods,
	intent::Intent,
	query::{QueryKind, classify_query},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub page: Option<u32>,
	pub page_size: Option<u32>,
	pub top_k: Option<u32>,
}

/// One product row of the paginated response, projected from an ordered
/// candidate. Field names follow the storefront's camelCase contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
	pub goods_no: String,
	pub goods_stat_sct_nm: String,
	pub brnd_nm: String,
	pub goods_nm: String,
	pub artc_nm: String,
	pub category_nm: String,
	pub sale_prc: i64,
	pub dscnt_sale_prc: i64,
	pub max_benefit_price: i64,
	pub card_dc_rate: i64,
	pub card_dc_name_list: String,
	pub feature_info: String,
	pub sch_kwd_nm: String,
	pub sale_qty: i64,
	pub sales_unit: i64,
	pub gdas_scr_sum: f32,
	pub gdas_cnt: i64,
	pub energey_grade: String,
	pub mdl_lnch_dt: String,
	// The similarity and weight diagnostics keep their snake_case names on
	// the wire; the storefront consumes them as-is.
	#[serde(rename = "similarity_score")]
	pub similarity_score: f32,
	#[serde(rename = "similarity_rank")]
	pub similarity_rank: u32,
	pub weight: f32,
	#[serde(rename = "weight_analysis")]
	pub weight_analysis: String,
	pub content: String,
}
impl ProductRow {
	fn from_goods(goods: &Goods) -> Self {
		Self {
			goods_no: goods.goods_no.clone(),
			goods_stat_sct_nm: goods.sale_status_name.clone(),
			brnd_nm: goods.brand_name.clone(),
			goods_nm: goods.goods_name.clone(),
			artc_nm: goods.article_name.clone(),
			category_nm: goods.category_large.clone(),
			sale_prc: goods.sale_price,
			dscnt_sale_prc: goods.discount_sale_price,
			max_benefit_price: goods.max_benefit_price,
			card_dc_rate: goods.card_discount_rate,
			card_dc_name_list: goods.card_discount_names.clone(),
			feature_info: feature_info(goods),
			sch_kwd_nm: goods.search_keywords.clone(),
			sale_qty: goods.sale_qty,
			sales_unit: goods.sales_unit,
			gdas_scr_sum: goods.review_score,
			gdas_cnt: goods.review_count,
			energey_grade: goods.energy_grade.clone(),
			mdl_lnch_dt: goods.model_launch_date.clone(),
			similarity_score: goods.similarity_score,
			similarity_rank: goods.similarity_rank,
			weight: goods.weight,
			weight_analysis: goods.weight_analysis.clone(),
			content: goods.content.clone(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub trace_id: Uuid,
	pub query_kind: String,
	pub intent: Intent,
	pub filter: Value,
	pub products: Vec<ProductRow>,
	pub total_count: usize,
	pub total_pages: u32,
	pub page: u32,
	pub page_size: u32,
}

const MAX_FEATURE_OPTIONS: usize = 3;

/// Pairs up to three option titles with their values for the storefront's
/// short feature preview.
fn feature_info(goods: &Goods) -> String {
	let titles = goods.option_titles.split(',').map(str::trim);
	let values = goods.option_values.split(',').map(str::trim);
	let lines: Vec<String> = titles
		.zip(values)
		.filter(|(title, value)| !title.is_empty() && !value.is_empty())
		.take(MAX_FEATURE_OPTIONS)
		.map(|(title, value)| format!(" - {title} : {value}"))
		.collect();

	lines.join("\n")
}

fn retrieval_strategy(kind: QueryKind) -> &'static str {
	// Keyword queries lean on the lexical retriever, conversational ones on
	// the dense retriever; the weights live in the retrieval collaborator.
	match kind {
		QueryKind::Keyword => "bm25_dense_73",
		QueryKind::NaturalLanguage => "bm25_dense_37",
	}
}

impl PlazaService {
	/// Runs the full post-retrieval pipeline for one query: classify, derive
	/// intent, compile the filter, retrieve, score, order and paginate. Pure
	/// per request; nothing is retained between calls.
	pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
		let query = request.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}
		if request.page == Some(0) {
			return Err(Error::InvalidRequest { message: "page starts at 1.".to_string() });
		}

		let trace_id = Uuid::new_v4();
		let kind = classify_query(query);
		let strategy = retrieval_strategy(kind);
		let top_k = request
			.top_k
			.unwrap_or(self.cfg.search.top_k)
			.clamp(1, self.cfg.search.top_k);
		let page = request.page.unwrap_or(1);
		let page_size = request
			.page_size
			.unwrap_or(self.cfg.search.default_page_size)
			.clamp(1, self.cfg.search.max_page_size);

		tracing::info!(%trace_id, query_kind = kind.as_str(), %strategy, top_k, "Search started.");

		let raw_intent = self
			.providers
			.intent
			.extract(&self.cfg.providers.intent, query)
			.await
			.map_err(|err| Error::Intent { message: err.to_string() })?;
		let intent = match serde_json::from_value::<Intent>(raw_intent) {
			Ok(intent) => intent,
			Err(err) => {
				// A malformed intent degrades to "no signal" rather than
				// failing the request.
				tracing::warn!(%trace_id, error = %err, "Intent payload malformed; using empty intent.");

				Intent::default()
			},
		};
		let intent = intent.refined(query);
		let predicate = compile_filter(query, &intent);
		let wire_filter = predicate.to_wire();
		let refined_query =
			if intent.refined_query.trim().is_empty() { query } else { intent.refined_query.as_str() };
		let rows = self
			.providers
			.retriever
			.retrieve(&self.cfg.providers.retriever, refined_query, &wire_filter, strategy, top_k)
			.await
			.map_err(|err| Error::Retriever { message: err.to_string() })?;

		tracing::info!(%trace_id, candidates = rows.len(), "Candidates retrieved.");

		let pairs = rows
			.into_iter()
			.map(|row| (Goods::from_payload(&row.payload), row.score))
			.collect::<Vec<_>>();
		let mut goods = attach_ranks(pairs);

		for item in &mut goods {
			score_goods(item, &intent, top_k);
		}

		let ordered = sort_goods(goods);
		let page = paginate(ordered, page, page_size);
		let products = page.items.iter().map(ProductRow::from_goods).collect::<Vec<_>>();

		tracing::info!(
			%trace_id,
			total = page.total_count,
			returned = products.len(),
			"Search finished.",
		);

		Ok(SearchResponse {
			trace_id,
			query_kind: kind.as_str().to_string(),
			intent,
			filter: wire_filter,
			products,
			total_count: page.total_count,
			total_pages: page.total_pages,
			page: page.current_page,
			page_size: page.page_size,
		})
	}
}

#[cfg(test)]
mod tests {
	use plaza_domain::goods::Goods;

	use super::feature_info;

	#[test]
	fn feature_info_pairs_up_to_three_options() {
		let goods = Goods {
			option_titles: "색상,용량,에너지효율,소비전력".to_string(),
			option_values: "스노우화이트,870L,1등급,34.5kWh".to_string(),
			..Default::default()
		};
		let info = feature_info(&goods);

		assert_eq!(info, " - 색상 : 스노우화이트\n - 용량 : 870L\n - 에너지효율 : 1등급");
	}

	#[test]
	fn feature_info_is_empty_without_options() {
		assert!(feature_info(&Goods::default()).is_empty());
	}

	#[test]
	fn feature_info_skips_unpaired_entries() {
		let goods = Goods {
			option_titles: "색상,용량".to_string(),
			option_values: "블랙".to_string(),
			..Default::default()
		};

		assert_eq!(feature_info(&goods), " - 색상 : 블랙");
	}
}
