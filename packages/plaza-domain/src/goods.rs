use serde_json::{Map, Value};

/// One product record returned by the retrieval collaborator.
///
/// Raw retriever payloads are string-keyed maps with uneven coverage; this
/// record resolves every field exactly once at ingestion. Missing text
/// fields default to the empty string and missing numerics to zero, so the
/// scoring and sorting passes never consult the raw map again.
///
/// The trailing group of fields is derived by the pipeline itself and is
/// the only mutation the pipeline performs on a candidate.
#[derive(Clone, Debug, Default)]
pub struct Goods {
	pub goods_no: String,
	pub goods_name: String,
	pub brand_name: String,
	pub article_name: String,
	pub category_small: String,
	pub category_mid: String,
	pub category_large: String,
	pub features: String,
	pub search_keywords: String,
	pub card_discount_names: String,
	pub card_discount_rate: i64,
	pub sale_status_code: String,
	pub sale_status_name: String,
	pub goods_type_code: String,
	pub is_appliance: bool,
	pub is_service: bool,
	pub sales_unit: i64,
	pub sale_qty: i64,
	pub sale_price: i64,
	pub discount_sale_price: i64,
	pub max_benefit_price: i64,
	pub review_score: f32,
	pub review_count: i64,
	pub energy_grade: String,
	pub model_launch_date: String,
	pub option_titles: String,
	pub option_values: String,
	pub content: String,

	// Derived by the pipeline per request.
	pub similarity_score: f32,
	pub similarity_rank: u32,
	pub weight: f32,
	pub weight_analysis: String,
}
impl Goods {
	pub fn from_payload(payload: &Map<String, Value>) -> Self {
		Self {
			goods_no: payload_str(payload, "GOODS_NO"),
			goods_name: payload_str(payload, "GOODS_NM"),
			brand_name: payload_str(payload, "BRND_NM"),
			article_name: payload_str(payload, "ARTC_NM"),
			category_small: payload_str(payload, "SGRP_NM"),
			category_mid: payload_str(payload, "MGRP_NM"),
			category_large: payload_str(payload, "LGRP_NM"),
			features: payload_str(payload, "FEATURES"),
			search_keywords: payload_str(payload, "SCH_KWD_NM"),
			card_discount_names: payload_str(payload, "CARD_DC_NAME_LIST"),
			card_discount_rate: payload_i64(payload, "CARD_DC_RATE"),
			sale_status_code: payload_str(payload, "GOODS_STAT_SCT_CD"),
			sale_status_name: payload_str(payload, "GOODS_STAT_SCT_NM"),
			goods_type_code: payload_str(payload, "GOODS_TP_CD"),
			is_appliance: payload_flag(payload, "APPLIANCES_YN"),
			is_service: payload_flag(payload, "SERVICE_YN"),
			sales_unit: payload_i64(payload, "SALES_UNIT"),
			sale_qty: payload_i64(payload, "SALE_QTY"),
			sale_price: payload_i64(payload, "SALE_PRC"),
			discount_sale_price: payload_i64(payload, "DSCNT_SALE_PRC"),
			max_benefit_price: payload_i64(payload, "MAX_BENEFIT_PRICE"),
			review_score: payload_f32(payload, "GDAS_SCR_SUM"),
			review_count: payload_i64(payload, "GDAS_CNT"),
			energy_grade: payload_str(payload, "ENERGEY_GRADE"),
			model_launch_date: payload_str(payload, "MDL_LNCH_DT"),
			option_titles: payload_str(payload, "OPT_DISP_NM"),
			option_values: payload_str(payload, "OPT_VAL_DESC"),
			content: payload_str(payload, "CONTENT"),
			..Default::default()
		}
	}

	/// Status code `03` marks a display-only listing that cannot be bought.
	pub fn is_display_only(&self) -> bool {
		self.sale_status_code == "03"
	}

	/// Goods types `05` and `10` are rental and consultation listings.
	pub fn is_rental_or_consult(&self) -> bool {
		matches!(self.goods_type_code.as_str(), "05" | "10")
	}
}

fn payload_str(payload: &Map<String, Value>, key: &str) -> String {
	match payload.get(key) {
		Some(Value::String(text)) => text.clone(),
		Some(Value::Number(number)) => number.to_string(),
		_ => String::new(),
	}
}

fn payload_i64(payload: &Map<String, Value>, key: &str) -> i64 {
	match payload.get(key) {
		Some(Value::Number(number)) => number
			.as_i64()
			.or_else(|| number.as_f64().map(|value| value as i64))
			.unwrap_or(0),
		Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
		_ => 0,
	}
}

fn payload_f32(payload: &Map<String, Value>, key: &str) -> f32 {
	match payload.get(key) {
		Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0) as f32,
		Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
		_ => 0.0,
	}
}

fn payload_flag(payload: &Map<String, Value>, key: &str) -> bool {
	matches!(payload.get(key), Some(Value::String(text)) if text == "Y")
}
