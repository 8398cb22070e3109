use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

const SYSTEM_PROMPT: &str = "당신은 가전전문 e커머스 검색 AI 어시스턴트 입니다. \
	사용자의 검색어를 분석하여, 그 의도에 맞는 최적의 검색 필터 조건을 완성해야 합니다. \
	반드시 JSON 객체 하나만 출력하세요.";
const FORMAT_INSTRUCTIONS: &str = r#"{
  "refined_query": "가격 관련 내용은 제거한 자연스러운 요구형 문장",
  "price_min": "가격범위 최소값(원). 의도가 없다면 0",
  "price_max": "가격범위 최대값(원). 의도가 없다면 0",
  "brand": "브랜드명",
  "article": "찾고 있는 상품의 품목. 예: 에어컨, 냉장고, TV, 이어폰",
  "categories": "적합한 카테고리명 최대 3개 배열",
  "features": "주요기능 배열",
  "discount_cards": "할인카드이름 배열",
  "review_min": "리뷰점수 최소값. 의도가 없다면 0.0",
  "review_max": "리뷰점수 최대값. 의도가 없다면 0.0",
  "is_service_request": "클리닝, 수리, 방문 상담 등 서비스 요청이면 true"
}"#;

/// Extracts structured intent for one query through an OpenAI-compatible
/// chat-completions endpoint. Non-JSON completions are retried a bounded
/// number of times.
pub async fn extract(cfg: &plaza_config::LlmProviderConfig, query: &str) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let messages = build_messages(query);

	for _ in 0..3 {
		let body = serde_json::json!({
			"model": cfg.model,
			"temperature": cfg.temperature,
			"messages": messages,
		});
		let res = client
			.post(&url)
			.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;
		if let Ok(parsed) = parse_intent_json(json) {
			return Ok(parsed);
		}
	}

	Err(eyre::eyre!("Intent response is not valid JSON."))
}

pub fn build_messages(query: &str) -> Vec<Value> {
	vec![
		serde_json::json!({ "role": "system", "content": SYSTEM_PROMPT }),
		serde_json::json!({
			"role": "user",
			"content": format!("#Format: {FORMAT_INSTRUCTIONS}\n\n#Question: {query}"),
		}),
	]
}

fn parse_intent_json(json: Value) -> Result<Value> {
	if let Some(content) = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
	{
		let parsed: Value = serde_json::from_str(content)
			.map_err(|_| eyre::eyre!("Intent content is not valid JSON."))?;

		return Ok(parsed);
	}

	if json.is_object() {
		return Ok(json);
	}

	Err(eyre::eyre!("Intent response is missing JSON content."))
}
