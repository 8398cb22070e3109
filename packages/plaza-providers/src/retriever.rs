use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::{Map, Value};

/// Fetches candidates from the retrieval service. The filter travels in its
/// wire shape untouched; `{}` asks the service to match every record. Rows
/// come back in retrieval-rank order.
pub async fn retrieve(
	cfg: &plaza_config::RetrieverProviderConfig,
	query: &str,
	filter: &Value,
	strategy: &str,
	top_k: u32,
) -> Result<Vec<(Map<String, Value>, Option<f32>)>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"query": query,
		"filter": filter,
		"strategy": strategy,
		"top_k": top_k,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	parse_retrieve_response(json)
}

fn parse_retrieve_response(json: Value) -> Result<Vec<(Map<String, Value>, Option<f32>)>> {
	let results = json
		.get("results")
		.or_else(|| json.get("data"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Retrieve response is missing results array."))?;
	let mut out = Vec::with_capacity(results.len());

	for item in results {
		let payload = item
			.get("payload")
			.or_else(|| item.get("metadata"))
			.and_then(|v| v.as_object())
			.cloned()
			.ok_or_else(|| eyre::eyre!("Retrieve result missing payload object."))?;
		let score = item
			.get("score")
			.or_else(|| item.get("similarity_score"))
			.and_then(|v| v.as_f64())
			.map(|v| v as f32);

		out.push((payload, score));
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_rows_in_retrieval_order() {
		let json = serde_json::json!({
			"results": [
				{ "payload": { "GOODS_NO": "2" }, "score": 0.4 },
				{ "payload": { "GOODS_NO": "1" }, "score": 0.9 }
			]
		});
		let rows = parse_retrieve_response(json).expect("parse failed");

		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].0.get("GOODS_NO").and_then(|v| v.as_str()), Some("2"));
		assert_eq!(rows[0].1, Some(0.4));
	}

	#[test]
	fn scores_are_optional() {
		let json = serde_json::json!({
			"data": [
				{ "metadata": { "GOODS_NO": "7" } }
			]
		});
		let rows = parse_retrieve_response(json).expect("parse failed");

		assert_eq!(rows[0].1, None);
	}

	#[test]
	fn missing_results_array_is_an_error() {
		assert!(parse_retrieve_response(serde_json::json!({ "ok": true })).is_err());
	}
}
