use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Map, Value, json};
use tower::util::ServiceExt;

use plaza_api::{routes, state::AppState};
use plaza_config::{
	Config, LlmProviderConfig, Providers as ProviderConfigs, RetrieverProviderConfig, Search,
	Service,
};
use plaza_service::{
	BoxFuture, IntentProvider, PlazaService, Providers, RetrievedRow, RetrieverProvider,
};

struct StubIntent;
impl IntentProvider for StubIntent {
	fn extract<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_query: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Value>> {
		Box::pin(async move { Ok(json!({ "article": "냉장고" })) })
	}
}

struct StubRetriever;
impl RetrieverProvider for StubRetriever {
	fn retrieve<'a>(
		&'a self,
		_cfg: &'a RetrieverProviderConfig,
		_query: &'a str,
		_filter: &'a Value,
		_strategy: &'a str,
		_top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<RetrievedRow>>> {
		Box::pin(async move {
			let payload = json!({
				"GOODS_NO": "0001",
				"GOODS_NM": "비스포크 냉장고",
				"ARTC_NM": "냉장고",
				"GOODS_STAT_SCT_CD": "01",
			});

			Ok(vec![RetrievedRow {
				payload: payload.as_object().cloned().expect("payload object"),
				score: Some(0.9),
			}])
		})
	}
}

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			bind_localhost_only: true,
		},
		search: Search { top_k: 100, default_page_size: 30, max_page_size: 100 },
		providers: ProviderConfigs {
			intent: LlmProviderConfig {
				provider_id: "stub".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/".to_string(),
				model: "m".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			retriever: RetrieverProviderConfig {
				provider_id: "stub".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/".to_string(),
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
	}
}

fn test_state() -> AppState {
	let providers = Providers::new(Arc::new(StubIntent), Arc::new(StubRetriever));

	AppState { service: Arc::new(PlazaService::with_providers(test_config(), providers)) }
}

#[tokio::test]
async fn health_returns_ok() {
	let app = routes::router(test_state());
	let response = app
		.oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
		.await
		.expect("response");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_returns_projected_products() {
	let app = routes::router(test_state());
	let request = Request::builder()
		.method("POST")
		.uri("/v1/search")
		.header(CONTENT_TYPE, "application/json")
		.body(Body::from(r#"{"query": "냉장고 추천해주세요"}"#))
		.expect("request");
	let response = app.oneshot(request).await.expect("response");

	assert_eq!(response.status(), StatusCode::OK);

	let bytes = body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
	let json: Value = serde_json::from_slice(&bytes).expect("json body");

	assert_eq!(json["total_count"], 1);
	assert_eq!(json["products"][0]["goodsNo"], "0001");
	assert_eq!(json["products"][0]["similarity_rank"], 1);
	assert!(json["products"][0]["weight"].as_f64().expect("weight") > 0.0);
	assert_eq!(json["query_kind"], "natural_language");
}

#[tokio::test]
async fn blank_query_maps_to_invalid_request() {
	let app = routes::router(test_state());
	let request = Request::builder()
		.method("POST")
		.uri("/v1/search")
		.header(CONTENT_TYPE, "application/json")
		.body(Body::from(r#"{"query": "  "}"#))
		.expect("request");
	let response = app.oneshot(request).await.expect("response");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let bytes = body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
	let json: Value = serde_json::from_slice(&bytes).expect("json body");

	assert_eq!(json["error_code"], "invalid_request");
}
