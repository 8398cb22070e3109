use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub search: Search,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	#[serde(default = "default_bind_localhost_only")]
	pub bind_localhost_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Number of candidates requested from the retriever and scored per
	/// request; also the denominator of the rank subscore.
	pub top_k: u32,
	pub default_page_size: u32,
	pub max_page_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub intent: LlmProviderConfig,
	pub retriever: RetrieverProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RetrieverProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

fn default_bind_localhost_only() -> bool {
	true
}
