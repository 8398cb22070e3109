pub mod search;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::{Map, Value};

pub use error::{Error, Result};
pub use search::{Page, ProductRow, SearchRequest, SearchResponse};

use plaza_config::{Config, LlmProviderConfig, RetrieverProviderConfig};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One raw candidate row from the retrieval collaborator: the stored
/// payload plus the similarity score, when the retriever surfaced one.
#[derive(Clone, Debug)]
pub struct RetrievedRow {
	pub payload: Map<String, Value>,
	pub score: Option<f32>,
}

/// The intent collaborator: free-text query in, structured intent JSON out.
pub trait IntentProvider
where
	Self: Send + Sync,
{
	fn extract<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Value>>;
}

/// The retrieval collaborator: refined query, wire-shaped filter and
/// strategy in; candidates in retrieval-rank order out. An empty filter
/// object means "match all".
pub trait RetrieverProvider
where
	Self: Send + Sync,
{
	fn retrieve<'a>(
		&'a self,
		cfg: &'a RetrieverProviderConfig,
		query: &'a str,
		filter: &'a Value,
		strategy: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<RetrievedRow>>>;
}

/// Collaborator handles injected at construction. The pipeline never
/// reaches into process-wide state.
#[derive(Clone)]
pub struct Providers {
	pub intent: Arc<dyn IntentProvider>,
	pub retriever: Arc<dyn RetrieverProvider>,
}
impl Providers {
	pub fn new(intent: Arc<dyn IntentProvider>, retriever: Arc<dyn RetrieverProvider>) -> Self {
		Self { intent, retriever }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { intent: provider.clone(), retriever: provider }
	}
}

struct DefaultProviders;

impl IntentProvider for DefaultProviders {
	fn extract<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Value>> {
		Box::pin(plaza_providers::intent::extract(cfg, query))
	}
}

impl RetrieverProvider for DefaultProviders {
	fn retrieve<'a>(
		&'a self,
		cfg: &'a RetrieverProviderConfig,
		query: &'a str,
		filter: &'a Value,
		strategy: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<RetrievedRow>>> {
		Box::pin(async move {
			let rows = plaza_providers::retriever::retrieve(cfg, query, filter, strategy, top_k)
				.await?;

			Ok(rows
				.into_iter()
				.map(|(payload, score)| RetrievedRow { payload, score })
				.collect())
		})
	}
}

pub struct PlazaService {
	pub cfg: Config,
	pub providers: Providers,
}
impl PlazaService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
