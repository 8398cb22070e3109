mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, LlmProviderConfig, Providers, RetrieverProviderConfig, Search, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_page_size == 0 {
		return Err(Error::Validation {
			message: "search.default_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_page_size < cfg.search.default_page_size {
		return Err(Error::Validation {
			message: "search.max_page_size must be at least search.default_page_size.".to_string(),
		});
	}
	if cfg.providers.intent.temperature < 0.0 || !cfg.providers.intent.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.intent.temperature must be a finite number of zero or greater."
				.to_string(),
		});
	}

	for (label, timeout_ms) in [
		("intent", cfg.providers.intent.timeout_ms),
		("retriever", cfg.providers.retriever.timeout_ms),
	] {
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("providers.{label}.timeout_ms must be greater than zero."),
			});
		}
	}
	for (label, key) in [
		("intent", &cfg.providers.intent.api_key),
		("retriever", &cfg.providers.retriever.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
