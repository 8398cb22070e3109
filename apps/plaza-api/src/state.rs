use std::sync::Arc;

use plaza_service::PlazaService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PlazaService>,
}
impl AppState {
	pub fn new(config: plaza_config::Config) -> Self {
		Self { service: Arc::new(PlazaService::new(config)) }
	}
}
