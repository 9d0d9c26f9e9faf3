use std::sync::Arc;
use ec_core::ExposureApi;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ExposureApi>,
}
