use async_trait::async_trait;

use crate::types::{ExposureCheckResponse, SearchRequest};
use crate::Result;

#[async_trait]
pub trait ExposureApi: Send + Sync {
    /// Issue one exposure check. Implementations return `Error::Transport`
    /// for network failures, non-2xx statuses and unreadable bodies. A
    /// decoded body is returned as-is, including `success: false` payloads.
    async fn check_exposure(&self, request: &SearchRequest) -> Result<ExposureCheckResponse>;
}
