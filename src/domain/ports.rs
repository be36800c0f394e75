use crate::domain::model::ApplicationPayload;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Seam between the wizard and the outbound HTTP call. The wizard only ever
/// sees this trait, so tests drive the flow with an in-memory double.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<()>;
}
