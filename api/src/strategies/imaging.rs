use crate::error::ApiResult;
use crate::operation::capability;
use async_trait::async_trait;
use rtf_model::{ArtifactId, ImagingSetJobRequest, ParentContext, RestService, RestServiceExt};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Starts an imaging set job and returns its id without waiting for it.
#[async_trait]
pub trait ImagingJobRunStrategy: Send + Sync {
    async fn run(
        &self,
        context: ParentContext,
        imaging_set_id: ArtifactId,
        request: Option<ImagingSetJobRequest>,
    ) -> ApiResult<i64>;
}

capability!(ImagingJobRunStrategy, Run, "ImagingJob");

/// Re-images the documents that errored in the last run of an imaging set.
///
/// `None` options mean all errored documents with system defaults. Returns the
/// job id as soon as the job is queued.
#[async_trait]
pub trait ImagingJobRetryErrorsStrategy: Send + Sync {
    async fn retry_errors(
        &self,
        context: ParentContext,
        imaging_set_id: ArtifactId,
        request: Option<ImagingSetJobRequest>,
    ) -> ApiResult<i64>;
}

capability!(ImagingJobRetryErrorsStrategy, RetryErrors, "ImagingJob");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ImagingJobResponse {
    #[serde(rename = "ImagingJobID")]
    imaging_job_id: i64,
}

pub struct ImagingJobStrategy {
    rest: Arc<dyn RestService>,
}

impl ImagingJobStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }

    async fn submit(
        &self,
        context: ParentContext,
        imaging_set_id: ArtifactId,
        action: &str,
        request: Option<ImagingSetJobRequest>,
    ) -> ApiResult<i64> {
        let endpoint = format!(
            "relativity-imaging/v1/workspaces/{}/imaging-sets/{}/{}",
            context.id(),
            imaging_set_id,
            action
        );
        let body = json!({ "request": request.unwrap_or_default() });

        let response: ImagingJobResponse = self.rest.post(&endpoint, &body).await?;
        debug!(
            "Queued imaging job {} ({}) for set {} in {}",
            response.imaging_job_id, action, imaging_set_id, context
        );
        Ok(response.imaging_job_id)
    }
}

#[async_trait]
impl ImagingJobRunStrategy for ImagingJobStrategy {
    async fn run(
        &self,
        context: ParentContext,
        imaging_set_id: ArtifactId,
        request: Option<ImagingSetJobRequest>,
    ) -> ApiResult<i64> {
        self.submit(context, imaging_set_id, "run", request).await
    }
}

#[async_trait]
impl ImagingJobRetryErrorsStrategy for ImagingJobStrategy {
    async fn retry_errors(
        &self,
        context: ParentContext,
        imaging_set_id: ArtifactId,
        request: Option<ImagingSetJobRequest>,
    ) -> ApiResult<i64> {
        self.submit(context, imaging_set_id, "retry-errors", request)
            .await
    }
}
