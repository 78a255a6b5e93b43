use crate::error::{ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::orchestrator::CrudOrchestrator;
use crate::strategies::imaging::{ImagingJobRetryErrorsStrategy, ImagingJobRunStrategy};
use rtf_model::{ArtifactId, ImagingSetJobRequest, ParentContext};

const IMAGING_JOB: &str = "ImagingJob";

#[derive(Clone)]
pub struct ImagingJobService {
    orchestrator: CrudOrchestrator,
}

impl ImagingJobService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Queues an imaging set job and returns its id.
    pub async fn run(
        &self,
        context: ParentContext,
        imaging_set_id: ArtifactId,
        request: Option<ImagingSetJobRequest>,
    ) -> ApiResult<i64> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn ImagingJobRunStrategy>()?;
        strategy
            .run(context, imaging_set_id, request)
            .await
            .during(OperationKind::Run, IMAGING_JOB, context)
    }

    /// Queues a re-run of the errored documents and returns the job id.
    pub async fn retry_errors(
        &self,
        context: ParentContext,
        imaging_set_id: ArtifactId,
        request: Option<ImagingSetJobRequest>,
    ) -> ApiResult<i64> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn ImagingJobRetryErrorsStrategy>()?;
        strategy
            .retry_errors(context, imaging_set_id, request)
            .await
            .during(OperationKind::RetryErrors, IMAGING_JOB, context)
    }
}
