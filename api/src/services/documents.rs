use crate::error::{ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::orchestrator::CrudOrchestrator;
use crate::strategies::documents::DocumentsFromCsvImageImportStrategy;
use rtf_model::{ImageImportOptions, ParentContext};
use std::path::Path;

#[derive(Clone)]
pub struct DocumentService {
    orchestrator: CrudOrchestrator,
}

impl DocumentService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub async fn import_images_from_csv(
        &self,
        context: ParentContext,
        path: &Path,
        options: Option<ImageImportOptions>,
    ) -> ApiResult<()> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn DocumentsFromCsvImageImportStrategy>()?;
        strategy
            .import(context, path, options)
            .await
            .during(OperationKind::Import, "Document", context)
    }
}
