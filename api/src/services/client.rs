use super::crud_operations;
use crate::error::{ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::orchestrator::CrudOrchestrator;
use crate::strategies::client::ClientStatusGetChoiceIdByNameStrategy;
use rtf_model::{Artifact, ArtifactId, Client, ParentContext};

/// Clients live at admin level; pass [`ParentContext::Admin`].
#[derive(Clone)]
pub struct ClientService {
    orchestrator: CrudOrchestrator,
}

impl ClientService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    crud_operations!(Client);

    /// Artifact id of the client status choice called `name`.
    pub async fn get_status_choice_id(&self, name: &str) -> ApiResult<ArtifactId> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn ClientStatusGetChoiceIdByNameStrategy>()?;
        strategy
            .get_id(name)
            .await
            .during(OperationKind::GetIdByName, Client::KIND, ParentContext::Admin)
    }
}
