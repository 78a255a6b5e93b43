use crate::error::{ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::orchestrator::CrudOrchestrator;
use crate::strategies::motd::{
    MotdClearStrategy, MotdGetStrategy, MotdIsTextOnlyStrategy, MotdUpdateStrategy,
};
use rtf_model::{Motd, ParentContext};

const MOTD: &str = "Motd";

#[derive(Clone)]
pub struct MotdService {
    orchestrator: CrudOrchestrator,
}

impl MotdService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub async fn get(&self) -> ApiResult<Motd> {
        let strategy = self.orchestrator.resolver().resolve::<dyn MotdGetStrategy>()?;
        strategy
            .get()
            .await
            .during(OperationKind::Get, MOTD, ParentContext::Admin)
    }

    pub async fn update(&self, motd: &Motd) -> ApiResult<()> {
        let strategy = self.orchestrator.resolver().resolve::<dyn MotdUpdateStrategy>()?;
        strategy
            .update(motd)
            .await
            .during(OperationKind::Update, MOTD, ParentContext::Admin)
    }

    pub async fn clear(&self) -> ApiResult<()> {
        let strategy = self.orchestrator.resolver().resolve::<dyn MotdClearStrategy>()?;
        strategy
            .clear()
            .await
            .during(OperationKind::Clear, MOTD, ParentContext::Admin)
    }

    pub async fn is_text_only(&self) -> ApiResult<bool> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn MotdIsTextOnlyStrategy>()?;
        strategy
            .is_text_only()
            .await
            .during(OperationKind::IsTextOnly, MOTD, ParentContext::Admin)
    }
}
