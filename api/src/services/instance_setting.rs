use super::crud_operations;
use crate::error::{ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::orchestrator::CrudOrchestrator;
use crate::strategies::instance_setting::InstanceSettingGetByNameAndSectionStrategy;
use rtf_model::{Artifact, InstanceSetting, ParentContext};

/// Instance settings live at admin level; pass [`ParentContext::Admin`].
#[derive(Clone)]
pub struct InstanceSettingService {
    orchestrator: CrudOrchestrator,
}

impl InstanceSettingService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    crud_operations!(InstanceSetting);

    pub async fn get_by_name_and_section(
        &self,
        name: &str,
        section: &str,
    ) -> ApiResult<Option<InstanceSetting>> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn InstanceSettingGetByNameAndSectionStrategy>()?;
        strategy.get(name, section).await.during(
            OperationKind::GetByNameAndSection,
            InstanceSetting::KIND,
            ParentContext::Admin,
        )
    }
}
