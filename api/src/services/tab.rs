use super::crud_operations;
use crate::error::{ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::orchestrator::CrudOrchestrator;
use crate::strategies::tab::{
    TabGetAdminLevelMetadataStrategy, TabGetAllForNavigationStrategy,
    TabGetAvailableObjectTypesStrategy, TabGetEligibleParentsStrategy, TabGetTabsOrderStrategy,
};
use rtf_model::{Artifact, Meta, ObjectType, ParentContext, Tab, TabEligibleParent};

#[derive(Clone)]
pub struct TabService {
    orchestrator: CrudOrchestrator,
}

impl TabService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    crud_operations!(Tab);

    pub async fn get_available_object_types(
        &self,
        context: ParentContext,
    ) -> ApiResult<Vec<ObjectType>> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn TabGetAvailableObjectTypesStrategy>()?;
        strategy
            .get_available_object_types(context)
            .await
            .during(OperationKind::GetAvailableObjectTypes, Tab::KIND, context)
    }

    pub async fn get_admin_level_metadata(&self) -> ApiResult<Meta> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn TabGetAdminLevelMetadataStrategy>()?;
        strategy.get_admin_level_metadata().await.during(
            OperationKind::GetAdminLevelMetadata,
            Tab::KIND,
            ParentContext::Admin,
        )
    }

    pub async fn get_eligible_parents(
        &self,
        context: ParentContext,
    ) -> ApiResult<Vec<TabEligibleParent>> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn TabGetEligibleParentsStrategy>()?;
        strategy
            .get_eligible_parents(context)
            .await
            .during(OperationKind::GetEligibleParents, Tab::KIND, context)
    }

    pub async fn get_tabs_order(&self, context: ParentContext) -> ApiResult<Vec<Tab>> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn TabGetTabsOrderStrategy>()?;
        strategy
            .get_tabs_order(context)
            .await
            .during(OperationKind::GetTabsOrder, Tab::KIND, context)
    }

    pub async fn get_all_for_navigation(&self, context: ParentContext) -> ApiResult<Vec<Tab>> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn TabGetAllForNavigationStrategy>()?;
        strategy
            .get_all_for_navigation(context)
            .await
            .during(OperationKind::GetAllForNavigation, Tab::KIND, context)
    }
}
