//! Per-entity service facades.
//!
//! A service forwards CRUD and `require` to the [`CrudOrchestrator`] and
//! entity-specific actions straight to the resolved strategy. Every
//! strategy is resolved before its first remote call, and failures
//! leave the facade tagged with the step that failed.

mod client;
mod documents;
mod folder;
mod imaging;
mod instance_setting;
mod motd;
mod production;
mod tab;

pub use client::ClientService;
pub use documents::DocumentService;
pub use folder::FolderService;
pub use imaging::ImagingJobService;
pub use instance_setting::InstanceSettingService;
pub use motd::MotdService;
pub use production::ProductionPlaceholderService;
pub use tab::TabService;

use crate::error::{ApiError, ApiResult};
use crate::orchestrator::CrudOrchestrator;
use crate::registration::register_defaults;
use crate::resolver::StrategyResolver;
use rtf_model::{HttpRestService, RestConfig, RestService};
use std::sync::Arc;

/// CRUD pass-throughs shared by every entity service.
macro_rules! crud_operations {
    ($entity:ty) => {
        pub async fn create(
            &self,
            context: rtf_model::ParentContext,
            entity: $entity,
        ) -> $crate::error::ApiResult<$entity> {
            self.orchestrator.create(context, entity).await
        }

        /// Creates `entity` or brings the matching existing one up to date.
        pub async fn require(
            &self,
            context: rtf_model::ParentContext,
            entity: $entity,
        ) -> $crate::error::ApiResult<$entity> {
            self.orchestrator.require(context, entity).await
        }

        pub async fn get(
            &self,
            context: rtf_model::ParentContext,
            id: rtf_model::ArtifactId,
        ) -> $crate::error::ApiResult<Option<$entity>> {
            self.orchestrator.get::<$entity>(context, id).await
        }

        pub async fn get_by_name(
            &self,
            context: rtf_model::ParentContext,
            name: &str,
        ) -> $crate::error::ApiResult<Option<$entity>> {
            self.orchestrator.get_by_name::<$entity>(context, name).await
        }

        pub async fn update(
            &self,
            context: rtf_model::ParentContext,
            entity: &$entity,
        ) -> $crate::error::ApiResult<()> {
            self.orchestrator.update(context, entity).await
        }

        pub async fn delete(
            &self,
            context: rtf_model::ParentContext,
            id: rtf_model::ArtifactId,
        ) -> $crate::error::ApiResult<()> {
            self.orchestrator.delete::<$entity>(context, id).await
        }
    };
}

pub(crate) use crud_operations;

/// Entry point: one orchestrator over one registration table, handing out
/// cheap per-entity services.
#[derive(Clone)]
pub struct ApiFacade {
    orchestrator: CrudOrchestrator,
}

impl ApiFacade {
    pub fn new(resolver: Arc<StrategyResolver>) -> Self {
        Self {
            orchestrator: CrudOrchestrator::new(resolver),
        }
    }

    /// Every built-in strategy wired against `rest`.
    pub fn from_rest(rest: Arc<dyn RestService>) -> Self {
        Self::new(Arc::new(register_defaults(rest)))
    }

    /// Every built-in strategy wired against an HTTP transport.
    pub fn from_config(config: RestConfig) -> ApiResult<Self> {
        let rest = HttpRestService::new(config).map_err(|err| ApiError::validation(err.to_string()))?;
        Ok(Self::from_rest(Arc::new(rest)))
    }

    pub fn with_serialized_require(mut self) -> Self {
        self.orchestrator = self.orchestrator.with_serialized_require();
        self
    }

    pub fn orchestrator(&self) -> &CrudOrchestrator {
        &self.orchestrator
    }

    pub fn resolver(&self) -> &Arc<StrategyResolver> {
        self.orchestrator.resolver()
    }

    pub fn tabs(&self) -> TabService {
        TabService::new(self.orchestrator.clone())
    }

    pub fn folders(&self) -> FolderService {
        FolderService::new(self.orchestrator.clone())
    }

    pub fn production_placeholders(&self) -> ProductionPlaceholderService {
        ProductionPlaceholderService::new(self.orchestrator.clone())
    }

    pub fn clients(&self) -> ClientService {
        ClientService::new(self.orchestrator.clone())
    }

    pub fn instance_settings(&self) -> InstanceSettingService {
        InstanceSettingService::new(self.orchestrator.clone())
    }

    pub fn imaging_jobs(&self) -> ImagingJobService {
        ImagingJobService::new(self.orchestrator.clone())
    }

    pub fn documents(&self) -> DocumentService {
        DocumentService::new(self.orchestrator.clone())
    }

    pub fn motd(&self) -> MotdService {
        MotdService::new(self.orchestrator.clone())
    }
}
