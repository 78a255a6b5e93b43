//! Instance settings are identified by `(name, section)`, so they carry their
//! own require strategy instead of the generic name-based one.

use super::kepler::{condition_literal, query_first_artifact_id, QueryableEntity};
use super::{CreateStrategy, GetByIdStrategy, RequireStrategy, UpdateStrategy};
use crate::error::{ApiError, ApiResult, StepContext};
use crate::operation::{capability, OperationKind};
use async_trait::async_trait;
use rtf_model::{Artifact, InstanceSetting, ParentContext, RestService};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_SECTION: &str = "Relativity.Core";

#[async_trait]
pub trait InstanceSettingGetByNameAndSectionStrategy: Send + Sync {
    /// Admin-level setting with exactly this name and section, if any.
    async fn get(&self, name: &str, section: &str) -> ApiResult<Option<InstanceSetting>>;
}

capability!(
    InstanceSettingGetByNameAndSectionStrategy,
    GetByNameAndSection,
    "InstanceSetting"
);

pub struct InstanceSettingQueryStrategy {
    rest: Arc<dyn RestService>,
    get_by_id: Arc<dyn GetByIdStrategy<InstanceSetting>>,
}

impl InstanceSettingQueryStrategy {
    pub fn new(
        rest: Arc<dyn RestService>,
        get_by_id: Arc<dyn GetByIdStrategy<InstanceSetting>>,
    ) -> Self {
        Self { rest, get_by_id }
    }
}

#[async_trait]
impl InstanceSettingGetByNameAndSectionStrategy for InstanceSettingQueryStrategy {
    async fn get(&self, name: &str, section: &str) -> ApiResult<Option<InstanceSetting>> {
        let condition = format!(
            "'Name' == {} AND 'Section' == {}",
            condition_literal(name),
            condition_literal(section)
        );
        let found = query_first_artifact_id(
            self.rest.as_ref(),
            ParentContext::Admin,
            InstanceSetting::OBJECT_TYPE,
            &condition,
        )
        .await?;

        match found {
            Some(id) => self.get_by_id.get(ParentContext::Admin, id).await,
            None => Ok(None),
        }
    }
}

/// Require keyed by `(name, section)`: an empty section means
/// [`DEFAULT_SECTION`], which is where create would put the setting.
pub struct InstanceSettingRequireStrategy {
    get_by_name_and_section: Arc<dyn InstanceSettingGetByNameAndSectionStrategy>,
    get_by_id: Arc<dyn GetByIdStrategy<InstanceSetting>>,
    update: Arc<dyn UpdateStrategy<InstanceSetting>>,
    create: Arc<dyn CreateStrategy<InstanceSetting>>,
}

impl InstanceSettingRequireStrategy {
    pub fn new(
        get_by_name_and_section: Arc<dyn InstanceSettingGetByNameAndSectionStrategy>,
        get_by_id: Arc<dyn GetByIdStrategy<InstanceSetting>>,
        update: Arc<dyn UpdateStrategy<InstanceSetting>>,
        create: Arc<dyn CreateStrategy<InstanceSetting>>,
    ) -> Self {
        Self {
            get_by_name_and_section,
            get_by_id,
            update,
            create,
        }
    }

    async fn update_and_refetch(
        &self,
        context: ParentContext,
        entity: InstanceSetting,
    ) -> ApiResult<InstanceSetting> {
        let id = entity.artifact_id;
        self.update
            .update(context, &entity)
            .await
            .during(OperationKind::Update, InstanceSetting::KIND, context)?;
        self.get_by_id
            .get(context, id)
            .await
            .and_then(|found| {
                found.ok_or_else(|| ApiError::not_found(InstanceSetting::KIND, id, context))
            })
            .during(OperationKind::GetById, InstanceSetting::KIND, context)
    }
}

#[async_trait]
impl RequireStrategy<InstanceSetting> for InstanceSettingRequireStrategy {
    async fn require(
        &self,
        context: ParentContext,
        mut entity: InstanceSetting,
    ) -> ApiResult<InstanceSetting> {
        if entity.is_persisted() {
            let id = entity.artifact_id;
            self.get_by_id
                .get(context, id)
                .await
                .and_then(|found| {
                    found.ok_or_else(|| ApiError::not_found(InstanceSetting::KIND, id, context))
                })
                .during(OperationKind::GetById, InstanceSetting::KIND, context)?;
            return self.update_and_refetch(context, entity).await;
        }

        if !entity.name.trim().is_empty() {
            if entity.section.trim().is_empty() {
                entity.section = DEFAULT_SECTION.to_string();
            }
            debug!(
                "Requiring instance setting '{}' in section '{}'",
                entity.name, entity.section
            );
            let existing = self
                .get_by_name_and_section
                .get(&entity.name, &entity.section)
                .await
                .during(
                    OperationKind::GetByNameAndSection,
                    InstanceSetting::KIND,
                    context,
                )?;
            if let Some(existing) = existing {
                entity.artifact_id = existing.artifact_id;
                return self.update_and_refetch(context, entity).await;
            }
        }

        self.create
            .create(context, entity)
            .await
            .during(OperationKind::Create, InstanceSetting::KIND, context)
    }
}
