use super::{CreateStrategy, DeleteStrategy, GetByIdStrategy, UpdateStrategy};
use crate::error::{ApiError, ApiResult};
use crate::operation::capability;
use async_trait::async_trait;
use rtf_model::{
    ArtifactId, Meta, ObjectType, OptionalResponse, ParentContext, RestService, RestServiceExt,
    Tab, TabEligibleParent,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn tabs_endpoint(context: ParentContext) -> String {
    format!(
        "relativity-data-visualization/v1/workspaces/{}/tabs",
        context.id()
    )
}

fn tab_endpoint(context: ParentContext, id: ArtifactId) -> String {
    format!("{}/{}", tabs_endpoint(context), id)
}

#[async_trait]
pub trait TabGetAvailableObjectTypesStrategy: Send + Sync {
    async fn get_available_object_types(&self, context: ParentContext)
        -> ApiResult<Vec<ObjectType>>;
}

capability!(TabGetAvailableObjectTypesStrategy, GetAvailableObjectTypes, "Tab");

/// Metadata about admin and system tabs; only exists at admin level.
#[async_trait]
pub trait TabGetAdminLevelMetadataStrategy: Send + Sync {
    async fn get_admin_level_metadata(&self) -> ApiResult<Meta>;
}

capability!(TabGetAdminLevelMetadataStrategy, GetAdminLevelMetadata, "Tab");

#[async_trait]
pub trait TabGetEligibleParentsStrategy: Send + Sync {
    async fn get_eligible_parents(&self, context: ParentContext)
        -> ApiResult<Vec<TabEligibleParent>>;
}

capability!(TabGetEligibleParentsStrategy, GetEligibleParents, "Tab");

#[async_trait]
pub trait TabGetTabsOrderStrategy: Send + Sync {
    async fn get_tabs_order(&self, context: ParentContext) -> ApiResult<Vec<Tab>>;
}

capability!(TabGetTabsOrderStrategy, GetTabsOrder, "Tab");

#[async_trait]
pub trait TabGetAllForNavigationStrategy: Send + Sync {
    async fn get_all_for_navigation(&self, context: ParentContext) -> ApiResult<Vec<Tab>>;
}

capability!(TabGetAllForNavigationStrategy, GetAllForNavigation, "Tab");

pub struct TabGetByIdStrategy {
    rest: Arc<dyn RestService>,
}

impl TabGetByIdStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl GetByIdStrategy<Tab> for TabGetByIdStrategy {
    async fn get(&self, context: ParentContext, id: ArtifactId) -> ApiResult<Option<Tab>> {
        let tab: Option<Tab> = self
            .rest
            .get(&tab_endpoint(context, id), &[])
            .await
            .optional()?;
        Ok(tab)
    }
}

pub struct TabCreateStrategy {
    rest: Arc<dyn RestService>,
    get_by_id: Arc<dyn GetByIdStrategy<Tab>>,
}

impl TabCreateStrategy {
    pub fn new(rest: Arc<dyn RestService>, get_by_id: Arc<dyn GetByIdStrategy<Tab>>) -> Self {
        Self { rest, get_by_id }
    }
}

#[async_trait]
impl CreateStrategy<Tab> for TabCreateStrategy {
    async fn create(&self, context: ParentContext, mut entity: Tab) -> ApiResult<Tab> {
        entity.fill_required_properties();

        let id: ArtifactId = self
            .rest
            .post(&tabs_endpoint(context), &json!({ "tabRequest": entity }))
            .await?;

        self.get_by_id
            .get(context, id)
            .await?
            .ok_or_else(|| ApiError::not_found("Tab", id, context))
    }
}

pub struct TabUpdateStrategy {
    rest: Arc<dyn RestService>,
}

impl TabUpdateStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl UpdateStrategy<Tab> for TabUpdateStrategy {
    async fn update(&self, context: ParentContext, entity: &Tab) -> ApiResult<()> {
        self.rest
            .put(
                &tab_endpoint(context, entity.artifact_id),
                &json!({ "tabRequest": entity }),
            )
            .await?;
        Ok(())
    }
}

pub struct TabDeleteStrategy {
    rest: Arc<dyn RestService>,
}

impl TabDeleteStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl DeleteStrategy<Tab> for TabDeleteStrategy {
    async fn delete(&self, context: ParentContext, id: ArtifactId) -> ApiResult<()> {
        self.rest.delete(&tab_endpoint(context, id), &[]).await?;
        Ok(())
    }
}

/// Read-only tab listings.
pub struct TabQueryStrategy {
    rest: Arc<dyn RestService>,
}

impl TabQueryStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        context: ParentContext,
        suffix: &str,
    ) -> ApiResult<T> {
        let endpoint = format!("{}/{}", tabs_endpoint(context), suffix);
        Ok(self.rest.get(&endpoint, &[]).await?)
    }
}

#[async_trait]
impl TabGetAvailableObjectTypesStrategy for TabQueryStrategy {
    async fn get_available_object_types(
        &self,
        context: ParentContext,
    ) -> ApiResult<Vec<ObjectType>> {
        self.list(context, "available-object-types").await
    }
}

#[async_trait]
impl TabGetAdminLevelMetadataStrategy for TabQueryStrategy {
    async fn get_admin_level_metadata(&self) -> ApiResult<Meta> {
        self.list(ParentContext::Admin, "meta").await
    }
}

#[async_trait]
impl TabGetEligibleParentsStrategy for TabQueryStrategy {
    async fn get_eligible_parents(
        &self,
        context: ParentContext,
    ) -> ApiResult<Vec<TabEligibleParent>> {
        self.list(context, "eligible-parents").await
    }
}

#[async_trait]
impl TabGetTabsOrderStrategy for TabQueryStrategy {
    async fn get_tabs_order(&self, context: ParentContext) -> ApiResult<Vec<Tab>> {
        self.list(context, "order").await
    }
}

#[async_trait]
impl TabGetAllForNavigationStrategy for TabQueryStrategy {
    async fn get_all_for_navigation(&self, context: ParentContext) -> ApiResult<Vec<Tab>> {
        self.list(context, "navigation").await
    }
}
