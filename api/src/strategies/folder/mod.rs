//! Folder manager strategies. Every payload goes through [`dto`] so tree
//! structure is checked at the boundary.

pub mod dto;

use self::dto::{
    map_folders, FolderAccessStatusDto, FolderDto, FolderMoveResponseDto,
};
use super::kepler::{manager_endpoint, QueryableEntity};
use super::{CreateStrategy, DeleteStrategy, GetByIdStrategy, UpdateStrategy};
use crate::error::{ApiError, ApiResult};
use crate::operation::capability;
use async_trait::async_trait;
use rtf_model::{
    ArtifactId, Folder, FolderAccessStatus, FolderMoveResponse, NamedArtifact, OptionalResponse,
    ParentContext, RestService, RestServiceExt,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

const FOLDER_MANAGER: &str = "Relativity.Services.Folder.IFolderModule/Folder Manager";

impl QueryableEntity for Folder {
    const OBJECT_TYPE: &'static str = "Folder";
}

#[async_trait]
pub trait FolderGetWorkspaceRootStrategy: Send + Sync {
    async fn get_workspace_root(&self, context: ParentContext) -> ApiResult<Folder>;
}

capability!(FolderGetWorkspaceRootStrategy, GetWorkspaceRoot, "Folder");

/// Direct children of a folder, without their own subtrees.
#[async_trait]
pub trait FolderGetSubfoldersStrategy: Send + Sync {
    async fn get_subfolders(&self, context: ParentContext, parent_id: ArtifactId)
        -> ApiResult<Vec<Folder>>;
}

capability!(FolderGetSubfoldersStrategy, GetSubfolders, "Folder");

#[async_trait]
pub trait FolderGetFolderTreeStrategy: Send + Sync {
    /// Top-level folders with `expanded` and the path to `selected` filled in.
    async fn get_folder_tree(
        &self,
        context: ParentContext,
        expanded: &[ArtifactId],
        selected: Option<ArtifactId>,
    ) -> ApiResult<Vec<Folder>>;
}

capability!(FolderGetFolderTreeStrategy, GetFolderTree, "Folder");

#[async_trait]
pub trait FolderGetAccessStatusStrategy: Send + Sync {
    async fn get_access_status(&self, context: ParentContext, id: ArtifactId)
        -> ApiResult<FolderAccessStatus>;
}

capability!(FolderGetAccessStatusStrategy, GetAccessStatus, "Folder");

#[async_trait]
pub trait FolderMoveStrategy: Send + Sync {
    async fn move_folder(
        &self,
        context: ParentContext,
        id: ArtifactId,
        destination_id: ArtifactId,
    ) -> ApiResult<FolderMoveResponse>;
}

capability!(FolderMoveStrategy, Move, "Folder");

/// Deletes every folder in the workspace that holds no documents.
#[async_trait]
pub trait FolderDeleteUnusedStrategy: Send + Sync {
    async fn delete_unused(&self, context: ParentContext) -> ApiResult<()>;
}

capability!(FolderDeleteUnusedStrategy, DeleteUnused, "Folder");

fn id_body(context: ParentContext, id: ArtifactId) -> serde_json::Value {
    json!({ "workspaceArtifactID": context.id(), "artifactID": id })
}

pub struct FolderGetByIdStrategy {
    rest: Arc<dyn RestService>,
}

impl FolderGetByIdStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl GetByIdStrategy<Folder> for FolderGetByIdStrategy {
    async fn get(&self, context: ParentContext, id: ArtifactId) -> ApiResult<Option<Folder>> {
        let dto: Option<FolderDto> = self
            .rest
            .post(
                &manager_endpoint(FOLDER_MANAGER, "ReadSingleAsync"),
                &id_body(context, id),
            )
            .await
            .optional()?;
        dto.map(Folder::try_from).transpose()
    }
}

/// Creates a folder; one without a parent goes under the workspace root.
pub struct FolderCreateStrategy {
    rest: Arc<dyn RestService>,
    get_by_id: Arc<dyn GetByIdStrategy<Folder>>,
    get_root: Arc<dyn FolderGetWorkspaceRootStrategy>,
}

impl FolderCreateStrategy {
    pub fn new(
        rest: Arc<dyn RestService>,
        get_by_id: Arc<dyn GetByIdStrategy<Folder>>,
        get_root: Arc<dyn FolderGetWorkspaceRootStrategy>,
    ) -> Self {
        Self {
            rest,
            get_by_id,
            get_root,
        }
    }
}

#[async_trait]
impl CreateStrategy<Folder> for FolderCreateStrategy {
    async fn create(&self, context: ParentContext, mut entity: Folder) -> ApiResult<Folder> {
        entity.fill_required_properties();
        if entity.parent_id().map_or(true, |id| id <= 0) {
            let root = self.get_root.get_workspace_root(context).await?;
            debug!("Placing folder '{}' under root {}", entity.name, root.artifact_id);
            entity.parent_folder = Some(NamedArtifact::named(root.artifact_id, root.name));
        }

        let body = json!({
            "workspaceArtifactID": context.id(),
            "folder": FolderDto::from(&entity),
        });
        let id: ArtifactId = self
            .rest
            .post(&manager_endpoint(FOLDER_MANAGER, "CreateSingleAsync"), &body)
            .await?;

        self.get_by_id
            .get(context, id)
            .await?
            .ok_or_else(|| ApiError::not_found("Folder", id, context))
    }
}

pub struct FolderUpdateStrategy {
    rest: Arc<dyn RestService>,
}

impl FolderUpdateStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl UpdateStrategy<Folder> for FolderUpdateStrategy {
    async fn update(&self, context: ParentContext, entity: &Folder) -> ApiResult<()> {
        let body = json!({
            "workspaceArtifactID": context.id(),
            "folder": FolderDto::from(entity),
        });
        self.rest
            .post_unit(&manager_endpoint(FOLDER_MANAGER, "UpdateSingleAsync"), &body)
            .await?;
        Ok(())
    }
}

pub struct FolderDeleteStrategy {
    rest: Arc<dyn RestService>,
}

impl FolderDeleteStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl DeleteStrategy<Folder> for FolderDeleteStrategy {
    async fn delete(&self, context: ParentContext, id: ArtifactId) -> ApiResult<()> {
        self.rest
            .post_unit(
                &manager_endpoint(FOLDER_MANAGER, "DeleteSingleAsync"),
                &id_body(context, id),
            )
            .await?;
        Ok(())
    }
}

/// Folder manager actions beyond CRUD.
pub struct FolderManagerStrategy {
    rest: Arc<dyn RestService>,
}

impl FolderManagerStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl FolderGetWorkspaceRootStrategy for FolderManagerStrategy {
    async fn get_workspace_root(&self, context: ParentContext) -> ApiResult<Folder> {
        let dto: FolderDto = self
            .rest
            .post(
                &manager_endpoint(FOLDER_MANAGER, "GetWorkspaceRootAsync"),
                &json!({ "workspaceArtifactID": context.id() }),
            )
            .await?;
        Folder::try_from(dto)
    }
}

#[async_trait]
impl FolderGetSubfoldersStrategy for FolderManagerStrategy {
    async fn get_subfolders(
        &self,
        context: ParentContext,
        parent_id: ArtifactId,
    ) -> ApiResult<Vec<Folder>> {
        let dtos: Vec<FolderDto> = self
            .rest
            .post(
                &manager_endpoint(FOLDER_MANAGER, "GetChildrenAsync"),
                &json!({ "workspaceArtifactID": context.id(), "parentId": parent_id }),
            )
            .await?;
        map_folders(dtos)
    }
}

#[async_trait]
impl FolderGetFolderTreeStrategy for FolderManagerStrategy {
    async fn get_folder_tree(
        &self,
        context: ParentContext,
        expanded: &[ArtifactId],
        selected: Option<ArtifactId>,
    ) -> ApiResult<Vec<Folder>> {
        let dtos: Vec<FolderDto> = self
            .rest
            .post(
                &manager_endpoint(FOLDER_MANAGER, "GetFolderTreeAsync"),
                &json!({
                    "workspaceArtifactID": context.id(),
                    "expandedNodes": expanded,
                    "selectedFolderId": selected.unwrap_or(0),
                }),
            )
            .await?;
        map_folders(dtos)
    }
}

#[async_trait]
impl FolderGetAccessStatusStrategy for FolderManagerStrategy {
    async fn get_access_status(
        &self,
        context: ParentContext,
        id: ArtifactId,
    ) -> ApiResult<FolderAccessStatus> {
        let dto: FolderAccessStatusDto = self
            .rest
            .post(
                &manager_endpoint(FOLDER_MANAGER, "GetAccessStatusAsync"),
                &id_body(context, id),
            )
            .await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl FolderMoveStrategy for FolderManagerStrategy {
    async fn move_folder(
        &self,
        context: ParentContext,
        id: ArtifactId,
        destination_id: ArtifactId,
    ) -> ApiResult<FolderMoveResponse> {
        let dto: FolderMoveResponseDto = self
            .rest
            .post(
                &manager_endpoint(FOLDER_MANAGER, "MoveFolderAsync"),
                &json!({
                    "workspaceArtifactID": context.id(),
                    "artifactID": id,
                    "destinationFolderID": destination_id,
                }),
            )
            .await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl FolderDeleteUnusedStrategy for FolderManagerStrategy {
    async fn delete_unused(&self, context: ParentContext) -> ApiResult<()> {
        self.rest
            .post_unit(
                &manager_endpoint(FOLDER_MANAGER, "DeleteUnusedFoldersAsync"),
                &json!({ "workspaceArtifactID": context.id() }),
            )
            .await?;
        Ok(())
    }
}
