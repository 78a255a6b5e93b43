//! Wire shapes of the folder manager and their mapping to domain folders.
//!
//! A folder tree arrives as nested DTOs. Mapping walks it depth-first, keeps
//! sibling order and copies every field as sent, `ParentFolder` included.
//! Absent and empty `Children` both become an empty vector; a `null` entry
//! inside `Children` is rejected.

use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use rtf_model::{
    ArtifactId, Folder, FolderAccessStatus, FolderMoveResponse, FolderPermission, NamedArtifact,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderDto {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<NamedArtifact>,
    #[serde(default)]
    pub access_control_list_is_inherited: bool,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<FolderPermissionDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Option<FolderDto>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_last_modified_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderPermissionDto {
    #[serde(default)]
    pub add: bool,
    #[serde(default)]
    pub delete: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderAccessStatusDto {
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderMoveResponseDto {
    #[serde(default)]
    pub process_state: String,
    #[serde(default)]
    pub total_operations: i64,
    #[serde(default)]
    pub operations_completed: i64,
}

impl From<FolderPermissionDto> for FolderPermission {
    fn from(dto: FolderPermissionDto) -> Self {
        Self {
            add: dto.add,
            delete: dto.delete,
            edit: dto.edit,
            secure: dto.secure,
        }
    }
}

impl From<FolderPermission> for FolderPermissionDto {
    fn from(permission: FolderPermission) -> Self {
        Self {
            add: permission.add,
            delete: permission.delete,
            edit: permission.edit,
            secure: permission.secure,
        }
    }
}

impl From<FolderAccessStatusDto> for FolderAccessStatus {
    fn from(dto: FolderAccessStatusDto) -> Self {
        Self {
            can_view: dto.can_view,
            exists: dto.exists,
        }
    }
}

impl From<FolderMoveResponseDto> for FolderMoveResponse {
    fn from(dto: FolderMoveResponseDto) -> Self {
        Self {
            process_state: dto.process_state,
            total_operations: dto.total_operations,
            operations_completed: dto.operations_completed,
        }
    }
}

impl TryFrom<FolderDto> for Folder {
    type Error = ApiError;

    fn try_from(dto: FolderDto) -> ApiResult<Self> {
        let children = dto
            .children
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, child)| match child {
                Some(child) => Folder::try_from(child),
                None => Err(ApiError::mapping(
                    "Folder",
                    format!("null child at index {} of folder {}", index, dto.artifact_id),
                )),
            })
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(Folder {
            artifact_id: dto.artifact_id,
            name: dto.name,
            parent_folder: dto.parent_folder,
            access_control_list_is_inherited: dto.access_control_list_is_inherited,
            has_children: dto.has_children,
            selected: dto.selected,
            permissions: dto.permissions.map(FolderPermission::from),
            children,
            system_created_on: dto.system_created_on,
            system_last_modified_on: dto.system_last_modified_on,
        })
    }
}

/// Request shape for create and update. Children are never sent.
impl From<&Folder> for FolderDto {
    fn from(folder: &Folder) -> Self {
        Self {
            artifact_id: folder.artifact_id,
            name: folder.name.clone(),
            parent_folder: folder.parent_folder.clone(),
            access_control_list_is_inherited: folder.access_control_list_is_inherited,
            has_children: folder.has_children,
            selected: folder.selected,
            permissions: folder.permissions.map(FolderPermissionDto::from),
            children: None,
            system_created_on: folder.system_created_on,
            system_last_modified_on: folder.system_last_modified_on,
        }
    }
}

/// Maps a list of top-level DTOs, failing on the first structural error.
pub fn map_folders(dtos: Vec<FolderDto>) -> ApiResult<Vec<Folder>> {
    dtos.into_iter().map(Folder::try_from).collect()
}
