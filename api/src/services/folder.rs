use super::crud_operations;
use crate::error::{ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::orchestrator::CrudOrchestrator;
use crate::strategies::folder::{
    FolderDeleteUnusedStrategy, FolderGetAccessStatusStrategy, FolderGetFolderTreeStrategy,
    FolderGetSubfoldersStrategy, FolderGetWorkspaceRootStrategy, FolderMoveStrategy,
};
use rtf_model::{Artifact, ArtifactId, Folder, FolderAccessStatus, FolderMoveResponse, ParentContext};

#[derive(Clone)]
pub struct FolderService {
    orchestrator: CrudOrchestrator,
}

impl FolderService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    crud_operations!(Folder);

    pub async fn get_workspace_root(&self, context: ParentContext) -> ApiResult<Folder> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn FolderGetWorkspaceRootStrategy>()?;
        strategy
            .get_workspace_root(context)
            .await
            .during(OperationKind::GetWorkspaceRoot, Folder::KIND, context)
    }

    pub async fn get_subfolders(
        &self,
        context: ParentContext,
        parent_id: ArtifactId,
    ) -> ApiResult<Vec<Folder>> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn FolderGetSubfoldersStrategy>()?;
        strategy
            .get_subfolders(context, parent_id)
            .await
            .during(OperationKind::GetSubfolders, Folder::KIND, context)
    }

    pub async fn get_folder_tree(
        &self,
        context: ParentContext,
        expanded: &[ArtifactId],
        selected: Option<ArtifactId>,
    ) -> ApiResult<Vec<Folder>> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn FolderGetFolderTreeStrategy>()?;
        strategy
            .get_folder_tree(context, expanded, selected)
            .await
            .during(OperationKind::GetFolderTree, Folder::KIND, context)
    }

    pub async fn get_access_status(
        &self,
        context: ParentContext,
        id: ArtifactId,
    ) -> ApiResult<FolderAccessStatus> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn FolderGetAccessStatusStrategy>()?;
        strategy
            .get_access_status(context, id)
            .await
            .during(OperationKind::GetAccessStatus, Folder::KIND, context)
    }

    pub async fn move_folder(
        &self,
        context: ParentContext,
        id: ArtifactId,
        destination_id: ArtifactId,
    ) -> ApiResult<FolderMoveResponse> {
        let strategy = self.orchestrator.resolver().resolve::<dyn FolderMoveStrategy>()?;
        strategy
            .move_folder(context, id, destination_id)
            .await
            .during(OperationKind::Move, Folder::KIND, context)
    }

    pub async fn delete_unused(&self, context: ParentContext) -> ApiResult<()> {
        let strategy = self
            .orchestrator
            .resolver()
            .resolve::<dyn FolderDeleteUnusedStrategy>()?;
        strategy
            .delete_unused(context)
            .await
            .during(OperationKind::DeleteUnused, Folder::KIND, context)
    }
}
