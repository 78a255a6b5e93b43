use crate::types::{random_suffix, Artifact, ArtifactId, NamedArtifact};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workspace folder and the subtree it owns.
///
/// `children` is empty both when the server sent no children and when it sent
/// an empty list; there is no separate "unknown" state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub artifact_id: ArtifactId,
    pub name: String,
    pub parent_folder: Option<NamedArtifact>,
    pub access_control_list_is_inherited: bool,
    pub has_children: bool,
    pub selected: bool,
    pub permissions: Option<FolderPermission>,
    pub children: Vec<Folder>,
    pub system_created_on: Option<DateTime<Utc>>,
    pub system_last_modified_on: Option<DateTime<Utc>>,
}

impl Folder {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access_control_list_is_inherited: true,
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: ArtifactId) -> Self {
        self.parent_folder = Some(NamedArtifact::new(parent_id));
        self
    }

    pub fn fill_required_properties(&mut self) {
        if self.name.trim().is_empty() {
            self.name = format!("Folder {}", random_suffix());
        }
    }

    pub fn parent_id(&self) -> Option<ArtifactId> {
        self.parent_folder.as_ref().map(|parent| parent.artifact_id)
    }

    /// Pre-order walk over this folder and every descendant, with depth (root is 0).
    pub fn depth_first(&self) -> Vec<(usize, &Folder)> {
        let mut nodes = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((depth, folder)) = stack.pop() {
            nodes.push((depth, folder));
            for child in folder.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        nodes
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Folder::node_count).sum::<usize>()
    }

    pub fn find(&self, artifact_id: ArtifactId) -> Option<&Folder> {
        self.depth_first()
            .into_iter()
            .map(|(_, folder)| folder)
            .find(|folder| folder.artifact_id == artifact_id)
    }
}

impl Artifact for Folder {
    const KIND: &'static str = "Folder";

    fn artifact_id(&self) -> ArtifactId {
        self.artifact_id
    }

    fn set_artifact_id(&mut self, id: ArtifactId) {
        self.artifact_id = id;
    }

    fn name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPermission {
    pub add: bool,
    pub delete: bool,
    pub edit: bool,
    pub secure: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderAccessStatus {
    pub can_view: bool,
    pub exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMoveResponse {
    pub process_state: String,
    pub total_operations: i64,
    pub operations_completed: i64,
}
