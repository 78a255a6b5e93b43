use crate::types::{random_suffix, Artifact, ArtifactId, NamedArtifact};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabLinkType {
    #[default]
    Object,
    Parent,
    External,
}

/// A navigation tab, either in a workspace or at admin level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tab {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link_type: TabLinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<NamedArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NamedArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_shown_in_sidebar: bool,
}

fn default_true() -> bool {
    true
}

impl Tab {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_visible: true,
            ..Self::default()
        }
    }

    pub fn with_id(artifact_id: ArtifactId) -> Self {
        Self {
            artifact_id,
            is_visible: true,
            ..Self::default()
        }
    }

    pub fn with_link_type(mut self, link_type: TabLinkType) -> Self {
        self.link_type = link_type;
        self
    }

    pub fn with_object_type(mut self, object_type: NamedArtifact) -> Self {
        self.object_type = Some(object_type);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Fills the fields the tab service rejects when missing.
    ///
    /// An object tab without an object type becomes a parent tab, since the
    /// service cannot create an object tab with nothing to show.
    pub fn fill_required_properties(&mut self) {
        if self.name.trim().is_empty() {
            self.name = format!("Tab {}", random_suffix());
        }
        if self.link_type == TabLinkType::Object && self.object_type.is_none() {
            self.link_type = TabLinkType::Parent;
        }
        if self.link_type == TabLinkType::External && self.link.is_none() {
            self.link = Some("about:blank".to_string());
        }
    }
}

impl Artifact for Tab {
    const KIND: &'static str = "Tab";

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

/// Object type that a tab can be bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectType {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "ArtifactTypeID", default)]
    pub artifact_type_id: i32,
}

/// Admin-level metadata about admin and system tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Meta {
    #[serde(default)]
    pub unsupported: Vec<String>,
    #[serde(default)]
    pub read_only: Vec<String>,
}

/// A tab that can be used as the parent of another tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TabEligibleParent {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub name: String,
}
