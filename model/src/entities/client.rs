use crate::types::{random_suffix, Artifact, ArtifactId, NamedArtifact};
use serde::{Deserialize, Serialize};

/// Status choice a new client gets when the caller does not pick one.
pub const DEFAULT_CLIENT_STATUS: &str = "Active";

/// Admin-level client record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Client {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NamedArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Client {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status_id: ArtifactId) -> Self {
        self.status = Some(NamedArtifact::new(status_id));
        self
    }

    pub fn needs_status(&self) -> bool {
        self.status
            .as_ref()
            .map(|status| status.artifact_id <= 0)
            .unwrap_or(true)
    }

    /// Fills name and number. The status choice needs a remote lookup and is
    /// filled by the create strategy.
    pub fn fill_required_properties(&mut self) {
        if self.name.trim().is_empty() {
            self.name = format!("Client {}", random_suffix());
        }
        if self.number.trim().is_empty() {
            self.number = random_suffix();
        }
    }
}

impl Artifact for Client {
    const KIND: &'static str = "Client";

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
