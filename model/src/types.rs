use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identity of a remote artifact. `0` means the artifact has not been created yet.
pub type ArtifactId = i32;

/// Scope an operation applies within.
///
/// The remote services encode the admin-level scope as `-1` and a workspace
/// by its non-negative artifact id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ParentContext {
    Admin,
    Workspace(ArtifactId),
}

impl ParentContext {
    pub const ADMIN_ID: ArtifactId = -1;

    pub fn workspace(id: ArtifactId) -> Self {
        Self::Workspace(id)
    }

    /// Wire value of the context.
    pub fn id(&self) -> ArtifactId {
        match self {
            Self::Admin => Self::ADMIN_ID,
            Self::Workspace(id) => *id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl TryFrom<i32> for ParentContext {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            Self::ADMIN_ID => Ok(Self::Admin),
            id if id >= 0 => Ok(Self::Workspace(id)),
            other => Err(format!(
                "Invalid parent context {}: use -1 for admin level or a workspace id",
                other
            )),
        }
    }
}

impl From<ParentContext> for i32 {
    fn from(value: ParentContext) -> Self {
        value.id()
    }
}

impl fmt::Display for ParentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin context"),
            Self::Workspace(id) => write!(f, "workspace {}", id),
        }
    }
}

/// A typed remote record with identity.
pub trait Artifact: Clone + Send + Sync + 'static {
    /// Entity kind name used in descriptors and error messages.
    const KIND: &'static str;

    fn artifact_id(&self) -> ArtifactId;

    fn set_artifact_id(&mut self, id: ArtifactId);

    /// Unique name within the parent context, when the kind has one.
    fn name(&self) -> Option<&str> {
        None
    }

    fn is_persisted(&self) -> bool {
        self.artifact_id() > 0
    }
}

/// Lightweight `{ArtifactID, Name}` reference to another artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedArtifact {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedArtifact {
    pub fn new(artifact_id: ArtifactId) -> Self {
        Self {
            artifact_id,
            name: None,
        }
    }

    pub fn named(artifact_id: ArtifactId, name: impl Into<String>) -> Self {
        Self {
            artifact_id,
            name: Some(name.into()),
        }
    }
}

/// Short random suffix used to fill required names.
pub(crate) fn random_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_context_from_wire_value() {
        assert_eq!(ParentContext::try_from(-1).unwrap(), ParentContext::Admin);
        assert_eq!(
            ParentContext::try_from(1234567).unwrap(),
            ParentContext::Workspace(1234567)
        );
        assert_eq!(
            ParentContext::try_from(0).unwrap(),
            ParentContext::Workspace(0)
        );
        assert!(ParentContext::try_from(-2).is_err());
    }

    #[test]
    fn test_parent_context_round_trips_as_integer() {
        let json = serde_json::to_string(&ParentContext::Workspace(42)).unwrap();
        assert_eq!(json, "42");
        let admin: ParentContext = serde_json::from_str("-1").unwrap();
        assert!(admin.is_admin());
        assert!(serde_json::from_str::<ParentContext>("-7").is_err());
    }

    #[test]
    fn test_parent_context_display() {
        assert_eq!(ParentContext::Admin.to_string(), "admin context");
        assert_eq!(ParentContext::workspace(7).to_string(), "workspace 7");
    }

    #[test]
    fn test_named_artifact_wire_names() {
        let json = serde_json::to_value(NamedArtifact::named(5, "Active")).unwrap();
        assert_eq!(json["ArtifactID"], 5);
        assert_eq!(json["Name"], "Active");

        let bare = serde_json::to_value(NamedArtifact::new(9)).unwrap();
        assert!(bare.get("Name").is_none());
    }
}
