use crate::types::{random_suffix, Artifact, ArtifactId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceSettingValueType {
    #[default]
    Text,
    Integer32,
    Integer64,
    TrueFalse,
}

/// Instance-wide configuration value, identified by `(name, section)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceSetting {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub value_type: InstanceSettingValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub encrypted: bool,
}

impl InstanceSetting {
    pub fn new(
        name: impl Into<String>,
        section: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_value_type(mut self, value_type: InstanceSettingValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn fill_required_properties(&mut self) {
        if self.name.trim().is_empty() {
            self.name = format!("Setting{}", random_suffix());
        }
        if self.section.trim().is_empty() {
            self.section = "Relativity.Core".to_string();
        }
    }
}

impl Artifact for InstanceSetting {
    const KIND: &'static str = "InstanceSetting";

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
