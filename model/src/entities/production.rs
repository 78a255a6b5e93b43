use crate::types::{random_suffix, Artifact, ArtifactId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderType {
    #[default]
    Image,
    CustomText,
}

/// Image or text shown in a production in place of a withheld document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductionPlaceholder {
    #[serde(rename = "ArtifactID", default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "PlaceholderType", default)]
    pub placeholder_type: PlaceholderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
}

impl ProductionPlaceholder {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_type = PlaceholderType::CustomText;
        self.custom_text = Some(text.into());
        self
    }

    pub fn fill_required_properties(&mut self) {
        if self.name.trim().is_empty() {
            self.name = format!("Placeholder {}", random_suffix());
        }
        if self.placeholder_type == PlaceholderType::CustomText && self.custom_text.is_none() {
            self.custom_text = Some(self.name.clone());
        }
        if self.placeholder_type == PlaceholderType::Image && self.file_data.is_none() {
            self.file_name = Some("placeholder.tif".to_string());
            self.file_data = Some(String::new());
        }
    }
}

impl Artifact for ProductionPlaceholder {
    const KIND: &'static str = "ProductionPlaceholder";

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
