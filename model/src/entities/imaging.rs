use serde::{Deserialize, Serialize};

/// Options for running or retrying an imaging set job.
///
/// Every field is optional; an absent request means "all failed items with
/// system defaults".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImagingSetJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origination_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qc_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_images_for_qc_review: Option<bool>,
}

impl ImagingSetJobRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origination_id(mut self, origination_id: impl Into<String>) -> Self {
        self.origination_id = Some(origination_id.into());
        self
    }

    pub fn with_qc_enabled(mut self, qc_enabled: bool) -> Self {
        self.qc_enabled = Some(qc_enabled);
        self
    }
}
