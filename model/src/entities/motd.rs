use serde::{Deserialize, Serialize};

/// Message of the day shown to users on login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Motd {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub allow_dismiss: bool,
}

impl Motd {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            enabled: true,
            allow_dismiss: true,
        }
    }
}
