//! The message of the day is a singleton, so these strategies take no id.

use super::kepler::manager_endpoint;
use crate::error::ApiResult;
use crate::operation::capability;
use async_trait::async_trait;
use rtf_model::{Motd, RestService, RestServiceExt};
use serde_json::json;
use std::sync::Arc;

const MOTD_MANAGER: &str = "Relativity.Services.MOTD.IMOTDModule/MOTD Manager";

#[async_trait]
pub trait MotdGetStrategy: Send + Sync {
    async fn get(&self) -> ApiResult<Motd>;
}

capability!(MotdGetStrategy, Get, "Motd");

#[async_trait]
pub trait MotdUpdateStrategy: Send + Sync {
    async fn update(&self, motd: &Motd) -> ApiResult<()>;
}

capability!(MotdUpdateStrategy, Update, "Motd");

#[async_trait]
pub trait MotdClearStrategy: Send + Sync {
    async fn clear(&self) -> ApiResult<()>;
}

capability!(MotdClearStrategy, Clear, "Motd");

/// Whether the message is plain text rather than HTML.
#[async_trait]
pub trait MotdIsTextOnlyStrategy: Send + Sync {
    async fn is_text_only(&self) -> ApiResult<bool>;
}

capability!(MotdIsTextOnlyStrategy, IsTextOnly, "Motd");

pub struct MotdManagerStrategy {
    rest: Arc<dyn RestService>,
}

impl MotdManagerStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl MotdGetStrategy for MotdManagerStrategy {
    async fn get(&self) -> ApiResult<Motd> {
        Ok(self
            .rest
            .post(&manager_endpoint(MOTD_MANAGER, "ReadAsync"), &json!({}))
            .await?)
    }
}

#[async_trait]
impl MotdUpdateStrategy for MotdManagerStrategy {
    async fn update(&self, motd: &Motd) -> ApiResult<()> {
        self.rest
            .post_unit(
                &manager_endpoint(MOTD_MANAGER, "UpdateAsync"),
                &json!({ "motd": motd }),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MotdClearStrategy for MotdManagerStrategy {
    async fn clear(&self) -> ApiResult<()> {
        self.rest
            .post_unit(&manager_endpoint(MOTD_MANAGER, "ClearAsync"), &json!({}))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MotdIsTextOnlyStrategy for MotdManagerStrategy {
    async fn is_text_only(&self) -> ApiResult<bool> {
        Ok(self
            .rest
            .post(&manager_endpoint(MOTD_MANAGER, "IsTextOnlyAsync"), &json!({}))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtf_model::{HttpMethod, ScriptedRestService};
    use serde_json::Value;

    #[tokio::test]
    async fn test_motd_round_trip() {
        let rest = Arc::new(
            ScriptedRestService::new()
                .respond(
                    HttpMethod::Post,
                    manager_endpoint(MOTD_MANAGER, "ReadAsync"),
                    json!({ "Message": "Maintenance tonight", "Enabled": true, "AllowDismiss": false }),
                )
                .respond(HttpMethod::Post, manager_endpoint(MOTD_MANAGER, "UpdateAsync"), Value::Null)
                .respond(HttpMethod::Post, manager_endpoint(MOTD_MANAGER, "ClearAsync"), Value::Null)
                .respond(HttpMethod::Post, manager_endpoint(MOTD_MANAGER, "IsTextOnlyAsync"), json!(true)),
        );
        let strategy = MotdManagerStrategy::new(rest.clone());

        let motd = strategy.get().await.unwrap();
        assert_eq!(motd.message, "Maintenance tonight");
        assert!(!motd.allow_dismiss);

        strategy.update(&Motd::new("Back online")).await.unwrap();
        assert_eq!(rest.calls()[1].body.as_ref().unwrap()["motd"]["Message"], "Back online");

        strategy.clear().await.unwrap();
        assert!(strategy.is_text_only().await.unwrap());
        assert_eq!(rest.call_count(), 4);
    }
}
