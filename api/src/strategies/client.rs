use super::kepler::{manager_endpoint, KeplerCreateStrategy, KeplerEntity};
use super::{CreateStrategy, GetByIdStrategy};
use crate::error::{ApiError, ApiResult};
use crate::operation::capability;
use async_trait::async_trait;
use rtf_model::{
    ArtifactId, Client, NamedArtifact, ParentContext, RestService, RestServiceExt,
    DEFAULT_CLIENT_STATUS,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Resolves the artifact id of a client status choice from its name.
#[async_trait]
pub trait ClientStatusGetChoiceIdByNameStrategy: Send + Sync {
    /// [`ApiError::ObjectNotFound`] when no status choice has `name`.
    async fn get_id(&self, name: &str) -> ApiResult<ArtifactId>;
}

capability!(ClientStatusGetChoiceIdByNameStrategy, GetIdByName, "Client");

pub struct ClientStatusChoiceStrategy {
    rest: Arc<dyn RestService>,
}

impl ClientStatusChoiceStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl ClientStatusGetChoiceIdByNameStrategy for ClientStatusChoiceStrategy {
    async fn get_id(&self, name: &str) -> ApiResult<ArtifactId> {
        let choices: Vec<NamedArtifact> = self
            .rest
            .post(
                &manager_endpoint(Client::SERVICE, "GetStatusChoicesForClientAsync"),
                &json!({}),
            )
            .await?;

        choices
            .into_iter()
            .find(|choice| choice.name.as_deref() == Some(name))
            .map(|choice| choice.artifact_id)
            .ok_or_else(|| ApiError::object_not_found("ClientStatus", name))
    }
}

/// Generic manager create, with the status defaulted to the
/// [`DEFAULT_CLIENT_STATUS`] choice when the caller left it unset.
pub struct ClientCreateStrategy {
    inner: KeplerCreateStrategy<Client>,
    status: Arc<dyn ClientStatusGetChoiceIdByNameStrategy>,
}

impl ClientCreateStrategy {
    pub fn new(
        rest: Arc<dyn RestService>,
        get_by_id: Arc<dyn GetByIdStrategy<Client>>,
        status: Arc<dyn ClientStatusGetChoiceIdByNameStrategy>,
    ) -> Self {
        Self {
            inner: KeplerCreateStrategy::new(rest, get_by_id),
            status,
        }
    }
}

#[async_trait]
impl CreateStrategy<Client> for ClientCreateStrategy {
    async fn create(&self, context: ParentContext, mut entity: Client) -> ApiResult<Client> {
        if entity.needs_status() {
            let status_id = self.status.get_id(DEFAULT_CLIENT_STATUS).await?;
            debug!("Defaulting client status to '{}' ({})", DEFAULT_CLIENT_STATUS, status_id);
            entity.status = Some(NamedArtifact::named(status_id, DEFAULT_CLIENT_STATUS));
        }
        self.inner.create(context, entity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::kepler::KeplerGetByIdStrategy;
    use rtf_model::{HttpMethod, ScriptedRestService};

    const CHOICES: &str =
        "Relativity.Services.Client.IClientModule/Client Manager/GetStatusChoicesForClientAsync";

    fn choices() -> serde_json::Value {
        json!([
            { "ArtifactID": 662, "Name": "Active" },
            { "ArtifactID": 663, "Name": "Inactive" },
            { "ArtifactID": 664, "Name": "Active" }
        ])
    }

    #[tokio::test]
    async fn test_choice_id_first_match_wins() {
        let rest = Arc::new(ScriptedRestService::new().respond(HttpMethod::Post, CHOICES, choices()));
        let strategy = ClientStatusChoiceStrategy::new(rest);

        assert_eq!(strategy.get_id("Active").await.unwrap(), 662);
        assert_eq!(strategy.get_id("Inactive").await.unwrap(), 663);
    }

    #[tokio::test]
    async fn test_unknown_choice_is_object_not_found() {
        let rest = Arc::new(ScriptedRestService::new().respond(HttpMethod::Post, CHOICES, choices()));
        let strategy = ClientStatusChoiceStrategy::new(rest);

        match strategy.get_id("Archived").await.unwrap_err() {
            ApiError::ObjectNotFound { name, .. } => assert_eq!(name, "Archived"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_fills_active_status_only_when_missing() {
        let manager = "Relativity.Services.Client.IClientModule/Client Manager";
        let rest = Arc::new(
            ScriptedRestService::new()
                .respond(HttpMethod::Post, CHOICES, choices())
                .respond(
                    HttpMethod::Post,
                    format!("{}/CreateSingleAsync", manager),
                    json!(1017),
                )
                .respond(
                    HttpMethod::Post,
                    format!("{}/ReadSingleAsync", manager),
                    json!({ "ArtifactID": 1017, "Name": "Acme" }),
                ),
        );
        let get_by_id = Arc::new(KeplerGetByIdStrategy::<Client>::new(rest.clone()));
        let status = Arc::new(ClientStatusChoiceStrategy::new(rest.clone()));
        let strategy = ClientCreateStrategy::new(rest.clone(), get_by_id, status);

        strategy
            .create(ParentContext::Admin, Client::named("Acme"))
            .await
            .unwrap();
        let sent = rest.calls()[1].body.clone().unwrap();
        assert_eq!(sent["client"]["Status"]["ArtifactID"], 662);

        strategy
            .create(ParentContext::Admin, Client::named("Acme").with_status(663))
            .await
            .unwrap();
        assert_eq!(rest.calls_to("GetStatusChoicesForClientAsync"), 1);
    }
}
