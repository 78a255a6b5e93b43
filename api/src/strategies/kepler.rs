//! Generic strategies for entities served by Kepler-style manager services
//! (`<Module>/<Manager>/ReadSingleAsync`, `CreateSingleAsync`, ...) and for
//! name lookups through the Object Manager query endpoint.

use super::{CreateStrategy, DeleteStrategy, GetByIdStrategy, GetByNameStrategy, UpdateStrategy};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use rtf_model::{
    Artifact, ArtifactId, Client, InstanceSetting, OptionalResponse, ParentContext,
    ProductionPlaceholder, RestService, RestServiceExt, Tab,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Entity kind that the Object Manager can query by field conditions.
pub trait QueryableEntity: Artifact {
    const OBJECT_TYPE: &'static str;
}

/// Entity kind with a Kepler manager service for single-artifact CRUD.
pub trait KeplerEntity: QueryableEntity + Serialize + DeserializeOwned {
    /// Manager path, e.g. `Relativity.Services.Client.IClientModule/Client Manager`.
    const SERVICE: &'static str;
    /// Request field the entity travels in on create and update.
    const ENTITY_FIELD: &'static str;

    /// Fills whatever the manager rejects when missing.
    fn prepare_for_create(&mut self) {}
}

impl QueryableEntity for Tab {
    const OBJECT_TYPE: &'static str = "Tab";
}

impl QueryableEntity for ProductionPlaceholder {
    const OBJECT_TYPE: &'static str = "Production Placeholder";
}

impl KeplerEntity for ProductionPlaceholder {
    const SERVICE: &'static str =
        "Relativity.Productions.Services.IProductionModule/Production Placeholder Manager";
    const ENTITY_FIELD: &'static str = "placeholder";

    fn prepare_for_create(&mut self) {
        self.fill_required_properties();
    }
}

impl QueryableEntity for Client {
    const OBJECT_TYPE: &'static str = "Client";
}

impl KeplerEntity for Client {
    const SERVICE: &'static str = "Relativity.Services.Client.IClientModule/Client Manager";
    const ENTITY_FIELD: &'static str = "client";

    fn prepare_for_create(&mut self) {
        self.fill_required_properties();
    }
}

impl QueryableEntity for InstanceSetting {
    const OBJECT_TYPE: &'static str = "Instance Setting";
}

impl KeplerEntity for InstanceSetting {
    const SERVICE: &'static str =
        "Relativity.Services.InstanceSetting.IInstanceSettingModule/Instance Setting Manager";
    const ENTITY_FIELD: &'static str = "instanceSetting";

    fn prepare_for_create(&mut self) {
        self.fill_required_properties();
    }
}

pub(crate) fn manager_endpoint(service: &str, method: &str) -> String {
    format!("{}/{}", service, method)
}

fn entity_body<T: Serialize>(context: ParentContext, field: &str, entity: &T) -> ApiResult<Value> {
    let mut body = Map::new();
    body.insert("workspaceArtifactID".to_string(), json!(context.id()));
    body.insert(field.to_string(), serde_json::to_value(entity)?);
    Ok(Value::Object(body))
}

pub struct KeplerGetByIdStrategy<T> {
    rest: Arc<dyn RestService>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> KeplerGetByIdStrategy<T> {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self {
            rest,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: KeplerEntity> GetByIdStrategy<T> for KeplerGetByIdStrategy<T> {
    async fn get(&self, context: ParentContext, id: ArtifactId) -> ApiResult<Option<T>> {
        let body = json!({ "workspaceArtifactID": context.id(), "artifactID": id });
        let found: Option<T> = self
            .rest
            .post(&manager_endpoint(T::SERVICE, "ReadSingleAsync"), &body)
            .await
            .optional()?;
        Ok(found)
    }
}

/// Creates through the manager, then re-reads the new id so the caller gets
/// server state rather than an echo of the request.
pub struct KeplerCreateStrategy<T: Artifact> {
    rest: Arc<dyn RestService>,
    get_by_id: Arc<dyn GetByIdStrategy<T>>,
}

impl<T: Artifact> KeplerCreateStrategy<T> {
    pub fn new(rest: Arc<dyn RestService>, get_by_id: Arc<dyn GetByIdStrategy<T>>) -> Self {
        Self { rest, get_by_id }
    }
}

#[async_trait]
impl<T: KeplerEntity> CreateStrategy<T> for KeplerCreateStrategy<T> {
    async fn create(&self, context: ParentContext, mut entity: T) -> ApiResult<T> {
        entity.prepare_for_create();
        let body = entity_body(context, T::ENTITY_FIELD, &entity)?;

        let id: ArtifactId = self
            .rest
            .post(&manager_endpoint(T::SERVICE, "CreateSingleAsync"), &body)
            .await?;

        self.get_by_id
            .get(context, id)
            .await?
            .ok_or_else(|| ApiError::not_found(T::KIND, id, context))
    }
}

pub struct KeplerUpdateStrategy<T> {
    rest: Arc<dyn RestService>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> KeplerUpdateStrategy<T> {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self {
            rest,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: KeplerEntity> UpdateStrategy<T> for KeplerUpdateStrategy<T> {
    async fn update(&self, context: ParentContext, entity: &T) -> ApiResult<()> {
        let body = entity_body(context, T::ENTITY_FIELD, entity)?;
        self.rest
            .post_unit(&manager_endpoint(T::SERVICE, "UpdateSingleAsync"), &body)
            .await?;
        Ok(())
    }
}

pub struct KeplerDeleteStrategy<T> {
    rest: Arc<dyn RestService>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> KeplerDeleteStrategy<T> {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self {
            rest,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: KeplerEntity> DeleteStrategy<T> for KeplerDeleteStrategy<T> {
    async fn delete(&self, context: ParentContext, id: ArtifactId) -> ApiResult<()> {
        let body = json!({ "workspaceArtifactID": context.id(), "artifactID": id });
        self.rest
            .post_unit(&manager_endpoint(T::SERVICE, "DeleteSingleAsync"), &body)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct QueryResult {
    #[serde(default)]
    objects: Vec<QueryObject>,
}

#[derive(Debug, Deserialize)]
struct QueryObject {
    #[serde(rename = "ArtifactID")]
    artifact_id: ArtifactId,
}

/// Quotes a value for an Object Manager condition.
pub fn condition_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Artifact id of the first object of `object_type` matching `condition`.
///
/// Duplicates are not detected: whatever the service lists first wins.
pub async fn query_first_artifact_id(
    rest: &dyn RestService,
    context: ParentContext,
    object_type: &str,
    condition: &str,
) -> ApiResult<Option<ArtifactId>> {
    let endpoint = format!(
        "Relativity.ObjectManager/v1/workspace/{}/object/query",
        context.id()
    );
    let body = json!({
        "request": {
            "objectType": { "Name": object_type },
            "condition": condition,
            "fields": [{ "Name": "Name" }],
        },
        "start": 1,
        "length": 1,
    });

    debug!("Querying {} where {}", object_type, condition);
    let result: QueryResult = rest.post(&endpoint, &body).await?;
    Ok(result.objects.first().map(|object| object.artifact_id))
}

/// Name lookup: Object Manager query for the id, then get-by-id.
pub struct ObjectQueryGetByNameStrategy<T: Artifact> {
    rest: Arc<dyn RestService>,
    get_by_id: Arc<dyn GetByIdStrategy<T>>,
}

impl<T: Artifact> ObjectQueryGetByNameStrategy<T> {
    pub fn new(rest: Arc<dyn RestService>, get_by_id: Arc<dyn GetByIdStrategy<T>>) -> Self {
        Self { rest, get_by_id }
    }
}

#[async_trait]
impl<T: QueryableEntity> GetByNameStrategy<T> for ObjectQueryGetByNameStrategy<T> {
    async fn get(&self, context: ParentContext, name: &str) -> ApiResult<Option<T>> {
        let condition = format!("'Name' == {}", condition_literal(name));
        match query_first_artifact_id(self.rest.as_ref(), context, T::OBJECT_TYPE, &condition)
            .await?
        {
            Some(id) => self.get_by_id.get(context, id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtf_model::{HttpMethod, RestError, ScriptedRestService};

    const CLIENT_READ: &str =
        "Relativity.Services.Client.IClientModule/Client Manager/ReadSingleAsync";
    const CLIENT_CREATE: &str =
        "Relativity.Services.Client.IClientModule/Client Manager/CreateSingleAsync";
    const ADMIN_QUERY: &str = "Relativity.ObjectManager/v1/workspace/-1/object/query";

    fn client_service() -> Arc<ScriptedRestService> {
        Arc::new(
            ScriptedRestService::new()
                .on(HttpMethod::Post, CLIENT_READ, |request| {
                    let body = request.body.clone().unwrap_or_default();
                    match body["artifactID"].as_i64() {
                        Some(1017) => Ok(json!({
                            "ArtifactID": 1017,
                            "Name": "Acme",
                            "Number": "A-1",
                            "Status": { "ArtifactID": 662 }
                        })),
                        _ => Err(RestError::http(404, "no such client")),
                    }
                })
                .respond(HttpMethod::Post, CLIENT_CREATE, json!(1017))
                .on(HttpMethod::Post, ADMIN_QUERY, |request| {
                    let body = request.body.clone().unwrap_or_default();
                    let condition = body["request"]["condition"].as_str().unwrap_or_default();
                    if condition.contains("'Acme'") {
                        Ok(json!({ "Objects": [{ "ArtifactID": 1017 }, { "ArtifactID": 2000 }] }))
                    } else {
                        Ok(json!({ "Objects": [] }))
                    }
                }),
        )
    }

    #[tokio::test]
    async fn test_get_by_id_maps_404_to_none() {
        let rest = client_service();
        let strategy = KeplerGetByIdStrategy::<Client>::new(rest.clone());

        let found = strategy.get(ParentContext::Admin, 1017).await.unwrap().unwrap();
        assert_eq!(found.name, "Acme");
        assert_eq!(found.status.map(|s| s.artifact_id), Some(662));

        assert!(strategy.get(ParentContext::Admin, 5).await.unwrap().is_none());
        assert_eq!(rest.calls()[0].body.as_ref().unwrap()["workspaceArtifactID"], -1);
    }

    #[tokio::test]
    async fn test_create_re_reads_created_entity() {
        let rest = client_service();
        let get_by_id: Arc<dyn GetByIdStrategy<Client>> =
            Arc::new(KeplerGetByIdStrategy::new(rest.clone()));
        let strategy = KeplerCreateStrategy::new(rest.clone(), get_by_id);

        let created = strategy
            .create(ParentContext::Admin, Client::named("Acme").with_status(662))
            .await
            .unwrap();

        assert_eq!(created.artifact_id, 1017);
        let calls = rest.calls();
        assert_eq!(calls[0].endpoint, CLIENT_CREATE);
        let sent = &calls[0].body.as_ref().unwrap()["client"];
        assert_eq!(sent["Name"], "Acme");
        assert!(!sent["Number"].as_str().unwrap().is_empty());
        assert_eq!(calls[1].endpoint, CLIENT_READ);
    }

    #[tokio::test]
    async fn test_name_lookup_takes_first_match() {
        let rest = client_service();
        let get_by_id: Arc<dyn GetByIdStrategy<Client>> =
            Arc::new(KeplerGetByIdStrategy::new(rest.clone()));
        let strategy = ObjectQueryGetByNameStrategy::new(rest.clone(), get_by_id);

        let found = strategy.get(ParentContext::Admin, "Acme").await.unwrap();
        assert_eq!(found.map(|c| c.artifact_id), Some(1017));

        let missing = strategy.get(ParentContext::Admin, "Nobody").await.unwrap();
        assert!(missing.is_none());
        assert_eq!(rest.calls_to(CLIENT_READ), 1);
    }

    #[test]
    fn test_condition_literal_escapes_quotes() {
        assert_eq!(condition_literal("Acme"), "'Acme'");
        assert_eq!(condition_literal("O'Brien"), "'O\\'Brien'");
        assert_eq!(condition_literal("a\\b"), "'a\\\\b'");
    }
}
