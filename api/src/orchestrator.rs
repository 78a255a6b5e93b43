//! Generic CRUD orchestration over resolved strategies.
//!
//! The orchestrator holds no entity-specific logic. It resolves the
//! strategies an operation needs, calls them in a fixed order and attributes
//! every failure to the step that was running.
//!
//! # Require
//!
//! 1. positive `artifact_id`: get by id (missing is [`ApiError::NotFound`]),
//!    update, get by id again;
//! 2. non-empty name: get by name, then as 1 with the found id, or fall
//!    through to create when nothing matches;
//! 3. otherwise create.
//!
//! Every strategy a branch may need is resolved before its first remote call,
//! so a missing registration never leaves a half-run protocol behind.
//!
//! Concurrent requires for the same new name are not serialised unless
//! [`CrudOrchestrator::with_serialized_require`] is used, and even then only
//! within this process. Without it two callers can both miss the name lookup
//! and both create.

use crate::error::{ApiError, ApiResult, StepContext};
use crate::operation::OperationKind;
use crate::resolver::StrategyResolver;
use crate::strategies::{
    CreateStrategy, DeleteStrategy, GetByIdStrategy, GetByNameStrategy, RequireStrategy,
    UpdateStrategy,
};
use rtf_model::{Artifact, ArtifactId, ParentContext};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

type LockKey = (&'static str, ParentContext, String);

#[derive(Default)]
struct RequireLocks {
    locks: Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl RequireLocks {
    async fn acquire(
        &self,
        entity: &'static str,
        context: ParentContext,
        name: &str,
    ) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry((entity, context, name.to_string()))
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }
}

#[derive(Clone)]
pub struct CrudOrchestrator {
    resolver: Arc<StrategyResolver>,
    require_locks: Option<Arc<RequireLocks>>,
}

impl CrudOrchestrator {
    pub fn new(resolver: Arc<StrategyResolver>) -> Self {
        Self {
            resolver,
            require_locks: None,
        }
    }

    /// Serialises name-based requires per `(entity kind, context, name)` within
    /// this process. Registered require strategies run under the same lock,
    /// keyed by the entity's name.
    pub fn with_serialized_require(mut self) -> Self {
        self.require_locks = Some(Arc::new(RequireLocks::default()));
        self
    }

    pub fn resolver(&self) -> &Arc<StrategyResolver> {
        &self.resolver
    }

    pub async fn create<T: Artifact>(&self, context: ParentContext, entity: T) -> ApiResult<T> {
        let create = self.resolver.resolve::<dyn CreateStrategy<T>>()?;
        self.run_create(create.as_ref(), context, entity).await
    }

    pub async fn get<T: Artifact>(
        &self,
        context: ParentContext,
        id: ArtifactId,
    ) -> ApiResult<Option<T>> {
        let get_by_id = self.resolver.resolve::<dyn GetByIdStrategy<T>>()?;
        debug!("Getting {} {} in {}", T::KIND, id, context);
        get_by_id
            .get(context, id)
            .await
            .during(OperationKind::GetById, T::KIND, context)
    }

    pub async fn get_by_name<T: Artifact>(
        &self,
        context: ParentContext,
        name: &str,
    ) -> ApiResult<Option<T>> {
        let get_by_name = self.resolver.resolve::<dyn GetByNameStrategy<T>>()?;
        debug!("Getting {} '{}' in {}", T::KIND, name, context);
        get_by_name
            .get(context, name)
            .await
            .during(OperationKind::GetByName, T::KIND, context)
    }

    pub async fn update<T: Artifact>(&self, context: ParentContext, entity: &T) -> ApiResult<()> {
        let update = self.resolver.resolve::<dyn UpdateStrategy<T>>()?;
        if !entity.is_persisted() {
            return Err(ApiError::validation(format!(
                "{} update requires a positive ArtifactID, got {}",
                T::KIND,
                entity.artifact_id()
            ))
            .during(OperationKind::Update, T::KIND, context));
        }
        self.run_update(update.as_ref(), context, entity).await
    }

    pub async fn delete<T: Artifact>(&self, context: ParentContext, id: ArtifactId) -> ApiResult<()> {
        let delete = self.resolver.resolve::<dyn DeleteStrategy<T>>()?;
        debug!("Deleting {} {} in {}", T::KIND, id, context);
        delete
            .delete(context, id)
            .await
            .during(OperationKind::Delete, T::KIND, context)?;
        info!("Deleted {} {} in {}", T::KIND, id, context);
        Ok(())
    }

    /// Ensures an entity matching `entity` exists and returns its server state.
    pub async fn require<T: Artifact>(&self, context: ParentContext, entity: T) -> ApiResult<T> {
        if let Some(custom) = self.resolver.try_resolve::<dyn RequireStrategy<T>>() {
            debug!("Requiring {} in {} with registered strategy", T::KIND, context);
            let _guard = match entity.name() {
                Some(name) if !entity.is_persisted() => self.lock_name(context, T::KIND, name).await,
                _ => None,
            };
            return custom
                .require(context, entity)
                .await
                .during(OperationKind::Require, T::KIND, context);
        }

        if entity.is_persisted() {
            let get_by_id = self.resolver.resolve::<dyn GetByIdStrategy<T>>()?;
            let update = self.resolver.resolve::<dyn UpdateStrategy<T>>()?;
            let id = entity.artifact_id();

            debug!("Requiring {} {} in {} by id", T::KIND, id, context);
            get_by_id
                .get(context, id)
                .await
                .and_then(|found| {
                    found.ok_or_else(|| {
                        warn!("{} {} does not exist in {}", T::KIND, id, context);
                        ApiError::not_found(T::KIND, id, context)
                    })
                })
                .during(OperationKind::GetById, T::KIND, context)?;

            return self
                .update_and_refetch(get_by_id.as_ref(), update.as_ref(), context, entity)
                .await;
        }

        if let Some(name) = entity.name().map(str::to_owned) {
            let get_by_name = self.resolver.resolve::<dyn GetByNameStrategy<T>>()?;
            let get_by_id = self.resolver.resolve::<dyn GetByIdStrategy<T>>()?;
            let update = self.resolver.resolve::<dyn UpdateStrategy<T>>()?;
            let create = self.resolver.resolve::<dyn CreateStrategy<T>>()?;

            let _guard = self.lock_name(context, T::KIND, &name).await;

            debug!("Requiring {} '{}' in {} by name", T::KIND, name, context);
            let existing = get_by_name
                .get(context, &name)
                .await
                .during(OperationKind::GetByName, T::KIND, context)?;

            return match existing {
                Some(existing) => {
                    let mut entity = entity;
                    entity.set_artifact_id(existing.artifact_id());
                    self.update_and_refetch(get_by_id.as_ref(), update.as_ref(), context, entity)
                        .await
                }
                None => self.run_create(create.as_ref(), context, entity).await,
            };
        }

        let create = self.resolver.resolve::<dyn CreateStrategy<T>>()?;
        self.run_create(create.as_ref(), context, entity).await
    }

    /// Holds the require lock for `name` when serialisation is on.
    async fn lock_name(
        &self,
        context: ParentContext,
        entity: &'static str,
        name: &str,
    ) -> Option<OwnedMutexGuard<()>> {
        match &self.require_locks {
            Some(locks) => Some(locks.acquire(entity, context, name).await),
            None => None,
        }
    }

    async fn update_and_refetch<T: Artifact>(
        &self,
        get_by_id: &dyn GetByIdStrategy<T>,
        update: &dyn UpdateStrategy<T>,
        context: ParentContext,
        entity: T,
    ) -> ApiResult<T> {
        let id = entity.artifact_id();
        self.run_update(update, context, &entity).await?;

        get_by_id
            .get(context, id)
            .await
            .and_then(|found| found.ok_or_else(|| ApiError::not_found(T::KIND, id, context)))
            .during(OperationKind::GetById, T::KIND, context)
    }

    async fn run_update<T: Artifact>(
        &self,
        update: &dyn UpdateStrategy<T>,
        context: ParentContext,
        entity: &T,
    ) -> ApiResult<()> {
        debug!("Updating {} {} in {}", T::KIND, entity.artifact_id(), context);
        update
            .update(context, entity)
            .await
            .during(OperationKind::Update, T::KIND, context)?;
        info!("Updated {} {} in {}", T::KIND, entity.artifact_id(), context);
        Ok(())
    }

    async fn run_create<T: Artifact>(
        &self,
        create: &dyn CreateStrategy<T>,
        context: ParentContext,
        entity: T,
    ) -> ApiResult<T> {
        debug!("Creating {} in {}", T::KIND, context);
        let created = create
            .create(context, entity)
            .await
            .during(OperationKind::Create, T::KIND, context)?;
        info!("Created {} {} in {}", T::KIND, created.artifact_id(), context);
        Ok(created)
    }
}
