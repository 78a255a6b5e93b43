//! Strategy capabilities and their implementations.
//!
//! Each trait here is one narrow operation for one entity type. The generic
//! CRUD capabilities are parameterised by entity; entity-specific actions live
//! in the per-entity modules. Strategies only call the transport (and, when
//! injected at construction, other strategies of the same entity); composing
//! several operations is the orchestrator's job.

pub mod client;
pub mod documents;
pub mod folder;
pub mod imaging;
pub mod instance_setting;
pub mod kepler;
pub mod motd;
pub mod production;
pub mod tab;

use crate::error::ApiResult;
use crate::operation::{Capability, OperationDescriptor, OperationKind};
use async_trait::async_trait;
use rtf_model::{Artifact, ArtifactId, ParentContext};

#[async_trait]
pub trait GetByIdStrategy<T: Artifact>: Send + Sync {
    /// `Ok(None)` when nothing exists under `id`.
    async fn get(&self, context: ParentContext, id: ArtifactId) -> ApiResult<Option<T>>;
}

#[async_trait]
pub trait GetByNameStrategy<T: Artifact>: Send + Sync {
    /// First entity the service returns for `name`, if any.
    async fn get(&self, context: ParentContext, name: &str) -> ApiResult<Option<T>>;
}

#[async_trait]
pub trait CreateStrategy<T: Artifact>: Send + Sync {
    /// Creates `entity` and returns the server's state for the new id.
    async fn create(&self, context: ParentContext, entity: T) -> ApiResult<T>;
}

#[async_trait]
pub trait UpdateStrategy<T: Artifact>: Send + Sync {
    /// `entity` must carry the id of the artifact to update.
    async fn update(&self, context: ParentContext, entity: &T) -> ApiResult<()>;
}

#[async_trait]
pub trait DeleteStrategy<T: Artifact>: Send + Sync {
    async fn delete(&self, context: ParentContext, id: ArtifactId) -> ApiResult<()>;
}

/// Replaces the generic require decision tree for entity kinds whose
/// identity is not `(id, name)`.
#[async_trait]
pub trait RequireStrategy<T: Artifact>: Send + Sync {
    async fn require(&self, context: ParentContext, entity: T) -> ApiResult<T>;
}

macro_rules! generic_capability {
    ($strategy:ident, $operation:ident) => {
        impl<T: Artifact> Capability for dyn $strategy<T> {
            fn descriptor() -> OperationDescriptor {
                OperationDescriptor::new(OperationKind::$operation, T::KIND)
            }
        }
    };
}

generic_capability!(GetByIdStrategy, GetById);
generic_capability!(GetByNameStrategy, GetByName);
generic_capability!(CreateStrategy, Create);
generic_capability!(UpdateStrategy, Update);
generic_capability!(DeleteStrategy, Delete);
generic_capability!(RequireStrategy, Require);
