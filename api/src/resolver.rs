//! Registration table mapping strategy capabilities to implementations.
//!
//! Each capability is a strategy trait object type such as
//! `dyn GetByIdStrategy<Tab>`. The table is filled once at startup and then
//! shared read-only; resolving an unregistered capability is an
//! [`ApiError::Resolution`].

use crate::error::{ApiError, ApiResult};
use crate::operation::{Capability, OperationDescriptor};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

struct Registration {
    descriptor: OperationDescriptor,
    /// Always an `Arc<S>` for the `S` the entry is keyed by.
    strategy: Box<dyn Any + Send + Sync>,
}

#[derive(Default)]
pub struct StrategyResolver {
    strategies: HashMap<TypeId, Registration>,
}

impl StrategyResolver {
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers `strategy` as the implementation of capability `S`,
    /// replacing any earlier registration.
    pub fn register<S>(&mut self, strategy: Arc<S>)
    where
        S: Capability + ?Sized,
    {
        let descriptor = S::descriptor();
        debug!("Registering strategy for {}", descriptor);
        self.strategies.insert(
            TypeId::of::<S>(),
            Registration {
                descriptor,
                strategy: Box::new(strategy),
            },
        );
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<S>(mut self, strategy: Arc<S>) -> Self
    where
        S: Capability + ?Sized,
    {
        self.register(strategy);
        self
    }

    pub fn resolve<S>(&self) -> ApiResult<Arc<S>>
    where
        S: Capability + ?Sized,
    {
        self.try_resolve::<S>().ok_or_else(|| {
            let descriptor = S::descriptor();
            ApiError::Resolution {
                operation: descriptor.operation,
                entity: descriptor.entity,
            }
        })
    }

    pub fn try_resolve<S>(&self) -> Option<Arc<S>>
    where
        S: Capability + ?Sized,
    {
        self.strategies
            .get(&TypeId::of::<S>())
            .and_then(|registration| registration.strategy.downcast_ref::<Arc<S>>())
            .cloned()
    }

    pub fn is_registered<S>(&self) -> bool
    where
        S: Capability + ?Sized,
    {
        self.strategies.contains_key(&TypeId::of::<S>())
    }

    /// Every registered `(operation, entity)` pair, sorted by entity then operation.
    pub fn descriptors(&self) -> Vec<OperationDescriptor> {
        let mut descriptors: Vec<OperationDescriptor> = self
            .strategies
            .values()
            .map(|registration| registration.descriptor)
            .collect();
        descriptors.sort_by(|a, b| {
            a.entity
                .cmp(b.entity)
                .then_with(|| a.operation.as_str().cmp(b.operation.as_str()))
        });
        descriptors
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
