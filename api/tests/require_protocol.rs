use async_trait::async_trait;
use futures::future::join_all;
use rtf_api::{
    ApiError, ApiFacade, ApiResult, CreateStrategy, GetByIdStrategy, GetByNameStrategy,
    OperationKind, RequireStrategy, StrategyResolver, UpdateStrategy,
};
use rtf_model::{ArtifactId, ParentContext, RestError, Tab, TabLinkType};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const WORKSPACE: ParentContext = ParentContext::Workspace(1234567);

/// Tab store standing in for the remote service, counting every call.
#[derive(Default)]
struct InMemoryTabs {
    tabs: Mutex<Vec<Tab>>,
    next_id: AtomicI32,
    get_by_id_calls: AtomicUsize,
    get_by_name_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl InMemoryTabs {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI32::new(1000),
            ..Self::default()
        })
    }

    fn seeded(tabs: Vec<Tab>) -> Arc<Self> {
        let store = Self::new();
        *store.tabs.lock().unwrap() = tabs;
        store
    }

    fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn updates(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn remote_calls(&self) -> usize {
        self.get_by_id_calls.load(Ordering::SeqCst)
            + self.get_by_name_calls.load(Ordering::SeqCst)
            + self.creates()
            + self.updates()
    }

    fn resolver(self: &Arc<Self>) -> StrategyResolver {
        StrategyResolver::new()
            .with::<dyn GetByIdStrategy<Tab>>(self.clone())
            .with::<dyn GetByNameStrategy<Tab>>(self.clone())
            .with::<dyn CreateStrategy<Tab>>(self.clone())
            .with::<dyn UpdateStrategy<Tab>>(self.clone())
    }
}

#[async_trait]
impl GetByIdStrategy<Tab> for InMemoryTabs {
    async fn get(&self, _context: ParentContext, id: ArtifactId) -> ApiResult<Option<Tab>> {
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        let tabs = self.tabs.lock().unwrap();
        Ok(tabs.iter().find(|tab| tab.artifact_id == id).cloned())
    }
}

#[async_trait]
impl GetByNameStrategy<Tab> for InMemoryTabs {
    async fn get(&self, _context: ParentContext, name: &str) -> ApiResult<Option<Tab>> {
        self.get_by_name_calls.fetch_add(1, Ordering::SeqCst);
        // Let concurrent requires interleave between lookup and create.
        tokio::task::yield_now().await;
        let tabs = self.tabs.lock().unwrap();
        Ok(tabs.iter().find(|tab| tab.name == name).cloned())
    }
}

#[async_trait]
impl CreateStrategy<Tab> for InMemoryTabs {
    async fn create(&self, _context: ParentContext, mut entity: Tab) -> ApiResult<Tab> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        entity.fill_required_properties();
        entity.artifact_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.tabs.lock().unwrap().push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl UpdateStrategy<Tab> for InMemoryTabs {
    async fn update(&self, _context: ParentContext, entity: &Tab) -> ApiResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut tabs = self.tabs.lock().unwrap();
        match tabs.iter_mut().find(|tab| tab.artifact_id == entity.artifact_id) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(())
            }
            None => Err(RestError::http(404, "tab vanished").into()),
        }
    }
}

fn stored_tab(id: ArtifactId, name: &str) -> Tab {
    let mut tab = Tab::named(name);
    tab.artifact_id = id;
    tab
}

#[tokio::test]
async fn test_require_new_name_creates_once() {
    let store = InMemoryTabs::new();
    let api = ApiFacade::new(Arc::new(store.resolver()));

    let tab = api
        .tabs()
        .require(WORKSPACE, Tab::named("MySpecialTab"))
        .await
        .unwrap();

    assert!(tab.artifact_id > 0);
    assert_eq!(tab.name, "MySpecialTab");
    assert_eq!(store.creates(), 1);
    assert_eq!(store.updates(), 0);
}

#[tokio::test]
async fn test_require_is_idempotent() {
    let store = InMemoryTabs::new();
    let tabs = ApiFacade::new(Arc::new(store.resolver())).tabs();
    let definition = Tab::named("Reports")
        .with_link_type(TabLinkType::Parent)
        .with_order(40);

    let first = tabs.require(WORKSPACE, definition.clone()).await.unwrap();
    let second = tabs.require(WORKSPACE, definition).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.creates(), 1);
    assert_eq!(store.tabs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_require_by_id_updates_and_never_looks_up_name() {
    let store = InMemoryTabs::seeded(vec![stored_tab(5, "Old name"), stored_tab(9, "New name")]);
    let tabs = ApiFacade::new(Arc::new(store.resolver())).tabs();

    let result = tabs
        .require(WORKSPACE, stored_tab(5, "New name"))
        .await
        .unwrap();

    assert_eq!(result.artifact_id, 5);
    assert_eq!(result.name, "New name");
    assert_eq!(store.get_by_name_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.updates(), 1);
    assert_eq!(store.creates(), 0);

    let stored = store.tabs.lock().unwrap();
    let untouched = stored.iter().find(|tab| tab.artifact_id == 9).unwrap();
    assert_eq!(untouched.name, "New name");
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_require_by_name_updates_existing() {
    let store = InMemoryTabs::seeded(vec![stored_tab(7, "Reports")]);
    let tabs = ApiFacade::new(Arc::new(store.resolver())).tabs();

    let result = tabs
        .require(WORKSPACE, Tab::named("Reports").with_order(90))
        .await
        .unwrap();

    assert_eq!(result.artifact_id, 7);
    assert_eq!(result.order, 90);
    assert_eq!(store.updates(), 1);
    assert_eq!(store.creates(), 0);
}

#[tokio::test]
async fn test_require_missing_id_is_not_found_without_update() {
    let store = InMemoryTabs::new();
    let tabs = ApiFacade::new(Arc::new(store.resolver())).tabs();

    let err = tabs
        .require(WORKSPACE, Tab::with_id(999))
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(OperationKind::GetById));
    match err {
        ApiError::NotFound {
            entity,
            artifact_id,
            context,
            ..
        } => {
            assert_eq!(entity, "Tab");
            assert_eq!(artifact_id, 999);
            assert_eq!(context, WORKSPACE);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(store.updates(), 0);
    assert_eq!(store.creates(), 0);
}

#[tokio::test]
async fn test_require_without_id_or_name_creates() {
    let store = InMemoryTabs::new();
    let tabs = ApiFacade::new(Arc::new(store.resolver())).tabs();

    let tab = tabs.require(WORKSPACE, Tab::default()).await.unwrap();

    assert!(tab.artifact_id > 0);
    assert!(!tab.name.is_empty());
    assert_eq!(store.get_by_name_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.creates(), 1);
}

#[tokio::test]
async fn test_require_with_blank_name_creates_without_lookup() {
    let store = InMemoryTabs::new();
    let tabs = ApiFacade::new(Arc::new(store.resolver())).tabs();

    let tab = tabs.require(WORKSPACE, Tab::named("   ")).await.unwrap();

    assert!(!tab.name.trim().is_empty());
    assert_eq!(store.get_by_name_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.creates(), 1);
}

#[tokio::test]
async fn test_missing_strategy_fails_before_any_remote_call() {
    let store = InMemoryTabs::new();
    let resolver = StrategyResolver::new()
        .with::<dyn GetByIdStrategy<Tab>>(store.clone())
        .with::<dyn GetByNameStrategy<Tab>>(store.clone())
        .with::<dyn UpdateStrategy<Tab>>(store.clone());
    let tabs = ApiFacade::new(Arc::new(resolver)).tabs();

    let err = tabs
        .require(WORKSPACE, Tab::named("Reports"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Resolution {
            operation: OperationKind::Create,
            entity: "Tab"
        }
    ));
    assert_eq!(store.remote_calls(), 0);
}

#[tokio::test]
async fn test_serialized_require_creates_one_tab_for_concurrent_callers() {
    let store = InMemoryTabs::new();
    let tabs = ApiFacade::new(Arc::new(store.resolver()))
        .with_serialized_require()
        .tabs();

    let results = join_all(
        (0..8).map(|_| tabs.require(WORKSPACE, Tab::named("Shared"))),
    )
    .await;

    let ids: Vec<ArtifactId> = results
        .into_iter()
        .map(|result| result.unwrap().artifact_id)
        .collect();
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(store.creates(), 1);
    assert_eq!(store.updates(), 7);
}

struct FixedRequire;

#[async_trait]
impl RequireStrategy<Tab> for FixedRequire {
    async fn require(&self, _context: ParentContext, entity: Tab) -> ApiResult<Tab> {
        Ok(Tab {
            artifact_id: 4242,
            ..entity
        })
    }
}

#[tokio::test]
async fn test_registered_require_strategy_takes_over() {
    let resolver = StrategyResolver::new().with::<dyn RequireStrategy<Tab>>(Arc::new(FixedRequire));
    let tabs = ApiFacade::new(Arc::new(resolver)).tabs();

    let tab = tabs.require(WORKSPACE, Tab::named("Any")).await.unwrap();
    assert_eq!(tab.artifact_id, 4242);
}
