//! Default wiring of every strategy in this crate against one transport.

use crate::resolver::StrategyResolver;
use crate::strategies::client::{
    ClientCreateStrategy, ClientStatusChoiceStrategy, ClientStatusGetChoiceIdByNameStrategy,
};
use crate::strategies::documents::{
    DocumentsFromCsvImageImportStrategy, DocumentsImageImportStrategy,
};
use crate::strategies::folder::{
    FolderCreateStrategy, FolderDeleteStrategy, FolderDeleteUnusedStrategy,
    FolderGetAccessStatusStrategy, FolderGetByIdStrategy, FolderGetFolderTreeStrategy,
    FolderGetSubfoldersStrategy, FolderGetWorkspaceRootStrategy, FolderManagerStrategy,
    FolderMoveStrategy, FolderUpdateStrategy,
};
use crate::strategies::imaging::{
    ImagingJobRetryErrorsStrategy, ImagingJobRunStrategy, ImagingJobStrategy,
};
use crate::strategies::instance_setting::{
    InstanceSettingGetByNameAndSectionStrategy, InstanceSettingQueryStrategy,
    InstanceSettingRequireStrategy,
};
use crate::strategies::kepler::{
    KeplerCreateStrategy, KeplerDeleteStrategy, KeplerEntity, KeplerGetByIdStrategy,
    KeplerUpdateStrategy, ObjectQueryGetByNameStrategy,
};
use crate::strategies::motd::{
    MotdClearStrategy, MotdGetStrategy, MotdIsTextOnlyStrategy, MotdManagerStrategy,
    MotdUpdateStrategy,
};
use crate::strategies::tab::{
    TabCreateStrategy, TabDeleteStrategy, TabGetAdminLevelMetadataStrategy,
    TabGetAllForNavigationStrategy, TabGetAvailableObjectTypesStrategy, TabGetByIdStrategy,
    TabGetEligibleParentsStrategy, TabGetTabsOrderStrategy, TabQueryStrategy, TabUpdateStrategy,
};
use crate::strategies::{
    CreateStrategy, DeleteStrategy, GetByIdStrategy, GetByNameStrategy, RequireStrategy,
    UpdateStrategy,
};
use rtf_model::{Client, Folder, InstanceSetting, ProductionPlaceholder, RestService, Tab};
use std::sync::Arc;
use tracing::debug;

/// Builds a resolver with every built-in strategy registered.
pub fn register_defaults(rest: Arc<dyn RestService>) -> StrategyResolver {
    let mut resolver = StrategyResolver::new();

    register_tab(&mut resolver, &rest);
    register_folder(&mut resolver, &rest);
    register_kepler::<ProductionPlaceholder>(&mut resolver, &rest);
    register_client(&mut resolver, &rest);
    register_instance_setting(&mut resolver, &rest);

    let imaging = Arc::new(ImagingJobStrategy::new(rest.clone()));
    resolver.register::<dyn ImagingJobRunStrategy>(imaging.clone());
    resolver.register::<dyn ImagingJobRetryErrorsStrategy>(imaging);

    resolver.register::<dyn DocumentsFromCsvImageImportStrategy>(Arc::new(
        DocumentsImageImportStrategy::new(rest.clone()),
    ));

    let motd = Arc::new(MotdManagerStrategy::new(rest.clone()));
    resolver.register::<dyn MotdGetStrategy>(motd.clone());
    resolver.register::<dyn MotdUpdateStrategy>(motd.clone());
    resolver.register::<dyn MotdClearStrategy>(motd.clone());
    resolver.register::<dyn MotdIsTextOnlyStrategy>(motd);

    debug!(
        "Registered {} strategies against {} transport",
        resolver.len(),
        rest.service_name()
    );
    resolver
}

fn register_tab(resolver: &mut StrategyResolver, rest: &Arc<dyn RestService>) {
    let get_by_id: Arc<dyn GetByIdStrategy<Tab>> = Arc::new(TabGetByIdStrategy::new(rest.clone()));
    resolver.register::<dyn GetByNameStrategy<Tab>>(Arc::new(ObjectQueryGetByNameStrategy::new(
        rest.clone(),
        get_by_id.clone(),
    )));
    resolver.register::<dyn CreateStrategy<Tab>>(Arc::new(TabCreateStrategy::new(
        rest.clone(),
        get_by_id.clone(),
    )));
    resolver.register::<dyn UpdateStrategy<Tab>>(Arc::new(TabUpdateStrategy::new(rest.clone())));
    resolver.register::<dyn DeleteStrategy<Tab>>(Arc::new(TabDeleteStrategy::new(rest.clone())));
    resolver.register::<dyn GetByIdStrategy<Tab>>(get_by_id);

    let queries = Arc::new(TabQueryStrategy::new(rest.clone()));
    resolver.register::<dyn TabGetAvailableObjectTypesStrategy>(queries.clone());
    resolver.register::<dyn TabGetAdminLevelMetadataStrategy>(queries.clone());
    resolver.register::<dyn TabGetEligibleParentsStrategy>(queries.clone());
    resolver.register::<dyn TabGetTabsOrderStrategy>(queries.clone());
    resolver.register::<dyn TabGetAllForNavigationStrategy>(queries);
}

fn register_folder(resolver: &mut StrategyResolver, rest: &Arc<dyn RestService>) {
    let get_by_id: Arc<dyn GetByIdStrategy<Folder>> =
        Arc::new(FolderGetByIdStrategy::new(rest.clone()));
    let manager = Arc::new(FolderManagerStrategy::new(rest.clone()));

    resolver.register::<dyn GetByNameStrategy<Folder>>(Arc::new(
        ObjectQueryGetByNameStrategy::new(rest.clone(), get_by_id.clone()),
    ));
    resolver.register::<dyn CreateStrategy<Folder>>(Arc::new(FolderCreateStrategy::new(
        rest.clone(),
        get_by_id.clone(),
        manager.clone(),
    )));
    resolver
        .register::<dyn UpdateStrategy<Folder>>(Arc::new(FolderUpdateStrategy::new(rest.clone())));
    resolver
        .register::<dyn DeleteStrategy<Folder>>(Arc::new(FolderDeleteStrategy::new(rest.clone())));
    resolver.register::<dyn GetByIdStrategy<Folder>>(get_by_id);

    resolver.register::<dyn FolderGetWorkspaceRootStrategy>(manager.clone());
    resolver.register::<dyn FolderGetSubfoldersStrategy>(manager.clone());
    resolver.register::<dyn FolderGetFolderTreeStrategy>(manager.clone());
    resolver.register::<dyn FolderGetAccessStatusStrategy>(manager.clone());
    resolver.register::<dyn FolderMoveStrategy>(manager.clone());
    resolver.register::<dyn FolderDeleteUnusedStrategy>(manager);
}

/// Registers the generic manager CRUD plus Object Manager name lookup for `T`.
/// Returns the get-by-id strategy so entity-specific wiring can reuse it.
fn register_kepler<T: KeplerEntity>(
    resolver: &mut StrategyResolver,
    rest: &Arc<dyn RestService>,
) -> Arc<dyn GetByIdStrategy<T>> {
    let get_by_id: Arc<dyn GetByIdStrategy<T>> =
        Arc::new(KeplerGetByIdStrategy::<T>::new(rest.clone()));

    resolver.register::<dyn GetByNameStrategy<T>>(Arc::new(ObjectQueryGetByNameStrategy::new(
        rest.clone(),
        get_by_id.clone(),
    )));
    resolver.register::<dyn CreateStrategy<T>>(Arc::new(KeplerCreateStrategy::new(
        rest.clone(),
        get_by_id.clone(),
    )));
    resolver.register::<dyn UpdateStrategy<T>>(Arc::new(KeplerUpdateStrategy::<T>::new(
        rest.clone(),
    )));
    resolver.register::<dyn DeleteStrategy<T>>(Arc::new(KeplerDeleteStrategy::<T>::new(
        rest.clone(),
    )));
    resolver.register::<dyn GetByIdStrategy<T>>(get_by_id.clone());
    get_by_id
}

fn register_client(resolver: &mut StrategyResolver, rest: &Arc<dyn RestService>) {
    let get_by_id = register_kepler::<Client>(resolver, rest);

    let status: Arc<dyn ClientStatusGetChoiceIdByNameStrategy> =
        Arc::new(ClientStatusChoiceStrategy::new(rest.clone()));
    resolver.register::<dyn CreateStrategy<Client>>(Arc::new(ClientCreateStrategy::new(
        rest.clone(),
        get_by_id,
        status.clone(),
    )));
    resolver.register::<dyn ClientStatusGetChoiceIdByNameStrategy>(status);
}

fn register_instance_setting(resolver: &mut StrategyResolver, rest: &Arc<dyn RestService>) {
    let get_by_id = register_kepler::<InstanceSetting>(resolver, rest);

    let by_name_and_section: Arc<dyn InstanceSettingGetByNameAndSectionStrategy> = Arc::new(
        InstanceSettingQueryStrategy::new(rest.clone(), get_by_id.clone()),
    );
    let update: Arc<dyn UpdateStrategy<InstanceSetting>> =
        Arc::new(KeplerUpdateStrategy::<InstanceSetting>::new(rest.clone()));
    let create: Arc<dyn CreateStrategy<InstanceSetting>> =
        Arc::new(KeplerCreateStrategy::new(rest.clone(), get_by_id.clone()));

    resolver.register::<dyn RequireStrategy<InstanceSetting>>(Arc::new(
        InstanceSettingRequireStrategy::new(
            by_name_and_section.clone(),
            get_by_id,
            update,
            create,
        ),
    ));
    resolver.register::<dyn InstanceSettingGetByNameAndSectionStrategy>(by_name_and_section);
}
