pub mod error;
pub mod operation;
pub mod orchestrator;
pub mod registration;
pub mod resolver;
pub mod services;
pub mod settings;
pub mod strategies;

pub use error::{ApiError, ApiResult, StepContext};
pub use operation::{Capability, OperationDescriptor, OperationKind};
pub use orchestrator::CrudOrchestrator;
pub use registration::register_defaults;
pub use resolver::StrategyResolver;
pub use services::{
    ApiFacade, ClientService, DocumentService, FolderService, ImagingJobService,
    InstanceSettingService, MotdService, ProductionPlaceholderService, TabService,
};
pub use settings::Settings;
pub use strategies::{
    CreateStrategy, DeleteStrategy, GetByIdStrategy, GetByNameStrategy, RequireStrategy,
    UpdateStrategy,
};
