use super::crud_operations;
use crate::orchestrator::CrudOrchestrator;
use rtf_model::ProductionPlaceholder;

#[derive(Clone)]
pub struct ProductionPlaceholderService {
    orchestrator: CrudOrchestrator,
}

impl ProductionPlaceholderService {
    pub fn new(orchestrator: CrudOrchestrator) -> Self {
        Self { orchestrator }
    }

    crud_operations!(ProductionPlaceholder);
}
