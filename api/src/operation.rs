use serde::Serialize;
use std::fmt;

/// What a strategy does. Also used to tag the failing step of a composite operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    Create,
    Get,
    GetById,
    GetByName,
    Update,
    Delete,
    Require,
    GetIdByName,
    GetByNameAndSection,
    Run,
    RetryErrors,
    Import,
    GetAvailableObjectTypes,
    GetAdminLevelMetadata,
    GetEligibleParents,
    GetTabsOrder,
    GetAllForNavigation,
    GetWorkspaceRoot,
    GetSubfolders,
    GetFolderTree,
    GetAccessStatus,
    Move,
    DeleteUnused,
    IsTextOnly,
    Clear,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::GetById => "get-by-id",
            Self::GetByName => "get-by-name",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Require => "require",
            Self::GetIdByName => "get-id-by-name",
            Self::GetByNameAndSection => "get-by-name-and-section",
            Self::Run => "run",
            Self::RetryErrors => "retry-errors",
            Self::Import => "import",
            Self::GetAvailableObjectTypes => "get-available-object-types",
            Self::GetAdminLevelMetadata => "get-admin-level-metadata",
            Self::GetEligibleParents => "get-eligible-parents",
            Self::GetTabsOrder => "get-tabs-order",
            Self::GetAllForNavigation => "get-all-for-navigation",
            Self::GetWorkspaceRoot => "get-workspace-root",
            Self::GetSubfolders => "get-subfolders",
            Self::GetFolderTree => "get-folder-tree",
            Self::GetAccessStatus => "get-access-status",
            Self::Move => "move",
            Self::DeleteUnused => "delete-unused",
            Self::IsTextOnly => "is-text-only",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a strategy: which operation, for which entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OperationDescriptor {
    pub operation: OperationKind,
    pub entity: &'static str,
}

impl OperationDescriptor {
    pub const fn new(operation: OperationKind, entity: &'static str) -> Self {
        Self { operation, entity }
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entity, self.operation)
    }
}

/// Implemented by every strategy trait object (`dyn GetByIdStrategy<Tab>`, ...)
/// so the resolver can key registrations and describe failures.
pub trait Capability: Send + Sync + 'static {
    fn descriptor() -> OperationDescriptor;
}

/// Implements [`Capability`] for a non-generic strategy trait object.
macro_rules! capability {
    ($strategy:ident, $operation:ident, $entity:expr) => {
        impl $crate::operation::Capability for dyn $strategy {
            fn descriptor() -> $crate::operation::OperationDescriptor {
                $crate::operation::OperationDescriptor::new(
                    $crate::operation::OperationKind::$operation,
                    $entity,
                )
            }
        }
    };
}

pub(crate) use capability;
