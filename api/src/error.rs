use crate::operation::OperationKind;
use rtf_model::{ArtifactId, ParentContext, RestError};
use std::fmt;
use thiserror::Error;

/// Where a failure happened: the step, the entity kind and the parent context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLocation {
    pub step: OperationKind,
    pub entity: &'static str,
    pub context: ParentContext,
}

impl fmt::Display for StepLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} in {}", self.step, self.entity, self.context)
    }
}

fn failed_at(at: &Option<StepLocation>) -> String {
    at.map(|at| format!("{} failed: ", at)).unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// No strategy registered for the operation/entity pair.
    #[error("No strategy registered for {operation} on {entity}")]
    Resolution {
        operation: OperationKind,
        entity: &'static str,
    },

    /// An explicit id was supplied but nothing exists under it.
    #[error("{}{entity} with ArtifactID {artifact_id} not found in {context}", failed_at(.at))]
    NotFound {
        entity: &'static str,
        artifact_id: ArtifactId,
        context: ParentContext,
        at: Option<StepLocation>,
    },

    /// A name used as a required input matched nothing.
    #[error("{}{entity} named '{name}' not found", failed_at(.at))]
    ObjectNotFound {
        entity: &'static str,
        name: String,
        at: Option<StepLocation>,
    },

    #[error("{step} of {entity} in {context} failed: {source}")]
    RemoteOperation {
        entity: &'static str,
        context: ParentContext,
        step: OperationKind,
        #[source]
        source: RestError,
    },

    #[error("{}Validation failed: {message}", failed_at(.at))]
    Validation {
        message: String,
        at: Option<StepLocation>,
    },

    #[error("{}Cannot map {entity} payload: {message}", failed_at(.at))]
    Mapping {
        entity: &'static str,
        message: String,
        at: Option<StepLocation>,
    },

    /// Transport failure not yet attributed to a step. Strategies raise this;
    /// the orchestrator and services turn it into `RemoteOperation`.
    #[error("Transport error: {0}")]
    Transport(#[from] RestError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            at: None,
        }
    }

    pub fn mapping(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Mapping {
            entity,
            message: message.into(),
            at: None,
        }
    }

    pub fn not_found(entity: &'static str, artifact_id: ArtifactId, context: ParentContext) -> Self {
        Self::NotFound {
            entity,
            artifact_id,
            context,
            at: None,
        }
    }

    pub fn object_not_found(entity: &'static str, name: impl Into<String>) -> Self {
        Self::ObjectNotFound {
            entity,
            name: name.into(),
            at: None,
        }
    }

    /// Attributes the error to the step that was running. Transport failures
    /// become `RemoteOperation`; other errors keep their kind and record the
    /// step. An error that already names a step keeps the innermost one.
    pub fn during(self, step: OperationKind, entity: &'static str, context: ParentContext) -> Self {
        match self {
            Self::Transport(source) => Self::RemoteOperation {
                entity,
                context,
                step,
                source,
            },
            mut other => {
                if let Some(at) = other.location_mut() {
                    if at.is_none() {
                        *at = Some(StepLocation {
                            step,
                            entity,
                            context,
                        });
                    }
                }
                other
            }
        }
    }

    fn location_mut(&mut self) -> Option<&mut Option<StepLocation>> {
        match self {
            Self::NotFound { at, .. }
            | Self::ObjectNotFound { at, .. }
            | Self::Validation { at, .. }
            | Self::Mapping { at, .. } => Some(at),
            _ => None,
        }
    }

    /// Step, entity kind and context of the failure, when known.
    pub fn location(&self) -> Option<StepLocation> {
        match self {
            Self::RemoteOperation {
                entity,
                context,
                step,
                ..
            } => Some(StepLocation {
                step: *step,
                entity: *entity,
                context: *context,
            }),
            Self::NotFound { at, .. }
            | Self::ObjectNotFound { at, .. }
            | Self::Validation { at, .. }
            | Self::Mapping { at, .. } => *at,
            _ => None,
        }
    }

    pub fn step(&self) -> Option<OperationKind> {
        self.location().map(|at| at.step)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(RestError::Serialization(err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Step tagging for results, see [`ApiError::during`].
pub trait StepContext<T> {
    fn during(self, step: OperationKind, entity: &'static str, context: ParentContext)
        -> ApiResult<T>;
}

impl<T> StepContext<T> for ApiResult<T> {
    fn during(
        self,
        step: OperationKind,
        entity: &'static str,
        context: ParentContext,
    ) -> ApiResult<T> {
        self.map_err(|err| err.during(step, entity, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_tagged() {
        let err = ApiError::from(RestError::http(500, "boom")).during(
            OperationKind::Update,
            "Tab",
            ParentContext::Workspace(1234567),
        );

        assert_eq!(err.step(), Some(OperationKind::Update));
        assert_eq!(
            err.to_string(),
            "update of Tab in workspace 1234567 failed: HTTP 500: boom"
        );
    }

    #[test]
    fn test_other_errors_record_the_step() {
        let err = ApiError::not_found("Tab", 999, ParentContext::Workspace(1234567)).during(
            OperationKind::GetById,
            "Tab",
            ParentContext::Workspace(1234567),
        );
        assert!(matches!(err, ApiError::NotFound { artifact_id: 999, .. }));
        assert_eq!(err.step(), Some(OperationKind::GetById));
        assert_eq!(
            err.to_string(),
            "get-by-id of Tab in workspace 1234567 failed: Tab with ArtifactID 999 not found in workspace 1234567"
        );

        let err = ApiError::mapping("Folder", "null child at index 0 of folder 5").during(
            OperationKind::GetById,
            "Folder",
            ParentContext::Workspace(1234567),
        );
        let at = err.location().unwrap();
        assert_eq!(at.context, ParentContext::Workspace(1234567));
        assert_eq!(at.entity, "Folder");
        assert!(matches!(err, ApiError::Mapping { .. }));
    }

    #[test]
    fn test_innermost_step_wins() {
        let err = ApiError::object_not_found("ClientStatus", "Active")
            .during(OperationKind::Create, "Client", ParentContext::Admin)
            .during(OperationKind::Require, "Client", ParentContext::Admin);

        assert_eq!(err.step(), Some(OperationKind::Create));
        assert_eq!(
            err.to_string(),
            "create of Client in admin context failed: ClientStatus named 'Active' not found"
        );
    }

    #[test]
    fn test_untagged_errors_have_no_location() {
        let err = ApiError::validation("bad input");
        assert_eq!(err.step(), None);
        assert_eq!(err.to_string(), "Validation failed: bad input");
    }

    #[test]
    fn test_resolution_message() {
        let err = ApiError::Resolution {
            operation: OperationKind::GetByName,
            entity: "Folder",
        };
        assert_eq!(err.to_string(), "No strategy registered for get-by-name on Folder");
    }
}
