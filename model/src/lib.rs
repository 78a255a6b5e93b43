pub mod config;
pub mod entities;
pub mod http;
pub mod mock;
pub mod rest;
pub mod types;

pub use config::RestConfig;
pub use entities::*;
pub use http::HttpRestService;
pub use mock::ScriptedRestService;
pub use rest::{
    HttpMethod, OptionalResponse, RestError, RestRequest, RestResult, RestService, RestServiceExt,
};
pub use types::{Artifact, ArtifactId, NamedArtifact, ParentContext};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::entities::*;
    pub use crate::rest::*;
    pub use crate::types::*;
}
