//! Entity kinds manipulated through the remote services.
//!
//! Every entity is a transient value: built by the caller (usually from
//! `Default` plus a few fields) or mapped from a wire payload, and never cached.

pub mod client;
pub mod document;
pub mod folder;
pub mod imaging;
pub mod instance_setting;
pub mod motd;
pub mod production;
pub mod tab;

pub use client::*;
pub use document::*;
pub use folder::*;
pub use imaging::*;
pub use instance_setting::*;
pub use motd::*;
pub use production::*;
pub use tab::*;
