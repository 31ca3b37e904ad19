//! Data models for the Zammad API.
//!
//! Records coming back from Zammad stay opaque `serde_json::Value`s; this
//! module only types what we send (request descriptors and write payloads)
//! and the entity kinds that drive compact output.

mod article;
mod descriptor;
mod entity;
mod ticket;

pub use article::*;
pub use descriptor::*;
pub use entity::*;
pub use ticket::*;
