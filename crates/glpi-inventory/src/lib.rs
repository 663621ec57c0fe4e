//! glpi-inventory: schema resolution and host classification
//!
//! Turns GLPI "Computer" search results into a normalized host/group
//! inventory: resolves which catalog fields hold the IP address and the
//! operating-system label, projects each raw record into a host entry, and
//! classifies hosts into OS groups.

pub mod error;
pub mod project;
pub mod runner;
pub mod schema;
pub mod sink;

pub use error::InventoryError;
pub use project::{HostEntry, HostGroup, classify_os, project_record};
pub use runner::{ADDRESS_VAR, DEFAULT_ASSET_TYPE, DEFAULT_LIMIT, InventoryRunner};
pub use schema::{
    DEFAULT_IP_FIELD_ID, DEFAULT_OS_FIELD_ID, FieldRoleMap, NAME_FIELD_ID, SchemaResolver,
    resolve_roles,
};
pub use sink::{Inventory, InventorySink};
