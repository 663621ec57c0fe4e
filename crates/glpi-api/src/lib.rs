//! glpi-api: wire types for the GLPI REST API
//!
//! Request/response bodies exchanged with a GLPI instance. Kept separate so
//! clients and inventory logic share one definition of the wire format.

pub mod responses;

pub use responses::{InitSessionResponse, RawRecord, SearchOption, SearchResponse};
