//! glpi-client: session lifecycle and HTTP access to the GLPI REST API
//!
//! Provides the [`GlpiApi`] trait seam, its reqwest-backed [`HttpClient`]
//! implementation, and the [`SessionManager`] that bounds one authenticated
//! session per inventory run.

pub mod credentials;
pub mod error;
pub mod http;
pub mod session;
pub mod traits;

pub use credentials::Credentials;
pub use error::{ClientError, Result};
pub use http::HttpClient;
pub use session::{Session, SessionManager};
pub use traits::GlpiApi;
