//! Error types for inventory runs

use glpi_client::ClientError;
use thiserror::Error;

/// Errors that abort an inventory run.
///
/// Schema resolution itself never fails; only its remote catalog fetch can.
/// Records that cannot be projected are skipped per item, never raised.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Session could not be established
    #[error("authentication against GLPI failed: {0}")]
    Auth(#[source] ClientError),

    /// Field catalog could not be fetched
    #[error("failed to fetch the field catalog: {0}")]
    Schema(#[source] ClientError),

    /// Search request failed
    #[error("failed to fetch asset records: {0}")]
    Fetch(#[source] ClientError),
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
