//! Reference-data collaborator trait and structured error types.
//!
//! The trait abstracts the remote service so front ends can swap the REST
//! implementation for a scripted one in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::FutureRecord;

/// The three reference enumerations, fetched once at wizard start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enumerations {
    pub settlement_methods: Vec<String>,
    pub deposit_types: Vec<String>,
    pub underlying_types: Vec<String>,
}

/// One selectable underlying asset. Lists are keyed by underlying type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlyingAsset {
    pub id: i64,
    pub identifier: String,
}

/// Structured error types for remote operations.
///
/// Designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("creation rejected: {0}")]
    Rejected(String),
}

/// Remote reference-data and persistence service.
pub trait ReferenceDataApi: Send + Sync {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;

    /// Fetch all three enumerations.
    fn fetch_enumerations(&self) -> Result<Enumerations, ApiError>;

    /// Fetch the asset list for an underlying type. An empty type yields
    /// an empty list without a network call.
    fn fetch_underlying_assets(
        &self,
        underlying_type: &str,
    ) -> Result<Vec<UnderlyingAsset>, ApiError>;

    /// Persist a finished record. The payload of a successful creation is
    /// whatever the server echoes back.
    fn create_future(&self, record: &FutureRecord) -> Result<serde_json::Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_for_display() {
        let err = ApiError::Status {
            status: 422,
            body: "duplicate isin".into(),
        };
        assert_eq!(err.to_string(), "server returned HTTP 422: duplicate isin");

        let err = ApiError::Rejected("symbol already listed".into());
        assert!(err.to_string().contains("symbol already listed"));
    }

    #[test]
    fn asset_decodes_from_wire_shape() {
        let asset: UnderlyingAsset =
            serde_json::from_str(r#"{"id":12,"identifier":"DE0007100000"}"#).unwrap();
        assert_eq!(asset.id, 12);
        assert_eq!(asset.identifier, "DE0007100000");
    }
}
