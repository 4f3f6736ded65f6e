//! Reference-data service client: the collaborator trait, its REST
//! implementation, and endpoint configuration.

pub mod config;
pub mod provider;
pub mod rest;

pub use config::ApiConfig;
pub use provider::{ApiError, Enumerations, ReferenceDataApi, UnderlyingAsset};
pub use rest::RestClient;
