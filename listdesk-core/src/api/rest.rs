//! Blocking REST implementation of the reference-data collaborator.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::config::ApiConfig;
use super::provider::{ApiError, Enumerations, ReferenceDataApi, UnderlyingAsset};
use crate::record::FutureRecord;

/// Error envelope the service uses for rejected operations.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

/// REST client against the reference-data service.
pub struct RestClient {
    client: reqwest::blocking::Client,
    config: ApiConfig,
}

impl RestClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        resp.json::<T>().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl ReferenceDataApi for RestClient {
    fn name(&self) -> &str {
        "rest"
    }

    fn fetch_enumerations(&self) -> Result<Enumerations, ApiError> {
        Ok(Enumerations {
            settlement_methods: self.get_json("/api/enums/settlement-methods")?,
            deposit_types: self.get_json("/api/enums/deposit-types")?,
            underlying_types: self.get_json("/api/underlyings/types")?,
        })
    }

    fn fetch_underlying_assets(
        &self,
        underlying_type: &str,
    ) -> Result<Vec<UnderlyingAsset>, ApiError> {
        if underlying_type.is_empty() {
            return Ok(Vec::new());
        }
        self.get_json(&format!("/api/underlying-assets?type={underlying_type}"))
    }

    fn create_future(&self, record: &FutureRecord) -> Result<serde_json::Value, ApiError> {
        let url = self.config.endpoint("/api/futures");
        let resp = self
            .client
            .post(&url)
            .json(record)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<serde_json::Value>()
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        // Rejections carry a message envelope when the server produced one.
        let body = resp.text().unwrap_or_default();
        match serde_json::from_str::<ServerMessage>(&body) {
            Ok(ServerMessage {
                message: Some(message),
            }) => Err(ApiError::Rejected(message)),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_underlying_type_skips_the_network() {
        // Unroutable base URL: any network call would fail loudly.
        let client = RestClient::new(ApiConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let assets = client.fetch_underlying_assets("").unwrap();
        assert!(assets.is_empty());
    }

    #[test]
    fn server_message_envelope_decodes() {
        let msg: ServerMessage = serde_json::from_str(r#"{"message":"duplicate"}"#).unwrap();
        assert_eq!(msg.message.as_deref(), Some("duplicate"));
        let msg: ServerMessage = serde_json::from_str("{}").unwrap();
        assert!(msg.message.is_none());
    }
}
