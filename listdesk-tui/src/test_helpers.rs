//! Test support — scripted reference-data backend and app constructors.

use std::sync::mpsc;
use std::sync::Mutex;

use listdesk_core::api::{ApiError, Enumerations, ReferenceDataApi, UnderlyingAsset};
use listdesk_core::FutureRecord;

use crate::app::AppState;

/// In-memory backend with canned reference data. Records every create
/// call so tests can assert on the submitted payload.
pub struct ScriptedApi {
    pub enums: Enumerations,
    pub assets: Vec<UnderlyingAsset>,
    pub reject_create_with: Option<String>,
    pub created: Mutex<Vec<FutureRecord>>,
}

impl ScriptedApi {
    pub fn with_defaults() -> Self {
        Self {
            enums: Enumerations {
                settlement_methods: vec!["CASH".into(), "PHYSICAL".into()],
                deposit_types: vec!["AMOUNT".into(), "RATE".into()],
                underlying_types: vec!["INDEX".into(), "EQUITY".into(), "BOND".into()],
            },
            assets: vec![
                UnderlyingAsset {
                    id: 7,
                    identifier: "EU0009658145".into(),
                },
                UnderlyingAsset {
                    id: 9,
                    identifier: "DE0008469008".into(),
                },
            ],
            reject_create_with: None,
            created: Mutex::new(Vec::new()),
        }
    }
}

impl ReferenceDataApi for ScriptedApi {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_enumerations(&self) -> Result<Enumerations, ApiError> {
        Ok(self.enums.clone())
    }

    fn fetch_underlying_assets(
        &self,
        underlying_type: &str,
    ) -> Result<Vec<UnderlyingAsset>, ApiError> {
        if underlying_type.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.assets.clone())
    }

    fn create_future(&self, record: &FutureRecord) -> Result<serde_json::Value, ApiError> {
        self.created.lock().unwrap().push(record.clone());
        match &self.reject_create_with {
            Some(message) => Err(ApiError::Rejected(message.clone())),
            None => Ok(serde_json::json!({ "id": 1 })),
        }
    }
}

/// App with dangling worker channels — enough for state and input tests.
pub fn new_test_app() -> AppState {
    let (cmd_tx, _cmd_rx) = mpsc::channel();
    let (_resp_tx, resp_rx) = mpsc::channel();
    AppState::new(
        cmd_tx,
        resp_rx,
        std::env::temp_dir().join("listdesk_test_draft.json"),
    )
}

/// App with reference data already installed.
pub fn loaded_test_app() -> AppState {
    let mut app = new_test_app();
    app.session
        .apply_enumerations(ScriptedApi::with_defaults().enums);
    app
}
