//! Draft persistence — JSON save/load across restarts.
//!
//! A half-finished record survives closing the terminal; the error map is
//! not persisted and rebuilds as the user continues editing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use listdesk_core::{EditMode, FormState, FutureRecord, Navigator, WizardSession};

/// Serializable subset of the wizard that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct DraftState {
    pub record: FutureRecord,
    pub edit_mode: EditMode,
    pub current_step: usize,
    pub completed_steps: Vec<usize>,
}

impl Default for DraftState {
    fn default() -> Self {
        Self {
            record: FutureRecord::default(),
            edit_mode: EditMode::TickValue,
            current_step: 0,
            completed_steps: Vec::new(),
        }
    }
}

/// Load a draft from disk. Returns defaults if the file is missing or corrupt.
pub fn load(path: &Path) -> DraftState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => DraftState::default(),
    }
}

/// Save a draft to disk. Creates parent directories if needed.
pub fn save(path: &Path, draft: &DraftState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(draft)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract the persistable subset from a session.
pub fn extract(session: &WizardSession) -> DraftState {
    DraftState {
        record: session.form.record().clone(),
        edit_mode: session.form.edit_mode(),
        current_step: session.nav.current_step(),
        completed_steps: session.nav.completed_steps().iter().copied().collect(),
    }
}

/// Rebuild a session from a draft.
pub fn restore(draft: DraftState) -> WizardSession {
    let form = FormState::restore(draft.record, draft.edit_mode);
    let nav = Navigator::restore(draft.current_step, draft.completed_steps);
    WizardSession::restore(form, nav)
}
