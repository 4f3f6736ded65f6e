//! Background worker thread — all network I/O runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Asset
//! responses echo the request token they were issued under so the main
//! thread can drop lists that arrive after the user moved on.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use listdesk_core::api::{Enumerations, ReferenceDataApi, UnderlyingAsset};
use listdesk_core::{AssetRequestToken, FutureRecord};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchEnumerations,
    FetchAssets {
        underlying_type: String,
        token: AssetRequestToken,
    },
    CreateFuture {
        record: Box<FutureRecord>,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI. Errors are already
/// rendered to text; the main thread only displays them.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Enumerations {
        result: Result<Enumerations, String>,
    },
    Assets {
        token: AssetRequestToken,
        result: Result<Vec<UnderlyingAsset>, String>,
    },
    Created {
        result: Result<serde_json::Value, String>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    api: Box<dyn ReferenceDataApi>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("listdesk-worker".into())
        .spawn(move || {
            worker_loop(rx, tx, api.as_ref());
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    api: &dyn ReferenceDataApi,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(cmd, &tx, api),
        }
    }
}

fn handle_command(
    cmd: WorkerCommand,
    tx: &Sender<WorkerResponse>,
    api: &dyn ReferenceDataApi,
) {
    match cmd {
        WorkerCommand::FetchEnumerations => {
            let result = api.fetch_enumerations().map_err(|e| e.to_string());
            let _ = tx.send(WorkerResponse::Enumerations { result });
        }
        WorkerCommand::FetchAssets {
            underlying_type,
            token,
        } => {
            let result = api
                .fetch_underlying_assets(&underlying_type)
                .map_err(|e| e.to_string());
            let _ = tx.send(WorkerResponse::Assets { token, result });
        }
        WorkerCommand::CreateFuture { record } => {
            let result = api.create_future(&record).map_err(|e| e.to_string());
            let _ = tx.send(WorkerResponse::Created { result });
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedApi;
    use std::sync::mpsc;

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx, Box::new(ScriptedApi::with_defaults()));
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn enumerations_round_trip() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx, Box::new(ScriptedApi::with_defaults()));
        cmd_tx.send(WorkerCommand::FetchEnumerations).unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::Enumerations { result } => {
                let enums = result.unwrap();
                assert!(enums.deposit_types.contains(&"RATE".to_string()));
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn asset_responses_echo_their_token() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx, Box::new(ScriptedApi::with_defaults()));

        // Tokens come from the session; mint one the same way.
        let mut session = listdesk_core::WizardSession::new();
        let listdesk_core::AssetDirective::Fetch {
            underlying_type,
            token,
        } = session.set_underlying_type("INDEX")
        else {
            panic!("expected fetch directive");
        };

        cmd_tx
            .send(WorkerCommand::FetchAssets {
                underlying_type,
                token,
            })
            .unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::Assets {
                token: echoed,
                result,
            } => {
                assert_eq!(echoed, token);
                assert!(!result.unwrap().is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
