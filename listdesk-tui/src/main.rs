//! ListDesk — terminal wizard for drafting and submitting futures listings.
//!
//! Steps:
//! 1. Identification — symbol, ISIN, names
//! 2. Deposit & underlyings — margin pair, underlying asset
//! 3. Trading — dates, currency, tick triangle, settlement

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use listdesk_core::api::{ApiConfig, RestClient};

use listdesk_tui::app::{AppState, Overlay};
use listdesk_tui::worker::{spawn_worker, WorkerCommand, WorkerResponse};
use listdesk_tui::{input, persistence, ui};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("listdesk");
    let draft_path = config_dir.join("draft.json");
    let api_config =
        ApiConfig::load(&config_dir.join("config.toml")).map_err(anyhow::Error::msg)?;

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // Spawn worker against the real service
    let api = RestClient::new(api_config)?;
    let worker_handle = spawn_worker(cmd_rx, resp_tx, Box::new(api));

    // Build app state and restore any saved draft
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, draft_path.clone());
    app.session = persistence::restore(persistence::load(&draft_path));

    // Reference enumerations are fetched once at wizard start.
    app.enums_loading = true;
    let _ = cmd_tx.send(WorkerCommand::FetchEnumerations);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save the draft before exit
    let _ = persistence::save(&draft_path, &persistence::extract(&app.session));

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::Enumerations { result } => {
            app.enums_loading = false;
            match result {
                Ok(enums) => {
                    app.session.apply_enumerations(enums);
                    app.set_status("Reference data loaded");
                }
                Err(err) => {
                    app.push_error(
                        format!("Failed to load reference data: {err}"),
                        "enumerations".into(),
                    );
                }
            }
        }
        WorkerResponse::Assets { token, result } => match result {
            Ok(assets) => {
                // Stale lists (the user changed type again) are dropped;
                // the spinner keeps running for the fresh request.
                if app.session.apply_asset_response(token, assets) {
                    app.assets_loading = false;
                    app.set_status(format!(
                        "{} underlying asset(s) loaded",
                        app.session.assets().len()
                    ));
                }
            }
            Err(err) => {
                if app.session.apply_asset_response(token, Vec::new()) {
                    app.assets_loading = false;
                    app.push_error(
                        format!("Failed to load underlying assets: {err}"),
                        "assets".into(),
                    );
                }
            }
        },
        WorkerResponse::Created { result } => match result {
            Ok(_) => {
                app.session.finish_submission(true);
                app.field_cursor = 0;
                app.overlay = Overlay::SubmitResult {
                    success: true,
                    detail: "The listing is registered with the reference service".into(),
                };
                app.set_status("Listing created");
            }
            Err(err) => {
                // The draft stays on the last step for a retry.
                app.session.finish_submission(false);
                app.overlay = Overlay::SubmitResult {
                    success: false,
                    detail: err.clone(),
                };
                app.push_error(format!("Creation failed: {err}"), "submit".into());
            }
        },
    }
}
