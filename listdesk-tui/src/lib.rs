//! ListDesk TUI — three-step terminal wizard over the core state machine.
//!
//! The main thread owns all state; the worker thread owns all network
//! calls. Input routes through the core store's update operations, so the
//! rendering below is a pure function of the session.

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;

#[cfg(test)]
mod test_helpers;
