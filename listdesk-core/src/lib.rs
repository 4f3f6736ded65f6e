//! ListDesk Core — the futures-listing wizard state machine.
//!
//! This crate contains everything that has invariants:
//! - The instrument record and its static field/constraint tables
//! - Derived-value calculation (tick triangle, deposit pair)
//! - Per-field and whole-record validation with the date-ordering rule
//! - The three step descriptors and their required subsets
//! - The form state store (record, error map, text buffers, edit mode)
//! - Step navigation with completion gating
//! - The wizard session: asset-fetch sequencing and the submission gate
//! - The reference-data API collaborator trait and its REST client
//!
//! Rendering and I/O live in the front-end crates; they drive this crate
//! exclusively through the update and navigation operations.

pub mod api;
pub mod calc;
pub mod form;
pub mod nav;
pub mod record;
pub mod session;
pub mod steps;
pub mod validate;

pub use calc::EditMode;
pub use form::FormState;
pub use nav::{Navigator, StepValidation};
pub use record::{Field, FieldWrite, FutureRecord};
pub use session::{AssetDirective, AssetRequestToken, SubmitBlocked, WizardSession};
