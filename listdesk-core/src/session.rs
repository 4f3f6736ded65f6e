//! Wizard session — wires the form store, the navigator, and the cached
//! reference data together, and owns the submission gate.
//!
//! The session never talks to the network itself. It hands out directives
//! (asset fetch requests with sequencing tokens, records ready to post)
//! and absorbs the results; front ends decide where the I/O runs.

use thiserror::Error;

use crate::api::{Enumerations, UnderlyingAsset};
use crate::form::FormState;
use crate::nav::Navigator;
use crate::record::{FutureRecord, DEPOSIT_AMOUNT, DEPOSIT_RATE};

/// Identifies one issued asset-fetch request. Only the response carrying
/// the latest token is accepted; anything older is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetRequestToken(u64);

/// What the caller must do after an underlying-type change.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetDirective {
    /// Type cleared: the asset list is already empty, nothing to fetch.
    Clear,
    /// Fetch the list for this type and report back with the token.
    Fetch {
        underlying_type: String,
        token: AssetRequestToken,
    },
}

/// Why a submission attempt was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("all steps must be completed before submitting")]
    StepsIncomplete,
    #[error("{failed} field(s) failed validation")]
    InvalidFields { failed: usize },
}

/// One wizard run: form + navigation + reference-data cache.
#[derive(Debug, Default)]
pub struct WizardSession {
    pub form: FormState,
    pub nav: Navigator,
    enums: Enumerations,
    assets: Vec<UnderlyingAsset>,
    asset_seq: u64,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from a restored draft.
    pub fn restore(form: FormState, nav: Navigator) -> Self {
        Self {
            form,
            nav,
            ..Self::default()
        }
    }

    pub fn enumerations(&self) -> &Enumerations {
        &self.enums
    }

    pub fn assets(&self) -> &[UnderlyingAsset] {
        &self.assets
    }

    /// Install fetched enumerations. Deposit tags are narrowed to the
    /// ones the wizard can derive margin fields with.
    pub fn apply_enumerations(&mut self, mut enums: Enumerations) {
        enums
            .deposit_types
            .retain(|t| t == DEPOSIT_AMOUNT || t == DEPOSIT_RATE);
        self.enums = enums;
    }

    /// Change the underlying type. The form resets the asset selection in
    /// the same transition; the returned directive tells the caller
    /// whether (and under which token) to refetch the asset list.
    pub fn set_underlying_type(&mut self, value: &str) -> AssetDirective {
        self.form.handle_underlying_type_change(value);
        self.asset_seq += 1;

        if value.is_empty() {
            self.assets.clear();
            AssetDirective::Clear
        } else {
            AssetDirective::Fetch {
                underlying_type: value.to_string(),
                token: AssetRequestToken(self.asset_seq),
            }
        }
    }

    /// Install an asset list if its token is still the latest request.
    /// Returns false for stale responses, which are dropped.
    pub fn apply_asset_response(
        &mut self,
        token: AssetRequestToken,
        assets: Vec<UnderlyingAsset>,
    ) -> bool {
        if token.0 != self.asset_seq {
            return false;
        }
        self.assets = assets;
        true
    }

    /// Gate and start a submission. On success the submitting flag is
    /// set and the caller receives the record to post; exactly one
    /// submission can be in flight.
    pub fn begin_submission(&mut self) -> Result<FutureRecord, SubmitBlocked> {
        if self.form.is_submitting() {
            return Err(SubmitBlocked::AlreadyInFlight);
        }
        if !self.nav.is_ready_for_submission(&self.form) {
            return Err(SubmitBlocked::StepsIncomplete);
        }
        // Aggregate whole-record check: optional fields failing their
        // constraints surface here, on the final step, instead of
        // silently blocking.
        if !self.form.validate_entire_form() {
            return Err(SubmitBlocked::InvalidFields {
                failed: self.form.errors().len(),
            });
        }

        self.form.set_submitting(true);
        Ok(self.form.record().clone())
    }

    /// Close out an in-flight submission. Success resets the wizard for
    /// the next record; failure keeps every entered value on the final
    /// step for retry.
    pub fn finish_submission(&mut self, success: bool) {
        self.form.set_submitting(false);
        if success {
            self.form.reset();
            self.nav = Navigator::new();
            self.assets.clear();
        }
    }

    /// Discard the whole wizard, keeping only the enumeration cache.
    pub fn discard(&mut self) {
        self.form.reset();
        self.nav = Navigator::new();
        self.assets.clear();
    }
}
