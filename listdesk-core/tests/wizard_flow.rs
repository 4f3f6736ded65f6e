//! End-to-end wizard walk through the public surface: fill each step the
//! way a front end would, exercising derivation, gating, stale asset
//! responses, and the submission lifecycle.

use listdesk_core::api::{Enumerations, UnderlyingAsset};
use listdesk_core::{
    AssetDirective, EditMode, Field, FieldWrite, SubmitBlocked, WizardSession,
};

fn boot_session() -> WizardSession {
    let mut session = WizardSession::new();
    session.apply_enumerations(Enumerations {
        settlement_methods: vec!["CASH".into(), "PHYSICAL".into()],
        deposit_types: vec!["AMOUNT".into(), "RATE".into()],
        underlying_types: vec!["INDEX".into(), "EQUITY".into(), "BOND".into()],
    });
    session
}

fn asset(id: i64, identifier: &str) -> UnderlyingAsset {
    UnderlyingAsset {
        id,
        identifier: identifier.to_string(),
    }
}

#[test]
fn full_wizard_walk() {
    let mut session = boot_session();

    // --- Step 0: identification -----------------------------------------
    assert!(!session.nav.next_step(&session.form), "empty step 0 must gate");

    session
        .form
        .update_field(Field::Symbol, FieldWrite::Text("FDAX".into()));
    session
        .form
        .update_field(Field::Isin, FieldWrite::Text("DE0008469008".into()));
    session
        .form
        .update_field(Field::FullName, FieldWrite::Text("DAX Future".into()));
    session
        .form
        .update_field(Field::Description, FieldWrite::Text("Quarterly".into()));

    // Jumping ahead is not allowed before step 1 is completed.
    assert!(!session.nav.go_to_step(2));
    assert_eq!(session.nav.current_step(), 0);

    assert!(session.nav.next_step(&session.form));
    assert_eq!(session.nav.current_step(), 1);

    // --- Step 1: deposit & underlyings ----------------------------------
    session.form.handle_deposit_type_change("RATE");
    session.form.handle_lot_size_change(10.0);
    session.form.handle_percentage_margin_change("5");
    assert_eq!(session.form.record().initial_margin_amount, 50.0);

    // Growing the lot re-derives the amount, the percentage holds.
    session.form.handle_lot_size_change(20.0);
    assert_eq!(session.form.record().initial_margin_amount, 100.0);
    assert_eq!(session.form.record().percentage_margin, 5.0);

    // Pick an underlying; a stale response from an abandoned fetch must
    // not clobber the list for the newer selection.
    let AssetDirective::Fetch { token: stale, .. } = session.set_underlying_type("EQUITY") else {
        panic!("expected a fetch directive");
    };
    let AssetDirective::Fetch {
        token: fresh,
        underlying_type,
    } = session.set_underlying_type("INDEX")
    else {
        panic!("expected a fetch directive");
    };
    assert_eq!(underlying_type, "INDEX");
    assert!(!session.apply_asset_response(stale, vec![asset(99, "DE0005557508")]));
    assert!(session.apply_asset_response(fresh, vec![asset(7, "DE0008469008")]));
    session
        .form
        .update_field(Field::UnderlyingId, FieldWrite::Id(7));

    assert!(session.nav.next_step(&session.form));
    assert_eq!(session.nav.current_step(), 2);
    assert!(session.nav.just_arrived_on_last_step());

    // --- Step 2: trading -------------------------------------------------
    session
        .form
        .update_field(Field::FirstTradingDate, FieldWrite::Text("2024-06-01".into()));
    session
        .form
        .update_field(Field::LastTradingDate, FieldWrite::Text("2024-01-01".into()));
    // Reversed dates flag the last date, and typing is never blocked.
    assert!(session.form.error(Field::LastTradingDate).is_some());
    session
        .form
        .update_field(Field::FirstTradingDate, FieldWrite::Text("2024-01-02".into()));
    assert!(session.form.error(Field::LastTradingDate).is_none());
    session
        .form
        .update_field(Field::LastTradingDate, FieldWrite::Text("2024-12-20".into()));

    session
        .form
        .update_field(Field::TradingCurrency, FieldWrite::Text("EUR".into()));
    session
        .form
        .update_field(Field::SettlementMethod, FieldWrite::Text("CASH".into()));

    // Tick triangle: drive the multiplier first, then flip sides.
    session.form.change_edit_mode(EditMode::ContractMultiplier);
    session.form.handle_contract_multiplier_change(4.0);
    session.form.handle_tick_size_change("0.5");
    assert_eq!(session.form.record().tick_value, 2.0);
    session.form.change_edit_mode(EditMode::TickValue);
    session.form.handle_tick_value_change(10.0);
    assert_eq!(session.form.record().contract_multiplier, 20.0);

    // Revisit an earlier step and come straight back: completion sticks.
    assert!(session.nav.go_to_step(0));
    assert!(!session.nav.is_ready_for_submission(&session.form));
    assert!(session.nav.go_to_step(2));

    // --- Submission -------------------------------------------------------
    assert!(session.nav.is_ready_for_submission(&session.form));
    let record = session.begin_submission().expect("ready to submit");
    assert_eq!(record.symbol, "FDAX");
    assert_eq!(record.tick_value, 10.0);

    // Single flight while the create call is out.
    assert_eq!(session.begin_submission(), Err(SubmitBlocked::AlreadyInFlight));

    // The server rejects; everything stays put for a retry.
    session.finish_submission(false);
    assert_eq!(session.form.record().symbol, "FDAX");
    assert_eq!(session.nav.current_step(), 2);

    // Retry succeeds; the wizard is pristine again.
    session.begin_submission().expect("retry");
    session.finish_submission(true);
    assert_eq!(session.nav.current_step(), 0);
    assert!(session.form.record().symbol.is_empty());
    assert!(session.form.errors().is_empty());
}

#[test]
fn submission_is_refused_away_from_the_last_step() {
    let mut session = boot_session();
    assert_eq!(session.begin_submission(), Err(SubmitBlocked::StepsIncomplete));
}
