// ═══════════════════════════════════════════════════════════════════
// Integration Tests — CashflowLedger facade, end to end
// ═══════════════════════════════════════════════════════════════════

use cashflow_ledger_core::models::holding::{AssetKind, FixedLiability, HoldingDraft};
use cashflow_ledger_core::models::payday::GateState;
use cashflow_ledger_core::models::update::StateUpdate;
use cashflow_ledger_core::services::fast_track_service::{ExpenseEvent, OpportunityOutcome};
use cashflow_ledger_core::storage::store::{MemoryStore, SnapshotStore};
use cashflow_ledger_core::CashflowLedger;

fn ledger_with_profile() -> CashflowLedger {
    let mut ledger = CashflowLedger::create_new();
    ledger.apply_update(StateUpdate::SetPlayer("Alice".to_string()));
    ledger.apply_update(StateUpdate::SetProfession("Doctor".to_string()));
    ledger.apply_update(StateUpdate::SetSalary(3000.0));
    ledger
}

#[test]
fn fresh_session_needs_setup() {
    let ledger = CashflowLedger::create_new();
    assert!(ledger.needs_setup());
    assert!(!ledger.has_unsaved_changes());
}

#[test]
fn setup_completes_after_player_and_profession() {
    let ledger = ledger_with_profile();
    assert!(!ledger.needs_setup());
    assert!(ledger.has_unsaved_changes());
}

#[test]
fn rat_race_statement_flows_through_summary() {
    let mut ledger = ledger_with_profile();
    ledger.apply_update(StateUpdate::SetTaxes(2500.0));
    ledger
        .buy_holding(
            AssetKind::RealEstate,
            HoldingDraft {
                name: "Condo".to_string(),
                cost: 50_000.0,
                down_payment: 5000.0,
                cashflow: 100.0,
                count: None,
                is_short: false,
            },
        )
        .unwrap();

    let summary = ledger.summary();
    assert_eq!(summary.passive_income, 100.0);
    assert_eq!(summary.total_income, 3100.0);
    assert_eq!(summary.monthly_cashflow, 600.0);
    assert_eq!(summary.progress_to_freedom, 4.0);
    assert_eq!(ledger.max_bank_loan(), 6000.0);
}

#[test]
fn bank_desk_round_trip() {
    let mut ledger = ledger_with_profile();
    ledger.apply_update(StateUpdate::SetTaxes(2500.0));
    ledger
        .buy_holding(
            AssetKind::RealEstate,
            HoldingDraft {
                cashflow: 100.0,
                ..Default::default()
            },
        )
        .unwrap();

    // cashflow 600 → limit 6000, payment 10% of principal
    let record = ledger.take_loan(6000.0).unwrap();
    assert_eq!(record.new_payment, Some(600.0));
    assert_eq!(ledger.state().bank_loan, 6000.0);

    // The new payment lowers cashflow, and with it the next limit.
    assert_eq!(ledger.max_bank_loan(), 0.0);

    ledger.repay_loan(6000.0).unwrap();
    assert_eq!(ledger.state().bank_loan, 0.0);
    assert_eq!(ledger.state().bank_loan_payment, 0.0);
}

#[test]
fn close_liability_through_facade() {
    let mut ledger = ledger_with_profile();
    ledger.apply_update(StateUpdate::SetLiabilityPrincipal(
        FixedLiability::CarLoan,
        7000.0,
    ));
    ledger.apply_update(StateUpdate::SetLiabilityPayment(
        FixedLiability::CarLoan,
        210.0,
    ));

    assert!(ledger
        .close_fixed_liability(FixedLiability::CarLoan, 6999.0)
        .is_err());
    ledger
        .close_fixed_liability(FixedLiability::CarLoan, 7000.0)
        .unwrap();
    assert_eq!(ledger.state().car_loans, 0.0);
    assert_eq!(ledger.state().car_loan_payment, 0.0);
}

#[test]
fn full_fast_track_session() {
    let mut ledger = ledger_with_profile();
    ledger.apply_update(StateUpdate::SetDividends(5200.0));

    // 5200 rounds to 5000; day income 500k seeds the cash balance.
    let transition = ledger.transition_to_fast_track().unwrap();
    assert_eq!(transition.start_passive_income, 5000.0);
    assert_eq!(transition.day_income, 500_000.0);
    assert_eq!(ledger.state().fast_track_cash, 500_000.0);
    assert!(ledger.transition_to_fast_track().is_err());

    ledger
        .fast_track_buy_business("Laundromat", 200_000.0, 20_000.0)
        .unwrap();
    assert_eq!(ledger.state().fast_track_cash, 300_000.0);

    ledger.fast_track_pay_opportunity(100_000.0).unwrap();
    ledger.fast_track_resolve_opportunity(OpportunityOutcome::Business {
        name: "Franchise".to_string(),
        income: 15_000.0,
    });

    let summary = ledger.fast_track_summary();
    assert_eq!(summary.investment_income, 35_000.0);
    assert_eq!(summary.goal_progress, 70.0);

    // Payday with the business toggle on
    ledger.apply_update(StateUpdate::SetSumBusinessIncome(true));
    let credited = ledger.fast_track_payday();
    assert_eq!(credited, 535_000.0);
    assert_eq!(ledger.state().fast_track_cash, 735_000.0);

    // Lawsuit halves the pot
    let cash = ledger.fast_track_apply_expense_event(ExpenseEvent::Lawsuit);
    assert_eq!(cash, 367_500.0);

    // Going back keeps the Fast Track ledger for a later re-entry.
    ledger.revert_to_rat_race().unwrap();
    assert!(!ledger.state().is_on_fast_track);
    assert_eq!(ledger.state().fast_track_business_investments.len(), 2);
}

#[test]
fn gated_payday_fires_exactly_once_per_hold() {
    let mut ledger = ledger_with_profile();
    ledger.apply_update(StateUpdate::SetFastTrackDayIncome(10_000.0));

    // Released early: no payday.
    ledger.payday_press();
    assert_eq!(ledger.payday_tick(700), None);
    ledger.payday_release();
    assert_eq!(ledger.payday_gate_state(), GateState::Cancelled);
    assert_eq!(ledger.state().fast_track_cash, 0.0);

    // Held to completion: exactly one credit.
    ledger.payday_press();
    assert_eq!(ledger.payday_tick(1000), None);
    assert_eq!(ledger.payday_tick(500), Some(10_000.0));
    assert_eq!(ledger.payday_tick(5000), None);
    ledger.payday_release();
    assert_eq!(ledger.state().fast_track_cash, 10_000.0);
}

#[test]
fn snapshot_save_load_reset_cycle() {
    let mut store = MemoryStore::new();

    let mut ledger = ledger_with_profile();
    ledger
        .buy_holding(
            AssetKind::Security,
            HoldingDraft {
                name: "MYT4U".to_string(),
                cost: 20.0,
                count: Some(100.0),
                ..Default::default()
            },
        )
        .unwrap();
    ledger.save_to_store(&mut store).unwrap();
    assert!(!ledger.has_unsaved_changes());

    // A second session picks up exactly where the first left off.
    let restored = CashflowLedger::load_from_store(&store).unwrap();
    assert!(!restored.needs_setup());
    assert_eq!(restored.state(), ledger.state());
    assert_eq!(restored.state().stock_assets[0].down_payment, 2000.0);

    // Reset wipes both the session and the stored snapshot.
    ledger.reset_session(&mut store).unwrap();
    assert!(ledger.needs_setup());
    let fresh = CashflowLedger::load_from_store(&store).unwrap();
    assert!(fresh.needs_setup());
    assert_eq!(fresh.state().salary, 0.0);
}

#[test]
fn corrupt_snapshot_falls_back_to_setup() {
    let mut store = MemoryStore::new();
    store
        .put("cashflow_state_v1", "definitely not json")
        .unwrap();

    let ledger = CashflowLedger::load_from_store(&store).unwrap();
    assert!(ledger.needs_setup());
    assert_eq!(ledger.state().salary, 0.0);
}

#[test]
fn json_round_trip_via_facade() {
    let mut ledger = ledger_with_profile();
    ledger.apply_update(StateUpdate::SetChildCount(2));
    ledger.apply_update(StateUpdate::SetPerChildExpense(400.0));

    let json = ledger.to_json().unwrap();
    let back = CashflowLedger::load_from_json(&json).unwrap();
    assert_eq!(back.state(), ledger.state());
    assert_eq!(back.summary().child_expense, 800.0);
}

#[test]
fn mutations_mark_the_session_dirty() {
    let mut store = MemoryStore::new();
    let mut ledger = ledger_with_profile();
    ledger.save_to_store(&mut store).unwrap();
    assert!(!ledger.has_unsaved_changes());

    ledger.fast_track_payday();
    assert!(ledger.has_unsaved_changes());

    ledger.save_to_store(&mut store).unwrap();
    assert!(!ledger.has_unsaved_changes());

    ledger.add_investment();
    assert!(ledger.has_unsaved_changes());
}

#[test]
fn holding_edits_through_facade() {
    let mut ledger = ledger_with_profile();
    let record = ledger
        .buy_holding(
            AssetKind::Business,
            HoldingDraft {
                name: "Bakery".to_string(),
                cost: 30_000.0,
                down_payment: 30_000.0,
                cashflow: 1000.0,
                count: None,
                is_short: false,
            },
        )
        .unwrap();
    assert_eq!(record.debt, 0.0);
    let id = ledger.state().business_assets[0].id;

    ledger
        .update_holding(
            AssetKind::Business,
            id,
            cashflow_ledger_core::models::holding::HoldingPatch {
                cashflow: Some(1500.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(ledger.summary().passive_income, 1500.0);

    ledger.remove_holding(AssetKind::Business, id).unwrap();
    assert_eq!(ledger.summary().passive_income, 0.0);
}

#[test]
fn investment_rows_through_facade() {
    let mut ledger = ledger_with_profile();
    let id = ledger.add_investment();
    ledger
        .update_investment(
            id,
            cashflow_ledger_core::models::holding::HoldingPatch {
                cashflow: Some(6000.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(ledger.fast_track_summary().investment_income, 6000.0);

    ledger.remove_investment(id).unwrap();
    assert_eq!(ledger.fast_track_summary().investment_income, 0.0);
}
