pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use uuid::Uuid;

use errors::CoreError;
use models::{
    holding::{AssetKind, FixedLiability, HoldingDraft, HoldingPatch},
    payday::{GateState, PaydayGate},
    state::LedgerState,
    summary::{FastTrackSummary, LedgerSummary},
    transaction::{AssetTransaction, BankTransaction, PhaseTransition},
    update::StateUpdate,
};
use services::{
    asset_service::AssetService,
    bank_service::BankService,
    fast_track_service::{ExpenseEvent, FastTrackService, OpportunityOutcome},
    metrics_service::MetricsService,
};
use storage::{manager::StorageManager, store::SnapshotStore};

/// Main entry point for the Cashflow ledger core library.
/// Holds the session's financial state and all services that operate
/// on it.
///
/// The state is the single source of truth; every summary figure is
/// recomputed from it on read. Simple scalar fields are user-editable
/// ledger entries overwritten without validation via
/// [`StateUpdate`]; only the asset, bank, and fast-track processors
/// perform multi-field, rule-checked mutations.
#[must_use]
pub struct CashflowLedger {
    state: LedgerState,
    metrics_service: MetricsService,
    asset_service: AssetService,
    bank_service: BankService,
    fast_track_service: FastTrackService,
    payday_gate: PaydayGate,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for CashflowLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashflowLedger")
            .field("player", &self.state.player)
            .field("is_on_fast_track", &self.state.is_on_fast_track)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl CashflowLedger {
    /// Create a brand new session with default state.
    pub fn create_new() -> Self {
        Self::build(LedgerState::default())
    }

    /// Wrap an existing state (e.g. one restored by the host).
    pub fn from_state(state: LedgerState) -> Self {
        Self::build(state)
    }

    /// Restore the session from the snapshot store, falling back to a
    /// fresh default state when no usable snapshot exists. Check
    /// [`Self::needs_setup`] afterwards to decide whether to run the
    /// initial setup sequence.
    pub fn load_from_store(store: &dyn SnapshotStore) -> Result<Self, CoreError> {
        let state = StorageManager::load(store)?.unwrap_or_default();
        Ok(Self::build(state))
    }

    /// Write the full-state snapshot to the store.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_store(&mut self, store: &mut dyn SnapshotStore) -> Result<(), CoreError> {
        StorageManager::save(&self.state, store)?;
        self.dirty = false;
        Ok(())
    }

    /// Restore a session from a raw JSON snapshot string.
    pub fn load_from_json(json: &str) -> Result<Self, CoreError> {
        let state: LedgerState = serde_json::from_str(json)?;
        Ok(Self::build(state))
    }

    /// The full-state snapshot as a JSON string.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(&self.state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    // ── State Access ────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// True until the player has entered a name and a profession.
    #[must_use]
    pub fn needs_setup(&self) -> bool {
        self.state.needs_setup()
    }

    /// Returns `true` if the state has been modified since the last
    /// save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Apply one unchecked field edit.
    pub fn apply_update(&mut self, update: StateUpdate) {
        update.apply_to(&mut self.state);
        self.dirty = true;
    }

    /// Replace the whole session with fresh defaults and clear the
    /// stored snapshot.
    pub fn reset_session(&mut self, store: &mut dyn SnapshotStore) -> Result<(), CoreError> {
        StorageManager::clear(store)?;
        self.state = LedgerState::default();
        self.payday_gate = PaydayGate::new();
        self.dirty = true;
        Ok(())
    }

    // ── Derived Metrics ─────────────────────────────────────────────

    /// Rat Race statement figures, recomputed from the current state.
    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        self.metrics_service.summary(&self.state)
    }

    /// Fast Track figures, recomputed from the current state.
    #[must_use]
    pub fn fast_track_summary(&self) -> FastTrackSummary {
        self.metrics_service.fast_track_summary(&self.state)
    }

    /// Credit currently available at the bank desk.
    #[must_use]
    pub fn max_bank_loan(&self) -> f64 {
        self.bank_service
            .max_loan(self.metrics_service.monthly_cashflow(&self.state))
    }

    // ── Asset Transactions ──────────────────────────────────────────

    /// Buy a holding into one of the three Rat Race collections.
    /// Returns the display receipt.
    pub fn buy_holding(
        &mut self,
        kind: AssetKind,
        draft: HoldingDraft,
    ) -> Result<AssetTransaction, CoreError> {
        let record = self.asset_service.buy(&mut self.state, kind, draft)?;
        self.dirty = true;
        Ok(record)
    }

    /// Sell a holding (whole-position for real estate/business, by
    /// count for securities). Returns the display receipt.
    pub fn sell_holding(
        &mut self,
        kind: AssetKind,
        id: Uuid,
        sell_count: f64,
        sale_price: f64,
    ) -> Result<AssetTransaction, CoreError> {
        let record = self
            .asset_service
            .sell(&mut self.state, kind, id, sell_count, sale_price)?;
        self.dirty = true;
        Ok(record)
    }

    /// Delete a holding without computing proceeds.
    pub fn remove_holding(&mut self, kind: AssetKind, id: Uuid) -> Result<(), CoreError> {
        self.asset_service.remove(&mut self.state, kind, id)?;
        self.dirty = true;
        Ok(())
    }

    /// Inline edit of an existing holding.
    pub fn update_holding(
        &mut self,
        kind: AssetKind,
        id: Uuid,
        patch: HoldingPatch,
    ) -> Result<(), CoreError> {
        self.asset_service.patch(&mut self.state, kind, id, &patch)?;
        self.dirty = true;
        Ok(())
    }

    // ── Bank Credit ─────────────────────────────────────────────────

    /// Borrow from the bank, limited by ten times monthly cashflow.
    pub fn take_loan(&mut self, amount: f64) -> Result<BankTransaction, CoreError> {
        let cashflow = self.metrics_service.monthly_cashflow(&self.state);
        let record = self
            .bank_service
            .take_loan(&mut self.state, amount, cashflow)?;
        self.dirty = true;
        Ok(record)
    }

    /// Pay down the bank loan.
    pub fn repay_loan(&mut self, amount: f64) -> Result<BankTransaction, CoreError> {
        let record = self.bank_service.repay_loan(&mut self.state, amount)?;
        self.dirty = true;
        Ok(record)
    }

    /// Pay off a fixed liability in full (exact amount required).
    pub fn close_fixed_liability(
        &mut self,
        liability: FixedLiability,
        amount: f64,
    ) -> Result<BankTransaction, CoreError> {
        let record = self
            .bank_service
            .close_fixed_liability(&mut self.state, liability, amount)?;
        self.dirty = true;
        Ok(record)
    }

    // ── Phase Transition ────────────────────────────────────────────

    /// Leave the Rat Race for the Fast Track (one-way; rejected when
    /// already there).
    pub fn transition_to_fast_track(&mut self) -> Result<PhaseTransition, CoreError> {
        let record = self.fast_track_service.transition(&mut self.state)?;
        self.dirty = true;
        Ok(record)
    }

    /// Flip back to the Rat Race. Fast Track fields persist for
    /// re-entry.
    pub fn revert_to_rat_race(&mut self) -> Result<(), CoreError> {
        self.fast_track_service.revert(&mut self.state)?;
        self.dirty = true;
        Ok(())
    }

    // ── Fast Track Economy ──────────────────────────────────────────

    /// Buy a Fast Track business with cash.
    pub fn fast_track_buy_business(
        &mut self,
        name: &str,
        price: f64,
        income: f64,
    ) -> Result<(), CoreError> {
        self.fast_track_service
            .buy_business(&mut self.state, name, price, income)?;
        self.dirty = true;
        Ok(())
    }

    /// Buy a dream: cash out, nothing in.
    pub fn fast_track_buy_dream(&mut self, price: f64) -> Result<(), CoreError> {
        self.fast_track_service.buy_dream(&mut self.state, price)?;
        self.dirty = true;
        Ok(())
    }

    /// Pay an opportunity's entry price (step one of two).
    pub fn fast_track_pay_opportunity(&mut self, price: f64) -> Result<(), CoreError> {
        self.fast_track_service
            .pay_opportunity(&mut self.state, price)?;
        self.dirty = true;
        Ok(())
    }

    /// Settle a paid-for opportunity (step two of two).
    pub fn fast_track_resolve_opportunity(&mut self, outcome: OpportunityOutcome) {
        self.fast_track_service
            .resolve_opportunity(&mut self.state, outcome);
        self.dirty = true;
    }

    /// Apply an audit, lawsuit, or divorce to the cash balance.
    /// Returns the new balance.
    pub fn fast_track_apply_expense_event(&mut self, event: ExpenseEvent) -> f64 {
        let cash = self
            .fast_track_service
            .apply_expense_event(&mut self.state, event);
        self.dirty = true;
        cash
    }

    /// Credit one payday directly (ungated). Returns the credited
    /// amount. The held-confirmation path is
    /// [`Self::payday_press`] / [`Self::payday_tick`] /
    /// [`Self::payday_release`].
    pub fn fast_track_payday(&mut self) -> f64 {
        let amount = self.fast_track_service.payday(&mut self.state);
        self.dirty = true;
        amount
    }

    /// Add a blank Fast Track investment row; returns its id.
    pub fn add_investment(&mut self) -> Uuid {
        let id = self.fast_track_service.add_investment(&mut self.state);
        self.dirty = true;
        id
    }

    /// Inline edit of a Fast Track investment row.
    pub fn update_investment(&mut self, id: Uuid, patch: HoldingPatch) -> Result<(), CoreError> {
        self.fast_track_service
            .patch_investment(&mut self.state, id, &patch)?;
        self.dirty = true;
        Ok(())
    }

    /// Drop a Fast Track investment row.
    pub fn remove_investment(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.fast_track_service
            .remove_investment(&mut self.state, id)?;
        self.dirty = true;
        Ok(())
    }

    // ── Payday Hold Gate ────────────────────────────────────────────

    /// Begin holding the payday button.
    pub fn payday_press(&mut self) {
        self.payday_gate.press();
    }

    /// Advance the held payday gesture by `delta_ms`. When the hold
    /// completes, the payday fires exactly once and the credited
    /// amount is returned.
    pub fn payday_tick(&mut self, delta_ms: u64) -> Option<f64> {
        if self.payday_gate.tick(delta_ms) {
            Some(self.fast_track_payday())
        } else {
            None
        }
    }

    /// Release the payday button. Releasing before completion cancels
    /// the gesture with no payday.
    pub fn payday_release(&mut self) {
        self.payday_gate.release();
    }

    /// Where the held payday gesture currently stands.
    #[must_use]
    pub fn payday_gate_state(&self) -> GateState {
        self.payday_gate.state()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(state: LedgerState) -> Self {
        Self {
            state,
            metrics_service: MetricsService::new(),
            asset_service: AssetService::new(),
            bank_service: BankService::new(),
            fast_track_service: FastTrackService::new(),
            payday_gate: PaydayGate::new(),
            dirty: false,
        }
    }
}
