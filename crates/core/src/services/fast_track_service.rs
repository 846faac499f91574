use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingPatch};
use crate::models::state::LedgerState;
use crate::models::transaction::PhaseTransition;

use super::metrics_service::MetricsService;

/// Day income is the rounded starting passive income times this factor.
const DAY_INCOME_MULTIPLIER: f64 = 100.0;

/// Step the starting passive income is rounded to at transition.
const PASSIVE_ROUNDING_STEP: f64 = 1000.0;

/// How a paid-for opportunity resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum OpportunityOutcome {
    /// Nothing came of it; the entry price is already gone
    Failed,
    /// A cash win credited to the balance
    Cash(f64),
    /// A business stake won outright — it carries no cost basis
    Business { name: String, income: f64 },
}

/// The three cash-loss events of the accelerated phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseEvent {
    /// Tax audit: lose half of all cash
    Audit,
    /// Lawsuit: lose half of all cash
    Lawsuit,
    /// Divorce: lose all cash
    Divorce,
}

impl std::fmt::Display for ExpenseEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseEvent::Audit => write!(f, "Tax Audit"),
            ExpenseEvent::Lawsuit => write!(f, "Lawsuit"),
            ExpenseEvent::Divorce => write!(f, "Divorce"),
        }
    }
}

/// Governs the one-way jump out of the Rat Race and the Fast Track's
/// cash-account economy: paydays, purchases, opportunities, and expense
/// events.
pub struct FastTrackService {
    metrics: MetricsService,
}

impl FastTrackService {
    pub fn new() -> Self {
        Self {
            metrics: MetricsService::new(),
        }
    }

    /// Leave the Rat Race.
    ///
    /// The starting passive income is the current passive income rounded
    /// to the *nearest* thousand (not floored), day income is 100× that,
    /// and the opening cash balance equals one day income. All fields
    /// flip together; Rat Race fields are untouched. Rejected when
    /// already on the Fast Track.
    pub fn transition(&self, state: &mut LedgerState) -> Result<PhaseTransition, CoreError> {
        if state.is_on_fast_track {
            return Err(CoreError::AlreadyOnFastTrack);
        }

        let current_passive = self.metrics.passive_income(state);
        let start_passive =
            (current_passive / PASSIVE_ROUNDING_STEP).round() * PASSIVE_ROUNDING_STEP;
        let day_income = start_passive * DAY_INCOME_MULTIPLIER;

        state.is_on_fast_track = true;
        state.fast_track_start_passive_income = start_passive;
        state.fast_track_cashflow_day_income = day_income;
        state.fast_track_cash = day_income;

        info!("entered the fast track: start passive {start_passive}, day income {day_income}");
        Ok(PhaseTransition {
            previous_passive_income: current_passive,
            start_passive_income: start_passive,
            day_income,
            timestamp: Utc::now(),
        })
    }

    /// Return to the Rat Race. A plain flag flip: Fast Track fields
    /// persist so a later re-entry starts from a fresh snapshot without
    /// losing the investment list.
    pub fn revert(&self, state: &mut LedgerState) -> Result<(), CoreError> {
        if !state.is_on_fast_track {
            return Err(CoreError::NotOnFastTrack);
        }
        state.is_on_fast_track = false;
        Ok(())
    }

    /// Credit one payday: the day income, plus Fast Track business
    /// income when the sum toggle is on. Returns the credited amount.
    pub fn payday(&self, state: &mut LedgerState) -> f64 {
        let amount = self.metrics.payday_amount(state);
        state.fast_track_cash += amount;
        debug!("payday credited {amount} (cash {})", state.fast_track_cash);
        amount
    }

    /// Buy a business with cash: the price is debited and the stake
    /// enters the investment list at full cost basis.
    pub fn buy_business(
        &self,
        state: &mut LedgerState,
        name: &str,
        price: f64,
        income: f64,
    ) -> Result<(), CoreError> {
        self.debit(state, price)?;
        let name = if name.trim().is_empty() {
            "Fast Track Business"
        } else {
            name
        };
        state.fast_track_business_investments.push(Holding {
            id: Uuid::new_v4(),
            name: name.to_string(),
            cost: price,
            down_payment: price,
            cashflow: income,
            count: 1.0,
            is_short: false,
        });
        Ok(())
    }

    /// Buy a dream: pure consumption, cash out and nothing in.
    pub fn buy_dream(&self, state: &mut LedgerState, price: f64) -> Result<(), CoreError> {
        self.debit(state, price)
    }

    /// Step one of an opportunity: pay the entry price. The outcome is
    /// settled separately via [`Self::resolve_opportunity`].
    pub fn pay_opportunity(&self, state: &mut LedgerState, price: f64) -> Result<(), CoreError> {
        self.debit(state, price)
    }

    /// Step two of an opportunity. Failure changes nothing further; a
    /// cash win is credited; a won business joins the investment list
    /// with zero cost basis.
    pub fn resolve_opportunity(&self, state: &mut LedgerState, outcome: OpportunityOutcome) {
        match outcome {
            OpportunityOutcome::Failed => {}
            OpportunityOutcome::Cash(win) => {
                state.fast_track_cash += win;
            }
            OpportunityOutcome::Business { name, income } => {
                let name = if name.trim().is_empty() {
                    "Opportunity Business".to_string()
                } else {
                    name
                };
                state.fast_track_business_investments.push(Holding {
                    id: Uuid::new_v4(),
                    name,
                    cost: 0.0,
                    down_payment: 0.0,
                    cashflow: income,
                    count: 1.0,
                    is_short: false,
                });
            }
        }
    }

    /// Apply one expense event to the cash balance. Audits and lawsuits
    /// halve it (integer floor), divorce zeroes it; the investment list
    /// is never touched. Returns the new balance.
    pub fn apply_expense_event(&self, state: &mut LedgerState, event: ExpenseEvent) -> f64 {
        state.fast_track_cash = match event {
            ExpenseEvent::Audit | ExpenseEvent::Lawsuit => (state.fast_track_cash / 2.0).floor(),
            ExpenseEvent::Divorce => 0.0,
        };
        info!("{event}: cash now {}", state.fast_track_cash);
        state.fast_track_cash
    }

    /// Add a blank investment row for manual entry.
    pub fn add_investment(&self, state: &mut LedgerState) -> Uuid {
        let holding = Holding {
            id: Uuid::new_v4(),
            name: "Business Investment".to_string(),
            cost: 0.0,
            down_payment: 0.0,
            cashflow: 0.0,
            count: 1.0,
            is_short: false,
        };
        let id = holding.id;
        state.fast_track_business_investments.push(holding);
        id
    }

    /// Inline edit of an investment row.
    pub fn patch_investment(
        &self,
        state: &mut LedgerState,
        id: Uuid,
        patch: &HoldingPatch,
    ) -> Result<(), CoreError> {
        let holding = state
            .fast_track_business_investments
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        patch.apply_to(holding);
        Ok(())
    }

    /// Drop an investment row.
    pub fn remove_investment(&self, state: &mut LedgerState, id: Uuid) -> Result<(), CoreError> {
        let idx = state
            .fast_track_business_investments
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        state.fast_track_business_investments.remove(idx);
        Ok(())
    }

    /// Spend cash, rejecting (with no state change) when the balance
    /// cannot cover the price.
    fn debit(&self, state: &mut LedgerState, price: f64) -> Result<(), CoreError> {
        if state.fast_track_cash < price {
            return Err(CoreError::InsufficientCash {
                required: price,
                available: state.fast_track_cash,
            });
        }
        state.fast_track_cash -= price;
        Ok(())
    }
}

impl Default for FastTrackService {
    fn default() -> Self {
        Self::new()
    }
}
