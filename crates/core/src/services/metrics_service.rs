use crate::models::holding::Holding;
use crate::models::state::LedgerState;
use crate::models::summary::{FastTrackSummary, LedgerSummary};

/// Computes derived statement figures: income, expenses, cashflow, and
/// progress ratios.
///
/// Pure business logic over the ledger state — no side effects, no
/// caching. Every read recomputes from the current snapshot.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Passive income: holding cashflow weighted by effective count
    /// across all three Rat Race collections, plus dividends.
    pub fn passive_income(&self, state: &LedgerState) -> f64 {
        collection_income(&state.real_estate_assets)
            + collection_income(&state.business_assets)
            + collection_income(&state.stock_assets)
            + state.dividends
    }

    /// Total monthly outflow: taxes, the six liability payments, other
    /// expenses, and per-child costs.
    pub fn total_expenses(&self, state: &LedgerState) -> f64 {
        state.taxes
            + state.home_mortgage_payment
            + state.school_loan_payment
            + state.car_loan_payment
            + state.credit_card_payment
            + state.retail_payment
            + state.other_expenses
            + state.bank_loan_payment
            + self.child_expense(state)
    }

    pub fn child_expense(&self, state: &LedgerState) -> f64 {
        f64::from(state.child_count) * state.per_child_expense
    }

    pub fn monthly_cashflow(&self, state: &LedgerState) -> f64 {
        state.salary + self.passive_income(state) - self.total_expenses(state)
    }

    /// Full Rat Race summary in one pass.
    pub fn summary(&self, state: &LedgerState) -> LedgerSummary {
        let passive_income = self.passive_income(state);
        let total_income = state.salary + passive_income;
        let total_expenses = self.total_expenses(state);
        // Guard: a fresh sheet has no expenses yet; report 0 rather
        // than dividing by zero. Not capped at 100 — display clamps.
        let progress_to_freedom = if total_expenses > 0.0 {
            passive_income / total_expenses * 100.0
        } else {
            0.0
        };

        LedgerSummary {
            passive_income,
            total_income,
            total_expenses,
            child_expense: self.child_expense(state),
            monthly_cashflow: total_income - total_expenses,
            progress_to_freedom,
        }
    }

    /// Fast Track business income: plain cashflow sum, unweighted by
    /// count. Fast Track stakes are whole businesses, not unit lots.
    pub fn investment_income(&self, state: &LedgerState) -> f64 {
        state
            .fast_track_business_investments
            .iter()
            .map(|h| h.cashflow)
            .sum()
    }

    /// What the next payday credits.
    pub fn payday_amount(&self, state: &LedgerState) -> f64 {
        if state.fast_track_sum_business_income {
            state.fast_track_cashflow_day_income + self.investment_income(state)
        } else {
            state.fast_track_cashflow_day_income
        }
    }

    /// Full Fast Track summary in one pass.
    pub fn fast_track_summary(&self, state: &LedgerState) -> FastTrackSummary {
        let investment_income = self.investment_income(state);
        let goal = state.winning_passive_income_goal;
        let goal_progress = if goal > 0.0 {
            investment_income / goal * 100.0
        } else {
            0.0
        };

        FastTrackSummary {
            investment_income,
            goal_progress,
            payday_amount: self.payday_amount(state),
        }
    }
}

fn collection_income(holdings: &[Holding]) -> f64 {
    holdings
        .iter()
        .map(|h| h.cashflow * h.effective_count())
        .sum()
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
