use serde::{Deserialize, Serialize};

/// Derived Rat Race metrics, recomputed from the ledger state on every
/// read — never cached, so there is no staleness window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Holding income (cashflow × count, count floored at 1) plus dividends
    pub passive_income: f64,

    /// Salary plus passive income
    pub total_income: f64,

    /// Taxes, all liability payments, other expenses, and child costs
    pub total_expenses: f64,

    /// `child_count × per_child_expense`, already included in expenses
    pub child_expense: f64,

    /// `total_income − total_expenses`
    pub monthly_cashflow: f64,

    /// `passive_income / total_expenses × 100`; 0 when there are no
    /// expenses. Not capped — display layers clamp at 100.
    pub progress_to_freedom: f64,
}

/// Derived Fast Track metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastTrackSummary {
    /// Σ cashflow over Fast Track business investments, unweighted by count
    pub investment_income: f64,

    /// `investment_income / winning goal × 100`; 0 when the goal is 0
    pub goal_progress: f64,

    /// What the next payday will credit: day income, plus investment
    /// income when the sum-business-income toggle is on
    pub payday_amount: f64,
}
