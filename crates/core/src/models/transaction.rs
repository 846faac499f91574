use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::holding::{AssetKind, FixedLiability};

/// Direction of an asset trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "Buy"),
            TradeKind::Sell => write!(f, "Sell"),
        }
    }
}

/// Receipt describing an executed buy or sell, emitted for display.
///
/// Purely observational — never stored in the ledger state. `total` is
/// the consideration: for buys the down payment (full consideration for
/// securities), for sells the computed proceeds, which may be negative
/// when a financed position sells below its debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransaction {
    pub kind: TradeKind,
    pub asset_kind: AssetKind,
    pub name: String,
    /// Trade price (per unit for securities)
    pub price: f64,
    pub count: f64,
    /// Total consideration or proceeds
    pub total: f64,
    /// Debt implied (buy) or extinguished (sell) by the position
    pub debt: f64,
    /// Periodic income of the position at trade time
    pub cashflow: f64,
    pub is_short: bool,
    pub timestamp: DateTime<Utc>,
}

/// Kind of bank-desk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankOperation {
    TakeLoan,
    RepayLoan,
    CloseLiability,
}

/// Receipt for a bank-desk operation, emitted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransaction {
    pub operation: BankOperation,
    pub amount: f64,
    /// Bank loan principal after the operation (take/repay only)
    pub new_balance: Option<f64>,
    /// Bank loan monthly payment after the operation (take/repay only)
    pub new_payment: Option<f64>,
    /// The closed liability (closures only)
    pub liability: Option<FixedLiability>,
    pub timestamp: DateTime<Utc>,
}

/// Result of leaving the Rat Race, emitted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTransition {
    /// Passive income at the moment of transition, unrounded
    pub previous_passive_income: f64,
    /// Passive income rounded to the nearest thousand
    pub start_passive_income: f64,
    /// `start_passive_income × 100`, also the opening cash balance
    pub day_income: f64,
    pub timestamp: DateTime<Utc>,
}
