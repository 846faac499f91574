use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which Rat Race balance-sheet collection a holding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Rental property — financed, whole-position trades
    RealEstate,
    /// Private business stake — financed, whole-position trades
    Business,
    /// Stocks and other securities — per-unit pricing, partial sales, shorts
    Security,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::RealEstate => write!(f, "Real Estate"),
            AssetKind::Business => write!(f, "Business"),
            AssetKind::Security => write!(f, "Security"),
        }
    }
}

impl AssetKind {
    /// Label used when a buy draft arrives without a name.
    pub fn default_label(&self) -> &'static str {
        match self {
            AssetKind::RealEstate => "House",
            AssetKind::Business => "Business",
            AssetKind::Security => "Shares",
        }
    }
}

/// One of the five named, fully-owed-or-zero debt lines.
/// Each maps to a principal field and a paired monthly payment field
/// on the ledger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedLiability {
    Mortgage,
    SchoolLoan,
    CarLoan,
    CreditCard,
    Retail,
}

impl FixedLiability {
    /// All five liabilities, in statement order.
    pub const ALL: [FixedLiability; 5] = [
        FixedLiability::Mortgage,
        FixedLiability::SchoolLoan,
        FixedLiability::CarLoan,
        FixedLiability::CreditCard,
        FixedLiability::Retail,
    ];
}

impl std::fmt::Display for FixedLiability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixedLiability::Mortgage => write!(f, "Home Mortgage"),
            FixedLiability::SchoolLoan => write!(f, "School Loan"),
            FixedLiability::CarLoan => write!(f, "Car Loan"),
            FixedLiability::CreditCard => write!(f, "Credit Card Debt"),
            FixedLiability::Retail => write!(f, "Retail Debt"),
        }
    }
}

/// A single position on the player's balance sheet: real estate, business,
/// security, or a Fast Track business investment.
///
/// For real estate and business, `cost` is the total acquisition price and
/// `down_payment` the cash paid at acquisition; the difference is implicit
/// debt. For securities `cost` is the per-unit price and `down_payment` is
/// forced to `cost × count` (no leverage on securities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Unique identifier
    pub id: Uuid,

    /// Display label, free text
    pub name: String,

    /// Total acquisition price (per-unit price for securities)
    #[serde(default)]
    pub cost: f64,

    /// Cash paid at acquisition
    #[serde(default)]
    pub down_payment: f64,

    /// Periodic income attributable per unit
    #[serde(default)]
    pub cashflow: f64,

    /// Unit quantity (1 for whole-position holdings)
    #[serde(default)]
    pub count: f64,

    /// Marks a short security position whose profit formula inverts
    #[serde(default)]
    pub is_short: bool,
}

impl Holding {
    /// Outstanding debt carried by this holding.
    /// Clamped at zero — overpaying the down payment never produces
    /// negative debt. Securities always report 0 because their down
    /// payment covers the full consideration.
    pub fn debt(&self) -> f64 {
        (self.cost - self.down_payment).max(0.0)
    }

    /// Unit count used for income weighting: a zero or absent count
    /// reads as one so whole-position holdings are never silently
    /// zeroed out of passive income.
    pub fn effective_count(&self) -> f64 {
        self.count.max(1.0)
    }
}

/// Caller-supplied input for a buy operation. The asset processor
/// normalizes this into a [`Holding`] (default label, default count,
/// forced security down payment) before committing it.
#[derive(Debug, Clone, Default)]
pub struct HoldingDraft {
    /// Display label; empty falls back to the kind's default label
    pub name: String,
    pub cost: f64,
    /// Ignored for securities (recomputed as `cost × count`)
    pub down_payment: f64,
    pub cashflow: f64,
    /// `None` defaults to 1 for real estate/business, 0 for securities
    pub count: Option<f64>,
    /// Only meaningful for securities
    pub is_short: bool,
}

/// Typed partial edit of an existing holding. `None` fields are left
/// untouched; ids and short flags are immutable after creation.
#[derive(Debug, Clone, Default)]
pub struct HoldingPatch {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub down_payment: Option<f64>,
    pub cashflow: Option<f64>,
    pub count: Option<f64>,
}

impl HoldingPatch {
    /// Apply every set field to the holding.
    pub fn apply_to(&self, holding: &mut Holding) {
        if let Some(name) = &self.name {
            holding.name = name.clone();
        }
        if let Some(cost) = self.cost {
            holding.cost = cost;
        }
        if let Some(down_payment) = self.down_payment {
            holding.down_payment = down_payment;
        }
        if let Some(cashflow) = self.cashflow {
            holding.cashflow = cashflow;
        }
        if let Some(count) = self.count {
            holding.count = count;
        }
    }
}
