use serde::{Deserialize, Serialize};

use super::holding::{FixedLiability, Holding};

/// Freedom-goal target every new session starts with.
pub const DEFAULT_WINNING_GOAL: f64 = 50_000.0;

fn default_winning_goal() -> f64 {
    DEFAULT_WINNING_GOAL
}

/// The single authoritative financial snapshot for a session.
///
/// Everything in here gets serialized to one JSON object and written
/// wholesale to the snapshot store after every committed change. Field
/// names serialize in camelCase and all fields carry defaults, so a
/// snapshot written by an older shape still loads — missing numerics
/// read as zero, missing collections as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    // ── Identity ────────────────────────────────────────────────────
    #[serde(default)]
    pub player: String,
    /// The player seated to the right, auditing this sheet
    #[serde(default)]
    pub auditor: String,
    /// Free text — professions are not validated against a catalog
    #[serde(default)]
    pub profession: String,
    /// The player's chosen dream, free text
    #[serde(default)]
    pub goal: String,

    // ── Rat Race income ─────────────────────────────────────────────
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub dividends: f64,

    // ── Holdings (generate income) ──────────────────────────────────
    #[serde(default)]
    pub real_estate_assets: Vec<Holding>,
    #[serde(default)]
    pub business_assets: Vec<Holding>,
    #[serde(default)]
    pub stock_assets: Vec<Holding>,

    // ── Fixed liabilities (principals) ──────────────────────────────
    #[serde(default)]
    pub home_mortgage: f64,
    #[serde(default)]
    pub school_loans: f64,
    #[serde(default)]
    pub car_loans: f64,
    #[serde(default)]
    pub credit_card_debt: f64,
    #[serde(default)]
    pub retail_debt: f64,
    /// Principal of the flexible bank loan layered on top of the five
    /// fixed liabilities
    #[serde(default)]
    pub bank_loan: f64,

    // ── Monthly expenses ────────────────────────────────────────────
    #[serde(default)]
    pub taxes: f64,
    #[serde(default)]
    pub home_mortgage_payment: f64,
    #[serde(default)]
    pub school_loan_payment: f64,
    #[serde(default)]
    pub car_loan_payment: f64,
    #[serde(default)]
    pub credit_card_payment: f64,
    #[serde(default)]
    pub retail_payment: f64,
    #[serde(default)]
    pub other_expenses: f64,
    #[serde(default)]
    pub bank_loan_payment: f64,

    // ── Dependents ──────────────────────────────────────────────────
    #[serde(default)]
    pub child_count: u32,
    #[serde(default)]
    pub per_child_expense: f64,

    // ── Fast Track ──────────────────────────────────────────────────
    #[serde(default)]
    pub is_on_fast_track: bool,
    /// Passive income rounded to the nearest thousand at transition
    #[serde(default)]
    pub fast_track_start_passive_income: f64,
    /// Fixed per-payday credit established at transition
    #[serde(default)]
    pub fast_track_cashflow_day_income: f64,
    /// Cash balance, only meaningful on the Fast Track
    #[serde(default)]
    pub fast_track_cash: f64,
    #[serde(default)]
    pub fast_track_business_investments: Vec<Holding>,
    /// When set, paydays add Fast Track business income on top of the
    /// day income
    #[serde(default)]
    pub fast_track_sum_business_income: bool,
    #[serde(default = "default_winning_goal")]
    pub winning_passive_income_goal: f64,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            player: String::new(),
            auditor: String::new(),
            profession: String::new(),
            goal: String::new(),

            salary: 0.0,
            dividends: 0.0,

            real_estate_assets: Vec::new(),
            business_assets: Vec::new(),
            stock_assets: Vec::new(),

            home_mortgage: 0.0,
            school_loans: 0.0,
            car_loans: 0.0,
            credit_card_debt: 0.0,
            retail_debt: 0.0,
            bank_loan: 0.0,

            taxes: 0.0,
            home_mortgage_payment: 0.0,
            school_loan_payment: 0.0,
            car_loan_payment: 0.0,
            credit_card_payment: 0.0,
            retail_payment: 0.0,
            other_expenses: 0.0,
            bank_loan_payment: 0.0,

            child_count: 0,
            per_child_expense: 0.0,

            is_on_fast_track: false,
            fast_track_start_passive_income: 0.0,
            fast_track_cashflow_day_income: 0.0,
            fast_track_cash: 0.0,
            fast_track_business_investments: Vec::new(),
            fast_track_sum_business_income: false,
            winning_passive_income_goal: DEFAULT_WINNING_GOAL,
        }
    }
}

impl LedgerState {
    /// Outstanding principal of a fixed liability.
    pub fn liability_principal(&self, liability: FixedLiability) -> f64 {
        match liability {
            FixedLiability::Mortgage => self.home_mortgage,
            FixedLiability::SchoolLoan => self.school_loans,
            FixedLiability::CarLoan => self.car_loans,
            FixedLiability::CreditCard => self.credit_card_debt,
            FixedLiability::Retail => self.retail_debt,
        }
    }

    /// Monthly payment paired with a fixed liability.
    pub fn liability_payment(&self, liability: FixedLiability) -> f64 {
        match liability {
            FixedLiability::Mortgage => self.home_mortgage_payment,
            FixedLiability::SchoolLoan => self.school_loan_payment,
            FixedLiability::CarLoan => self.car_loan_payment,
            FixedLiability::CreditCard => self.credit_card_payment,
            FixedLiability::Retail => self.retail_payment,
        }
    }

    pub(crate) fn liability_principal_mut(&mut self, liability: FixedLiability) -> &mut f64 {
        match liability {
            FixedLiability::Mortgage => &mut self.home_mortgage,
            FixedLiability::SchoolLoan => &mut self.school_loans,
            FixedLiability::CarLoan => &mut self.car_loans,
            FixedLiability::CreditCard => &mut self.credit_card_debt,
            FixedLiability::Retail => &mut self.retail_debt,
        }
    }

    pub(crate) fn liability_payment_mut(&mut self, liability: FixedLiability) -> &mut f64 {
        match liability {
            FixedLiability::Mortgage => &mut self.home_mortgage_payment,
            FixedLiability::SchoolLoan => &mut self.school_loan_payment,
            FixedLiability::CarLoan => &mut self.car_loan_payment,
            FixedLiability::CreditCard => &mut self.credit_card_payment,
            FixedLiability::Retail => &mut self.retail_payment,
        }
    }

    /// True until the player has entered a name and a profession —
    /// the signal to run the initial setup sequence.
    pub fn needs_setup(&self) -> bool {
        self.player.trim().is_empty() || self.profession.trim().is_empty()
    }
}
