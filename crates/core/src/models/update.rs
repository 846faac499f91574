use super::holding::FixedLiability;
use super::state::LedgerState;

/// A single unchecked field edit against the ledger state.
///
/// These are the freely-editable scalar fields of the statement — user
/// ledger entries, not computed values — so no variant here validates
/// its input. The one coupling rule: zeroing any of the six debt
/// principals also zeroes its paired payment field in the same update
/// (a debt erased by direct edit carries no residual obligation).
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    // Identity
    SetPlayer(String),
    SetAuditor(String),
    SetProfession(String),
    SetGoal(String),

    // Income
    SetSalary(f64),
    SetDividends(f64),

    // Expenses
    SetTaxes(f64),
    SetOtherExpenses(f64),
    SetChildCount(u32),
    SetPerChildExpense(f64),

    // Liabilities
    SetLiabilityPrincipal(FixedLiability, f64),
    SetLiabilityPayment(FixedLiability, f64),
    SetBankLoan(f64),
    SetBankLoanPayment(f64),

    // Fast Track
    SetFastTrackStartPassive(f64),
    SetFastTrackDayIncome(f64),
    SetFastTrackCash(f64),
    SetSumBusinessIncome(bool),
    SetWinningGoal(f64),
}

impl StateUpdate {
    /// Apply this edit to the state.
    pub fn apply_to(self, state: &mut LedgerState) {
        match self {
            StateUpdate::SetPlayer(v) => state.player = v,
            StateUpdate::SetAuditor(v) => state.auditor = v,
            StateUpdate::SetProfession(v) => state.profession = v,
            StateUpdate::SetGoal(v) => state.goal = v,

            StateUpdate::SetSalary(v) => state.salary = v,
            StateUpdate::SetDividends(v) => state.dividends = v,

            StateUpdate::SetTaxes(v) => state.taxes = v,
            StateUpdate::SetOtherExpenses(v) => state.other_expenses = v,
            StateUpdate::SetChildCount(v) => state.child_count = v,
            StateUpdate::SetPerChildExpense(v) => state.per_child_expense = v,

            StateUpdate::SetLiabilityPrincipal(liability, v) => {
                *state.liability_principal_mut(liability) = v;
                if v == 0.0 {
                    *state.liability_payment_mut(liability) = 0.0;
                }
            }
            StateUpdate::SetLiabilityPayment(liability, v) => {
                *state.liability_payment_mut(liability) = v;
            }
            StateUpdate::SetBankLoan(v) => {
                state.bank_loan = v;
                if v == 0.0 {
                    state.bank_loan_payment = 0.0;
                }
            }
            StateUpdate::SetBankLoanPayment(v) => state.bank_loan_payment = v,

            StateUpdate::SetFastTrackStartPassive(v) => {
                state.fast_track_start_passive_income = v;
            }
            StateUpdate::SetFastTrackDayIncome(v) => {
                state.fast_track_cashflow_day_income = v;
            }
            StateUpdate::SetFastTrackCash(v) => state.fast_track_cash = v,
            StateUpdate::SetSumBusinessIncome(v) => {
                state.fast_track_sum_business_income = v;
            }
            StateUpdate::SetWinningGoal(v) => state.winning_passive_income_goal = v,
        }
    }
}
