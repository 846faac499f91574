use chrono::Utc;
use log::debug;

use crate::errors::CoreError;
use crate::models::holding::FixedLiability;
use crate::models::state::LedgerState;
use crate::models::transaction::{BankOperation, BankTransaction};

/// Loan amounts move in steps of this size.
const LOAN_STEP: f64 = 1000.0;

/// Monthly payment charged on the outstanding bank loan principal.
const LOAN_PAYMENT_RATE: f64 = 0.10;

/// Credit limit is this many times the current monthly cashflow.
const CREDIT_MULTIPLIER: f64 = 10.0;

/// The bank desk: one flexible loan account layered on top of the five
/// fixed liabilities, plus full closure of those liabilities.
pub struct BankService;

impl BankService {
    pub fn new() -> Self {
        Self
    }

    /// Available credit: ten times monthly cashflow, floored to the
    /// nearest thousand. Negative cashflow yields zero credit.
    pub fn max_loan(&self, monthly_cashflow: f64) -> f64 {
        ((monthly_cashflow * CREDIT_MULTIPLIER).max(0.0) / LOAN_STEP).floor() * LOAN_STEP
    }

    /// Borrow `amount` against future cashflow. The principal grows and
    /// the monthly payment is recomputed as 10% of the new principal,
    /// both replaced atomically.
    pub fn take_loan(
        &self,
        state: &mut LedgerState,
        amount: f64,
        monthly_cashflow: f64,
    ) -> Result<BankTransaction, CoreError> {
        validate_amount(amount)?;
        let limit = self.max_loan(monthly_cashflow);
        if amount > limit {
            return Err(CoreError::LoanLimitExceeded { amount, limit });
        }

        let new_principal = state.bank_loan + amount;
        let new_payment = (new_principal * LOAN_PAYMENT_RATE).round();
        state.bank_loan = new_principal;
        state.bank_loan_payment = new_payment;

        debug!("bank loan taken: {amount} (principal {new_principal}, payment {new_payment})");
        Ok(BankTransaction {
            operation: BankOperation::TakeLoan,
            amount,
            new_balance: Some(new_principal),
            new_payment: Some(new_payment),
            liability: None,
            timestamp: Utc::now(),
        })
    }

    /// Pay down the bank loan. Same amount rules as borrowing, bounded
    /// by the outstanding principal instead of the credit limit.
    pub fn repay_loan(
        &self,
        state: &mut LedgerState,
        amount: f64,
    ) -> Result<BankTransaction, CoreError> {
        validate_amount(amount)?;
        if amount > state.bank_loan {
            return Err(CoreError::LoanLimitExceeded {
                amount,
                limit: state.bank_loan,
            });
        }

        let new_principal = state.bank_loan - amount;
        let new_payment = (new_principal * LOAN_PAYMENT_RATE).round();
        state.bank_loan = new_principal;
        state.bank_loan_payment = new_payment;

        debug!("bank loan repaid: {amount} (principal {new_principal}, payment {new_payment})");
        Ok(BankTransaction {
            operation: BankOperation::RepayLoan,
            amount,
            new_balance: Some(new_principal),
            new_payment: Some(new_payment),
            liability: None,
            timestamp: Utc::now(),
        })
    }

    /// Pay off a fixed liability in full. The five fixed liabilities
    /// are binary — owed in full or zero — so `amount` must equal the
    /// outstanding principal exactly; principal and paired payment are
    /// then zeroed together.
    pub fn close_fixed_liability(
        &self,
        state: &mut LedgerState,
        liability: FixedLiability,
        amount: f64,
    ) -> Result<BankTransaction, CoreError> {
        let principal = state.liability_principal(liability);
        if principal <= 0.0 || amount != principal {
            return Err(CoreError::LiabilityClosureMismatch {
                liability: liability.to_string(),
                amount,
                principal,
            });
        }

        *state.liability_principal_mut(liability) = 0.0;
        *state.liability_payment_mut(liability) = 0.0;

        debug!("closed {liability} for {amount}");
        Ok(BankTransaction {
            operation: BankOperation::CloseLiability,
            amount,
            new_balance: None,
            new_payment: None,
            liability: Some(liability),
            timestamp: Utc::now(),
        })
    }
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if amount <= 0.0 || amount % LOAN_STEP != 0.0 {
        return Err(CoreError::InvalidLoanAmount(amount));
    }
    Ok(())
}

impl Default for BankService {
    fn default() -> Self {
        Self::new()
    }
}
