use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{AssetKind, Holding, HoldingDraft, HoldingPatch};
use crate::models::state::LedgerState;
use crate::models::transaction::{AssetTransaction, TradeKind};

/// Applies buy/sell/remove operations to the three Rat Race holding
/// collections.
///
/// Buying never debits cash — the Rat Race sheet models net worth, not
/// a cash account. Validation here is advisory: callers are expected to
/// pre-filter bad input, and a rejected call leaves the state untouched.
pub struct AssetService;

impl AssetService {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a draft and append it as a new holding.
    ///
    /// Securities get their down payment forced to `cost × count` (no
    /// partial financing on securities); real estate and business keep
    /// the caller's down payment, and whatever it leaves uncovered is
    /// implicit debt. Returns the display receipt.
    pub fn buy(
        &self,
        state: &mut LedgerState,
        kind: AssetKind,
        draft: HoldingDraft,
    ) -> Result<AssetTransaction, CoreError> {
        if draft.cost < 0.0 {
            return Err(CoreError::Validation(format!(
                "Purchase price must not be negative (got {})",
                draft.cost
            )));
        }

        let is_security = kind == AssetKind::Security;
        let count = draft
            .count
            .unwrap_or(if is_security { 0.0 } else { 1.0 })
            .max(0.0);
        let name = if draft.name.trim().is_empty() {
            kind.default_label().to_string()
        } else {
            draft.name
        };

        let holding = Holding {
            id: Uuid::new_v4(),
            name,
            cost: draft.cost,
            down_payment: if is_security {
                draft.cost * count
            } else {
                draft.down_payment
            },
            cashflow: draft.cashflow,
            count,
            is_short: is_security && draft.is_short,
        };

        let record = AssetTransaction {
            kind: TradeKind::Buy,
            asset_kind: kind,
            name: holding.name.clone(),
            price: holding.cost,
            count: holding.count,
            total: if is_security {
                holding.cost * holding.count
            } else {
                holding.down_payment
            },
            debt: holding.debt(),
            cashflow: holding.cashflow,
            is_short: holding.is_short,
            timestamp: Utc::now(),
        };

        debug!(
            "buy {kind}: '{}' for {} (debt {})",
            record.name, record.total, record.debt
        );
        self.collection_mut(state, kind).push(holding);
        Ok(record)
    }

    /// Sell a holding.
    ///
    /// Real estate and business always sell whole: proceeds are
    /// `sale_price − debt` (possibly negative) and the holding is
    /// removed. Securities sell per unit: long proceeds are
    /// `sale_price × sell_count`, shorts invert to
    /// `(entry − sale_price) × sell_count`; a partial sale only
    /// decrements the count, a full one removes the holding.
    pub fn sell(
        &self,
        state: &mut LedgerState,
        kind: AssetKind,
        id: Uuid,
        sell_count: f64,
        sale_price: f64,
    ) -> Result<AssetTransaction, CoreError> {
        if kind == AssetKind::Security && sell_count <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Security sale count must be positive (got {sell_count})"
            )));
        }

        let holdings = self.collection_mut(state, kind);
        let idx = holdings
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;

        let record;
        if kind == AssetKind::Security {
            let holding = &mut holdings[idx];
            let proceeds = if holding.is_short {
                (holding.cost - sale_price) * sell_count
            } else {
                sale_price * sell_count
            };
            record = AssetTransaction {
                kind: TradeKind::Sell,
                asset_kind: kind,
                name: holding.name.clone(),
                price: sale_price,
                count: sell_count,
                total: proceeds,
                debt: holding.debt(),
                cashflow: holding.cashflow,
                is_short: holding.is_short,
                timestamp: Utc::now(),
            };
            if sell_count < holding.count {
                // Partial sale touches nothing but the count.
                holding.count -= sell_count;
            } else {
                holdings.remove(idx);
            }
        } else {
            let holding = holdings.remove(idx);
            let debt = holding.debt();
            record = AssetTransaction {
                kind: TradeKind::Sell,
                asset_kind: kind,
                name: holding.name,
                price: sale_price,
                count: 1.0,
                total: sale_price - debt,
                debt,
                cashflow: holding.cashflow,
                is_short: false,
                timestamp: Utc::now(),
            };
        }

        debug!(
            "sell {kind}: '{}' for {} (proceeds {})",
            record.name, record.price, record.total
        );
        Ok(record)
    }

    /// Delete a holding outright, no proceeds computed. This is the
    /// data-entry correction path, not a sale.
    pub fn remove(
        &self,
        state: &mut LedgerState,
        kind: AssetKind,
        id: Uuid,
    ) -> Result<(), CoreError> {
        let holdings = self.collection_mut(state, kind);
        let idx = holdings
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        holdings.remove(idx);
        Ok(())
    }

    /// Apply an inline field edit to an existing holding.
    pub fn patch(
        &self,
        state: &mut LedgerState,
        kind: AssetKind,
        id: Uuid,
        patch: &HoldingPatch,
    ) -> Result<(), CoreError> {
        let holding = self
            .collection_mut(state, kind)
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        patch.apply_to(holding);
        Ok(())
    }

    fn collection_mut<'a>(
        &self,
        state: &'a mut LedgerState,
        kind: AssetKind,
    ) -> &'a mut Vec<Holding> {
        match kind {
            AssetKind::RealEstate => &mut state.real_estate_assets,
            AssetKind::Business => &mut state.business_assets,
            AssetKind::Security => &mut state.stock_assets,
        }
    }
}

impl Default for AssetService {
    fn default() -> Self {
        Self::new()
    }
}
