use chrono::NaiveDate;
use serde::Serialize;

use stockroom_core::{DomainError, DomainResult, ValueObject};

/// Value object: one quantity record, optionally tagged with an expiration date.
///
/// Whether a lot carries a date is decided by the catalog entry that owns it;
/// the lot itself only guarantees `quantity >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLot {
    quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date: Option<NaiveDate>,
}

impl ValueObject for StockLot {}

impl StockLot {
    /// Undated lot with no stock (the bucket every non-expirable entry starts with).
    pub fn empty() -> Self {
        Self {
            quantity: 0,
            expiration_date: None,
        }
    }

    /// Undated lot.
    pub fn new(quantity: i64) -> DomainResult<Self> {
        ensure_non_negative(quantity)?;
        Ok(Self {
            quantity,
            expiration_date: None,
        })
    }

    /// Lot tagged with an expiration date.
    pub fn with_expiration(quantity: i64, expiration_date: NaiveDate) -> DomainResult<Self> {
        ensure_non_negative(quantity)?;
        Ok(Self {
            quantity,
            expiration_date: Some(expiration_date),
        })
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    pub fn is_dated(&self) -> bool {
        self.expiration_date.is_some()
    }

    /// Replace the quantity. Negative values are rejected and leave the lot unchanged.
    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        ensure_non_negative(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Add stock to this lot (consolidation folds other lots in through here).
    pub fn increase_quantity(&mut self, delta: i64) -> DomainResult<()> {
        if delta < 0 {
            return Err(DomainError::validation("quantity increase cannot be negative"));
        }
        self.quantity = self
            .quantity
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("quantity overflow"))?;
        Ok(())
    }

    pub fn set_expiration_date(&mut self, expiration_date: NaiveDate) {
        self.expiration_date = Some(expiration_date);
    }

    /// Set the expiration date from raw calendar parts.
    ///
    /// Fails without touching the lot when the parts do not name a real day
    /// (e.g. `2023-02-30`).
    pub fn set_expiration_ymd(&mut self, year: i32, month: u32, day: u32) -> DomainResult<()> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DomainError::validation(format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
        })?;
        self.set_expiration_date(date);
        Ok(())
    }

    pub(crate) fn clear_expiration_date(&mut self) {
        self.expiration_date = None;
    }

    /// A dated lot is expired on and after its expiration date. Undated lots never expire.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        matches!(self.expiration_date, Some(date) if date <= today)
    }

    /// Same expiration bucket (equal dates, or both undated).
    pub fn shares_bucket_with(&self, other: &StockLot) -> bool {
        self.expiration_date == other.expiration_date
    }
}

impl Default for StockLot {
    fn default() -> Self {
        Self::empty()
    }
}

fn ensure_non_negative(quantity: i64) -> DomainResult<()> {
    if quantity < 0 {
        return Err(DomainError::validation(format!(
            "quantity cannot be negative (got {quantity})"
        )));
    }
    Ok(())
}
