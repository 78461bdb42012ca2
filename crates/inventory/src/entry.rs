use chrono::NaiveDate;
use serde::Serialize;

use stockroom_core::{AggregateRoot, DomainError, DomainResult, EntryId};

use crate::lot::StockLot;

/// Aggregate root: one product type in the catalog, owning its stock lots.
///
/// Lots of an expirable entry always carry a date; lots of a non-expirable entry
/// never do, and a non-expirable entry always holds at least one lot (the bucket
/// all of its stock consolidates into). The total quantity always fits in `i64`,
/// so every sum over the lots (and every merge) is exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    id: EntryId,
    name: String,
    category: String,
    expirable: bool,
    lots: Vec<StockLot>,
    version: u64,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, category: impl Into<String>, expirable: bool) -> Self {
        Self::with_id(EntryId::new(), name, category, expirable)
    }

    pub fn with_id(
        id: EntryId,
        name: impl Into<String>,
        category: impl Into<String>,
        expirable: bool,
    ) -> Self {
        let lots = if expirable {
            Vec::new()
        } else {
            vec![StockLot::empty()]
        };
        Self {
            id,
            name: name.into(),
            category: category.into(),
            expirable,
            lots,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> EntryId {
        self.id
    }

    pub fn is_expirable(&self) -> bool {
        self.expirable
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn lots(&self) -> &[StockLot] {
        &self.lots
    }

    pub fn lot(&self, index: usize) -> Option<&StockLot> {
        self.lots.get(index)
    }

    pub fn lot_count(&self) -> usize {
        self.lots.len()
    }

    /// Empty names are accepted.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Empty categories are accepted.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.touch();
    }

    /// Switch the entry between dated and undated stock.
    ///
    /// - expirable -> non-expirable: dates are dropped and every lot is folded
    ///   into a single bucket (an empty bucket if there were no lots).
    /// - non-expirable -> expirable: only allowed while the entry holds no stock,
    ///   since undated quantity cannot be given a date. The empty bucket is dropped.
    pub fn set_expirable(&mut self, expirable: bool) -> DomainResult<()> {
        if expirable == self.expirable {
            return Ok(());
        }

        if expirable {
            if self.total_quantity() > 0 {
                return Err(DomainError::invariant(
                    "cannot make an entry expirable while it holds undated stock",
                ));
            }
            self.lots.clear();
        } else {
            for lot in &mut self.lots {
                lot.clear_expiration_date();
            }
            if self.lots.is_empty() {
                self.lots.push(StockLot::empty());
            }
        }

        self.expirable = expirable;
        self.consolidate();
        self.touch();
        tracing::debug!(entry = %self.id, expirable, "expirable flag changed");
        Ok(())
    }

    pub fn total_quantity(&self) -> i64 {
        self.lots.iter().map(StockLot::quantity).sum()
    }

    /// Quantity in lots whose expiration date is strictly after `today`.
    ///
    /// A non-expirable entry has no expiry to filter on: the call is logged as a
    /// usage warning and the total quantity is returned instead. Use
    /// [`try_total_non_expired_quantity`](Self::try_total_non_expired_quantity)
    /// to get an error for that case.
    pub fn total_non_expired_quantity(&self, today: NaiveDate) -> i64 {
        match self.try_total_non_expired_quantity(today) {
            Ok(total) => total,
            Err(_) => {
                tracing::warn!(
                    entry = %self.id,
                    name = %self.name,
                    "non-expired quantity requested for a non-expirable entry; returning total quantity"
                );
                self.total_quantity()
            }
        }
    }

    pub fn try_total_non_expired_quantity(&self, today: NaiveDate) -> DomainResult<i64> {
        if !self.expirable {
            return Err(DomainError::unsupported(
                "non-expired quantity is only defined for expirable entries",
            ));
        }
        Ok(self
            .lots
            .iter()
            .filter(|lot| !lot.is_expired(today))
            .map(StockLot::quantity)
            .sum())
    }

    /// Quantity in lots dated on or before `today`. Always 0 for non-expirable entries.
    pub fn expired_quantity(&self, today: NaiveDate) -> i64 {
        self.lots
            .iter()
            .filter(|lot| lot.is_expired(today))
            .map(StockLot::quantity)
            .sum()
    }

    pub fn earliest_expiration(&self) -> Option<NaiveDate> {
        self.lots.iter().filter_map(StockLot::expiration_date).min()
    }

    /// Append a lot. Its shape must match the entry: dated iff expirable.
    pub fn add_lot(&mut self, lot: StockLot) -> DomainResult<()> {
        self.ensure_lot_shape(lot.is_dated())?;
        self.ensure_total_fits(self.total_quantity(), lot.quantity())?;
        self.lots.push(lot);
        self.touch();
        Ok(())
    }

    /// Remove and return the lot at `index`.
    ///
    /// The sole bucket of a non-expirable entry cannot be removed; set its
    /// quantity to zero instead.
    pub fn remove_lot(&mut self, index: usize) -> DomainResult<StockLot> {
        self.ensure_index(index)?;
        if !self.expirable && self.lots.len() == 1 {
            return Err(DomainError::invariant(
                "a non-expirable entry must keep at least one lot",
            ));
        }
        let lot = self.lots.remove(index);
        self.touch();
        Ok(lot)
    }

    /// Replace quantity and expiration date of the lot at `index` in one step.
    pub fn update_lot(
        &mut self,
        index: usize,
        quantity: i64,
        expiration_date: Option<NaiveDate>,
    ) -> DomainResult<()> {
        self.ensure_index(index)?;
        self.ensure_lot_shape(expiration_date.is_some())?;

        let replacement = match expiration_date {
            Some(date) => StockLot::with_expiration(quantity, date)?,
            None => StockLot::new(quantity)?,
        };
        let rest = self.total_quantity() - self.lots[index].quantity();
        self.ensure_total_fits(rest, replacement.quantity())?;
        self.lots[index] = replacement;
        self.touch();
        Ok(())
    }

    /// Consolidate lots and return how many were merged away.
    ///
    /// Walks from the last lot down to index 1. For an expirable entry, a lot is
    /// folded into the lowest-indexed earlier lot with the same expiration date;
    /// for a non-expirable entry every lot is folded into lot 0. Walking backwards
    /// keeps the indices of not-yet-visited lots stable while removing.
    pub fn organize(&mut self) -> usize {
        let merged = self.consolidate();
        if merged > 0 {
            self.touch();
        }
        merged
    }

    fn consolidate(&mut self) -> usize {
        let mut merged = 0;

        for i in (1..self.lots.len()).rev() {
            let target = if self.expirable {
                let lot = &self.lots[i];
                self.lots[..i]
                    .iter()
                    .position(|earlier| earlier.shares_bucket_with(lot))
            } else {
                Some(0)
            };

            let Some(target) = target else {
                continue;
            };

            // Cannot overflow: the entry total fits in i64.
            let quantity = self.lots[i].quantity();
            match self.lots[target].increase_quantity(quantity) {
                Ok(()) => {
                    self.lots.remove(i);
                    merged += 1;
                }
                Err(err) => {
                    tracing::error!(entry = %self.id, index = i, error = %err, "lot left unmerged");
                }
            }
        }

        if merged > 0 {
            tracing::debug!(entry = %self.id, merged, remaining = self.lots.len(), "lots organized");
        }
        merged
    }

    fn ensure_total_fits(&self, rest: i64, added: i64) -> DomainResult<()> {
        rest.checked_add(added).map(|_| ()).ok_or_else(|| {
            DomainError::validation(format!(
                "adding {added} would push the total of '{}' past {}",
                self.name,
                i64::MAX
            ))
        })
    }

    fn ensure_index(&self, index: usize) -> DomainResult<()> {
        if index >= self.lots.len() {
            return Err(DomainError::index_out_of_range(index, self.lots.len()));
        }
        Ok(())
    }

    fn ensure_lot_shape(&self, dated: bool) -> DomainResult<()> {
        match (self.expirable, dated) {
            (true, false) => Err(DomainError::validation(
                "lots of an expirable entry need an expiration date",
            )),
            (false, true) => Err(DomainError::validation(
                "lots of a non-expirable entry cannot carry an expiration date",
            )),
            _ => Ok(()),
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self::new("", "", false)
    }
}

impl AggregateRoot for CatalogEntry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
