//! Form input: raw user text turned into validated model values.
//!
//! Presentation layers collect text fields and hand them over as one of these
//! forms; nothing in the model is touched unless every field parses.

use chrono::NaiveDate;
use serde::Deserialize;

use stockroom_core::{DomainError, DomainResult};

use crate::entry::CatalogEntry;
use crate::lot::StockLot;

/// Parse a non-negative whole quantity.
pub fn parse_quantity(text: &str) -> DomainResult<i64> {
    let text = text.trim();
    let quantity: i64 = text
        .parse()
        .map_err(|_| DomainError::validation(format!("quantity '{text}' is not a whole number")))?;
    if quantity < 0 {
        return Err(DomainError::validation(format!(
            "quantity cannot be negative (got {quantity})"
        )));
    }
    Ok(quantity)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> DomainResult<NaiveDate> {
    let text = text.trim();
    let invalid = || DomainError::validation(format!("date '{text}' is not in YYYY-MM-DD form"));

    let mut parts = text.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DomainError::validation(format!("date '{text}' does not exist")))
}

fn non_blank(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// Quantity plus optional expiration date, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LotForm {
    pub quantity: String,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

impl LotForm {
    pub fn new(quantity: impl Into<String>, expiration_date: Option<String>) -> Self {
        Self {
            quantity: quantity.into(),
            expiration_date,
        }
    }

    fn parse(&self, expirable: bool) -> DomainResult<(i64, Option<NaiveDate>)> {
        let quantity = parse_quantity(&self.quantity)?;
        let expiration = match (expirable, non_blank(&self.expiration_date)) {
            (true, Some(text)) => Some(parse_date(text)?),
            (true, None) => {
                return Err(DomainError::validation("expiration date is required"));
            }
            (false, Some(_)) => {
                return Err(DomainError::validation(
                    "entry is not expirable; leave the expiration date empty",
                ));
            }
            (false, None) => None,
        };
        Ok((quantity, expiration))
    }

    /// Build a lot shaped for an entry with the given expirable flag.
    pub fn into_lot(self, expirable: bool) -> DomainResult<StockLot> {
        match self.parse(expirable)? {
            (quantity, Some(date)) => StockLot::with_expiration(quantity, date),
            (quantity, None) => StockLot::new(quantity),
        }
    }

    /// Append the lot described by this form to `entry`.
    pub fn add_to(self, entry: &mut CatalogEntry) -> DomainResult<()> {
        let lot = self.into_lot(entry.is_expirable())?;
        entry.add_lot(lot)
    }

    /// Overwrite the lot at `index` of `entry`.
    pub fn update(self, entry: &mut CatalogEntry, index: usize) -> DomainResult<()> {
        let (quantity, expiration) = self.parse(entry.is_expirable())?;
        entry.update_lot(index, quantity, expiration)
    }
}

/// "New product information" form: metadata plus the first lot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewEntryForm {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub expirable: bool,
    pub quantity: String,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

impl NewEntryForm {
    /// Build the entry with its first lot already consolidated.
    pub fn into_entry(self) -> DomainResult<CatalogEntry> {
        let lot = LotForm::new(self.quantity, self.expiration_date).into_lot(self.expirable)?;

        let mut entry = CatalogEntry::new(self.name, self.category, self.expirable);
        entry.add_lot(lot)?;
        entry.organize();
        Ok(entry)
    }
}

/// "Edit info" form: name and category only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditInfoForm {
    pub name: String,
    pub category: String,
}

impl EditInfoForm {
    pub fn apply(self, entry: &mut CatalogEntry) {
        entry.set_name(self.name);
        entry.set_category(self.category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_quantity_accepts_padded_numbers() {
        assert_eq!(parse_quantity(" 42 ").unwrap(), 42);
        assert_eq!(parse_quantity("0").unwrap(), 0);
    }

    #[test]
    fn parse_quantity_rejects_negative_and_garbage() {
        assert!(matches!(parse_quantity("-1"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_quantity("ten"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_quantity("1.5"), Err(DomainError::Validation(_))));
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn parse_date_accepts_unpadded_parts() {
        assert_eq!(parse_date("2017-10-21").unwrap(), date(2017, 10, 21));
        assert_eq!(parse_date("2017-1-2").unwrap(), date(2017, 1, 2));
    }

    #[test]
    fn parse_date_rejects_bad_shapes_and_impossible_days() {
        for text in ["2017/10/21", "2017-10", "2017-10-21-1", "x-1-1", "", "2023-02-30", "2023-13-01"] {
            assert!(parse_date(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn lot_form_requires_date_for_expirable_entries() {
        let err = LotForm::new("3", None).into_lot(true).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = LotForm::new("3", Some("  ".to_string())).into_lot(true).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let lot = LotForm::new("3", Some("2024-05-06".to_string())).into_lot(true).unwrap();
        assert_eq!(lot, StockLot::with_expiration(3, date(2024, 5, 6)).unwrap());
    }

    #[test]
    fn lot_form_rejects_date_for_plain_entries() {
        assert!(LotForm::new("3", Some("2024-05-06".to_string())).into_lot(false).is_err());
        assert_eq!(LotForm::new("3", None).into_lot(false).unwrap(), StockLot::new(3).unwrap());
    }

    #[test]
    fn lot_form_update_is_bounds_checked() {
        let mut entry = CatalogEntry::new("Rice", "Grains", false);
        LotForm::new("8", None).update(&mut entry, 0).unwrap();
        assert_eq!(entry.total_quantity(), 8);

        let err = LotForm::new("1", None).update(&mut entry, 5).unwrap_err();
        assert_eq!(err, DomainError::index_out_of_range(5, 1));
    }

    #[test]
    fn new_non_expirable_entry_holds_quantity_in_one_bucket() {
        let form = NewEntryForm {
            name: "Rice".to_string(),
            category: "Grains".to_string(),
            expirable: false,
            quantity: "12".to_string(),
            expiration_date: None,
        };

        let entry = form.into_entry().unwrap();
        assert_eq!(entry.lots(), &[StockLot::new(12).unwrap()]);
    }

    #[test]
    fn new_expirable_entry_gets_dated_first_lot() {
        let form = NewEntryForm {
            name: "Apple".to_string(),
            category: "Fruit".to_string(),
            expirable: true,
            quantity: "20".to_string(),
            expiration_date: Some("2017-10-21".to_string()),
        };

        let entry = form.into_entry().unwrap();
        assert!(entry.is_expirable());
        assert_eq!(entry.lots(), &[StockLot::with_expiration(20, date(2017, 10, 21)).unwrap()]);
    }

    #[test]
    fn new_entry_form_fails_as_a_whole() {
        let form = NewEntryForm {
            name: "Apple".to_string(),
            category: "Fruit".to_string(),
            expirable: true,
            quantity: "-4".to_string(),
            expiration_date: Some("2017-10-21".to_string()),
        };
        assert!(form.into_entry().is_err());
    }

    #[test]
    fn forms_deserialize_from_json() {
        let form: NewEntryForm = serde_json::from_value(serde_json::json!({
            "name": "Milk",
            "category": "Dairy",
            "expirable": true,
            "quantity": "2",
            "expiration_date": "2024-01-31"
        }))
        .unwrap();
        assert!(form.expirable);

        let info: EditInfoForm =
            serde_json::from_value(serde_json::json!({ "name": "", "category": "x" })).unwrap();
        let mut entry = CatalogEntry::default();
        info.apply(&mut entry);
        assert_eq!(entry.category(), "x");
    }
}
