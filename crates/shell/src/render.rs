//! Plain-text views of catalog state.

use std::fmt::Write;

use chrono::NaiveDate;

use stockroom_inventory::{Catalog, CatalogEntry};

fn heading(entry: &CatalogEntry) -> String {
    let name = if entry.name().is_empty() {
        "(unnamed)"
    } else {
        entry.name()
    };
    if entry.category().is_empty() {
        name.to_string()
    } else {
        format!("{name} [{}]", entry.category())
    }
}

fn totals(entry: &CatalogEntry, today: NaiveDate) -> String {
    match entry.try_total_non_expired_quantity(today) {
        Ok(non_expired) => format!(
            "total {}, non-expired {non_expired}",
            entry.total_quantity()
        ),
        Err(_) => format!("total {}", entry.total_quantity()),
    }
}

/// Entry with its lots, numbered from 1.
pub fn entry(entry: &CatalogEntry, today: NaiveDate) -> String {
    let mut out = String::new();
    let kind = if entry.is_expirable() {
        "expirable"
    } else {
        "non-expirable"
    };
    let _ = writeln!(out, "{} ({kind})", heading(entry));
    let _ = write!(out, "{}", totals(entry, today));

    if entry.lots().is_empty() {
        let _ = write!(out, "\n  (no lots)");
        return out;
    }

    let _ = write!(out, "\n  {:>3}  {:>10}  expires", "#", "quantity");
    for (i, lot) in entry.lots().iter().enumerate() {
        let expires = match lot.expiration_date() {
            Some(date) if lot.is_expired(today) => format!("{date} (expired)"),
            Some(date) => date.to_string(),
            None => "-".to_string(),
        };
        let _ = write!(out, "\n  {:>3}  {:>10}  {expires}", i + 1, lot.quantity());
    }
    out
}

/// One line per entry, numbered from 1.
pub fn list<'a>(entries: impl IntoIterator<Item = (usize, &'a CatalogEntry)>, today: NaiveDate) -> String {
    let lines: Vec<String> = entries
        .into_iter()
        .map(|(i, entry)| format!("{:>3}. {}: {}", i + 1, heading(entry), totals(entry, today)))
        .collect();

    if lines.is_empty() {
        "no entries".to_string()
    } else {
        lines.join("\n")
    }
}

pub fn catalog(catalog: &Catalog, today: NaiveDate) -> String {
    list(catalog.iter().enumerate(), today)
}
