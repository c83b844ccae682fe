//! Daily inventory reconciliation - the end-of-day counting sheet.
//!
//! Each day the shop fills one sheet with a row per product: the opening
//! stock is carried over from the previous sheet's closing, the clerk
//! enters what came in and what was sold, and the derived columns follow
//! from one recompute path shared by live editing and persistence:
//! `available = opening + received`, `closing = available - sold`.

use crate::{
    entities::{Snapshot, snapshot},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// One product row of the daily sheet while it is being filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// Product counted by this row
    pub product_id: i64,
    /// Product name, for display
    pub product_name: String,
    /// Carried over from the previous sheet's closing
    pub opening: f64,
    /// Stock received during the day
    pub received: f64,
    /// Derived: opening + received
    pub available: f64,
    /// Stock sold during the day
    pub sold: f64,
    /// Derived: available - sold
    pub closing: f64,
}

impl SheetRow {
    /// Re-derives `available` and `closing` from the input fields. Every
    /// edit path and the final persistence go through this one function.
    pub fn recompute(&mut self) {
        self.available = self.opening + self.received;
        self.closing = self.available - self.sold;
    }

    /// Sets the received quantity and recomputes the derived columns.
    pub fn set_received(&mut self, received: f64) {
        self.received = received;
        self.recompute();
    }

    /// Sets the sold quantity and recomputes the derived columns.
    pub fn set_sold(&mut self, sold: f64) {
        self.sold = sold;
        self.recompute();
    }
}

/// The closing quantity of a product's most recent snapshot, or zero if the
/// product has never been counted.
pub async fn last_closing(db: &DatabaseConnection, product_id: i64) -> Result<f64> {
    let last = Snapshot::find()
        .filter(snapshot::Column::ProductId.eq(product_id))
        .order_by_desc(snapshot::Column::TakenOn)
        .one(db)
        .await?;
    Ok(last.map_or(0.0, |s| s.closing))
}

/// Builds a fresh daily sheet: one row per product, opening seeded from the
/// last registered closing, everything else at zero.
pub async fn build_daily_sheet(db: &DatabaseConnection) -> Result<Vec<SheetRow>> {
    let products = crate::core::product::list_products(db).await?;
    let mut rows = Vec::with_capacity(products.len());
    for product in products {
        let opening = last_closing(db, product.id).await?;
        let mut row = SheetRow {
            product_id: product.id,
            product_name: product.name,
            opening,
            received: 0.0,
            available: 0.0,
            sold: 0.0,
            closing: 0.0,
        };
        row.recompute();
        rows.push(row);
    }
    Ok(rows)
}

/// Registers a filled sheet for a date, one snapshot row per product.
///
/// A date can only be registered once. Derived columns are recomputed from
/// the inputs immediately before persisting, so the stored rows always
/// satisfy the sheet arithmetic regardless of what the caller last edited.
/// Returns the number of rows written.
///
/// # Errors
/// Returns [`Error::Config`] for an empty sheet,
/// [`Error::InventoryAlreadyRegistered`] when the date already has
/// snapshots, or the store fault unchanged.
pub async fn register_sheet(
    db: &DatabaseConnection,
    taken_on: NaiveDate,
    rows: Vec<SheetRow>,
    notes: Option<String>,
) -> Result<usize> {
    if rows.is_empty() {
        return Err(Error::Config {
            message: "The inventory sheet has no rows".to_string(),
        });
    }

    let existing = Snapshot::find()
        .filter(snapshot::Column::TakenOn.eq(taken_on))
        .count(db)
        .await?;
    if existing > 0 {
        return Err(Error::InventoryAlreadyRegistered { date: taken_on });
    }

    let notes = notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| "no notes".to_string(), ToString::to_string);

    let models: Vec<snapshot::ActiveModel> = rows
        .into_iter()
        .map(|mut row| {
            row.recompute();
            snapshot::ActiveModel {
                product_id: Set(row.product_id),
                taken_on: Set(taken_on),
                opening: Set(row.opening),
                received: Set(row.received),
                available: Set(row.available),
                sold: Set(row.sold),
                closing: Set(row.closing),
                notes: Set(notes.clone()),
                ..Default::default()
            }
        })
        .collect();

    let count = models.len();
    Snapshot::insert_many(models).exec(db).await?;
    Ok(count)
}

/// Retrieves the registered snapshot rows for a date.
pub async fn sheet_for_date(
    db: &DatabaseConnection,
    taken_on: NaiveDate,
) -> Result<Vec<snapshot::Model>> {
    Snapshot::find()
        .filter(snapshot::Column::TakenOn.eq(taken_on))
        .all(db)
        .await
        .map_err(Into::into)
}
