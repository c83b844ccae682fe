//! Sales business logic - sale entry and the grouped sales history.
//!
//! A sale is entered as a set of product lines sharing one date and one
//! optional client; each line lands as its own row in the sales collection.
//! Line totals default to unit price times quantity but may be overridden
//! by the seller, so the stored total is validated rather than re-derived.

use crate::{
    core::quantity,
    entities::{Client, Product, Sale, client, product, sale},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;

/// The sales history view fetches at most this many recent rows.
const RECENT_SALES_LIMIT: u64 = 500;

/// One product line of a sale being entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleLine {
    /// Product sold
    pub product_id: i64,
    /// Quantity sold; must be positive
    pub quantity: f64,
    /// Line total; must be positive (either derived or manually set)
    pub total: f64,
}

/// One line of a grouped, displayed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleGroupLine {
    /// Name of the product sold (empty if the product row is gone)
    pub product_name: String,
    /// Quantity sold
    pub quantity: f64,
    /// Line total
    pub total: f64,
}

/// A registered sale as shown in the history: all lines of one date and
/// client, with the summed total.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleGroup {
    /// Business date of the sale
    pub sold_on: NaiveDate,
    /// Client the sale was made to, if any
    pub client_id: Option<i64>,
    /// Resolved client name, if any
    pub client_name: Option<String>,
    /// Sum of the line totals
    pub total: f64,
    /// The individual product lines
    pub lines: Vec<SaleGroupLine>,
}

/// Derived line total: unit price times quantity, at money resolution.
/// The entry form recomputes this on every quantity change unless the
/// seller has edited the total by hand.
#[must_use]
pub fn line_total(unit_price: f64, sold: f64) -> f64 {
    quantity::round_money(unit_price * sold)
}

/// Registers a sale of one or more product lines.
///
/// Every line must reference an existing product and carry a positive
/// quantity and total; validation runs before anything is written and all
/// rows are inserted in one store transaction. `sold_on` defaults to today.
///
/// # Errors
/// Returns [`Error::Config`] for an empty line list,
/// [`Error::InvalidQuantity`] for a non-positive quantity or total,
/// [`Error::ProductNotFound`], or the store fault unchanged.
pub async fn record_sale(
    db: &DatabaseConnection,
    lines: Vec<SaleLine>,
    client_id: Option<i64>,
    sold_on: Option<NaiveDate>,
) -> Result<Vec<sale::Model>> {
    if lines.is_empty() {
        return Err(Error::Config {
            message: "A sale needs at least one line".to_string(),
        });
    }
    for line in &lines {
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity,
            });
        }
        if !line.total.is_finite() || line.total <= 0.0 {
            return Err(Error::InvalidQuantity {
                quantity: line.total,
            });
        }
    }

    let sold_on = sold_on.unwrap_or_else(|| Utc::now().date_naive());
    let txn = db.begin().await?;

    let mut inserted = Vec::with_capacity(lines.len());
    for line in lines {
        Product::find_by_id(line.product_id)
            .one(&txn)
            .await?
            .ok_or(Error::ProductNotFound {
                id: line.product_id,
            })?;

        let row = sale::ActiveModel {
            product_id: Set(line.product_id),
            quantity_sold: Set(line.quantity),
            total: Set(quantity::round_money(line.total)),
            sold_on: Set(sold_on),
            client_id: Set(client_id),
            ..Default::default()
        };
        inserted.push(row.insert(&txn).await?);
    }

    txn.commit().await?;
    Ok(inserted)
}

/// Retrieves all clients, ordered by name.
pub async fn list_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>> {
    Client::find()
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the recent sales history grouped into displayed sales.
pub async fn list_sale_groups(db: &DatabaseConnection) -> Result<Vec<SaleGroup>> {
    let rows = Sale::find()
        .find_also_related(Product)
        .order_by_desc(sale::Column::SoldOn)
        .limit(RECENT_SALES_LIMIT)
        .all(db)
        .await?;
    let clients = Client::find().all(db).await?;
    Ok(group_sales(&rows, &clients))
}

/// Groups raw sale rows by (date, client), preserving the incoming row
/// order for the groups and summing line totals per group.
#[must_use]
pub fn group_sales(
    rows: &[(sale::Model, Option<product::Model>)],
    clients: &[client::Model],
) -> Vec<SaleGroup> {
    let mut groups: Vec<SaleGroup> = Vec::new();
    let mut index: HashMap<(NaiveDate, Option<i64>), usize> = HashMap::new();

    for (sale, product) in rows {
        let key = (sale.sold_on, sale.client_id);
        let at = *index.entry(key).or_insert_with(|| {
            let client_name = sale
                .client_id
                .and_then(|id| clients.iter().find(|c| c.id == id))
                .map(|c| c.name.clone());
            groups.push(SaleGroup {
                sold_on: sale.sold_on,
                client_id: sale.client_id,
                client_name,
                total: 0.0,
                lines: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[at];
        group.lines.push(SaleGroupLine {
            product_name: product.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            quantity: sale.quantity_sold,
            total: sale.total,
        });
        group.total += sale.total;
    }

    groups
}
