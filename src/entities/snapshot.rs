//! Inventory snapshot entity - one product row of a daily inventory sheet.
//!
//! `available` and `closing` are derived (`opening + received` and
//! `available - sold`); they are re-derived by the core layer immediately
//! before persisting, so the stored values always satisfy the arithmetic.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory snapshot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_snapshots")]
pub struct Model {
    /// Unique identifier for the snapshot row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product counted
    pub product_id: i64,
    /// Date the sheet was taken for; one sheet per date
    pub taken_on: Date,
    /// Stock carried over from the previous sheet's closing
    pub opening: f64,
    /// Stock received during the day
    pub received: f64,
    /// Derived: opening + received
    pub available: f64,
    /// Stock sold during the day
    pub sold: f64,
    /// Derived: available - sold; seeds the next sheet's opening
    pub closing: f64,
    /// Sheet-level notes, shared by every row of the date
    pub notes: String,
}

/// Defines relationships between `InventorySnapshot` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each snapshot row belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
