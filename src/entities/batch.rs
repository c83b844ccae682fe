//! Batch entity - one production run, tracked from assignment to reconciliation.
//!
//! A batch is created in `draft` with only the estimated quantity known.
//! Reconciliation fills the actuals (produced/packaged/spoiled), stores the
//! recomputed discrepancy, and moves the row to `submitted` - a one-way
//! transition. Submitted batches are immutable historical records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a production batch.
///
/// `Draft` is the initial state; `Submitted` is terminal. The only
/// transition is draft to submitted, performed by the reconcile operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BatchStatus {
    /// Assigned, awaiting reconciliation; actuals unknown
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Reconciled and closed; actuals and discrepancy fixed
    #[sea_orm(string_value = "submitted")]
    Submitted,
}

/// Batch database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    /// Unique identifier for the batch, assigned by the store
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this batch produces
    pub product_id: i64,
    /// Quantity planned at assignment; always positive, never edited after
    pub estimated_qty: f64,
    /// Actual quantity produced; unset until reconciliation
    pub produced_qty: Option<f64>,
    /// Quantity packaged for sale; unset until reconciliation
    pub packaged_qty: Option<f64>,
    /// Quantity spoiled during production; unset until reconciliation
    pub spoiled_qty: Option<f64>,
    /// Derived accounting check: produced - (packaged + spoiled),
    /// recomputed at submission, never taken from caller input
    pub discrepancy: Option<f64>,
    /// Free-form notes captured at reconciliation
    pub notes: Option<String>,
    /// ID of the user who created the assignment
    pub assigned_by: i64,
    /// Small-integer classification tier; not validated beyond range
    pub level: Option<i16>,
    /// Lifecycle state; see [`BatchStatus`]
    pub status: BatchStatus,
    /// Business date the batch was assigned for
    pub assigned_on: Date,
    /// When the batch was submitted; unset while draft
    pub submitted_at: Option<DateTimeUtc>,
}

/// Defines relationships between Batch and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each batch belongs to one product
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
