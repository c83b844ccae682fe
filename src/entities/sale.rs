//! Sale entity - one product line of a registered sale.
//!
//! A customer-facing sale is a set of rows sharing the same `sold_on` date
//! and `client_id`; grouping back into that shape is done in the core layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Unique identifier for the sale line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product sold
    pub product_id: i64,
    /// Quantity sold
    pub quantity_sold: f64,
    /// Line total in quetzales, kept to 2 decimals
    pub total: f64,
    /// Business date of the sale
    pub sold_on: Date,
    /// Client the sale was made to, if recorded
    pub client_id: Option<i64>,
}

/// Defines relationships between Sale and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each sale line belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each sale line may belong to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
