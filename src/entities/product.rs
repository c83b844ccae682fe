//! Product entity - the bakery's finished-goods catalog.
//!
//! Each product carries an optional short recipe text and the three regional
//! sale prices quoted when a sale is registered.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the product (e.g., "Pan Francés")
    pub name: String,
    /// Short recipe or description text shown in the catalog detail
    pub recipe: Option<String>,
    /// Sale price in the capital region
    pub price_capital: f64,
    /// Sale price in the eastern region
    pub price_east: f64,
    /// Sale price in the western region
    pub price_west: f64,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many production batches
    #[sea_orm(has_many = "super::batch::Entity")]
    Batches,
    /// One product has many sale rows
    #[sea_orm(has_many = "super::sale::Entity")]
    Sales,
    /// One product has many daily inventory snapshots
    #[sea_orm(has_many = "super::snapshot::Entity")]
    Snapshots,
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::snapshot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Snapshots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
