//! Material entity - raw-material stock on hand.
//!
//! The `quantity` column is the running stock balance; it is only ever
//! adjusted through recorded movements, never written directly.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the material
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the material (e.g., "Harina dura")
    pub name: String,
    /// Current stock on hand, in `unit`s, kept to 3 decimals
    pub quantity: f64,
    /// Unit of measure (e.g., "qq", "lb")
    pub unit: String,
    /// Supplier this material is bought from, if recorded
    pub supplier_id: Option<i64>,
}

/// Defines relationships between Material and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each material may belong to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// One material has many stock movements
    #[sea_orm(has_many = "super::movement::Entity")]
    Movements,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
