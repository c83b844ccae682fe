//! Movement entity - the raw-material stock ledger.
//!
//! Every intake into or issue out of the warehouse is one movement row,
//! stamped with a generated reference code and the acting user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MovementKind {
    /// Stock entering the warehouse
    #[sea_orm(string_value = "intake")]
    Intake,
    /// Stock leaving the warehouse
    #[sea_orm(string_value = "issue")]
    Issue,
}

/// Movement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the material that moved
    pub material_id: i64,
    /// When the movement happened
    pub occurred_at: DateTimeUtc,
    /// Intake or issue; see [`MovementKind`]
    pub kind: MovementKind,
    /// Moved quantity, always positive, kept to 3 decimals
    pub quantity: f64,
    /// Generated reference code (e.g., `"IN-4F7K2Q"`)
    pub reference: String,
    /// Human-readable reason for the movement
    pub reason: String,
    /// ID of the user who recorded the movement
    pub user_id: i64,
}

/// Defines relationships between Movement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement belongs to one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
