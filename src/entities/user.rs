//! User entity - back-office accounts.
//!
//! Credentials live as plain store columns; verifying them is a store
//! lookup, not a protocol. See `core::auth`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Role label (e.g., "admin", "vendedor")
    pub role: String,
    /// Login name, unique in practice
    pub username: String,
    /// Login password
    pub password: String,
}

/// User has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
