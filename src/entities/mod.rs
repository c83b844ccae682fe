//! Entity module - Contains all SeaORM entity definitions for the store.
//! These entities represent the record collections and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod batch;
pub mod client;
pub mod material;
pub mod movement;
pub mod product;
pub mod sale;
pub mod snapshot;
pub mod supplier;
pub mod user;

// Re-export specific types to avoid conflicts
pub use batch::{BatchStatus, Column as BatchColumn, Entity as Batch, Model as BatchModel};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
pub use movement::{
    Column as MovementColumn, Entity as Movement, Model as MovementModel, MovementKind,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use sale::{Column as SaleColumn, Entity as Sale, Model as SaleModel};
pub use snapshot::{Column as SnapshotColumn, Entity as Snapshot, Model as SnapshotModel};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
