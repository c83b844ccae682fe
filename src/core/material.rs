//! Raw-material business logic - suppliers, materials, warehouse movements.
//!
//! Stock is never written directly: every change is a movement row plus an
//! atomic adjustment of the material's `quantity` column, both inside one
//! store transaction. Issues that would drive the stock negative are
//! rejected up front.

use crate::{
    core::quantity,
    entities::{Material, Movement, MovementKind, Supplier, material, movement, supplier},
    errors::{Error, Result},
};
use chrono::Utc;
use rand::RngExt;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

use super::auth::SessionUser;

/// A material joined with its supplier, as listed in the stock screen.
pub type MaterialRow = (material::Model, Option<supplier::Model>);

const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const REFERENCE_LEN: usize = 6;

/// Generates a movement reference like `"IN-4F7K2Q"`.
fn make_reference(prefix: &str) -> String {
    let mut rng = rand::rng();
    let code: String = (0..REFERENCE_LEN)
        .map(|_| REFERENCE_CHARSET[rng.random_range(0..REFERENCE_CHARSET.len())] as char)
        .collect();
    format!("{prefix}-{code}")
}

const fn reference_prefix(kind: MovementKind) -> &'static str {
    match kind {
        MovementKind::Intake => "IN",
        MovementKind::Issue => "OUT",
    }
}

const fn movement_reason(kind: MovementKind) -> &'static str {
    match kind {
        MovementKind::Intake => "Warehouse intake",
        MovementKind::Issue => "Warehouse issue",
    }
}

/// Retrieves all materials with their supplier, ordered by name.
pub async fn list_materials(db: &DatabaseConnection) -> Result<Vec<MaterialRow>> {
    Material::find()
        .find_also_related(Supplier)
        .order_by_asc(material::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Case-insensitive search over material and supplier names, matching the
/// stock screen's search box. A blank query returns everything.
#[must_use]
pub fn filter_materials(rows: &[MaterialRow], query: &str) -> Vec<MaterialRow> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|(material, supplier)| {
            let supplier_name = supplier.as_ref().map_or("", |s| s.name.as_str());
            material.name.to_lowercase().contains(&q)
                || supplier_name.to_lowercase().contains(&q)
        })
        .cloned()
        .collect()
}

/// Sorts rows by stock quantity in place; the stock screen defaults to
/// highest first.
pub fn sort_by_quantity(rows: &mut [MaterialRow], ascending: bool) {
    rows.sort_by(|(a, _), (b, _)| {
        let ordering = a
            .quantity
            .partial_cmp(&b.quantity)
            .unwrap_or(std::cmp::Ordering::Equal);
        if ascending { ordering } else { ordering.reverse() }
    });
}

/// Creates a new supplier.
///
/// # Errors
/// Returns [`Error::Config`] for an empty name, or the store fault.
pub async fn create_supplier(
    db: &DatabaseConnection,
    name: String,
    phone: Option<String>,
) -> Result<supplier::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Supplier name cannot be empty".to_string(),
        });
    }

    let supplier = supplier::ActiveModel {
        name: Set(name.trim().to_string()),
        phone: Set(phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())),
        ..Default::default()
    };
    supplier.insert(db).await.map_err(Into::into)
}

/// Creates a new material with zero stock on hand.
///
/// # Errors
/// Returns [`Error::Config`] when the name or unit is empty, or the store
/// fault.
pub async fn create_material(
    db: &DatabaseConnection,
    name: String,
    unit: String,
    supplier_id: Option<i64>,
) -> Result<material::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Material name cannot be empty".to_string(),
        });
    }
    if unit.trim().is_empty() {
        return Err(Error::Config {
            message: "Material unit cannot be empty".to_string(),
        });
    }

    let material = material::ActiveModel {
        name: Set(name.trim().to_string()),
        quantity: Set(0.0),
        unit: Set(unit.trim().to_string()),
        supplier_id: Set(supplier_id),
        ..Default::default()
    };
    material.insert(db).await.map_err(Into::into)
}

/// Records a warehouse movement and adjusts the material's stock.
///
/// The quantity must be positive and finite and is rounded to 3 decimals.
/// An issue larger than the stock on hand is rejected before anything is
/// written. The movement insert and the stock adjustment run in one store
/// transaction; the recording user and a generated reference code are
/// stored on the movement. Returns the movement together with the updated
/// material.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`], [`Error::MaterialNotFound`],
/// [`Error::InsufficientStock`], or the store fault unchanged.
pub async fn record_movement(
    db: &DatabaseConnection,
    material_id: i64,
    kind: MovementKind,
    quantity: f64,
    occurred_at: Option<DateTimeUtc>,
    session: &SessionUser,
) -> Result<(movement::Model, material::Model)> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    let quantity = quantity::round_stock(quantity);

    let txn = db.begin().await?;

    let material = Material::find_by_id(material_id)
        .one(&txn)
        .await?
        .ok_or(Error::MaterialNotFound { id: material_id })?;

    let delta = match kind {
        MovementKind::Intake => quantity,
        MovementKind::Issue => {
            if material.quantity < quantity {
                return Err(Error::InsufficientStock {
                    current: material.quantity,
                    required: quantity,
                });
            }
            -quantity
        }
    };

    let movement = movement::ActiveModel {
        material_id: Set(material_id),
        occurred_at: Set(occurred_at.unwrap_or_else(Utc::now)),
        kind: Set(kind),
        quantity: Set(quantity),
        reference: Set(make_reference(reference_prefix(kind))),
        reason: Set(movement_reason(kind).to_string()),
        user_id: Set(session.id),
        ..Default::default()
    };
    let movement = movement.insert(&txn).await?;

    let material = update_material_stock_atomic(&txn, material_id, delta).await?;

    txn.commit().await?;
    Ok((movement, material))
}

/// Adjusts a material's stock by atomically adding a delta.
///
/// Uses a single SQL UPDATE (`quantity = quantity + delta`) rather than a
/// read-modify-write, so concurrent adjustments cannot lose updates.
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `material_id` - ID of the material to adjust
/// * `quantity_delta` - Amount to add to the stock (negative to subtract)
pub async fn update_material_stock_atomic<C>(
    db: &C,
    material_id: i64,
    quantity_delta: f64,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    // First verify the material exists
    let _material = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::MaterialNotFound { id: material_id })?;

    Material::update_many()
        .col_expr(
            material::Column::Quantity,
            Expr::col(material::Column::Quantity).add(quantity_delta),
        )
        .filter(material::Column::Id.eq(material_id))
        .exec(db)
        .await?;

    Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::MaterialNotFound { id: material_id })
}

/// Retrieves the movement history for a material, newest first.
pub async fn list_movements_for_material(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Vec<movement::Model>> {
    Movement::find()
        .filter(movement::Column::MaterialId.eq(material_id))
        .order_by_desc(movement::Column::OccurredAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{
        create_test_material, create_test_supplier, setup_test_db, test_session,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_make_reference_shape() {
        let reference = make_reference("IN");
        assert!(reference.starts_with("IN-"));
        assert_eq!(reference.len(), 3 + REFERENCE_LEN);
        assert!(
            reference[3..]
                .bytes()
                .all(|b| REFERENCE_CHARSET.contains(&b))
        );
    }

    #[tokio::test]
    async fn test_record_movement_rejects_bad_quantities() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let session = test_session();

        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let result =
                record_movement(&db, 1, MovementKind::Intake, bad, None, &session).await;
            assert!(matches!(
                result.unwrap_err(),
                Error::InvalidQuantity { quantity: _ }
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_record_movement_material_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            record_movement(&db, 42, MovementKind::Intake, 5.0, None, &test_session()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MaterialNotFound { id: 42 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_intake_increases_stock() -> Result<()> {
        let db = setup_test_db().await?;
        let material = create_test_material(&db, "Harina dura").await?;

        let (movement, updated) = record_movement(
            &db,
            material.id,
            MovementKind::Intake,
            12.5,
            None,
            &test_session(),
        )
        .await?;

        assert_eq!(movement.kind, MovementKind::Intake);
        assert_eq!(movement.quantity, 12.5);
        assert_eq!(movement.reason, "Warehouse intake");
        assert!(movement.reference.starts_with("IN-"));
        assert_eq!(updated.quantity, 12.5);

        Ok(())
    }

    #[tokio::test]
    async fn test_issue_decreases_stock() -> Result<()> {
        let db = setup_test_db().await?;
        let material = create_test_material(&db, "Harina dura").await?;
        let session = test_session();

        record_movement(&db, material.id, MovementKind::Intake, 10.0, None, &session).await?;
        let (movement, updated) =
            record_movement(&db, material.id, MovementKind::Issue, 4.0, None, &session).await?;

        assert_eq!(movement.kind, MovementKind::Issue);
        assert!(movement.reference.starts_with("OUT-"));
        assert_eq!(updated.quantity, 6.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_issue_beyond_stock_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let material = create_test_material(&db, "Levadura").await?;
        let session = test_session();

        record_movement(&db, material.id, MovementKind::Intake, 3.0, None, &session).await?;
        let result =
            record_movement(&db, material.id, MovementKind::Issue, 5.0, None, &session).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientStock {
                current: 3.0,
                required: 5.0
            }
        ));

        // Nothing was written: stock unchanged, no movement row
        let rows = list_materials(&db).await?;
        assert_eq!(rows[0].0.quantity, 3.0);
        assert_eq!(list_movements_for_material(&db, material.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_movement_quantity_rounded_to_3_decimals() -> Result<()> {
        let db = setup_test_db().await?;
        let material = create_test_material(&db, "Azúcar").await?;

        let (movement, updated) = record_movement(
            &db,
            material.id,
            MovementKind::Intake,
            1.23456,
            None,
            &test_session(),
        )
        .await?;

        assert_eq!(movement.quantity, 1.235);
        assert_eq!(updated.quantity, 1.235);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_material_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_material(&db, String::new(), "qq".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_material(&db, "Harina".to_string(), "  ".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_supplier_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_supplier(&db, "   ".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_materials_with_suppliers() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Molinos del Sur").await?;
        create_material(&db, "Harina suave".to_string(), "qq".to_string(), Some(supplier.id))
            .await?;
        create_test_material(&db, "Azúcar").await?;

        let rows = list_materials(&db).await?;
        assert_eq!(rows.len(), 2);
        // Ordered by name: Azúcar first, no supplier
        assert_eq!(rows[0].0.name, "Azúcar");
        assert!(rows[0].1.is_none());
        assert_eq!(rows[1].0.name, "Harina suave");
        assert_eq!(rows[1].1.as_ref().unwrap().name, "Molinos del Sur");

        Ok(())
    }

    #[tokio::test]
    async fn test_filter_and_sort_materials() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Molinos del Sur").await?;
        let flour =
            create_material(&db, "Harina".to_string(), "qq".to_string(), Some(supplier.id))
                .await?;
        let sugar = create_test_material(&db, "Azúcar").await?;
        let session = test_session();

        record_movement(&db, flour.id, MovementKind::Intake, 2.0, None, &session).await?;
        record_movement(&db, sugar.id, MovementKind::Intake, 9.0, None, &session).await?;

        let rows = list_materials(&db).await?;

        // Matches on material name
        let hits = filter_materials(&rows, "harina");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.name, "Harina");

        // Matches on supplier name too
        let hits = filter_materials(&rows, "molinos");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.name, "Harina");

        // Blank query keeps everything
        assert_eq!(filter_materials(&rows, "  ").len(), 2);

        let mut sorted = rows.clone();
        sort_by_quantity(&mut sorted, false);
        assert_eq!(sorted[0].0.name, "Azúcar");
        sort_by_quantity(&mut sorted, true);
        assert_eq!(sorted[0].0.name, "Harina");

        Ok(())
    }
}
