//! Product catalog business logic.
//!
//! Products are reference data for every other area: batches produce them,
//! sales sell them, inventory sheets count them. The catalog itself is
//! small and mostly read; creation is used by seeding and administration.

use crate::{
    config::products::ProductConfig,
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all products, ordered alphabetically by name.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its exact name.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with its regional prices.
///
/// # Errors
/// Returns [`Error::Config`] for an empty name,
/// [`Error::InvalidQuantity`] for a negative or non-finite price, or the
/// store fault.
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    recipe: Option<String>,
    price_capital: f64,
    price_east: f64,
    price_west: f64,
) -> Result<product::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }
    for price in [price_capital, price_east, price_west] {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidQuantity { quantity: price });
        }
    }

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        recipe: Set(recipe
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())),
        price_capital: Set(price_capital),
        price_east: Set(price_east),
        price_west: Set(price_west),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Seeds the catalog from configuration, skipping names that already
/// exist. Returns how many products were created.
pub async fn seed_products(db: &DatabaseConnection, configs: &[ProductConfig]) -> Result<usize> {
    let mut created = 0;
    for config in configs {
        if get_product_by_name(db, &config.name).await?.is_some() {
            continue;
        }
        create_product(
            db,
            config.name.clone(),
            config.recipe.clone(),
            config.price_capital,
            config.price_east,
            config.price_west,
        )
        .await?;
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_product, setup_test_db};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_product(&db, String::new(), None, 1.0, 1.0, 1.0).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_product(&db, "Pan".to_string(), None, -1.0, 1.0, 1.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -1.0 }
        ));

        let result = create_product(&db, "Pan".to_string(), None, 1.0, f64::NAN, 1.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_product(&db, "Torta de banano").await?;
        create_test_product(&db, "Champurradas").await?;
        create_test_product(&db, "Pan Francés").await?;

        let products = list_products(&db).await?;
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "Champurradas");
        assert_eq!(products[1].name, "Pan Francés");
        assert_eq!(products[2].name, "Torta de banano");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_product(&db, "Pan Francés").await?;

        let found = get_product_by_name(&db, "Pan Francés").await?;
        assert_eq!(found.unwrap().id, created.id);
        assert!(get_product_by_name(&db, "Baguette").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_products_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let configs = vec![
            ProductConfig {
                name: "Pan Francés".to_string(),
                recipe: Some("harina dura, sal, levadura".to_string()),
                price_capital: 1.5,
                price_east: 1.25,
                price_west: 1.25,
            },
            ProductConfig {
                name: "Champurradas".to_string(),
                recipe: None,
                price_capital: 2.0,
                price_east: 1.75,
                price_west: 1.75,
            },
        ];

        assert_eq!(seed_products(&db, &configs).await?, 2);
        // Second run finds both by name and creates nothing
        assert_eq!(seed_products(&db, &configs).await?, 0);
        assert_eq!(list_products(&db).await?.len(), 2);

        let bread = get_product_by_name(&db, "Pan Francés").await?.unwrap();
        assert_eq!(bread.price_capital, 1.5);
        assert_eq!(bread.recipe.as_deref(), Some("harina dura, sal, levadura"));

        Ok(())
    }
}
