//! Production batch business logic - assignment, reconciliation, queries.
//!
//! A batch moves through exactly two states: it is created in `draft` by
//! [`assign_batch`] with only an estimated quantity, and it is moved once,
//! irreversibly, to `submitted` by [`reconcile_batch`], which fixes the
//! actual quantities and the derived discrepancy. There is no way back:
//! submitted batches are read-only history. The reconcile update is
//! conditioned on the row still being a draft, so a racing double-submit
//! loses cleanly instead of double-applying.

use crate::{
    core::quantity,
    entities::{Batch, BatchStatus, Product, batch},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

use super::auth::SessionUser;

/// The three reconciliation quantities, each optional: an absent field is
/// stored as unset but counts as zero in the discrepancy computation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReconcileQuantities {
    /// Actual quantity produced
    pub produced: Option<f64>,
    /// Quantity packaged for sale
    pub packaged: Option<f64>,
    /// Quantity spoiled during production
    pub spoiled: Option<f64>,
}

impl ReconcileQuantities {
    /// Builds the quantities from raw form fields; empty fields are absent.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNumber`] for any field that is non-empty but
    /// does not parse as a finite number.
    pub fn parse(produced: &str, packaged: &str, spoiled: &str) -> Result<Self> {
        Ok(Self {
            produced: quantity::parse_optional_quantity(produced)?,
            packaged: quantity::parse_optional_quantity(packaged)?,
            spoiled: quantity::parse_optional_quantity(spoiled)?,
        })
    }

    /// The discrepancy these quantities would persist. Same code path as
    /// the final computation, so a live preview can never drift from the
    /// stored value.
    #[must_use]
    pub fn discrepancy(&self) -> f64 {
        discrepancy(self.produced, self.packaged, self.spoiled)
    }

    fn validate(&self) -> Result<()> {
        for value in [self.produced, self.packaged, self.spoiled]
            .into_iter()
            .flatten()
        {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidQuantity { quantity: value });
            }
        }
        Ok(())
    }
}

/// Computes `produced - (packaged + spoiled)`, treating omitted operands as
/// zero. This is the only place the formula exists; both the pre-submit
/// preview and the persisted record go through it.
#[must_use]
pub fn discrepancy(produced: Option<f64>, packaged: Option<f64>, spoiled: Option<f64>) -> f64 {
    produced.unwrap_or(0.0) - (packaged.unwrap_or(0.0) + spoiled.unwrap_or(0.0))
}

/// Creates a new production batch in `draft` state.
///
/// The product must exist and the estimated quantity must be a positive,
/// finite number; both checks run before anything is written. The assigning
/// user comes from the explicit session, and `assigned_on` defaults to
/// today when omitted. `level` is a free classification tier and is stored
/// as given.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for a non-positive or non-finite
/// estimate, [`Error::ProductNotFound`] for an unknown product, or the
/// store fault unchanged; in every failure case no batch is created.
pub async fn assign_batch(
    db: &DatabaseConnection,
    product_id: i64,
    estimated_qty: f64,
    assigned_on: Option<NaiveDate>,
    level: Option<i16>,
    session: &SessionUser,
) -> Result<batch::Model> {
    if !estimated_qty.is_finite() || estimated_qty <= 0.0 {
        return Err(Error::InvalidQuantity {
            quantity: estimated_qty,
        });
    }

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let batch = batch::ActiveModel {
        product_id: Set(product_id),
        estimated_qty: Set(estimated_qty),
        assigned_by: Set(session.id),
        level: Set(level),
        status: Set(BatchStatus::Draft),
        assigned_on: Set(assigned_on.unwrap_or_else(|| Utc::now().date_naive())),
        ..Default::default()
    };

    let result = batch.insert(db).await?;
    Ok(result)
}

/// Reconciles a draft batch and submits it.
///
/// Persists the given actuals (absent fields stay unset), recomputes the
/// discrepancy from them, stamps the submission time, and flips the status
/// to `submitted` in one conditional update: the row is matched on its id
/// AND on `status = draft`, all inside a store transaction. Either the
/// whole record transitions or none of it does, and a batch that already
/// left the draft state is rejected rather than silently rewritten.
/// The estimated quantity is never touched.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for a negative or non-finite actual,
/// [`Error::BatchNotFound`] for an unknown id,
/// [`Error::BatchAlreadySubmitted`] when the batch is no longer a draft,
/// or the store fault unchanged.
pub async fn reconcile_batch(
    db: &DatabaseConnection,
    batch_id: i64,
    quantities: ReconcileQuantities,
    notes: Option<String>,
) -> Result<batch::Model> {
    quantities.validate()?;
    let discrepancy = quantities.discrepancy();

    let notes = notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string);

    let txn = db.begin().await?;

    let existing = Batch::find_by_id(batch_id)
        .one(&txn)
        .await?
        .ok_or(Error::BatchNotFound { id: batch_id })?;
    if existing.status == BatchStatus::Submitted {
        return Err(Error::BatchAlreadySubmitted { id: batch_id });
    }

    let update = batch::ActiveModel {
        produced_qty: Set(quantities.produced),
        packaged_qty: Set(quantities.packaged),
        spoiled_qty: Set(quantities.spoiled),
        discrepancy: Set(Some(discrepancy)),
        notes: Set(notes),
        status: Set(BatchStatus::Submitted),
        submitted_at: Set(Some(Utc::now())),
        ..Default::default()
    };

    // Optimistic-concurrency check: only a row still in draft is updated.
    let outcome = Batch::update_many()
        .set(update)
        .filter(batch::Column::Id.eq(batch_id))
        .filter(batch::Column::Status.eq(BatchStatus::Draft))
        .exec(&txn)
        .await?;
    if outcome.rows_affected == 0 {
        return Err(Error::BatchAlreadySubmitted { id: batch_id });
    }

    let submitted = Batch::find_by_id(batch_id)
        .one(&txn)
        .await?
        .ok_or(Error::BatchNotFound { id: batch_id })?;

    txn.commit().await?;
    Ok(submitted)
}

/// Retrieves all draft batches, newest assignment first.
pub async fn list_active_batches(db: &DatabaseConnection) -> Result<Vec<batch::Model>> {
    Batch::find()
        .filter(batch::Column::Status.eq(BatchStatus::Draft))
        .order_by_desc(batch::Column::AssignedOn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all submitted batches, newest assignment first.
pub async fn list_submitted_batches(db: &DatabaseConnection) -> Result<Vec<batch::Model>> {
    Batch::find()
        .filter(batch::Column::Status.eq(BatchStatus::Submitted))
        .order_by_desc(batch::Column::AssignedOn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a batch by its unique ID.
pub async fn get_batch_by_id(
    db: &DatabaseConnection,
    batch_id: i64,
) -> Result<Option<batch::Model>> {
    Batch::find_by_id(batch_id).one(db).await.map_err(Into::into)
}
