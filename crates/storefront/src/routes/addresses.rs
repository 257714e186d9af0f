//! Address book route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use eezy_store_core::AddressId;

use crate::db::{AddressRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Address, NewAddress};
use crate::state::AppState;

/// List the customer's addresses, default first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool()).list(customer.id).await?;
    Ok(Json(addresses))
}

/// Create a new address.
///
/// The customer's first address becomes the default regardless of the
/// requested flag; a new default clears the previous one atomically.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(input): Json<NewAddress>,
) -> Result<(StatusCode, Json<Address>)> {
    let address = AddressRepository::new(state.pool())
        .create(customer.id, &input)
        .await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// Re-mark an address as the customer's default.
#[instrument(skip(state))]
pub async fn select(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<AddressId>,
) -> Result<Json<Address>> {
    let address = AddressRepository::new(state.pool())
        .select(customer.id, id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::AddressNotFound,
            other => AppError::Database(other),
        })?;
    Ok(Json(address))
}
