//! Provider management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::provider::{CreateProvider, Provider, UpdateProvider},
};

/// List all providers
#[utoipa::path(
    get,
    path = "/providers",
    tag = "providers",
    responses(
        (status = 200, description = "All providers", body = Vec<Provider>)
    )
)]
pub async fn list_providers(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Provider>>> {
    let providers = state.services.directory.list_providers().await?;
    Ok(Json(providers))
}

/// Create a provider
#[utoipa::path(
    post,
    path = "/providers",
    tag = "providers",
    request_body = CreateProvider,
    responses(
        (status = 201, description = "Provider created", body = Provider),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Slug already taken")
    )
)]
pub async fn create_provider(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateProvider>,
) -> AppResult<(StatusCode, Json<Provider>)> {
    let provider = state.services.directory.create_provider(&request).await?;
    Ok((StatusCode::CREATED, Json(provider)))
}

/// Get a provider by ID
#[utoipa::path(
    get,
    path = "/providers/{id}",
    tag = "providers",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Provider", body = Provider),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn get_provider(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Provider>> {
    let provider = state.services.directory.get_provider(id).await?;
    Ok(Json(provider))
}

/// Update a provider
#[utoipa::path(
    put,
    path = "/providers/{id}",
    tag = "providers",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    request_body = UpdateProvider,
    responses(
        (status = 200, description = "Provider updated", body = Provider),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn update_provider(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateProvider>,
) -> AppResult<Json<Provider>> {
    let provider = state.services.directory.update_provider(id, &request).await?;
    Ok(Json(provider))
}
