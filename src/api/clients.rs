//! Client management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::client::{Client, ClientDetails, ClientQuery, CreateClient},
};

/// List or search a provider's clients
#[utoipa::path(
    get,
    path = "/providers/{id}/clients",
    tag = "clients",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ClientQuery
    ),
    responses(
        (status = 200, description = "Provider's clients", body = Vec<Client>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_clients(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
    Query(query): Query<ClientQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = state
        .services
        .directory
        .list_clients(provider_id, query.q.as_deref())
        .await?;
    Ok(Json(clients))
}

/// Pre-register a client
#[utoipa::path(
    post,
    path = "/providers/{id}/clients",
    tag = "clients",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 404, description = "Provider not found"),
        (status = 409, description = "DNI already registered for this provider")
    )
)]
pub async fn create_client(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
    Json(request): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = state
        .services
        .directory
        .create_client(provider_id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Get a client with booking history and total spend
#[utoipa::path(
    get,
    path = "/providers/{id}/clients/{client_id}",
    tag = "clients",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("client_id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client details", body = ClientDetails),
        (status = 404, description = "Provider or client not found")
    )
)]
pub async fn get_client(
    State(state): State<crate::AppState>,
    Path((provider_id, client_id)): Path<(i32, i32)>,
) -> AppResult<Json<ClientDetails>> {
    let details = state
        .services
        .directory
        .client_details(provider_id, client_id)
        .await?;
    Ok(Json(details))
}

/// Toggle a client's blocked flag
#[utoipa::path(
    post,
    path = "/providers/{id}/clients/{client_id}/toggle-block",
    tag = "clients",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("client_id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Provider or client not found")
    )
)]
pub async fn toggle_client_block(
    State(state): State<crate::AppState>,
    Path((provider_id, client_id)): Path<(i32, i32)>,
) -> AppResult<Json<Client>> {
    let client = state
        .services
        .directory
        .toggle_client_blocked(provider_id, client_id)
        .await?;
    Ok(Json(client))
}
