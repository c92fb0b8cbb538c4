//! Service (offering) management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::service::{CreateService, Service, UpdateService},
};

/// List a provider's services
#[utoipa::path(
    get,
    path = "/providers/{id}/services",
    tag = "services",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Provider's services", body = Vec<Service>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_services(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<Vec<Service>>> {
    let services = state.services.directory.list_services(provider_id).await?;
    Ok(Json(services))
}

/// Create a service
#[utoipa::path(
    post,
    path = "/providers/{id}/services",
    tag = "services",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    request_body = CreateService,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 400, description = "Invalid price or duration"),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn create_service(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
    Json(request): Json<CreateService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    let service = state
        .services
        .directory
        .create_service(provider_id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// Update a service
#[utoipa::path(
    put,
    path = "/providers/{id}/services/{service_id}",
    tag = "services",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("service_id" = i32, Path, description = "Service ID")
    ),
    request_body = UpdateService,
    responses(
        (status = 200, description = "Service updated", body = Service),
        (status = 404, description = "Provider or service not found")
    )
)]
pub async fn update_service(
    State(state): State<crate::AppState>,
    Path((provider_id, service_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateService>,
) -> AppResult<Json<Service>> {
    let service = state
        .services
        .directory
        .update_service(provider_id, service_id, &request)
        .await?;
    Ok(Json(service))
}

/// Delete a service
#[utoipa::path(
    delete,
    path = "/providers/{id}/services/{service_id}",
    tag = "services",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("service_id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Provider or service not found")
    )
)]
pub async fn delete_service(
    State(state): State<crate::AppState>,
    Path((provider_id, service_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .services
        .directory
        .delete_service(provider_id, service_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
