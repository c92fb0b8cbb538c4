//! Agenda management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::agenda::{Agenda, CreateAgenda, UpdateAgenda},
};

/// List a provider's agendas
#[utoipa::path(
    get,
    path = "/providers/{id}/agendas",
    tag = "agendas",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Provider's agendas", body = Vec<Agenda>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_agendas(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<Vec<Agenda>>> {
    let agendas = state.services.directory.list_agendas(provider_id).await?;
    Ok(Json(agendas))
}

/// Create an agenda
#[utoipa::path(
    post,
    path = "/providers/{id}/agendas",
    tag = "agendas",
    params(
        ("id" = i32, Path, description = "Provider ID")
    ),
    request_body = CreateAgenda,
    responses(
        (status = 201, description = "Agenda created", body = Agenda),
        (status = 400, description = "Invalid opening hours"),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn create_agenda(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
    Json(request): Json<CreateAgenda>,
) -> AppResult<(StatusCode, Json<Agenda>)> {
    let agenda = state.services.directory.create_agenda(provider_id, &request).await?;
    Ok((StatusCode::CREATED, Json(agenda)))
}

/// Update an agenda
#[utoipa::path(
    put,
    path = "/providers/{id}/agendas/{agenda_id}",
    tag = "agendas",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("agenda_id" = i32, Path, description = "Agenda ID")
    ),
    request_body = UpdateAgenda,
    responses(
        (status = 200, description = "Agenda updated", body = Agenda),
        (status = 404, description = "Provider or agenda not found")
    )
)]
pub async fn update_agenda(
    State(state): State<crate::AppState>,
    Path((provider_id, agenda_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateAgenda>,
) -> AppResult<Json<Agenda>> {
    let agenda = state
        .services
        .directory
        .update_agenda(provider_id, agenda_id, &request)
        .await?;
    Ok(Json(agenda))
}

/// Delete an agenda
#[utoipa::path(
    delete,
    path = "/providers/{id}/agendas/{agenda_id}",
    tag = "agendas",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("agenda_id" = i32, Path, description = "Agenda ID")
    ),
    responses(
        (status = 204, description = "Agenda deleted"),
        (status = 404, description = "Provider or agenda not found")
    )
)]
pub async fn delete_agenda(
    State(state): State<crate::AppState>,
    Path((provider_id, agenda_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .services
        .directory
        .delete_agenda(provider_id, agenda_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
