// src/handlers/navios.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::navios::{Navio, Viagem},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNavioPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "MV Atlantic Harmony")]
    pub nome: String,

    #[schema(example = "9376283")]
    pub imo: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateViagemPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Farelo de soja")]
    pub carga: String,

    #[schema(value_type = Option<String>, format = Date, example = "2026-08-01")]
    pub atracacao: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2026-08-09")]
    pub desatracacao: Option<NaiveDate>,
}

// POST /api/navios
#[utoipa::path(
    post,
    path = "/api/navios",
    tag = "Navios",
    request_body = CreateNavioPayload,
    responses(
        (status = 201, description = "Navio cadastrado", body = Navio),
        (status = 409, description = "Número IMO já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_navio(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateNavioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let navio = app_state
        .navio_service
        .criar_navio(&payload.nome, payload.imo.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(navio)))
}

// GET /api/navios
#[utoipa::path(
    get,
    path = "/api/navios",
    tag = "Navios",
    responses(
        (status = 200, description = "Navios em ordem alfabética", body = Vec<Navio>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_navios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let navios = app_state.navio_service.listar_navios().await?;

    Ok((StatusCode::OK, Json(navios)))
}

// POST /api/navios/{id}/viagens
#[utoipa::path(
    post,
    path = "/api/navios/{id}/viagens",
    tag = "Navios",
    request_body = CreateViagemPayload,
    responses(
        (status = 201, description = "Viagem cadastrada", body = Viagem),
        (status = 404, description = "Navio não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Navio")),
    security(("api_jwt" = []))
)]
pub async fn criar_viagem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateViagemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let viagem = app_state
        .navio_service
        .criar_viagem(id, &payload.carga, payload.atracacao, payload.desatracacao)
        .await?;

    Ok((StatusCode::CREATED, Json(viagem)))
}

// GET /api/navios/{id}/viagens
#[utoipa::path(
    get,
    path = "/api/navios/{id}/viagens",
    tag = "Navios",
    responses(
        (status = 200, description = "Viagens do navio, mais recentes primeiro", body = Vec<Viagem>),
        (status = 404, description = "Navio não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Navio")),
    security(("api_jwt" = []))
)]
pub async fn listar_viagens(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let viagens = app_state.navio_service.listar_viagens(id).await?;

    Ok((StatusCode::OK, Json(viagens)))
}
