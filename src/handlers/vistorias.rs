// src/handlers/vistorias.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::vistorias::{StatusVistoria, Vistoria},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVistoriaPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "RTG-07")]
    pub equipamento_tag: String,

    #[schema(value_type = String, format = Date, example = "2026-08-05")]
    pub data_vistoria: NaiveDate,

    pub status: StatusVistoria,

    #[schema(example = "Desgaste no cabo do spreader")]
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VistoriaQuery {
    pub status: Option<StatusVistoria>,
}

// POST /api/vistorias
#[utoipa::path(
    post,
    path = "/api/vistorias",
    tag = "Vistorias",
    request_body = CreateVistoriaPayload,
    responses(
        (status = 201, description = "Vistoria registrada (não conforme notifica o autor)", body = Vistoria)
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_vistoria(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateVistoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let vistoria = app_state
        .vistoria_service
        .criar_vistoria(
            user.0.id,
            &payload.equipamento_tag,
            payload.data_vistoria,
            payload.status,
            payload.observacoes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(vistoria)))
}

// GET /api/vistorias?status=NaoConforme
#[utoipa::path(
    get,
    path = "/api/vistorias",
    tag = "Vistorias",
    responses(
        (status = 200, description = "Vistorias, mais recentes primeiro", body = Vec<Vistoria>)
    ),
    params(("status" = Option<String>, Query, description = "Filtro opcional por situação")),
    security(("api_jwt" = []))
)]
pub async fn listar_vistorias(
    State(app_state): State<AppState>,
    Query(query): Query<VistoriaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let vistorias = app_state.vistoria_service.listar(query.status).await?;

    Ok((StatusCode::OK, Json(vistorias)))
}
