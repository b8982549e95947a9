// src/handlers/fornecedores.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::rateios::Fornecedor};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFornecedorPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Transportes Litoral Ltda")]
    pub nome: String,
}

// POST /api/fornecedores
#[utoipa::path(
    post,
    path = "/api/fornecedores",
    tag = "Rateios",
    request_body = CreateFornecedorPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Fornecedor),
        (status = 409, description = "Nome já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_fornecedor(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateFornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let fornecedor = app_state.rateio_service.criar_fornecedor(&payload.nome).await?;

    Ok((StatusCode::CREATED, Json(fornecedor)))
}

// GET /api/fornecedores
#[utoipa::path(
    get,
    path = "/api/fornecedores",
    tag = "Rateios",
    responses(
        (status = 200, description = "Fornecedores em ordem alfabética", body = Vec<Fornecedor>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_fornecedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedores = app_state.rateio_service.listar_fornecedores().await?;

    Ok((StatusCode::OK, Json(fornecedores)))
}

// DELETE /api/fornecedores/{id}
#[utoipa::path(
    delete,
    path = "/api/fornecedores/{id}",
    tag = "Rateios",
    responses(
        (status = 204, description = "Fornecedor excluído"),
        (status = 404, description = "Fornecedor não encontrado"),
        (status = 409, description = "Fornecedor possui BMs vinculados")
    ),
    params(("id" = Uuid, Path, description = "ID do Fornecedor")),
    security(("api_jwt" = []))
)]
pub async fn excluir_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.rateio_service.excluir_fornecedor(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
