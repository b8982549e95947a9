// src/handlers/rateios.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::rateios::{BoletimDetalhe, BoletimMedicao, CentroCusto, PeriodoReferencia, Rateio},
    services::rateio_service::CandidatoRateio,
};

// =============================================================================
//  1. BOLETINS DE MEDIÇÃO
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoletimPayload {
    pub fornecedor_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "BM-2026-0042")]
    pub numero: String,

    #[schema(example = "15000.00")]
    pub valor_total: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-06-16")]
    pub periodo_inicio: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-07-15")]
    pub periodo_fim: NaiveDate,

    pub periodo_referencia: PeriodoReferencia,
}

// POST /api/rateios/boletins
#[utoipa::path(
    post,
    path = "/api/rateios/boletins",
    tag = "Rateios",
    request_body = CreateBoletimPayload,
    responses(
        (status = 201, description = "BM criado", body = BoletimMedicao),
        (status = 409, description = "Número de BM já cadastrado"),
        (status = 422, description = "Total negativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_boletim(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBoletimPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let boletim = app_state
        .rateio_service
        .criar_boletim(
            payload.fornecedor_id,
            &payload.numero,
            payload.valor_total,
            payload.periodo_inicio,
            payload.periodo_fim,
            payload.periodo_referencia,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(boletim)))
}

// GET /api/rateios/boletins
#[utoipa::path(
    get,
    path = "/api/rateios/boletins",
    tag = "Rateios",
    responses(
        (status = 200, description = "BMs com rateios, saldo e situação", body = Vec<BoletimDetalhe>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_boletins(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let boletins = app_state.rateio_service.listar_boletins().await?;

    Ok((StatusCode::OK, Json(boletins)))
}

// GET /api/rateios/boletins/{id}
#[utoipa::path(
    get,
    path = "/api/rateios/boletins/{id}",
    tag = "Rateios",
    responses(
        (status = 200, description = "BM com rateios, saldo e situação", body = BoletimDetalhe),
        (status = 404, description = "BM não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do BM")),
    security(("api_jwt" = []))
)]
pub async fn detalhar_boletim(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.rateio_service.detalhar_boletim(id).await?;

    Ok((StatusCode::OK, Json(detalhe)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditarTotalPayload {
    #[schema(example = "18000.00")]
    pub novo_total: Decimal,
}

// PATCH /api/rateios/boletins/{id}/total
#[utoipa::path(
    patch,
    path = "/api/rateios/boletins/{id}/total",
    tag = "Rateios",
    request_body = EditarTotalPayload,
    responses(
        (status = 200, description = "Total editado, percentuais recalculados", body = BoletimDetalhe),
        (status = 404, description = "BM não encontrado"),
        (status = 422, description = "Novo total menor que o valor já rateado")
    ),
    params(("id" = Uuid, Path, description = "ID do BM")),
    security(("api_jwt" = []))
)]
pub async fn editar_total(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditarTotalPayload>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state
        .rateio_service
        .editar_total(id, payload.novo_total)
        .await?;

    Ok((StatusCode::OK, Json(detalhe)))
}

// DELETE /api/rateios/boletins/{id}
#[utoipa::path(
    delete,
    path = "/api/rateios/boletins/{id}",
    tag = "Rateios",
    responses(
        (status = 204, description = "BM e rateios excluídos na mesma transação"),
        (status = 404, description = "BM não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do BM")),
    security(("api_jwt" = []))
)]
pub async fn excluir_boletim(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.rateio_service.excluir_boletim(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. RATEIOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddRateioPayload {
    pub centro_custo: CentroCusto,

    // O usuário preenche o valor OU o percentual; o outro é derivado
    #[schema(example = "3750.00")]
    pub valor: Option<Decimal>,
    #[schema(example = "25.00")]
    pub percentual: Option<Decimal>,
}

// POST /api/rateios/boletins/{id}/rateios
#[utoipa::path(
    post,
    path = "/api/rateios/boletins/{id}/rateios",
    tag = "Rateios",
    request_body = AddRateioPayload,
    responses(
        (status = 201, description = "Rateio lançado", body = Rateio),
        (status = 404, description = "BM não encontrado"),
        (status = 422, description = "Valor excede o saldo, é nulo ou não foi informado")
    ),
    params(("id" = Uuid, Path, description = "ID do BM")),
    security(("api_jwt" = []))
)]
pub async fn adicionar_rateio(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddRateioPayload>,
) -> Result<impl IntoResponse, AppError> {
    let candidato = CandidatoRateio {
        centro_custo: payload.centro_custo,
        valor: payload.valor,
        percentual: payload.percentual,
    };

    let rateio = app_state.rateio_service.adicionar_rateio(id, candidato).await?;

    Ok((StatusCode::CREATED, Json(rateio)))
}

// DELETE /api/rateios/rateios/{id}
#[utoipa::path(
    delete,
    path = "/api/rateios/rateios/{id}",
    tag = "Rateios",
    responses(
        (status = 204, description = "Rateio excluído"),
        (status = 404, description = "Rateio não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Rateio")),
    security(("api_jwt" = []))
)]
pub async fn excluir_rateio(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.rateio_service.excluir_rateio(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  3. EXPORTAÇÃO EM PDF
// =============================================================================

// GET /api/rateios/boletins/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/rateios/boletins/{id}/pdf",
    tag = "Rateios",
    responses(
        (status = 200, description = "Espelho de rateio em PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "BM não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do BM")),
    security(("api_jwt" = []))
)]
pub async fn exportar_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state.documento_service.gerar_rateio_pdf(id, locale).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"rateio-{}.pdf\"", id),
            ),
        ],
        pdf,
    ))
}
