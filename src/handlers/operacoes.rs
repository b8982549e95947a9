// src/handlers/operacoes.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
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
    middleware::auth::AuthenticatedUser,
    models::{
        operacoes::{OperacaoDetalhe, Turno},
        rateios::CentroCusto,
    },
    services::operacao_service::{NovaFalta, NovoAjudante, NovoEquipamento},
};

// =============================================================================
//  PAYLOADS (o formulário inteiro chega de uma vez)
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipamentoPayload {
    #[schema(example = "RTG-07")]
    pub equipamento_tag: String,

    #[schema(example = "José Mendes")]
    pub operador: String,

    pub centro_custo: CentroCusto,

    #[schema(example = "5.50")]
    pub horas: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AjudantePayload {
    #[schema(example = "Paulo Souza")]
    pub nome: String,

    #[schema(example = "Sinaleiro")]
    pub funcao: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaltaPayload {
    #[schema(example = "Marcos Lima")]
    pub nome: String,

    #[schema(example = "Atestado médico")]
    pub motivo: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOperacaoPayload {
    #[schema(value_type = String, format = Date, example = "2026-08-06")]
    pub data: NaiveDate,

    pub turno: Turno,
    pub viagem_id: Option<Uuid>,

    #[schema(example = "Chuva entre 14h e 15h, operação parada")]
    pub observacoes: Option<String>,

    #[serde(default)]
    pub equipamentos: Vec<EquipamentoPayload>,
    #[serde(default)]
    pub ajudantes: Vec<AjudantePayload>,
    #[serde(default)]
    pub faltas: Vec<FaltaPayload>,
}

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    pub data: NaiveDate,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/operacoes
#[utoipa::path(
    post,
    path = "/api/operacoes",
    tag = "Operacoes",
    request_body = CreateOperacaoPayload,
    responses(
        (status = 201, description = "Operação apontada com todas as listas filhas", body = OperacaoDetalhe),
        (status = 404, description = "Viagem não encontrada"),
        (status = 422, description = "Horas zeradas ou negativas")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_operacao(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateOperacaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let equipamentos = payload
        .equipamentos
        .into_iter()
        .map(|e| NovoEquipamento {
            equipamento_tag: e.equipamento_tag,
            operador: e.operador,
            centro_custo: e.centro_custo,
            horas: e.horas,
        })
        .collect();

    let ajudantes = payload
        .ajudantes
        .into_iter()
        .map(|a| NovoAjudante { nome: a.nome, funcao: a.funcao })
        .collect();

    let faltas = payload
        .faltas
        .into_iter()
        .map(|f| NovaFalta { nome: f.nome, motivo: f.motivo })
        .collect();

    let detalhe = app_state
        .operacao_service
        .criar_operacao(
            user.0.id,
            payload.data,
            payload.turno,
            payload.viagem_id,
            payload.observacoes.as_deref(),
            equipamentos,
            ajudantes,
            faltas,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detalhe)))
}

// GET /api/operacoes?data=2026-08-06
#[utoipa::path(
    get,
    path = "/api/operacoes",
    tag = "Operacoes",
    responses(
        (status = 200, description = "Operações do dia, com listas filhas", body = Vec<OperacaoDetalhe>)
    ),
    params(("data" = String, Query, description = "Dia consultado (AAAA-MM-DD)")),
    security(("api_jwt" = []))
)]
pub async fn listar_operacoes(
    State(app_state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<impl IntoResponse, AppError> {
    let operacoes = app_state.operacao_service.listar_por_data(query.data).await?;

    Ok((StatusCode::OK, Json(operacoes)))
}

// GET /api/operacoes/{id}
#[utoipa::path(
    get,
    path = "/api/operacoes/{id}",
    tag = "Operacoes",
    responses(
        (status = 200, description = "Operação completa", body = OperacaoDetalhe),
        (status = 404, description = "Operação não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da Operação")),
    security(("api_jwt" = []))
)]
pub async fn detalhar_operacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.operacao_service.detalhar(id).await?;

    Ok((StatusCode::OK, Json(detalhe)))
}

// DELETE /api/operacoes/{id}
#[utoipa::path(
    delete,
    path = "/api/operacoes/{id}",
    tag = "Operacoes",
    responses(
        (status = 204, description = "Operação e listas filhas excluídas"),
        (status = 404, description = "Operação não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da Operação")),
    security(("api_jwt" = []))
)]
pub async fn excluir_operacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.operacao_service.excluir(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
