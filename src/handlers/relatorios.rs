// src/handlers/relatorios.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    models::relatorios::{ChaveAgrupamento, GrupoHoras},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioParams {
    pub inicio: NaiveDate,
    pub fim: NaiveDate,
    pub agrupar_por: ChaveAgrupamento,
}

// GET /api/relatorios/horas-equipamentos?inicio=...&fim=...&agruparPor=operador
#[utoipa::path(
    get,
    path = "/api/relatorios/horas-equipamentos",
    tag = "Relatorios",
    responses(
        (status = 200, description = "Horas somadas por grupo, em ordem decrescente", body = Vec<GrupoHoras>)
    ),
    params(
        ("inicio" = String, Query, description = "Início do período (AAAA-MM-DD)"),
        ("fim" = String, Query, description = "Fim do período (AAAA-MM-DD)"),
        ("agruparPor" = String, Query, description = "operador | equipamento | centroCusto | navioCarga")
    ),
    security(("api_jwt" = []))
)]
pub async fn horas_equipamentos(
    State(app_state): State<AppState>,
    Query(params): Query<RelatorioParams>,
) -> Result<impl IntoResponse, AppError> {
    let grupos = app_state
        .relatorio_service
        .horas_equipamentos(params.inicio, params.fim, params.agrupar_por)
        .await?;

    Ok((StatusCode::OK, Json(grupos)))
}
