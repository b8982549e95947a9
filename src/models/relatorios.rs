// src/models/relatorios.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::rateios::CentroCusto;

// Chave de agrupamento escolhida na tela de relatório
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ChaveAgrupamento {
    Operador,
    Equipamento,
    CentroCusto,
    NavioCarga,
}

// Linha "achatada" de horas de equipamento, já com navio/carga resolvidos
// via viagem. É sobre essa lista que o relatório agrupa e soma.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistroHoras {
    #[schema(value_type = String, format = Date, example = "2026-08-06")]
    pub data: NaiveDate,

    #[schema(example = "José Mendes")]
    pub operador: String,

    #[schema(example = "RTG-07")]
    pub equipamento_tag: String,

    pub centro_custo: CentroCusto,

    #[schema(example = "MV Atlantic Harmony")]
    pub navio: Option<String>,
    #[schema(example = "Farelo de soja")]
    pub carga: Option<String>,

    #[schema(example = "5.50")]
    pub horas: Decimal,
}

// Um grupo do relatório: subtotal e participação no total geral
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoHoras {
    #[schema(example = "José Mendes")]
    pub chave: String,

    #[schema(example = "42.50")]
    pub total: Decimal,

    #[schema(example = "35.42")]
    pub percentual: Decimal,
}
