// src/models/operacoes.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::rateios::CentroCusto;

// --- Enums ---

// Turnos da operação portuária (6 em 6 horas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "turno_operacao", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Turno {
    A, // 01h-07h
    B, // 07h-13h
    C, // 13h-19h
    D, // 19h-01h
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Operacao {
    pub id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-08-06")]
    pub data: NaiveDate,

    pub turno: Turno,
    pub viagem_id: Option<Uuid>,

    #[schema(example = "Chuva entre 14h e 15h, operação parada")]
    pub observacoes: Option<String>,

    pub criado_por: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipamentoLancado {
    pub id: Uuid,
    pub operacao_id: Uuid,

    #[schema(example = "RTG-07")]
    pub equipamento_tag: String,

    #[schema(example = "José Mendes")]
    pub operador: String,

    pub centro_custo: CentroCusto,

    #[schema(example = "5.50")]
    pub horas: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ajudante {
    pub id: Uuid,
    pub operacao_id: Uuid,

    #[schema(example = "Paulo Souza")]
    pub nome: String,

    #[schema(example = "Sinaleiro")]
    pub funcao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Falta {
    pub id: Uuid,
    pub operacao_id: Uuid,

    #[schema(example = "Marcos Lima")]
    pub nome: String,

    #[schema(example = "Atestado médico")]
    pub motivo: Option<String>,
}

// Visão completa de uma operação: cabeçalho + listas filhas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperacaoDetalhe {
    #[serde(flatten)]
    pub operacao: Operacao,
    pub equipamentos: Vec<EquipamentoLancado>,
    pub ajudantes: Vec<Ajudante>,
    pub faltas: Vec<Falta>,
}
