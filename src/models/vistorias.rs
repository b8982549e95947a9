// src/models/vistorias.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_vistoria", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusVistoria {
    Conforme,
    NaoConforme,
    Pendente,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vistoria {
    pub id: Uuid,

    #[schema(example = "RTG-07")]
    pub equipamento_tag: String,

    #[schema(value_type = String, format = Date, example = "2026-08-05")]
    pub data_vistoria: NaiveDate,

    pub status: StatusVistoria,

    #[schema(example = "Desgaste no cabo do spreader")]
    pub observacoes: Option<String>,

    pub criado_por: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}
