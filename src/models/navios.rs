// src/models/navios.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Navio {
    pub id: Uuid,

    #[schema(example = "MV Atlantic Harmony")]
    pub nome: String,

    // Número IMO (sete dígitos), quando informado
    #[schema(example = "9376283")]
    pub imo: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Viagem {
    pub id: Uuid,
    pub navio_id: Uuid,

    #[schema(example = "Farelo de soja")]
    pub carga: String,

    #[schema(value_type = Option<String>, format = Date, example = "2026-08-01")]
    pub atracacao: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2026-08-09")]
    pub desatracacao: Option<NaiveDate>,

    pub created_at: Option<DateTime<Utc>>,
}
