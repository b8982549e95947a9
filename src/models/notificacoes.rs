// src/models/notificacoes.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notificacao {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Vistoria não conforme")]
    pub titulo: String,

    #[schema(example = "Equipamento RTG-07 reprovado na vistoria de 05/08")]
    pub mensagem: String,

    pub lida: bool,
    pub created_at: Option<DateTime<Utc>>,
}
