// src/services/notificacao_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::NotificacoesRepository, models::notificacoes::Notificacao};

#[derive(Clone)]
pub struct NotificacaoService {
    repo: NotificacoesRepository,
    pool: PgPool,
}

impl NotificacaoService {
    pub fn new(repo: NotificacoesRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn listar_minhas(&self, user_id: Uuid) -> Result<Vec<Notificacao>, AppError> {
        self.repo.list_por_usuario(&self.pool, user_id).await
    }

    pub async fn marcar_lida(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let atualizadas = self.repo.marcar_lida(&self.pool, id, user_id).await?;
        if atualizadas == 0 {
            return Err(AppError::ResourceNotFound("Notificação".to_string()));
        }
        Ok(())
    }
}
