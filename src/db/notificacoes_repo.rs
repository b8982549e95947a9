// src/db/notificacoes_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::notificacoes::Notificacao};

#[derive(Clone)]
pub struct NotificacoesRepository {
    pool: PgPool,
}

impl NotificacoesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        titulo: &str,
        mensagem: &str,
    ) -> Result<Notificacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notificacao = sqlx::query_as::<_, Notificacao>(
            r#"
            INSERT INTO notificacoes (user_id, titulo, mensagem)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(titulo)
        .bind(mensagem)
        .fetch_one(executor)
        .await?;

        Ok(notificacao)
    }

    // Não lidas primeiro, depois as mais recentes
    pub async fn list_por_usuario<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<Notificacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notificacoes = sqlx::query_as::<_, Notificacao>(
            "SELECT * FROM notificacoes WHERE user_id = $1 ORDER BY lida ASC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(notificacoes)
    }

    // Só o dono marca como lida; para os demais a notificação "não existe"
    pub async fn marcar_lida<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE notificacoes SET lida = TRUE WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
