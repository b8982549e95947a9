// src/db/vistorias_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::vistorias::{StatusVistoria, Vistoria},
};

#[derive(Clone)]
pub struct VistoriasRepository {
    pool: PgPool,
}

impl VistoriasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_vistoria<'e, E>(
        &self,
        executor: E,
        equipamento_tag: &str,
        data_vistoria: NaiveDate,
        status: StatusVistoria,
        observacoes: Option<&str>,
        criado_por: Uuid,
    ) -> Result<Vistoria, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vistoria = sqlx::query_as::<_, Vistoria>(
            r#"
            INSERT INTO vistorias (equipamento_tag, data_vistoria, status, observacoes, criado_por)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(equipamento_tag)
        .bind(data_vistoria)
        .bind(status)
        .bind(observacoes)
        .bind(criado_por)
        .fetch_one(executor)
        .await?;

        Ok(vistoria)
    }

    // Lista geral, com filtro opcional por situação
    pub async fn list_vistorias<'e, E>(
        &self,
        executor: E,
        status: Option<StatusVistoria>,
    ) -> Result<Vec<Vistoria>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vistorias = match status {
            Some(s) => {
                sqlx::query_as::<_, Vistoria>(
                    "SELECT * FROM vistorias WHERE status = $1 ORDER BY data_vistoria DESC",
                )
                .bind(s)
                .fetch_all(executor)
                .await?
            }
            None => {
                sqlx::query_as::<_, Vistoria>("SELECT * FROM vistorias ORDER BY data_vistoria DESC")
                    .fetch_all(executor)
                    .await?
            }
        };

        Ok(vistorias)
    }
}
