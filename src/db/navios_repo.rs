// src/db/navios_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::navios::{Navio, Viagem},
};

#[derive(Clone)]
pub struct NaviosRepository {
    pool: PgPool,
}

impl NaviosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_navio<'e, E>(
        &self,
        executor: E,
        nome: &str,
        imo: Option<&str>,
    ) -> Result<Navio, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Navio>("INSERT INTO navios (nome, imo) VALUES ($1, $2) RETURNING *")
            .bind(nome)
            .bind(imo)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::Duplicado(
                            "Já existe um navio com esse número IMO".to_string(),
                        );
                    }
                }
                AppError::DatabaseError(e)
            })
    }

    pub async fn get_all_navios<'e, E>(&self, executor: E) -> Result<Vec<Navio>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let navios = sqlx::query_as::<_, Navio>("SELECT * FROM navios ORDER BY nome ASC")
            .fetch_all(executor)
            .await?;

        Ok(navios)
    }

    pub async fn get_navio<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Navio>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let navio = sqlx::query_as::<_, Navio>("SELECT * FROM navios WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(navio)
    }

    pub async fn create_viagem<'e, E>(
        &self,
        executor: E,
        navio_id: Uuid,
        carga: &str,
        atracacao: Option<NaiveDate>,
        desatracacao: Option<NaiveDate>,
    ) -> Result<Viagem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let viagem = sqlx::query_as::<_, Viagem>(
            r#"
            INSERT INTO viagens (navio_id, carga, atracacao, desatracacao)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(navio_id)
        .bind(carga)
        .bind(atracacao)
        .bind(desatracacao)
        .fetch_one(executor)
        .await?;

        Ok(viagem)
    }

    pub async fn list_viagens<'e, E>(
        &self,
        executor: E,
        navio_id: Uuid,
    ) -> Result<Vec<Viagem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let viagens = sqlx::query_as::<_, Viagem>(
            "SELECT * FROM viagens WHERE navio_id = $1 ORDER BY atracacao DESC NULLS LAST",
        )
        .bind(navio_id)
        .fetch_all(executor)
        .await?;

        Ok(viagens)
    }
}
