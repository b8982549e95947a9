// src/db/rateios_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rateios::{BoletimMedicao, CentroCusto, Fornecedor, PeriodoReferencia, Rateio},
};

#[derive(Clone)]
pub struct RateiosRepository {
    pool: PgPool,
}

impl RateiosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn create_fornecedor<'e, E>(
        &self,
        executor: E,
        nome: &str,
    ) -> Result<Fornecedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Fornecedor>(
            "INSERT INTO fornecedores (nome) VALUES ($1) RETURNING *",
        )
        .bind(nome)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Duplicado("Já existe um fornecedor com esse nome".to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn get_all_fornecedores<'e, E>(&self, executor: E) -> Result<Vec<Fornecedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fornecedores =
            sqlx::query_as::<_, Fornecedor>("SELECT * FROM fornecedores ORDER BY nome ASC")
                .fetch_all(executor)
                .await?;

        Ok(fornecedores)
    }

    // A exclusão não é cascateada: com BMs vinculados o banco rejeita (FK)
    pub async fn delete_fornecedor<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM fornecedores WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::PossuiVinculos("Fornecedor".to_string());
                    }
                }
                AppError::DatabaseError(e)
            })?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  BOLETINS DE MEDIÇÃO (BMs)
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_boletim<'e, E>(
        &self,
        executor: E,
        fornecedor_id: Uuid,
        numero: &str,
        valor_total: Decimal,
        periodo_inicio: NaiveDate,
        periodo_fim: NaiveDate,
        periodo_referencia: PeriodoReferencia,
    ) -> Result<BoletimMedicao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, BoletimMedicao>(
            r#"
            INSERT INTO boletins_medicao
                (fornecedor_id, numero, valor_total, periodo_inicio, periodo_fim, periodo_referencia)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(fornecedor_id)
        .bind(numero)
        .bind(valor_total)
        .bind(periodo_inicio)
        .bind(periodo_fim)
        .bind(periodo_referencia)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Duplicado("Já existe um BM com esse número".to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::ResourceNotFound("Fornecedor".to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn get_all_boletins<'e, E>(&self, executor: E) -> Result<Vec<BoletimMedicao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let boletins = sqlx::query_as::<_, BoletimMedicao>(
            "SELECT * FROM boletins_medicao ORDER BY created_at DESC",
        )
        .fetch_all(executor)
        .await?;

        Ok(boletins)
    }

    pub async fn get_boletim<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<BoletimMedicao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let boletim =
            sqlx::query_as::<_, BoletimMedicao>("SELECT * FROM boletins_medicao WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(boletim)
    }

    // Tranca a linha do BM até o fim da transação. É o que garante que duas
    // sessões não rateiem o mesmo saldo ao mesmo tempo.
    pub async fn get_boletim_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<BoletimMedicao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let boletim = sqlx::query_as::<_, BoletimMedicao>(
            "SELECT * FROM boletins_medicao WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(boletim)
    }

    pub async fn get_fornecedor_nome<'e, E>(
        &self,
        executor: E,
        fornecedor_id: Uuid,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let nome = sqlx::query_scalar::<_, String>("SELECT nome FROM fornecedores WHERE id = $1")
            .bind(fornecedor_id)
            .fetch_optional(executor)
            .await?;

        Ok(nome)
    }

    pub async fn update_total<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        novo_total: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE boletins_medicao SET valor_total = $1, updated_at = now() WHERE id = $2")
            .bind(novo_total)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete_boletim<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM boletins_medicao WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  RATEIOS
    // =========================================================================

    pub async fn list_rateios<'e, E>(
        &self,
        executor: E,
        boletim_id: Uuid,
    ) -> Result<Vec<Rateio>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rateios = sqlx::query_as::<_, Rateio>(
            "SELECT * FROM rateios WHERE boletim_id = $1 ORDER BY created_at ASC",
        )
        .bind(boletim_id)
        .fetch_all(executor)
        .await?;

        Ok(rateios)
    }

    // Busca os rateios de vários BMs de uma vez (listagem com filhos embutidos)
    pub async fn list_rateios_de_boletins<'e, E>(
        &self,
        executor: E,
        boletim_ids: &[Uuid],
    ) -> Result<Vec<Rateio>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rateios = sqlx::query_as::<_, Rateio>(
            "SELECT * FROM rateios WHERE boletim_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(boletim_ids)
        .fetch_all(executor)
        .await?;

        Ok(rateios)
    }

    pub async fn insert_rateio<'e, E>(
        &self,
        executor: E,
        boletim_id: Uuid,
        centro_custo: CentroCusto,
        valor: Decimal,
        percentual: Decimal,
    ) -> Result<Rateio, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rateio = sqlx::query_as::<_, Rateio>(
            r#"
            INSERT INTO rateios (boletim_id, centro_custo, valor, percentual)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(boletim_id)
        .bind(centro_custo)
        .bind(valor)
        .bind(percentual)
        .fetch_one(executor)
        .await?;

        Ok(rateio)
    }

    pub async fn update_percentual<'e, E>(
        &self,
        executor: E,
        rateio_id: Uuid,
        percentual: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE rateios SET percentual = $1 WHERE id = $2")
            .bind(percentual)
            .bind(rateio_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete_rateio<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM rateios WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_rateios_do_boletim<'e, E>(
        &self,
        executor: E,
        boletim_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM rateios WHERE boletim_id = $1")
            .bind(boletim_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
