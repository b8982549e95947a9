// src/db/operacoes_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        operacoes::{Ajudante, EquipamentoLancado, Falta, Operacao, Turno},
        rateios::CentroCusto,
        relatorios::RegistroHoras,
    },
};

#[derive(Clone)]
pub struct OperacoesRepository {
    pool: PgPool,
}

impl OperacoesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  OPERAÇÃO (CABEÇALHO)
    // =========================================================================

    pub async fn create_operacao<'e, E>(
        &self,
        executor: E,
        data: NaiveDate,
        turno: Turno,
        viagem_id: Option<Uuid>,
        observacoes: Option<&str>,
        criado_por: Uuid,
    ) -> Result<Operacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Operacao>(
            r#"
            INSERT INTO operacoes (data, turno, viagem_id, observacoes, criado_por)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data)
        .bind(turno)
        .bind(viagem_id)
        .bind(observacoes)
        .bind(criado_por)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::ResourceNotFound("Viagem".to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn get_operacao<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Operacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let operacao = sqlx::query_as::<_, Operacao>("SELECT * FROM operacoes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(operacao)
    }

    pub async fn list_por_data<'e, E>(
        &self,
        executor: E,
        data: NaiveDate,
    ) -> Result<Vec<Operacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let operacoes = sqlx::query_as::<_, Operacao>(
            "SELECT * FROM operacoes WHERE data = $1 ORDER BY turno ASC, created_at ASC",
        )
        .bind(data)
        .fetch_all(executor)
        .await?;

        Ok(operacoes)
    }

    pub async fn delete_operacao<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM operacoes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  LISTAS FILHAS (EQUIPAMENTOS / AJUDANTES / FALTAS)
    // =========================================================================

    pub async fn add_equipamento<'e, E>(
        &self,
        executor: E,
        operacao_id: Uuid,
        equipamento_tag: &str,
        operador: &str,
        centro_custo: CentroCusto,
        horas: Decimal,
    ) -> Result<EquipamentoLancado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let equipamento = sqlx::query_as::<_, EquipamentoLancado>(
            r#"
            INSERT INTO operacao_equipamentos (operacao_id, equipamento_tag, operador, centro_custo, horas)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(operacao_id)
        .bind(equipamento_tag)
        .bind(operador)
        .bind(centro_custo)
        .bind(horas)
        .fetch_one(executor)
        .await?;

        Ok(equipamento)
    }

    pub async fn add_ajudante<'e, E>(
        &self,
        executor: E,
        operacao_id: Uuid,
        nome: &str,
        funcao: Option<&str>,
    ) -> Result<Ajudante, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ajudante = sqlx::query_as::<_, Ajudante>(
            r#"
            INSERT INTO operacao_ajudantes (operacao_id, nome, funcao)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(operacao_id)
        .bind(nome)
        .bind(funcao)
        .fetch_one(executor)
        .await?;

        Ok(ajudante)
    }

    pub async fn add_falta<'e, E>(
        &self,
        executor: E,
        operacao_id: Uuid,
        nome: &str,
        motivo: Option<&str>,
    ) -> Result<Falta, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let falta = sqlx::query_as::<_, Falta>(
            r#"
            INSERT INTO operacao_faltas (operacao_id, nome, motivo)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(operacao_id)
        .bind(nome)
        .bind(motivo)
        .fetch_one(executor)
        .await?;

        Ok(falta)
    }

    pub async fn equipamentos_de<'e, E>(
        &self,
        executor: E,
        operacao_ids: &[Uuid],
    ) -> Result<Vec<EquipamentoLancado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let equipamentos = sqlx::query_as::<_, EquipamentoLancado>(
            "SELECT * FROM operacao_equipamentos WHERE operacao_id = ANY($1) ORDER BY equipamento_tag ASC",
        )
        .bind(operacao_ids)
        .fetch_all(executor)
        .await?;

        Ok(equipamentos)
    }

    pub async fn ajudantes_de<'e, E>(
        &self,
        executor: E,
        operacao_ids: &[Uuid],
    ) -> Result<Vec<Ajudante>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ajudantes = sqlx::query_as::<_, Ajudante>(
            "SELECT * FROM operacao_ajudantes WHERE operacao_id = ANY($1) ORDER BY nome ASC",
        )
        .bind(operacao_ids)
        .fetch_all(executor)
        .await?;

        Ok(ajudantes)
    }

    pub async fn faltas_de<'e, E>(
        &self,
        executor: E,
        operacao_ids: &[Uuid],
    ) -> Result<Vec<Falta>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let faltas = sqlx::query_as::<_, Falta>(
            "SELECT * FROM operacao_faltas WHERE operacao_id = ANY($1) ORDER BY nome ASC",
        )
        .bind(operacao_ids)
        .fetch_all(executor)
        .await?;

        Ok(faltas)
    }

    // A operação é dona das listas filhas: a exclusão apaga tudo na mesma
    // transação (o chamador é quem abre o tx).
    pub async fn delete_filhos(
        &self,
        conn: &mut sqlx::PgConnection,
        operacao_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM operacao_equipamentos WHERE operacao_id = $1")
            .bind(operacao_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM operacao_ajudantes WHERE operacao_id = $1")
            .bind(operacao_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM operacao_faltas WHERE operacao_id = $1")
            .bind(operacao_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  RELATÓRIO (LINHAS ACHATADAS DE HORAS)
    // =========================================================================

    // Uma linha por equipamento lançado no período, com navio/carga resolvidos
    // pela viagem da operação. A agregação acontece no serviço, em memória.
    pub async fn registros_de_horas<'e, E>(
        &self,
        executor: E,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<RegistroHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registros = sqlx::query_as::<_, RegistroHoras>(
            r#"
            SELECT
                o.data,
                e.operador,
                e.equipamento_tag,
                e.centro_custo,
                n.nome AS navio,
                v.carga,
                e.horas
            FROM operacao_equipamentos e
            JOIN operacoes o ON o.id = e.operacao_id
            LEFT JOIN viagens v ON v.id = o.viagem_id
            LEFT JOIN navios n ON n.id = v.navio_id
            WHERE o.data BETWEEN $1 AND $2
            ORDER BY o.data ASC, e.equipamento_tag ASC
            "#,
        )
        .bind(inicio)
        .bind(fim)
        .fetch_all(executor)
        .await?;

        Ok(registros)
    }
}
