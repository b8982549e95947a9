// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, PgPool, Postgres};

use crate::{common::error::AppError, models::dashboard::ResumoDashboard};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Resumo geral do dia. Uma transação só, para as quatro leituras
    // enxergarem o mesmo snapshot.
    pub async fn get_resumo<'e, A>(&self, acquirer: A) -> Result<ResumoDashboard, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = acquirer.begin().await?;

        // A. Operações apontadas hoje
        let operacoes_hoje = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM operacoes WHERE data = CURRENT_DATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        // B. Horas de equipamento lançadas hoje
        let horas_equipamentos_hoje = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(e.horas), 0)
            FROM operacao_equipamentos e
            JOIN operacoes o ON o.id = e.operacao_id
            WHERE o.data = CURRENT_DATE
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // C. BMs que ainda têm saldo a ratear
        let boletins_abertos = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM boletins_medicao b
            WHERE b.valor_total >
                COALESCE((SELECT SUM(r.valor) FROM rateios r WHERE r.boletim_id = b.id), 0)
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // D. Equipamentos reprovados em vistoria
        let vistorias_nao_conformes = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vistorias WHERE status = 'NAO_CONFORME'",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ResumoDashboard {
            operacoes_hoje,
            horas_equipamentos_hoje,
            boletins_abertos,
            vistorias_nao_conformes,
        })
    }
}
