// src/services/vistoria_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{NotificacoesRepository, VistoriasRepository},
    models::vistorias::{StatusVistoria, Vistoria},
};

#[derive(Clone)]
pub struct VistoriaService {
    repo: VistoriasRepository,
    notificacoes_repo: NotificacoesRepository,
    pool: PgPool,
}

impl VistoriaService {
    pub fn new(
        repo: VistoriasRepository,
        notificacoes_repo: NotificacoesRepository,
        pool: PgPool,
    ) -> Self {
        Self { repo, notificacoes_repo, pool }
    }

    /// Registra a vistoria. Equipamento reprovado gera uma notificação para
    /// quem registrou, na mesma transação.
    pub async fn criar_vistoria(
        &self,
        criado_por: Uuid,
        equipamento_tag: &str,
        data_vistoria: NaiveDate,
        status: StatusVistoria,
        observacoes: Option<&str>,
    ) -> Result<Vistoria, AppError> {
        let mut tx = self.pool.begin().await?;

        let vistoria = self
            .repo
            .create_vistoria(
                &mut *tx,
                equipamento_tag,
                data_vistoria,
                status,
                observacoes,
                criado_por,
            )
            .await?;

        if status == StatusVistoria::NaoConforme {
            let mensagem = format!(
                "Equipamento {} reprovado na vistoria de {}",
                equipamento_tag,
                data_vistoria.format("%d/%m/%Y")
            );
            self.notificacoes_repo
                .criar(&mut *tx, criado_por, "Vistoria não conforme", &mensagem)
                .await?;

            tracing::warn!("⚠️ Vistoria não conforme: {}", equipamento_tag);
        }

        tx.commit().await?;

        Ok(vistoria)
    }

    pub async fn listar(&self, status: Option<StatusVistoria>) -> Result<Vec<Vistoria>, AppError> {
        self.repo.list_vistorias(&self.pool, status).await
    }
}
