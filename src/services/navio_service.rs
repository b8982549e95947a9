// src/services/navio_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NaviosRepository,
    models::navios::{Navio, Viagem},
};

#[derive(Clone)]
pub struct NavioService {
    repo: NaviosRepository,
    pool: PgPool,
}

impl NavioService {
    pub fn new(repo: NaviosRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn criar_navio(&self, nome: &str, imo: Option<&str>) -> Result<Navio, AppError> {
        self.repo.create_navio(&self.pool, nome, imo).await
    }

    pub async fn listar_navios(&self) -> Result<Vec<Navio>, AppError> {
        self.repo.get_all_navios(&self.pool).await
    }

    pub async fn criar_viagem(
        &self,
        navio_id: Uuid,
        carga: &str,
        atracacao: Option<NaiveDate>,
        desatracacao: Option<NaiveDate>,
    ) -> Result<Viagem, AppError> {
        // Confere o navio antes, para devolver 404 em vez de erro de FK
        self.repo
            .get_navio(&self.pool, navio_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Navio".to_string()))?;

        self.repo
            .create_viagem(&self.pool, navio_id, carga, atracacao, desatracacao)
            .await
    }

    pub async fn listar_viagens(&self, navio_id: Uuid) -> Result<Vec<Viagem>, AppError> {
        self.repo
            .get_navio(&self.pool, navio_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Navio".to_string()))?;

        self.repo.list_viagens(&self.pool, navio_id).await
    }
}
