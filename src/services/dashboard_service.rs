// src/services/dashboard_service.rs

use sqlx::PgPool;

use crate::{common::error::AppError, db::DashboardRepository, models::dashboard::ResumoDashboard};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn resumo(&self) -> Result<ResumoDashboard, AppError> {
        self.repo.get_resumo(&self.pool).await
    }
}
