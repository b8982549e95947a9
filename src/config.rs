// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        DashboardRepository, NaviosRepository, NotificacoesRepository, OperacoesRepository,
        RateiosRepository, UserRepository, VistoriasRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService,
        documento_service::DocumentoService, navio_service::NavioService,
        notificacao_service::NotificacaoService, operacao_service::OperacaoService,
        rateio_service::RateioService, relatorio_service::RelatorioService,
        vistoria_service::VistoriaService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub rateio_service: RateioService,
    pub operacao_service: OperacaoService,
    pub navio_service: NavioService,
    pub relatorio_service: RelatorioService,
    pub vistoria_service: VistoriaService,
    pub notificacao_service: NotificacaoService,
    pub dashboard_service: DashboardService,
    pub documento_service: DocumentoService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let rateios_repo = RateiosRepository::new(db_pool.clone());
        let operacoes_repo = OperacoesRepository::new(db_pool.clone());
        let navios_repo = NaviosRepository::new(db_pool.clone());
        let vistorias_repo = VistoriasRepository::new(db_pool.clone());
        let notificacoes_repo = NotificacoesRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let rateio_service = RateioService::new(rateios_repo, db_pool.clone());
        let operacao_service = OperacaoService::new(operacoes_repo.clone(), db_pool.clone());
        let navio_service = NavioService::new(navios_repo, db_pool.clone());
        let relatorio_service = RelatorioService::new(operacoes_repo, db_pool.clone());
        let vistoria_service = VistoriaService::new(
            vistorias_repo,
            notificacoes_repo.clone(),
            db_pool.clone(),
        );
        let notificacao_service = NotificacaoService::new(notificacoes_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo, db_pool.clone());
        let documento_service = DocumentoService::new(rateio_service.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            rateio_service,
            operacao_service,
            navio_service,
            relatorio_service,
            vistoria_service,
            notificacao_service,
            dashboard_service,
            documento_service,
        })
    }
}
