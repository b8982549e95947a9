//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

// Importações principais
use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Define as rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let fornecedor_routes = Router::new()
        .route("/"
               ,post(handlers::fornecedores::criar_fornecedor)
               .get(handlers::fornecedores::listar_fornecedores)
        )
        .route("/{id}"
               ,delete(handlers::fornecedores::excluir_fornecedor)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let rateio_routes = Router::new()
        .route("/boletins"
               ,post(handlers::rateios::criar_boletim)
               .get(handlers::rateios::listar_boletins)
        )
        .route("/boletins/{id}"
               ,get(handlers::rateios::detalhar_boletim)
               .delete(handlers::rateios::excluir_boletim)
        )
        .route("/boletins/{id}/total"
               ,patch(handlers::rateios::editar_total)
        )
        .route("/boletins/{id}/rateios"
               ,post(handlers::rateios::adicionar_rateio)
        )
        .route("/boletins/{id}/pdf"
               ,get(handlers::rateios::exportar_pdf)
        )
        .route("/rateios/{id}"
               ,delete(handlers::rateios::excluir_rateio)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let operacao_routes = Router::new()
        .route("/"
               ,post(handlers::operacoes::criar_operacao)
               .get(handlers::operacoes::listar_operacoes)
        )
        .route("/{id}"
               ,get(handlers::operacoes::detalhar_operacao)
               .delete(handlers::operacoes::excluir_operacao)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let navio_routes = Router::new()
        .route("/"
               ,post(handlers::navios::criar_navio)
               .get(handlers::navios::listar_navios)
        )
        .route("/{id}/viagens"
               ,post(handlers::navios::criar_viagem)
               .get(handlers::navios::listar_viagens)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let relatorio_routes = Router::new()
        .route("/horas-equipamentos"
               ,get(handlers::relatorios::horas_equipamentos)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let vistoria_routes = Router::new()
        .route("/"
               ,post(handlers::vistorias::criar_vistoria)
               .get(handlers::vistorias::listar_vistorias)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let notificacao_routes = Router::new()
        .route("/", get(handlers::notificacoes::listar_notificacoes))
        .route("/{id}/lida", post(handlers::notificacoes::marcar_lida))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/resumo", get(handlers::dashboard::get_resumo))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/fornecedores", fornecedor_routes)
        .nest("/api/rateios", rateio_routes)
        .nest("/api/operacoes", operacao_routes)
        .nest("/api/navios", navio_routes)
        .nest("/api/relatorios", relatorio_routes)
        .nest("/api/vistorias", vistoria_routes)
        .nest("/api/notificacoes", notificacao_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
