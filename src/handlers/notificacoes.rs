// src/handlers/notificacoes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::notificacoes::Notificacao,
};

// GET /api/notificacoes
#[utoipa::path(
    get,
    path = "/api/notificacoes",
    tag = "Notificacoes",
    responses(
        (status = 200, description = "Notificações do usuário, não lidas primeiro", body = Vec<Notificacao>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_notificacoes(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let notificacoes = app_state.notificacao_service.listar_minhas(user.0.id).await?;

    Ok((StatusCode::OK, Json(notificacoes)))
}

// POST /api/notificacoes/{id}/lida
#[utoipa::path(
    post,
    path = "/api/notificacoes/{id}/lida",
    tag = "Notificacoes",
    responses(
        (status = 204, description = "Notificação marcada como lida"),
        (status = 404, description = "Notificação não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da Notificação")),
    security(("api_jwt" = []))
)]
pub async fn marcar_lida(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.notificacao_service.marcar_lida(id, user.0.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
