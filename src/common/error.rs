use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Toda rejeição chega ao cliente como mensagem bloqueante; nada é
// corrigido em silêncio e nenhum erro derruba o processo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Conta desativada. Procure o administrador do sistema.")]
    ContaDesativada,

    #[error("{0} não encontrado(a)")]
    ResourceNotFound(String),

    #[error("{0}")]
    Duplicado(String),

    #[error("{0} possui registros vinculados e não pode ser excluído(a)")]
    PossuiVinculos(String),

    // --- Rejeições do livro de rateio ---
    #[error("Informe o valor ou o percentual do rateio")]
    RateioSemValor,

    #[error("O valor do rateio deve ser maior que zero")]
    RateioValorInvalido,

    #[error("Valor do rateio (R$ {valor}) excede o saldo do BM (R$ {saldo})")]
    RateioExcedeSaldo { valor: Decimal, saldo: Decimal },

    #[error("O valor total do BM não pode ser negativo")]
    TotalInvalido,

    #[error("Novo total (R$ {total}) é menor que o valor já rateado (R$ {rateado})")]
    TotalMenorQueRateado { total: Decimal, rateado: Decimal },

    #[error("As horas lançadas devem ser maiores que zero")]
    HorasInvalidas,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Validação devolve todos os detalhes por campo
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let status = match &self {
            AppError::EmailAlreadyExists | AppError::Duplicado(_) | AppError::PossuiVinculos(_) => {
                StatusCode::CONFLICT
            }
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::ContaDesativada => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,

            // Regras de negócio violadas: o pedido era sintaticamente válido
            AppError::RateioSemValor
            | AppError::RateioValorInvalido
            | AppError::RateioExcedeSaldo { .. }
            | AppError::TotalInvalido
            | AppError::TotalMenorQueRateado { .. }
            | AppError::HorasInvalidas => StatusCode::UNPROCESSABLE_ENTITY,

            // Todos os outros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let mensagem = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Ocorreu um erro inesperado.".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "error": mensagem }));
        (status, body).into_response()
    }
}
