use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Erro ao criar pagamento: {0}")]
    Payment(String),

    #[error("Assinatura do webhook inválida")]
    InvalidSignature,

    #[error("Erro no banco de dados: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Erro no pool de conexões: {0}")]
    Pool(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AppError::Payment(detail) => {
                tracing::error!("erro ao criar pagamento no Mercado Pago: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Erro ao criar pagamento", "error": detail }),
                )
            }
            AppError::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Assinatura do webhook inválida" }),
            ),
            // The driver's own not-found outcome, surfaced as-is.
            AppError::Database(diesel::result::Error::NotFound) => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Usuário não encontrado" }),
            ),
            AppError::Database(err) => {
                tracing::error!("erro no banco de dados: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Erro no banco de dados", "error": err.to_string() }),
                )
            }
            AppError::Pool(detail) => {
                tracing::error!("erro no pool de conexões: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Erro no banco de dados", "error": detail }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
