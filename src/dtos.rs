use crate::error::AppError;
use crate::models::NovoUsuario;

/// Body of `POST /api/mp-pix`. Only `valor` is required; payer fields fall
/// back to placeholders when absent.
#[derive(serde::Deserialize)]
pub struct PixPaymentInput {
    pub valor: Option<f64>,
    pub nome: Option<String>,
    pub email: Option<String>,
}

/// Body of the usuario create/update routes, validated before it touches the
/// database.
#[derive(serde::Deserialize)]
pub struct UsuarioInput {
    pub nome: Option<String>,
    pub email: Option<String>,
}

impl UsuarioInput {
    pub fn validar(self) -> Result<NovoUsuario, AppError> {
        match (self.nome, self.email) {
            (Some(nome), Some(email)) if !nome.is_empty() && !email.is_empty() => {
                Ok(NovoUsuario { nome, email })
            }
            _ => Err(AppError::BadRequest("Nome e email são obrigatórios")),
        }
    }
}
