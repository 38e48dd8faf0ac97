use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use diesel::prelude::*;
use serde_json::{json, Value};

use crate::dtos::{PixPaymentInput, UsuarioInput};
use crate::error::AppError;
use crate::mercadopago::{self, PaymentData};
use crate::models::Usuario;
use crate::{schema, AppState};

pub async fn health() -> &'static str {
    "API Pix rodando com sucesso!"
}

/// Creates a Pix charge at Mercado Pago and relays the processor's response,
/// with the QR-code data (`point_of_interaction`) broken out for the caller.
pub async fn create_pix_payment(
    State(state): State<AppState>,
    Json(input): Json<PixPaymentInput>,
) -> Result<Json<Value>, AppError> {
    let valor = input
        .valor
        .filter(|v| *v != 0.0)
        .ok_or(AppError::BadRequest("Valor é obrigatório"))?;

    let data = PaymentData::pix(valor, input.nome, input.email);
    let payment = state.mercado_pago.create_payment(&data).await?;
    let pix = payment.get("point_of_interaction").cloned();

    Ok(Json(json!({
        "message": "Pagamento criado com sucesso!",
        "pix": pix,
        "payment": payment,
    })))
}

/// Acknowledges Mercado Pago notifications. When `MP_WEBHOOK_SECRET` is
/// configured the `x-signature` header is checked first; otherwise any JSON
/// body is accepted, logged and discarded.
pub async fn mp_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let payload: Option<Value> = serde_json::from_slice(&body).ok();

    if let Some(secret) = &state.webhook_secret {
        let signature = headers
            .get("x-signature")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::InvalidSignature)?;
        let request_id = headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let data_id = payload
            .as_ref()
            .and_then(|p| p.pointer("/data/id"))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();
        if !mercadopago::verify_webhook_signature(secret, signature, request_id, &data_id) {
            return Err(AppError::InvalidSignature);
        }
    }

    match payload {
        Some(notificacao) => {
            tracing::info!(%notificacao, "notificação recebida do Mercado Pago");
        }
        None => tracing::info!("notificação recebida do Mercado Pago com corpo não-JSON"),
    }

    Ok("Notificação recebida")
}

pub async fn create_usuario(
    State(state): State<AppState>,
    Json(input): Json<UsuarioInput>,
) -> Result<(StatusCode, Json<Usuario>), AppError> {
    let novo = input.validar()?;
    let conn = state
        .pool
        .get()
        .await
        .map_err(|err| AppError::Pool(err.to_string()))?;
    let usuario = conn
        .interact(|conn| {
            diesel::insert_into(schema::usuarios::table)
                .values(novo)
                .returning(Usuario::as_returning())
                .get_result(conn)
        })
        .await
        .map_err(|err| AppError::Pool(err.to_string()))??;
    Ok((StatusCode::CREATED, Json(usuario)))
}

pub async fn list_usuarios(
    State(state): State<AppState>,
) -> Result<Json<Vec<Usuario>>, AppError> {
    let conn = state
        .pool
        .get()
        .await
        .map_err(|err| AppError::Pool(err.to_string()))?;
    let usuarios = conn
        .interact(|conn| {
            schema::usuarios::table
                .select(Usuario::as_select())
                .load(conn)
        })
        .await
        .map_err(|err| AppError::Pool(err.to_string()))??;
    Ok(Json(usuarios))
}

pub async fn update_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UsuarioInput>,
) -> Result<Json<Usuario>, AppError> {
    let dados = input.validar()?;
    let conn = state
        .pool
        .get()
        .await
        .map_err(|err| AppError::Pool(err.to_string()))?;
    let usuario = conn
        .interact(move |conn| {
            diesel::update(schema::usuarios::table.find(id))
                .set(dados)
                .returning(Usuario::as_returning())
                .get_result(conn)
        })
        .await
        .map_err(|err| AppError::Pool(err.to_string()))??;
    Ok(Json(usuario))
}

pub async fn delete_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let conn = state
        .pool
        .get()
        .await
        .map_err(|err| AppError::Pool(err.to_string()))?;
    // Deleting an id that does not exist is the driver's no-op success.
    conn.interact(move |conn| diesel::delete(schema::usuarios::table.find(id)).execute(conn))
        .await
        .map_err(|err| AppError::Pool(err.to_string()))??;
    Ok(Json(json!({ "message": "Usuário removido com sucesso" })))
}
