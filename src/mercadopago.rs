//! Minimal Mercado Pago REST client: Pix payment creation plus webhook
//! signature verification. There is no official Rust SDK, so the calls go
//! straight to the `/v1/payments` endpoint.

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const API_BASE_URL: &str = "https://api.mercadopago.com";

#[derive(Debug, Serialize)]
pub struct PaymentData {
    pub transaction_amount: f64,
    pub description: &'static str,
    pub payment_method_id: &'static str,
    pub payer: Payer,
}

#[derive(Debug, Serialize)]
pub struct Payer {
    pub email: String,
    pub first_name: String,
}

impl PaymentData {
    /// Builds the fixed-shape Pix charge, substituting placeholder payer
    /// data when the caller omitted it.
    pub fn pix(valor: f64, nome: Option<String>, email: Option<String>) -> Self {
        Self {
            transaction_amount: valor,
            description: "Cobrança via Pix",
            payment_method_id: "pix",
            payer: Payer {
                email: email.unwrap_or_else(|| "cliente@example.com".to_string()),
                first_name: nome.unwrap_or_else(|| "Cliente".to_string()),
            },
        }
    }
}

#[derive(Clone)]
pub struct MercadoPagoClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl MercadoPagoClient {
    pub fn new(access_token: String) -> Self {
        Self {
            client: Client::new(),
            access_token,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Sends one payment-creation call and returns the processor's raw JSON
    /// body. The endpoint requires an idempotency key header; a fresh UUID
    /// per request keeps the source's no-dedup behavior.
    pub async fn create_payment(&self, data: &PaymentData) -> Result<Value, AppError> {
        let response = self
            .client
            .post(format!("{}/v1/payments", self.base_url))
            .bearer_auth(&self.access_token)
            .header("X-Idempotency-Key", Uuid::new_v4().to_string())
            .json(data)
            .send()
            .await
            .map_err(|err| AppError::Payment(err.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|err| AppError::Payment(err.to_string()))?;

        if !status.is_success() {
            let detail = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("resposta de erro do Mercado Pago")
                .to_string();
            return Err(AppError::Payment(detail));
        }

        Ok(body)
    }
}

/// Checks a Mercado Pago `x-signature` header (`ts=...,v1=...`) against the
/// HMAC-SHA256 of `id:<data.id>;request-id:<x-request-id>;ts:<ts>;`.
pub fn verify_webhook_signature(
    secret: &str,
    signature_header: &str,
    request_id: &str,
    data_id: &str,
) -> bool {
    let mut ts = None;
    let mut v1 = None;
    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("ts", value)) => ts = Some(value),
            Some(("v1", value)) => v1 = Some(value),
            _ => {}
        }
    }
    let (Some(ts), Some(v1)) = (ts, v1) else {
        return false;
    };

    let manifest = format!("id:{data_id};request-id:{request_id};ts:{ts};");

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(manifest.as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());

    // Constant-time comparison; the signature length itself is not secret.
    let expected_bytes = expected.as_bytes();
    let provided_bytes = v1.as_bytes();
    if expected_bytes.len() != provided_bytes.len() {
        return false;
    }
    expected_bytes.ct_eq(provided_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, data_id: &str, request_id: &str, ts: &str) -> String {
        let manifest = format!("id:{data_id};request-id:{request_id};ts:{ts};");
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(manifest.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn pagamento_pix_usa_campos_fixos() {
        let data = PaymentData::pix(150.0, Some("Maria".into()), Some("maria@example.com".into()));
        assert_eq!(data.transaction_amount, 150.0);
        assert_eq!(data.description, "Cobrança via Pix");
        assert_eq!(data.payment_method_id, "pix");
        assert_eq!(data.payer.email, "maria@example.com");
        assert_eq!(data.payer.first_name, "Maria");
    }

    #[test]
    fn pagador_ausente_recebe_valores_padrao() {
        let data = PaymentData::pix(10.0, None, None);
        assert_eq!(data.payer.email, "cliente@example.com");
        assert_eq!(data.payer.first_name, "Cliente");
    }

    #[test]
    fn serializacao_segue_o_contrato_da_api() {
        let data = PaymentData::pix(99.9, None, None);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["transaction_amount"], 99.9);
        assert_eq!(json["payment_method_id"], "pix");
        assert_eq!(json["payer"]["first_name"], "Cliente");
    }

    #[test]
    fn assinatura_valida_e_aceita() {
        let secret = "segredo";
        let v1 = sign(secret, "123", "req-1", "1700000000");
        let header = format!("ts=1700000000,v1={v1}");
        assert!(verify_webhook_signature(secret, &header, "req-1", "123"));
    }

    #[test]
    fn assinatura_adulterada_e_rejeitada() {
        let secret = "segredo";
        let v1 = sign(secret, "123", "req-1", "1700000000");
        let header = format!("ts=1700000000,v1={v1}");
        assert!(!verify_webhook_signature(secret, &header, "req-1", "456"));
        assert!(!verify_webhook_signature("outro", &header, "req-1", "123"));
    }

    #[test]
    fn cabecalho_malformado_e_rejeitado() {
        assert!(!verify_webhook_signature("segredo", "ts=1700000000", "req-1", "123"));
        assert!(!verify_webhook_signature("segredo", "", "req-1", "123"));
    }
}
