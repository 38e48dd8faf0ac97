use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod mercadopago;
pub mod models;
pub mod schema;

// this embeds the migrations into the application binary
// the migration path is relative to the `CARGO_MANIFEST_DIR`
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[derive(Clone)]
pub struct AppState {
    pub pool: deadpool_diesel::sqlite::Pool,
    pub mercado_pago: Arc<mercadopago::MercadoPagoClient>,
    pub webhook_secret: Option<Arc<str>>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api", get(handlers::health))
        .route("/api/mp-pix", post(handlers::create_pix_payment))
        .route("/api/webhook/mp", post(handlers::mp_webhook))
        .route(
            "/api/usuarios",
            post(handlers::create_usuario).get(handlers::list_usuarios),
        )
        .route(
            "/api/usuarios/:id",
            put(handlers::update_usuario).delete(handlers::delete_usuario),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
