use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use diesel_migrations::MigrationHarness;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pix_api::mercadopago::MercadoPagoClient;
use pix_api::{app, AppState, MIGRATIONS};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pix_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Ok(access_token) = env::var("MP_ACCESS_TOKEN") else {
        tracing::error!("ERRO: A variável MP_ACCESS_TOKEN não está definida.");
        std::process::exit(1);
    };

    let Ok(database_url) = env::var("DATABASE_URL") else {
        tracing::error!("ERRO: A variável DATABASE_URL não está definida.");
        std::process::exit(1);
    };

    let webhook_secret = env::var("MP_WEBHOOK_SECRET").ok().map(Arc::from);
    if webhook_secret.is_none() {
        tracing::warn!(
            "MP_WEBHOOK_SECRET não definida; notificações de webhook serão aceitas sem verificação de assinatura"
        );
    }

    let manager =
        deadpool_diesel::sqlite::Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
    let pool = deadpool_diesel::sqlite::Pool::builder(manager)
        .build()
        .expect("falha ao criar o pool de conexões");

    {
        let conn = pool.get().await.expect("falha ao obter conexão do pool");
        conn.interact(|conn| conn.run_pending_migrations(MIGRATIONS).map(|_| ()))
            .await
            .expect("falha ao executar migrações")
            .expect("falha ao executar migrações");
    }

    let state = AppState {
        pool,
        mercado_pago: Arc::new(MercadoPagoClient::new(access_token)),
        webhook_secret,
    };

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Servidor rodando na porta {port}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("falha ao abrir a porta de escuta");
    axum::serve(listener, app(state))
        .await
        .expect("erro no servidor HTTP");
}
