use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instamojo_webhook::{routes, AppState, WebhookConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match WebhookConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid webhook configuration: {e}");
            std::process::exit(1);
        }
    };

    let bind_addr = config.bind_addr.clone();
    let port = config.port;
    let max_body_bytes = config.max_body_bytes;

    tracing::info!("Instamojo webhook receiver listening on {bind_addr}:{port}");
    tracing::info!("Appending records to {}", config.log_path.display());
    tracing::warn!("Incoming webhook signatures are NOT verified");

    let state = web::Data::new(AppState::new(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind((bind_addr.as_str(), port))?
    .run()
    .await
}
