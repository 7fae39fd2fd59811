// storefront/src/main.rs

use actix_web::{web, App, HttpServer};
use storefront::config::AppConfig;
use storefront::state::AppState;
use storefront::web::configure_app_routes;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let app_state = match AppState::from_config(app_config.clone()) {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to assemble application state.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  // Touch the catalog once so a fresh data directory is seeded before traffic.
  let seeded = app_state.products.list().await.len();
  tracing::info!(products = seeded, data_dir = %app_config.data_dir.display(), "Product catalog ready.");

  let session_key = storefront::session_key(&app_config);
  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(storefront::session_middleware(&app_config, session_key.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
