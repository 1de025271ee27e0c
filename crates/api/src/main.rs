use std::sync::Arc;

use therabook_gateway::{HttpGatewayConfig, HttpIdentityGateway, HttpProfileStore};

#[tokio::main]
async fn main() {
    therabook_observability::init();

    let base_url = std::env::var("IDENTITY_BASE_URL").unwrap_or_else(|_| {
        tracing::warn!("IDENTITY_BASE_URL not set; using local dev default");
        "http://localhost:54321".to_string()
    });
    let api_key = std::env::var("IDENTITY_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("IDENTITY_API_KEY not set; using insecure dev default");
        "dev-anon-key".to_string()
    });
    let site_url =
        std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let config = HttpGatewayConfig::new(base_url, api_key);
    let identity = Arc::new(HttpIdentityGateway::new(config.clone()));
    let profiles = Arc::new(HttpProfileStore::new(config));

    let app = therabook_api::app::build_app(identity, profiles, site_url);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
