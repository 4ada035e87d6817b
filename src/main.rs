use std::{env, net::SocketAddr};
use student_hub::{AppState, BackendClient, router};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let backend_url =
        env::var("BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    info!("using calculation backend at {backend_url}");

    let state = AppState::new(BackendClient::new(backend_url));
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
