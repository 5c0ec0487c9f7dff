use rankdb_server::{build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();
    env_logger::Builder::new().parse_filters(&config.log_filter).init();

    let app = build_router(AppState::new());

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {addr}: {err}"));

    log::info!("rankdb-server listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}
