use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use database::{DbRepository, SchoolStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod error;
pub mod form;
pub mod handlers;
pub mod uploads;

use uploads::ImageStore;

/// Room left in the request body for the text fields next to a maximum-size image.
pub const FORM_FIELDS_ALLOWANCE: usize = 1024 * 1024;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SchoolStore>,
    pub images: ImageStore,
}

/// Builds the application router: the two API routes (also reachable under
/// `/api`), a health check, and the uploaded-image directory.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    let body_limit = state.images.max_bytes() + FORM_FIELDS_ALLOWANCE;
    let images = ServeDir::new(state.images.dir());
    let image_prefix = state.images.public_prefix().to_string();

    let schools = Router::new()
        .route(
            "/addSchool",
            post(handlers::add_school).fallback(handlers::method_not_allowed),
        )
        .route(
            "/getSchools",
            get(handlers::get_schools).fallback(handlers::method_not_allowed),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(schools.clone())
        .nest("/api", schools)
        .nest_service(&image_prefix, images)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Serves `app` on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Connects to the database, prepares the upload directory, and serves the
/// directory API until Ctrl-C. The pool is closed before returning.
pub async fn run_server(settings: Settings, addr: SocketAddr) -> anyhow::Result<()> {
    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;

    let images = ImageStore::new(&settings.uploads);
    images.ensure_dir().await?;

    let app_state = Arc::new(AppState {
        store: Arc::new(DbRepository::new(db_pool.clone())),
        images,
    });
    let app = build_router(app_state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    let served = serve(listener, app, shutdown_signal()).await;
    database::close(&db_pool).await;
    served?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
