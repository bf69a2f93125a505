use crate::config::ClassifierConfig;
use crate::handlers;
use crate::middleware::{api_key_middleware, API_KEY_HEADER};
use crate::models::ModelVariant;
use crate::services::{DataPreview, InferenceService, KeyGuard, ModelHandle};
use axum::{
    http::{header, HeaderName, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    http_trace_layer, metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: ClassifierConfig,
    pub key_guard: KeyGuard,
    pub inference: InferenceService,
    pub preview: DataPreview,
}

impl AppState {
    /// Loads the model named by the config. A failed load still yields a
    /// state; the failure surfaces on `/predict` and `/health`.
    pub async fn from_config(config: ClassifierConfig) -> Self {
        let model = ModelHandle::load(&config.model.path, config.model.variant).await;
        Self::new(config, model)
    }

    pub fn new(config: ClassifierConfig, model: ModelHandle) -> Self {
        Self {
            key_guard: KeyGuard::new(config.api_key.clone()),
            inference: InferenceService::new(model, config.model.variant),
            preview: DataPreview::new(&config.data.csv_path, config.data.preview_rows),
            config,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let predict = match state.config.model.variant {
        ModelVariant::BreastCancer => post(handlers::predict_diagnosis),
        ModelVariant::Iris => post(handlers::predict_species),
    };

    let protected = Router::new()
        .route("/auth", get(handlers::auth_check))
        .route("/load_data", get(handlers::load_data))
        .route("/predict", predict)
        .route_layer(from_fn_with_state(state.clone(), api_key_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)]);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .merge(protected)
        .layer(cors)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: ClassifierConfig) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState::from_config(config).await;
        let app = build_router(state.clone());

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
