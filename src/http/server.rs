//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, panic recovery)
//! - Bind server to listener and shut down gracefully
//! - Dispatch requests through the route table to the subsystems

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::callback::CallbackStore;
use crate::config::ServerConfig;
use crate::document::{DocumentAssembler, WebAppManifest};
use crate::extensions::ExtensionCatalog;
use crate::files::FileServer;
use crate::http::request::{
    parse_query, propagate_request_id_layer, request_id, request_id_layer,
};
use crate::http::response::plain_text;
use crate::http::{callback, workbench};
use crate::observability::metrics;
use crate::routing::{Route, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub routes: Arc<RouteTable>,
    pub app_files: FileServer,
    pub extension_files: FileServer,
    pub document: DocumentAssembler,
    pub callbacks: Arc<CallbackStore>,
    pub manifest: Arc<WebAppManifest>,
}

impl AppState {
    /// Build state around an existing catalog.
    pub fn new(config: ServerConfig, catalog: ExtensionCatalog) -> Self {
        let paths = &config.paths;
        let document = DocumentAssembler::new(
            paths.template_path(),
            config.static_extensions_url(),
            catalog,
        );
        Self {
            routes: Arc::new(RouteTable::standard()),
            app_files: FileServer::new(paths.app_root.clone()),
            extension_files: FileServer::new(paths.extensions_root()),
            document,
            callbacks: Arc::new(CallbackStore::from_config(&config.callback)),
            manifest: Arc::new(WebAppManifest::from_config(&config.app)),
            config: Arc::new(config),
        }
    }
}

/// HTTP server for the workbench.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a server and start extension discovery in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: ServerConfig) -> Self {
        let catalog = ExtensionCatalog::spawn(config.paths.extensions_root());
        Self::with_state(AppState::new(config, catalog))
    }

    pub fn with_state(state: AppState) -> Self {
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let routes = Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(state);
        with_middleware(routes)
    }

    /// A clone of the fully layered router, e.g. for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            public_url = %format!("{}://{}", self.state.config.public.scheme, self.state.config.authority()),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point: parse the URL once, resolve the route, delegate.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, _body) = request.into_parts();
    let path = parts.uri.path();
    let params = parse_query(parts.uri.query());

    let Some(matched) = state.routes.resolve(path) else {
        tracing::debug!(path = %path, "No route matched");
        metrics::record_request("none", StatusCode::NOT_FOUND.as_u16(), start);
        return plain_text(StatusCode::NOT_FOUND, "Not found");
    };

    let headers = &parts.headers;
    let result = match matched.route {
        Route::Favicon => workbench::favicon(&state, headers).await,
        Route::WebManifest => Ok(workbench::web_manifest(&state)),
        Route::Static => {
            workbench::static_asset(&state.app_files, headers, matched.remainder).await
        }
        Route::StaticExtension => {
            workbench::static_asset(&state.extension_files, headers, matched.remainder).await
        }
        Route::Root => workbench::root(&state, &params).await,
        Route::Callback => callback::register(&state, headers, &params).await,
        Route::FetchCallback => callback::fetch(&state, &params).await,
    };

    let response = result.unwrap_or_else(IntoResponse::into_response);
    metrics::record_request(matched.route.name(), response.status().as_u16(), start);
    response
}

/// Panic recovery innermost, then tracing, then request ID on the outside.
fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id(request.headers()),
            )
        }))
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
