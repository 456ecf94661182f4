use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::VoiceService;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    add_reference_handler, delete_source_handler, download_output_handler, health_handler,
    remove_reference_handler, session_handler, set_mode_handler, source_preview_handler,
    start_conversion_handler, upload_source_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<V>(state: AppState<V>) -> Router
where
    V: VoiceService + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes());

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/session", get(session_handler::<V>))
        .route(
            "/api/v1/session/source",
            put(upload_source_handler::<V>)
                .get(source_preview_handler::<V>)
                .delete(delete_source_handler::<V>),
        )
        .route(
            "/api/v1/session/references",
            post(add_reference_handler::<V>),
        )
        .route(
            "/api/v1/session/references/{index}",
            delete(remove_reference_handler::<V>),
        )
        .route("/api/v1/session/mode", put(set_mode_handler::<V>))
        .route("/api/v1/conversions", post(start_conversion_handler::<V>))
        .route(
            "/api/v1/outputs/{output_id}",
            get(download_output_handler::<V>),
        )
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
