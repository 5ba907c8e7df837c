// ABOUTME: Route definitions for the namerecords HTTP API.
// ABOUTME: Composes the routes with the record lookup, error handler, auth gate, security headers, CORS, and tracing layers.

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::middleware;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::namerecords;
use crate::app_state::SharedState;
use crate::auth::AuthLayer;
use crate::error::ErrorHandlerLayer;

/// Build the complete Axum router. Layers run outermost first:
/// tracing, CORS, security headers, bearer auth, error handler, then the routes.
pub fn create_router(state: SharedState) -> Router {
    let items = Router::new()
        .route(
            "/api/namerecords/{namerecord_id}",
            get(namerecords::get_name_record)
                .delete(namerecords::delete_name_record)
                .patch(namerecords::update_name_record),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            namerecords::load_name_record,
        ));

    Router::new()
        .route(
            namerecords::COLLECTION_PATH,
            get(namerecords::list_name_records).post(namerecords::create_name_record),
        )
        .merge(items)
        .with_state(state.clone())
        .layer(ErrorHandlerLayer::new(state.config.environment))
        .layer(AuthLayer::new(state.config.api_token.clone()))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
