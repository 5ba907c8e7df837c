// ABOUTME: API error type and the terminal error-handling layer for the namerecords service.
// ABOUTME: Expected failures map to explicit status codes; storage failures become environment-aware 500s.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::http::{Request, Response, StatusCode};
use axum::response::IntoResponse;
use namerecords_core::ValidationError;
use namerecords_store::StoreError;
use thiserror::Error;
use tower::{Layer, Service};

use crate::config::Environment;

/// Errors a handler can return. Everything except `Store` is resolved into a
/// client-facing status here; `Store` is deferred to `ErrorHandlerLayer`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("To update a name record please provide an updated value for Name, Gender, or Era")]
    NoUpdateFields,

    #[error("A Name with ID {0} cannot be found. Please check your names ID and try again")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Marker placed on 500 responses so the terminal layer can render them.
#[derive(Debug, Clone)]
pub struct InternalError(pub String);

/// The uniform `{"error": {"message": ...}}` body.
pub fn error_body(message: impl Into<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": { "message": message.into() } }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::NoUpdateFields => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => {
                let mut resp = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                resp.extensions_mut().insert(InternalError(self.to_string()));
                return resp;
            }
        };
        (status, error_body(self.to_string())).into_response()
    }
}

/// Terminal layer that renders `InternalError` responses. Production gets a
/// generic message; other environments see the raw error text.
#[derive(Clone)]
pub struct ErrorHandlerLayer {
    environment: Environment,
}

impl ErrorHandlerLayer {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

impl<S> Layer<S> for ErrorHandlerLayer {
    type Service = ErrorHandler<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorHandler {
            inner,
            environment: self.environment,
        }
    }
}

#[derive(Clone)]
pub struct ErrorHandler<S> {
    inner: S,
    environment: Environment,
}

impl<S> Service<Request<Body>> for ErrorHandler<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let environment = self.environment;
        let path = req.uri().path().to_string();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let resp = inner.call(req).await?;
            let Some(InternalError(message)) = resp.extensions().get::<InternalError>().cloned()
            else {
                return Ok(resp);
            };

            tracing::error!(path = %path, error = %message, "request failed");
            let message = if environment.is_production() {
                "server error".to_string()
            } else {
                message
            };
            Ok((StatusCode::INTERNAL_SERVER_ERROR, error_body(message)).into_response())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::get;
    use tower::ServiceExt;

    async fn failing() -> Result<&'static str, ApiError> {
        Err(ApiError::Store(StoreError::EmptyUpdate(3)))
    }

    fn test_router(environment: Environment) -> Router {
        Router::new()
            .route("/fail", get(failing))
            .route("/missing", get(|| async { ApiError::NotFound("42".to_string()) }))
            .route("/ok", get(|| async { "fine" }))
            .layer(ErrorHandlerLayer::new(environment))
    }

    async fn call(app: Router, path: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn production_hides_error_details() {
        let (status, json) = call(test_router(Environment::Production), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, serde_json::json!({ "error": { "message": "server error" } }));
    }

    #[tokio::test]
    async fn development_returns_raw_message() {
        let (status, json) = call(test_router(Environment::Development), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("empty update"), "unexpected message: {}", message);
    }

    #[tokio::test]
    async fn expected_errors_pass_through_untouched() {
        let (status, json) = call(test_router(Environment::Production), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json["error"]["message"],
            "A Name with ID 42 cannot be found. Please check your names ID and try again"
        );

        let (status, _) = call(test_router(Environment::Production), "/ok").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let resp = ApiError::from(ValidationError::Missing("name")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError::NoUpdateFields.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
