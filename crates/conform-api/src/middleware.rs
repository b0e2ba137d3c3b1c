//! Request validation middleware
//!
//! `GET` requests are validated through their query string, every other
//! method through its JSON body. Valid requests reach the downstream handler
//! unchanged; the buffered body is put back before forwarding.

use axum::{
    body::{Body, Bytes},
    extract::{Query, Request, State},
    http::{request::Parts, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use conform_core::{AuthoringError, ErrorTemplate, SchemaNode, ValidationError, ValidationOptions};
use http_body_util::LengthLimitError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Largest request body buffered for validation
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Builds the response for a request that failed validation
pub type FailureHandler = dyn Fn(&Parts, ValidationError) -> Response + Send + Sync;

/// Fixed envelope of the default failure response
#[derive(Debug, Serialize)]
struct ErrorEnvelope<T: Serialize> {
    err: T,
}

fn envelope<T: Serialize>(status: StatusCode, err: T) -> Response {
    (status, Json(ErrorEnvelope { err })).into_response()
}

/// Everything needed to validate one route's requests
///
/// Cheap to clone; pass it as middleware state with
/// `axum::middleware::from_fn_with_state(guard, validate_request)`.
#[derive(Clone)]
pub struct RequestGuard {
    schema: Arc<SchemaNode>,
    template: Option<Arc<ErrorTemplate>>,
    options: ValidationOptions,
    handler: Option<Arc<FailureHandler>>,
    body_limit: usize,
}

impl RequestGuard {
    pub fn new(schema: impl Into<SchemaNode>) -> Self {
        Self {
            schema: Arc::new(schema.into()),
            template: None,
            options: ValidationOptions::DEFAULT,
            handler: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Override error messages for this route
    pub fn with_template(mut self, template: ErrorTemplate) -> Self {
        self.template = Some(Arc::new(template));
        self
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Respond to failures with `handler` instead of the default 400
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Parts, ValidationError) -> Response + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    fn check(&self, data: &Value) -> conform_core::Result<Option<ValidationError>> {
        conform_core::validate(data, &self.schema, self.template.as_deref(), Some(&self.options))
    }

    fn reject(&self, parts: &Parts, err: ValidationError) -> Response {
        tracing::info!(
            method = %parts.method,
            uri = %parts.uri,
            keychain = err.keychain.as_deref().unwrap_or(conform_core::ROOT_LEVEL),
            message = %err.message,
            "Request failed validation"
        );

        match &self.handler {
            Some(handler) => handler(parts, err),
            None => envelope(StatusCode::BAD_REQUEST, err),
        }
    }
}

impl fmt::Debug for RequestGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestGuard")
            .field("schema", &self.schema)
            .field("template", &self.template)
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .field("body_limit", &self.body_limit)
            .finish()
    }
}

/// Produces guards sharing one failure handler
#[derive(Clone)]
pub struct GuardFactory {
    handler: Arc<FailureHandler>,
    options: ValidationOptions,
}

impl GuardFactory {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Parts, ValidationError) -> Response + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            options: ValidationOptions::DEFAULT,
        }
    }

    /// Options applied to every guard this factory produces
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn guard(&self, schema: impl Into<SchemaNode>) -> RequestGuard {
        RequestGuard {
            handler: Some(Arc::clone(&self.handler)),
            ..RequestGuard::new(schema).with_options(self.options)
        }
    }
}

/// Query string as an object of strings; repeated keys collect into arrays
pub fn query_object(uri: &Uri) -> Value {
    let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();

    let mut map = Map::new();
    for (key, value) in pairs {
        match map.get_mut(&key) {
            Some(Value::Array(items)) => items.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                map.insert(key, Value::String(value));
            }
        }
    }
    Value::Object(map)
}

/// Body as JSON; an empty or unparseable body is `null`
fn body_value(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

/// Status and error for a body that could not be buffered
///
/// Only a body over `limit` is 413; any other read failure is 400.
fn unreadable_body(err: &axum::Error, limit: usize) -> (StatusCode, ValidationError) {
    let over_limit = std::iter::successors(Some(err as &(dyn StdError + 'static)), |e| (*e).source())
        .any(|e| e.is::<LengthLimitError>());

    if over_limit {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ValidationError::new(format!("Request body exceeds {} bytes.", limit), None, None),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            ValidationError::new("Request body could not be read.", None, None),
        )
    }
}

/// Validate the request against the guard's schema
pub async fn validate_request(State(guard): State<RequestGuard>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let (data, body) = if parts.method == Method::GET {
        (query_object(&parts.uri), body)
    } else {
        let bytes = match axum::body::to_bytes(body, guard.body_limit).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::info!(error = %err, limit = guard.body_limit, "Could not buffer request body");
                let (status, err) = unreadable_body(&err, guard.body_limit);
                return envelope(status, err);
            }
        };
        (body_value(&bytes), Body::from(bytes))
    };

    match guard.check(&data) {
        Ok(None) => next.run(Request::from_parts(parts, body)).await,
        Ok(Some(err)) => guard.reject(&parts, err),
        Err(err @ AuthoringError::NonObjectRoot(_)) => {
            let err = ValidationError::new(err.to_string(), None, Some(&data));
            guard.reject(&parts, err)
        }
        Err(err) => {
            tracing::error!(
                method = %parts.method,
                uri = %parts.uri,
                error = %err,
                "Request validation is misconfigured"
            );
            envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                ValidationError::new("Request validation is misconfigured.", None, None),
            )
        }
    }
}
