//! Conform API
//!
//! Axum middleware that validates incoming requests against a conform
//! schema before they reach a handler.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::post, Router};
//! use conform_api::{validate_request, RequestGuard};
//! use conform_core::SchemaNode;
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_json(&json!({"name": "string", "age": "number"})).unwrap();
//! let guard = RequestGuard::new(schema);
//!
//! let app: Router = Router::new()
//!     .route("/users", post(|| async { "created" }))
//!     .layer(from_fn_with_state(guard, validate_request));
//! ```
//!
//! Failures answer `400 Bad Request` with `{"err": <ValidationError>}`
//! unless the guard carries its own failure handler.

pub mod middleware;

pub use middleware::{query_object, validate_request, FailureHandler, GuardFactory, RequestGuard, DEFAULT_BODY_LIMIT};
