//! Generic, typed HTTP request execution.
//!
//! # Overview
//! An API operation is described by an `Endpoint` (method, path, query,
//! body, auth). `ApiClient` materializes it into an `HttpRequest`, hands that
//! to a `Transport`, and resolves the `HttpResponse` into either the caller's
//! `DeserializeOwned` type or an `ApiError`.
//!
//! # Design
//! - Materialization (`builder`) and resolution (`resolve`) are pure and
//!   touch no network; only `Transport` does I/O.
//! - Two calling conventions over one pipeline: `ApiClient::request`
//!   (awaited) and `ApiClient::request_stream` (single-event stream).
//! - Every failure, local or remote, surfaces as `ApiError`.
//! - A 403 `expiredToken` response fires a `SessionEvent` on the client's
//!   `SessionEvents` channel.

pub mod builder;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod resolve;
pub mod session;
pub mod transport;
pub mod users;

pub use builder::build_request;
pub use client::{ApiClient, ApiStream};
pub use config::{ApiConfig, TransportConfig};
pub use endpoint::{json_object, Endpoint, JsonObject, QueryItem};
pub use error::{ApiError, BuildError, KnownErrorCode, TransportError, UNKNOWN_ERROR_CODE};
pub use http::{HttpRequest, HttpResponse, RequestMethod};
pub use resolve::resolve;
pub use session::{SessionEvent, SessionEvents, SESSION_TERMINATED};
pub use transport::{ReqwestTransport, Transport};
pub use users::{Password, User, UserEndpoint};
