//! The transport boundary.
//!
//! # Design
//! The executor only needs something that can turn an `HttpRequest` into an
//! `HttpResponse`. HTTP error statuses are responses, not transport errors:
//! a transport fails only when no response exists at all (connection
//! refused, timeout). `ReqwestTransport` is the production implementation;
//! tests plug in scripted doubles.

mod reqwest_backend;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub use reqwest_backend::ReqwestTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
