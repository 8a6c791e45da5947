//! Request execution over a pluggable transport.
//!
//! # Design
//! `ApiClient` runs one pipeline, build → transport → resolve, behind two
//! adapters: `request` awaits it and returns the outcome, `request_stream`
//! wraps a single run in a lazy stream that yields exactly one item. Build
//! and transport failures are folded into `ApiError` inside the pipeline, so
//! both adapters only ever surface `ApiError`.
//!
//! The client owns an `ApiConfig` and a `SessionEvents` handle; nothing is
//! read from global state. Cloning shares the transport and the session
//! channel.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::builder::build_request;
use crate::config::{ApiConfig, TransportConfig};
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::resolve::resolve;
use crate::session::SessionEvents;
use crate::transport::{ReqwestTransport, Transport};

/// Single-event stream returned by `ApiClient::request_stream`.
pub type ApiStream<R> = BoxStream<'static, Result<R, ApiError>>;

#[derive(Debug)]
pub struct ApiClient<T = ReqwestTransport> {
    transport: Arc<T>,
    config: ApiConfig,
    session: SessionEvents,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
            session: self.session.clone(),
        }
    }
}

impl ApiClient<ReqwestTransport> {
    /// Client backed by reqwest with the default timeout policy.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(TransportConfig::default())?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T, config: ApiConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
            session: SessionEvents::new(),
        }
    }

    /// Use an existing session channel, e.g. one shared by several clients.
    pub fn with_session_events(mut self, session: SessionEvents) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session_events(&self) -> &SessionEvents {
        &self.session
    }

    /// Execute `endpoint` and decode the response as `R`.
    pub async fn request<R, E>(&self, endpoint: &E) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        self.execute(endpoint).await
    }

    /// Execute `endpoint` when the returned stream is first polled.
    ///
    /// The stream yields one `Ok` or one `Err` and then ends. Every call
    /// starts its own transport call.
    pub fn request_stream<R, E>(&self, endpoint: E) -> ApiStream<R>
    where
        T: 'static,
        R: DeserializeOwned + Send + 'static,
        E: Endpoint + Send + Sync + 'static,
    {
        let client = self.clone();
        stream::once(async move { client.execute(&endpoint).await }).boxed()
    }

    async fn execute<R, E>(&self, endpoint: &E) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        let request = build_request(endpoint, &self.config).map_err(|e| {
            warn!(error = %e, "could not build request");
            ApiError::from(e)
        })?;
        let method = request.method;
        let url = request.url.clone();

        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "transport call failed");
            ApiError::from(e)
        })?;

        let outcome = resolve(&response, &self.session);
        if let Err(err) = &outcome {
            debug!(%method, %url, status = ?err.status_code, code = %err.error_code, "request failed");
        }
        outcome
    }
}
