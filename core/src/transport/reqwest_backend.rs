//! reqwest-backed `Transport`.

use std::error::Error as StdError;
use std::fmt::Display;
use std::future::Future;
use std::io;

use async_trait::async_trait;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

use super::Transport;
use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, RequestMethod};

/// Executes requests with a shared `reqwest::Client`.
///
/// The client's read timeout is `request_timeout`. `resource_timeout` bounds
/// the whole call: every attempt is cut off at whatever is left of it. When
/// `wait_for_connectivity` is set, an attempt that failed because no network
/// path exists (unreachable network or host, interface down, name
/// resolution failure) is made again every `connectivity_poll_interval`.
/// Refused connections, TLS failures and timeouts fail at once.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .read_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("Client build error: {e}")))?;
        Ok(Self { client, config })
    }

    /// Wrap an already configured client. `config` drives the connectivity
    /// wait and the overall deadline; the client's read timeout is kept.
    pub fn from_client(client: reqwest::Client, config: TransportConfig) -> Self {
        Self { client, config }
    }

    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let mut builder = self.client.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status: Some(status),
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = with_connectivity_wait(
            &self.config,
            |e: &reqwest::Error| is_offline(e),
            || self.send_once(&request),
        )
        .await?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = ?response.status,
            "transport call completed"
        );
        Ok(response)
    }
}

/// Run `attempt` until it succeeds, fails for a reason other than being
/// offline, or `resource_timeout` runs out. Each attempt only gets the time
/// left before the deadline.
async fn with_connectivity_wait<T, E, F, Fut>(
    config: &TransportConfig,
    offline: impl Fn(&E) -> bool,
    mut attempt: F,
) -> Result<T, TransportError>
where
    E: Into<TransportError> + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let deadline = Instant::now() + config.resource_timeout;
    let poll = config.connectivity_poll_interval;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let Ok(outcome) = timeout(remaining, attempt()).await else {
            return Err(TransportError::Timeout);
        };
        match outcome {
            Ok(value) => return Ok(value),
            Err(e)
                if config.wait_for_connectivity
                    && offline(&e)
                    && Instant::now() + poll < deadline =>
            {
                warn!(error = %e, "no network path, waiting for connectivity");
                sleep(poll).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// True when the error chain says there is no network path at all.
fn is_offline(err: &(dyn StdError + 'static)) -> bool {
    let mut cause = Some(err);
    while let Some(e) = cause {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::NetworkUnreachable
                    | io::ErrorKind::HostUnreachable
                    | io::ErrorKind::NetworkDown
            ) {
                return true;
            }
        }
        // hyper-util's resolver failure.
        if e.to_string().starts_with("dns error") {
            return true;
        }
        cause = e.source();
    }
    false
}

fn to_reqwest_method(method: RequestMethod) -> reqwest::Method {
    match method {
        RequestMethod::Get => reqwest::Method::GET,
        RequestMethod::Post => reqwest::Method::POST,
        RequestMethod::Put => reqwest::Method::PUT,
        RequestMethod::Patch => reqwest::Method::PATCH,
        RequestMethod::Delete => reqwest::Method::DELETE,
    }
}
