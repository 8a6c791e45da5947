//! Materialize an `Endpoint` into an `HttpRequest`.
//!
//! # Design
//! A pure translation: no I/O, no retries, the descriptor is only read. The
//! URL is assembled from scheme, host, path and query in that order with the
//! `url` crate, which owns percent-encoding. The three fixed headers are
//! always attached; `Authorization` only when the endpoint yields a token.

use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::error::BuildError;
use crate::http::HttpRequest;

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const USE_CACHE: &str = "X-Use-Cache";
pub const AUTHORIZATION: &str = "Authorization";

const APPLICATION_JSON: &str = "application/json";

/// Translate `endpoint` into a transport request using `config` for the host
/// and bearer token.
pub fn build_request<E>(endpoint: &E, config: &ApiConfig) -> Result<HttpRequest, BuildError>
where
    E: Endpoint + ?Sized,
{
    let url = build_url(endpoint, config)?;

    let mut headers = vec![
        (ACCEPT.to_string(), APPLICATION_JSON.to_string()),
        (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
        (USE_CACHE.to_string(), "true".to_string()),
    ];
    let token = endpoint.auth_token(config);
    if !token.is_empty() {
        headers.push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
    }

    let body = match endpoint.body()? {
        Some(object) => Some(serde_json::to_vec(&object)?),
        None => None,
    };

    let request = HttpRequest {
        method: endpoint.method(),
        url: url.into(),
        headers,
        body,
    };
    debug!(method = %request.method, url = %request.url, "built request");
    Ok(request)
}

fn build_url<E>(endpoint: &E, config: &ApiConfig) -> Result<Url, BuildError>
where
    E: Endpoint + ?Sized,
{
    let host = endpoint.base_host(config);
    if host.is_empty() {
        return Err(BuildError::UrlConstruction("empty host".to_string()));
    }
    let path = endpoint.path();
    if !path.is_empty() && !path.starts_with('/') {
        return Err(BuildError::UrlConstruction(format!(
            "path must start with '/': {path}"
        )));
    }

    let mut url = Url::parse(&format!("{}://{host}", endpoint.scheme()))
        .map_err(|e| BuildError::UrlConstruction(e.to_string()))?;
    // Anything beyond an authority in the host would be silently dropped by
    // set_path below.
    if url.cannot_be_a_base()
        || url.path() != "/"
        || url.query().is_some()
        || url.fragment().is_some()
        || !url.username().is_empty()
    {
        return Err(BuildError::UrlConstruction(format!(
            "host is not a bare authority: {host}"
        )));
    }

    // http(s) URLs always carry a path, so an empty one stays "/".
    url.set_path(&path);
    if let Some(items) = endpoint.query_items().filter(|items| !items.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for item in &items {
            pairs.append_pair(&item.name, &item.value);
        }
    }
    Ok(url)
}
