//! Declarative endpoint descriptions.
//!
//! # Design
//! An API is described by an enum with one variant per operation, each
//! variant carrying its own parameters, that implements `Endpoint`. Every
//! attribute is computed per variant on demand; nothing is stored or mutated.
//! Host and token come from the `ApiConfig` passed in at build time, so
//! constructing a descriptor can never fail. Fallible work, such as turning
//! a payload into a JSON object, happens in `body()` during materialization.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ApiConfig;

pub use crate::http::RequestMethod;

/// A JSON object used as a request body.
pub type JsonObject = Map<String, Value>;

/// One `name=value` pair of a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single API operation, not yet a concrete request.
pub trait Endpoint {
    fn scheme(&self) -> &str {
        "https"
    }

    fn base_host(&self, config: &ApiConfig) -> String {
        config.base_host.clone()
    }

    /// Absolute path, starting with `/`. May embed path parameters.
    /// An empty path addresses the root, serialized as `scheme://host/`.
    fn path(&self) -> String;

    fn method(&self) -> RequestMethod;

    /// Bearer token for this operation. Empty means no `Authorization`.
    fn auth_token(&self, config: &ApiConfig) -> String {
        config.auth_token.clone()
    }

    fn query_items(&self) -> Option<Vec<QueryItem>> {
        None
    }

    fn body(&self) -> Result<Option<JsonObject>, serde_json::Error> {
        Ok(None)
    }

    /// Name of an offline fixture standing in for this operation's response.
    fn mock_file(&self) -> Option<&str> {
        None
    }
}

/// Serialize `value` into a JSON object suitable for `Endpoint::body`.
///
/// Fails when `value` cannot be serialized or serializes to anything other
/// than an object.
pub fn json_object<T: Serialize + ?Sized>(value: &T) -> Result<JsonObject, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
            "request body must be a JSON object, got {other}"
        ))),
    }
}
