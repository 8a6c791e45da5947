//! Sample endpoint catalog for the user API.
//!
//! These types mirror the mock-server's schema but are defined
//! independently; the integration tests catch drift between the two.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::endpoint::{json_object, Endpoint, JsonObject, QueryItem, RequestMethod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Password {
    pub password: String,
}

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub password_set: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEndpoint {
    /// `PUT /api/v2/user`, sending the password both as query and body.
    CreatePassword(Password),
    GetUser { id: Uuid },
}

impl Endpoint for UserEndpoint {
    fn path(&self) -> String {
        match self {
            UserEndpoint::CreatePassword(_) => "/api/v2/user".to_string(),
            UserEndpoint::GetUser { id } => format!("/api/v2/users/{id}"),
        }
    }

    fn method(&self) -> RequestMethod {
        match self {
            UserEndpoint::CreatePassword(_) => RequestMethod::Put,
            UserEndpoint::GetUser { .. } => RequestMethod::Get,
        }
    }

    fn query_items(&self) -> Option<Vec<QueryItem>> {
        match self {
            UserEndpoint::CreatePassword(password) => {
                Some(vec![QueryItem::new("password", &password.password)])
            }
            UserEndpoint::GetUser { .. } => None,
        }
    }

    fn body(&self) -> Result<Option<JsonObject>, serde_json::Error> {
        match self {
            UserEndpoint::CreatePassword(password) => json_object(password).map(Some),
            UserEndpoint::GetUser { .. } => Ok(None),
        }
    }

    fn mock_file(&self) -> Option<&str> {
        match self {
            UserEndpoint::CreatePassword(_) => Some("_getUserMockResponse"),
            UserEndpoint::GetUser { .. } => Some("_getUserByIdMockResponse"),
        }
    }
}
