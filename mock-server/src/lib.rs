use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Bearer token the server treats as expired.
pub const EXPIRED_TOKEN: &str = "expired";

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub password_set: bool,
}

#[derive(Deserialize)]
pub struct Password {
    pub password: String,
}

#[derive(Deserialize)]
pub struct PasswordQuery {
    pub password: Option<String>,
}

/// Error payload in the `{errorCode, message}` shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = ErrorBody {
        error_code: code.to_string(),
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

pub type Db = Arc<RwLock<HashMap<Uuid, User>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/v2/user", put(create_password))
        .route("/api/v2/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reject requests without a usable bearer token.
fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        None | Some("") => Err(error(
            StatusCode::UNAUTHORIZED,
            "missingToken",
            "Authorization required",
        )),
        Some(EXPIRED_TOKEN) => Err(error(
            StatusCode::FORBIDDEN,
            "expiredToken",
            "Session expired",
        )),
        Some(_) => Ok(()),
    }
}

async fn create_password(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<PasswordQuery>,
    Json(input): Json<Password>,
) -> Result<Json<User>, Response> {
    authorize(&headers)?;
    if query.password.as_deref() != Some(input.password.as_str()) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "passwordMismatch",
            "Query and body passwords differ",
        ));
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "weakPassword",
            "Password must be at least 8 characters",
        ));
    }

    let user = User {
        id: Uuid::new_v4(),
        password_set: true,
    };
    db.write().await.insert(user.id, user.clone());
    Ok(Json(user))
}

async fn get_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, Response> {
    authorize(&headers)?;
    let users = db.read().await;
    // Plain-text 404, not the JSON error shape.
    users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "user not found").into_response())
}
