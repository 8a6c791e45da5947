//! Turn a raw `HttpResponse` into a typed value or an `ApiError`.
//!
//! # Design
//! Only the 2xx window is success. Everything else is decoded as the
//! backend's `{errorCode, message}` payload, falling back to a generic error
//! when the body is not in that shape. A 403 carrying `expiredToken` also
//! fires the session broadcast before the error is returned. The serde
//! diagnostic for a mismatched 2xx body is logged, not returned.

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{ApiError, KnownErrorCode};
use crate::http::HttpResponse;
use crate::session::SessionEvents;

/// Emitter name attached to session broadcasts fired during resolution.
pub const SESSION_SOURCE: &str = "ApiClient";

pub fn resolve<T: DeserializeOwned>(
    response: &HttpResponse,
    session: &SessionEvents,
) -> Result<T, ApiError> {
    let Some(status) = response.status else {
        return Err(ApiError::unknown("Invalid HTTP response"));
    };
    debug!(status, bytes = response.body.len(), "resolving response");

    if (200..=299).contains(&status) {
        return serde_json::from_slice(&response.body).map_err(|e| {
            error!(status, error = %e, "response body did not match the expected type");
            ApiError::new(
                KnownErrorCode::DecodingDataError.as_str(),
                "Error decoding data",
            )
        });
    }

    let Ok(decoded) = serde_json::from_slice::<ApiError>(&response.body) else {
        return Err(ApiError::unknown("Unknown backend error").with_status(status));
    };
    let err = decoded.with_status(status);
    if status == 403 && err.is_known(KnownErrorCode::ExpiredToken) {
        session.emit(SESSION_SOURCE);
    }
    Err(err)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::error::UNKNOWN_ERROR_CODE;
    use crate::session::SessionEvent;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Employee {
        id: u32,
        name: String,
    }

    #[test]
    fn success_decodes_body() {
        let session = SessionEvents::new();
        let mut rx = session.subscribe();
        for status in [200, 201, 299] {
            let response = HttpResponse::new(status, r#"{"id":1,"name":"Ada"}"#);
            let employee: Employee = resolve(&response, &session).unwrap();
            assert_eq!(
                employee,
                Employee {
                    id: 1,
                    name: "Ada".to_string()
                }
            );
        }
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn success_with_wrong_shape_is_a_decoding_error() {
        let session = SessionEvents::new();
        let response = HttpResponse::new(200, r#"{"unexpected":true}"#);
        let err = resolve::<Employee>(&response, &session).unwrap_err();
        assert_eq!(err.status_code, None);
        assert_eq!(err.error_code, "decodingDataError");
        assert_eq!(err.message, "Error decoding data");
    }

    #[test]
    fn missing_status_is_invalid_response() {
        let response = HttpResponse {
            status: None,
            headers: Vec::new(),
            body: br#"{"id":1,"name":"Ada"}"#.to_vec(),
        };
        let err = resolve::<Employee>(&response, &SessionEvents::new()).unwrap_err();
        assert_eq!(err, ApiError::unknown("Invalid HTTP response"));
    }

    #[test]
    fn backend_error_is_taken_verbatim() {
        let response = HttpResponse::new(
            422,
            r#"{"errorCode":"weakPassword","message":"Too short"}"#,
        );
        let err = resolve::<Employee>(&response, &SessionEvents::new()).unwrap_err();
        assert_eq!(err.status_code, Some(422));
        assert_eq!(err.error_code, "weakPassword");
        assert_eq!(err.message, "Too short");
    }

    #[test]
    fn unparseable_error_body_is_unknown_backend_error() {
        let response = HttpResponse::new(404, "<html>not found</html>");
        let err = resolve::<Employee>(&response, &SessionEvents::new()).unwrap_err();
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.error_code, UNKNOWN_ERROR_CODE);
        assert_eq!(err.message, "Unknown backend error");
    }

    #[test]
    fn redirect_status_is_not_success() {
        let response = HttpResponse::new(304, r#"{"id":1,"name":"Ada"}"#);
        let err = resolve::<Employee>(&response, &SessionEvents::new()).unwrap_err();
        assert_eq!(err.status_code, Some(304));
        assert_eq!(err.message, "Unknown backend error");
    }

    #[test]
    fn expired_token_on_403_fires_broadcast_once() {
        let session = SessionEvents::new();
        let mut rx = session.subscribe();
        let response = HttpResponse::new(403, r#"{"errorCode":"expiredToken","message":"m"}"#);

        let err = resolve::<Employee>(&response, &session).unwrap_err();
        assert_eq!(err, ApiError::new("expiredToken", "m").with_status(403));
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::Terminated {
                source: SESSION_SOURCE
            }
        );
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn expired_token_on_other_status_does_not_broadcast() {
        let session = SessionEvents::new();
        let mut rx = session.subscribe();
        let response = HttpResponse::new(401, r#"{"errorCode":"expiredToken","message":"m"}"#);
        let err = resolve::<Employee>(&response, &session).unwrap_err();
        assert_eq!(err.status_code, Some(401));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn other_403_codes_do_not_broadcast() {
        let session = SessionEvents::new();
        let mut rx = session.subscribe();
        let response = HttpResponse::new(403, r#"{"errorCode":"forbidden","message":"no"}"#);
        let err = resolve::<Employee>(&response, &session).unwrap_err();
        assert_eq!(err.error_code, "forbidden");
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }
}
