//! # Caller Identity
//!
//! Identity is established upstream. This service only reads the result:
//!
//! - `x-user-id: <uuid>` for a registered user,
//! - `x-guest-id: <uuid>` for a guest session.
//!
//! A registered user id wins when both are present. Form routes reject
//! requests carrying neither with 401; resolver routes do not extract a
//! caller at all.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bizform_core::{Caller, GuestId, UserId};

use crate::error::AppError;

/// Header carrying a registered user's id.
pub const USER_HEADER: &str = "x-user-id";
/// Header carrying a guest session id.
pub const GUEST_HEADER: &str = "x-guest-id";

/// Extractor for the calling user or guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity(pub Caller);

fn header<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, AppError> {
    match parts.headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|s| Some(s.trim()))
            .map_err(|_| AppError::Unauthorized(format!("{name} is not valid text"))),
    }
}

/// Resolve the caller from request headers.
pub fn caller_from_parts(parts: &Parts) -> Result<Caller, AppError> {
    if let Some(raw) = header(parts, USER_HEADER)? {
        let id: UserId = raw
            .parse()
            .map_err(|_| AppError::Unauthorized(format!("{USER_HEADER} is not a valid id")))?;
        return Ok(Caller::User(id));
    }
    if let Some(raw) = header(parts, GUEST_HEADER)? {
        let id: GuestId = raw
            .parse()
            .map_err(|_| AppError::Unauthorized(format!("{GUEST_HEADER} is not a valid id")))?;
        return Ok(Caller::Guest(id));
    }
    Err(AppError::Unauthorized(
        "sign in or continue as a guest to use forms".to_string(),
    ))
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_from_parts(parts).map(CallerIdentity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/v1/forms/llc");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn user_header() {
        let id = UserId::new();
        let caller = caller_from_parts(&parts(&[(USER_HEADER, &id.to_string())])).unwrap();
        assert_eq!(caller, Caller::User(id));
    }

    #[test]
    fn guest_header() {
        let id = GuestId::new();
        let caller = caller_from_parts(&parts(&[(GUEST_HEADER, &id.to_string())])).unwrap();
        assert!(caller.is_guest());
    }

    #[test]
    fn user_wins_over_guest() {
        let user = UserId::new();
        let guest = GuestId::new();
        let caller = caller_from_parts(&parts(&[
            (GUEST_HEADER, &guest.to_string()),
            (USER_HEADER, &user.to_string()),
        ]))
        .unwrap();
        assert_eq!(caller, Caller::User(user));
    }

    #[test]
    fn missing_headers_are_unauthorized() {
        let err = caller_from_parts(&parts(&[])).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn malformed_id_is_unauthorized() {
        let err = caller_from_parts(&parts(&[(USER_HEADER, "not-a-uuid")])).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
