//! Request extractors: identity, admin guard, and JSON/query bodies with problem rejections

use super::error::{map_domain_error, Problem};
use crate::contract::{Principal, StoreError};
use crate::domain::Service;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Name of the session cookie set at login
pub const SESSION_COOKIE: &str = "token";

/// Session cookie attributes
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    pub secure: bool,
    pub max_age_secs: u64,
}

impl SessionCookie {
    pub fn issue(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
            SESSION_COOKIE, token, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn clear(&self) -> String {
        format!(
            "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
            SESSION_COOKIE
        )
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn service_from(parts: &Parts) -> Result<Arc<Service>, Problem> {
    parts.extensions.get::<Arc<Service>>().cloned().ok_or_else(|| {
        tracing::error!("Service extension missing from request");
        map_domain_error(StoreError::Internal)
    })
}

/// Principal of a verified bearer token or session cookie
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let service = service_from(parts)?;

        let token = bearer_token(&parts.headers)
            .or_else(|| cookie_token(&parts.headers))
            .ok_or_else(|| {
                map_domain_error(StoreError::unauthorized("authentication required"))
            })?;

        let principal = service
            .resolve_principal(&token)
            .await
            .map_err(map_domain_error)?;
        Ok(Self(principal))
    }
}

/// Authenticated principal holding the administrator role
#[derive(Debug, Clone)]
pub struct AdminOnly(pub Principal);

impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authenticated(principal) = Authenticated::from_request_parts(parts, state).await?;
        Service::require_admin(&principal).map_err(map_domain_error)?;
        Ok(Self(principal))
    }
}

/// JSON body whose rejections are reported as problems
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                Problem::new(rejection.status(), "Invalid Request Body", rejection.body_text())
            })?;
        Ok(Self(value))
    }
}

/// Query string whose rejections are reported as problems
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                Problem::new(
                    StatusCode::BAD_REQUEST,
                    "Invalid Query",
                    rejection.body_text(),
                )
            })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_cookie_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=abc.def; other=1"),
        );
        assert_eq!(cookie_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = SessionCookie {
            secure: true,
            max_age_secs: 60,
        };
        let issued = cookie.issue("abc");
        assert!(issued.starts_with("token=abc;"));
        assert!(issued.contains("HttpOnly"));
        assert!(issued.contains("SameSite=Strict"));
        assert!(issued.contains("Max-Age=60"));
        assert!(issued.ends_with("; Secure"));
        assert!(cookie.clear().contains("Max-Age=0"));
    }
}
