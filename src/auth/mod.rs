//! Opaque bearer tokens
//!
//! Login issues a random token; the token text carries no claims. Each
//! token lives server-side with its owner and expiry, and every protected
//! handler proves the caller through the `CurrentUser` extractor.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::core::{ApiError, ApiResult, Clock};

/// Server-side record for one issued token
#[derive(Debug, Clone)]
struct IssuedToken {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

/// Issues and verifies opaque bearer tokens
#[derive(Clone)]
pub struct TokenStore {
    tokens: Arc<RwLock<HashMap<String, IssuedToken>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TokenStore {
    /// Create a store whose tokens expire `ttl_seconds` after issuance
    pub fn new(clock: Arc<dyn Clock>, ttl_seconds: i64) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            clock,
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Issue a fresh token for `user_id`, returning the token text and
    /// its expiry instant.
    pub fn issue(&self, user_id: &Uuid) -> ApiResult<(String, DateTime<Utc>)> {
        let now = self.clock.now();
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let expires_at = now + self.ttl;

        let mut tokens = self
            .tokens
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        // Dead tokens are dropped whenever a new one comes in
        tokens.retain(|_, issued| issued.expires_at > now);
        tokens.insert(
            token.clone(),
            IssuedToken {
                user_id: *user_id,
                expires_at,
            },
        );

        Ok((token, expires_at))
    }

    /// Verify a bearer token and return the owning user id
    pub fn verify(&self, token: &str) -> ApiResult<Uuid> {
        let tokens = self
            .tokens
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let issued = tokens
            .get(token)
            .ok_or_else(|| ApiError::unauthorized("Invalid bearer token"))?;

        if issued.expires_at <= self.clock.now() {
            return Err(ApiError::unauthorized("Bearer token has expired"));
        }

        Ok(issued.user_id)
    }
}

/// Identity of the caller, proven by a bearer token.
///
/// Handlers that take this extractor reject unauthenticated requests
/// with 401 before any of their own logic runs.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    /// Id of the authenticated user
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    TokenStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Authorization header is not a bearer token"))?;

        let user_id = TokenStore::from_ref(state).verify(token)?;

        Ok(CurrentUser { user_id })
    }
}
