//! Wire models for authentication

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email and password exchanged for a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsModel {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// An issued bearer token and the instant it stops working
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenModel {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
