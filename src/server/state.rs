//! Shared handler state

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::TokenStore;
use crate::core::Clock;
use crate::hateoas::LinkBuilder;
use crate::service::{CourseLibraryService, UserService};

/// Everything the handlers need, cloned cheaply per request
#[derive(Clone)]
pub struct AppState {
    /// Author and course operations
    pub library: CourseLibraryService,

    /// Credential lookups for token issuance
    pub users: UserService,

    /// Bearer token issuance and verification
    pub tokens: TokenStore,

    /// Route table used for link projection and Location headers
    pub routes: Arc<dyn LinkBuilder>,

    /// Clock the projections read the current instant from
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for TokenStore {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
