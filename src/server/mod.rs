//! HTTP surface: state, router, and request handlers

pub mod handlers;
pub mod router;
pub mod state;

pub use router::{build_router, serve};
pub use state::AppState;
