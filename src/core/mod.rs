//! Core module containing the error taxonomy and injected ports

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use id::{IdProvider, SequentialIdProvider, UuidProvider};
