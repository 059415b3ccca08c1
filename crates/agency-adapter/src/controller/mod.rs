//! Inbound HTTP adapter (axum)

mod dto;
mod error;
mod http;
mod validation;

pub use dto::{CatResponse, MissionResponse, TargetResponse};
pub use error::{ApiError, ApiResult};
pub use http::{router, AppState};
