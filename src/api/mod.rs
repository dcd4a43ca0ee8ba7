//! HTTP API module for the garde pay engine.
//!
//! This module provides the REST API endpoints for valuing shifts and
//! recomputing a duty log against the configured grade rates.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{InterventionRequest, RecomputeRequest, ShiftRequest, ValuationRequest};
pub use response::{ApiError, ApiErrorResponse, RecomputeResponse};
pub use state::AppState;
